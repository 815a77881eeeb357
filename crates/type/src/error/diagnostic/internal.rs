// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::time::{SystemTime, UNIX_EPOCH};

use crate::{error::diagnostic::Diagnostic, fragment::Fragment};

/// Creates an internal error diagnostic with source location and context
pub fn internal_with_context(
	reason: impl Into<String>,
	file: &str,
	line: u32,
	column: u32,
	function: &str,
	module_path: &str,
) -> Diagnostic {
	let reason = reason.into();

	let millis = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or_default();
	let error_id = format!(
		"ERR-{}-{}:{}",
		millis,
		file.split('/').last().unwrap_or(file).replace(".rs", ""),
		line
	);

	Diagnostic {
		code: "INTERNAL_ERROR".to_string(),
		statement: None,
		message: format!("Internal error [{}]: {}", error_id, reason),
		column: None,
		fragment: Fragment::None,
		label: Some(format!("Internal invariant violated at {}:{}:{}", file, line, column)),
		help: Some(format!(
			"This is an internal error that should never occur in normal operation.\n\
			 Location: {}:{}:{}\nFunction: {}\nModule: {}\nVersion: {}",
			file,
			line,
			column,
			function,
			module_path,
			env!("CARGO_PKG_VERSION"),
		)),
		notes: vec![
			format!("Error occurred in function: {}", function),
			"The statement tree handed to the checker is malformed".to_string(),
			format!("Error tracking ID: {}", error_id),
		],
		cause: None,
	}
}

/// Internal error without source location
pub fn internal(reason: impl Into<String>) -> Diagnostic {
	internal_with_context(reason, "unknown", 0, 0, "unknown", "unknown")
}
