// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bigdecimal::BigDecimal;
use strata_type::{
	error::{Diagnostic, IntoDiagnostic},
	fragment::Fragment,
};

/// Code of [`SerialError::RangeOverflow`], callers match on it to tell an
/// exhausted serial apart from a failing storage
pub const RANGE_OVERFLOW: &str = "SERIAL_001";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SerialError {
	#[error("serial `{name}` cannot advance past {bound}")]
	RangeOverflow {
		name: String,
		bound: BigDecimal,
	},

	#[error("serial `{name}` not found")]
	NotFound {
		name: String,
	},

	#[error("lock on serial `{name}` timed out")]
	LockTimeout {
		name: String,
	},

	#[error("node `{node}` holding serial `{name}` is unreachable")]
	RemoteUnavailable {
		node: String,
		name: String,
	},

	#[error("a serial request must reserve at least one value")]
	ZeroCount,

	#[error("serial storage failed: {reason}")]
	Storage {
		reason: String,
	},

	#[error("the serial cache pool is shut down")]
	ShutDown,
}

impl SerialError {
	pub fn storage(reason: impl Into<String>) -> Self {
		Self::Storage {
			reason: reason.into(),
		}
	}
}

impl IntoDiagnostic for SerialError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		let (code, label, help): (&str, &str, Option<String>) = match &self {
			SerialError::RangeOverflow {
				..
			} => (
				RANGE_OVERFLOW,
				"serial exhausted",
				Some("alter the serial to raise its bound or make it CYCLE".to_string()),
			),
			SerialError::NotFound {
				..
			} => ("SERIAL_002", "unknown serial", None),
			SerialError::LockTimeout {
				..
			} => ("SERIAL_003", "lock timeout", Some("retry the statement".to_string())),
			SerialError::RemoteUnavailable {
				node,
				..
			} => (
				"SERIAL_004",
				"remote serial unavailable",
				Some(format!("check that node `{}` is running", node)),
			),
			SerialError::ZeroCount => ("SERIAL_005", "empty reservation", None),
			SerialError::Storage {
				..
			} => ("SERIAL_006", "storage failure", None),
			SerialError::ShutDown => ("SERIAL_007", "pool shut down", None),
		};
		Diagnostic {
			code: code.to_string(),
			statement: None,
			message,
			column: None,
			fragment: Fragment::None,
			label: Some(label.to_string()),
			help,
			notes: vec![],
			cause: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use strata_type::Error;

	use super::*;

	#[test]
	fn test_range_overflow_code() {
		let err: Error = SerialError::RangeOverflow {
			name: "s".to_string(),
			bound: BigDecimal::from(10),
		}
		.into();
		assert_eq!(err.code(), RANGE_OVERFLOW);
		assert_eq!(err.message, "serial `s` cannot advance past 10");
	}

	#[test]
	fn test_codes_are_distinct() {
		let errors = [
			SerialError::RangeOverflow {
				name: "s".to_string(),
				bound: BigDecimal::from(1),
			},
			SerialError::NotFound {
				name: "s".to_string(),
			},
			SerialError::LockTimeout {
				name: "s".to_string(),
			},
			SerialError::RemoteUnavailable {
				node: "n".to_string(),
				name: "s".to_string(),
			},
			SerialError::ZeroCount,
			SerialError::storage("disk"),
			SerialError::ShutDown,
		];
		let mut codes: Vec<String> = errors.into_iter().map(|e| e.into_diagnostic().code).collect();
		codes.sort();
		codes.dedup();
		assert_eq!(codes.len(), 7);
	}
}
