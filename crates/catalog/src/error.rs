// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use strata_type::{
	error::{Diagnostic, IntoDiagnostic},
	fragment::Fragment,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogObjectKind {
	Class,
	View,
	Attribute,
	Index,
	Serial,
	Trigger,
	User,
	Node,
}

impl Display for CatalogObjectKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			CatalogObjectKind::Class => "class",
			CatalogObjectKind::View => "view",
			CatalogObjectKind::Attribute => "attribute",
			CatalogObjectKind::Index => "index",
			CatalogObjectKind::Serial => "serial",
			CatalogObjectKind::Trigger => "trigger",
			CatalogObjectKind::User => "user",
			CatalogObjectKind::Node => "node",
		};
		f.write_str(name)
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
	#[error("{kind} `{name}` already exists")]
	AlreadyExists {
		kind: CatalogObjectKind,
		name: String,
		fragment: Fragment,
	},

	#[error("{kind} `{name}` not found")]
	NotFound {
		kind: CatalogObjectKind,
		name: String,
		fragment: Fragment,
	},

	#[error("serial row is missing attribute `{attribute}`")]
	MalformedSerialRow {
		attribute: &'static str,
	},
}

impl IntoDiagnostic for CatalogError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			CatalogError::AlreadyExists {
				kind,
				name,
				fragment,
			} => Diagnostic {
				code: "CATALOG_001".to_string(),
				statement: None,
				message,
				column: None,
				fragment,
				label: Some(format!("{} already defined", kind)),
				help: Some(format!("choose a different name for the {}", kind)),
				notes: vec![format!("`{}` is already used by another {}", name, kind)],
				cause: None,
			},
			CatalogError::NotFound {
				kind,
				fragment,
				..
			} => Diagnostic {
				code: "CATALOG_002".to_string(),
				statement: None,
				message,
				column: None,
				fragment,
				label: Some(format!("unknown {}", kind)),
				help: Some(format!("make sure the {} exists and the name is spelled correctly", kind)),
				notes: vec![],
				cause: None,
			},
			CatalogError::MalformedSerialRow {
				..
			} => Diagnostic {
				code: "CATALOG_003".to_string(),
				statement: None,
				message,
				column: None,
				fragment: Fragment::None,
				label: None,
				help: None,
				notes: vec!["serial rows must carry every attribute of the serial schema".to_string()],
				cause: None,
			},
		}
	}
}
