// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// 1-based line of a fragment inside its statement text
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatementLine(pub u32);

/// 0-based column of a fragment inside its line
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatementColumn(pub u32);

/// Printable source text of a node, used to point diagnostics at the
/// offending sub-expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fragment {
	/// No fragment information available
	#[default]
	None,

	/// Fragment taken from a statement with position information
	Statement {
		text: String,
		line: StatementLine,
		column: StatementColumn,
	},

	/// Fragment produced internally, e.g. for a synthesized node
	Internal {
		text: String,
	},
}

impl Fragment {
	/// Create a statement fragment at line 1, column 0
	pub fn new(text: impl Into<String>) -> Self {
		Fragment::Statement {
			text: text.into(),
			line: StatementLine(1),
			column: StatementColumn(0),
		}
	}

	pub fn statement(text: impl Into<String>, line: u32, column: u32) -> Self {
		Fragment::Statement {
			text: text.into(),
			line: StatementLine(line),
			column: StatementColumn(column),
		}
	}

	pub fn internal(text: impl Into<String>) -> Self {
		Fragment::Internal {
			text: text.into(),
		}
	}

	pub fn text(&self) -> &str {
		match self {
			Fragment::None => "",
			Fragment::Statement {
				text,
				..
			}
			| Fragment::Internal {
				text,
			} => text,
		}
	}

	pub fn line(&self) -> StatementLine {
		match self {
			Fragment::Statement {
				line,
				..
			} => *line,
			_ => StatementLine(1),
		}
	}

	pub fn column(&self) -> StatementColumn {
		match self {
			Fragment::Statement {
				column,
				..
			} => *column,
			_ => StatementColumn(0),
		}
	}

	pub fn is_none(&self) -> bool {
		matches!(self, Fragment::None)
	}

	/// Sub-fragment starting `offset` bytes into this fragment's text.
	/// Position information is shifted accordingly for statement fragments.
	pub fn sub_fragment(&self, offset: usize, length: usize) -> Fragment {
		let text = self.text();
		let end = (offset + length).min(text.len());
		let start = offset.min(end);
		let slice = text.get(start..end).unwrap_or("").to_string();
		match self {
			Fragment::None => Fragment::None,
			Fragment::Statement {
				line,
				column,
				..
			} => Fragment::Statement {
				text: slice,
				line: *line,
				column: StatementColumn(column.0 + start as u32),
			},
			Fragment::Internal {
				..
			} => Fragment::Internal {
				text: slice,
			},
		}
	}
}

impl Display for Fragment {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.text())
	}
}

impl From<&str> for Fragment {
	fn from(value: &str) -> Self {
		Fragment::internal(value)
	}
}

impl From<String> for Fragment {
	fn from(value: String) -> Self {
		Fragment::internal(value)
	}
}
