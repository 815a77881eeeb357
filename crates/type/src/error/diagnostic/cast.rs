// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{
	error::diagnostic::Diagnostic,
	fragment::Fragment,
	value::{Domain, Type},
};

/// The conversion never makes sense, e.g. NUMERIC to SET
pub fn invalid_cast(fragment: Fragment, from: &Domain, to: &Domain) -> Diagnostic {
	let label = Some(format!("cannot cast {} of type {} to {}", fragment.text(), from, to));
	Diagnostic {
		code: "CAST_001".to_string(),
		statement: None,
		message: format!("invalid cast from {} to {}", from, to),
		column: None,
		fragment,
		label,
		help: Some("remove the cast or convert the value through an intermediate type".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// The conversion is meaningful but not implemented, e.g. VARCHAR to SET
pub fn unsupported_cast(fragment: Fragment, from: &Domain, to: &Domain) -> Diagnostic {
	let label = Some(format!("cannot cast {} of type {} to {}", fragment.text(), from, to));
	let mut notes = vec![];
	if to.ty == Type::Object {
		notes.push("values are never cast to object types".to_string());
	}
	Diagnostic {
		code: "CAST_002".to_string(),
		statement: None,
		message: format!("unsupported cast from {} to {}", from, to),
		column: None,
		fragment,
		label,
		help: Some("ensure the source and target types are compatible for casting".to_string()),
		notes,
		cause: None,
	}
}

pub fn value_overflow(fragment: Fragment, value: &str, to: &Domain) -> Diagnostic {
	let label = Some(format!("value does not fit in {}", to));
	Diagnostic {
		code: "COERCE_001".to_string(),
		statement: None,
		message: format!("value {} is out of range for {}", value, to),
		column: None,
		fragment,
		label,
		help: Some("widen the target precision or use a smaller value".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn incompatible_value(fragment: Fragment, value: &str, to: &Domain) -> Diagnostic {
	let label = Some(format!("cannot be converted to {}", to));
	Diagnostic {
		code: "COERCE_002".to_string(),
		statement: None,
		message: format!("value {} is incompatible with {}", value, to),
		column: None,
		fragment,
		label,
		help: None,
		notes: vec![],
		cause: None,
	}
}
