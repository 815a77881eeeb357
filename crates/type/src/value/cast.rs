// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::value::Type;

/// Outcome of asking whether a value of one type may be converted into
/// another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastValidity {
	Valid,
	/// The conversion makes no sense for these types
	Invalid,
	/// The conversion is meaningful but not implemented
	Unsupported,
}

impl CastValidity {
	pub fn is_valid(&self) -> bool {
		matches!(self, CastValidity::Valid)
	}
}

/// Total cast matrix over [`Type`].
pub fn check_cast(from: Type, to: Type) -> CastValidity {
	use CastValidity::*;

	if to == Type::Object {
		return Unsupported;
	}
	if from.is_unknown() {
		return Valid;
	}

	match from {
		f if f.is_numeric() => {
			if to.is_bit() || to.is_temporal() || to.is_collection() {
				Invalid
			} else {
				Valid
			}
		}
		Type::Date => {
			if to.is_numeric() || to.is_bit() || to == Type::Time || to.is_collection() {
				Invalid
			} else {
				Valid
			}
		}
		Type::Time => {
			if matches!(to, Type::Timestamp | Type::Datetime) {
				Unsupported
			} else if to.is_numeric() || to.is_bit() || to == Type::Date || to.is_collection() {
				Invalid
			} else {
				Valid
			}
		}
		Type::Timestamp | Type::Datetime => {
			if to.is_numeric() || to.is_bit() || to.is_collection() {
				Invalid
			} else {
				Valid
			}
		}
		f if f.is_bit() => {
			if to.is_numeric() || to.is_temporal() || to.is_collection() {
				Invalid
			} else {
				Valid
			}
		}
		f if f.is_string() => {
			if to.is_collection() {
				Unsupported
			} else {
				Valid
			}
		}
		f if f.is_collection() => {
			if to.is_string() {
				Unsupported
			} else if to.is_collection() || to.is_unknown() || to == Type::None {
				Valid
			} else {
				Invalid
			}
		}
		Type::Object => {
			if to.is_unknown() || to == Type::None {
				Valid
			} else {
				Invalid
			}
		}
		_ => Valid,
	}
}
