// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod fragment;
pub mod value;

pub use error::{Error, Result};
pub use fragment::Fragment;
pub use value::{
	CastValidity, ClassId, CoercionError, Date, Datetime, Domain, OrderedF32, OrderedF64, Time, Timestamp, Type, Value,
	check_cast, common_domain, common_type,
};

/// Maximum number of decimal digits a NUMERIC value may carry.
pub const MAX_NUMERIC_PRECISION: u32 = 38;
