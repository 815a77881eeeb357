// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod assign;
mod union;

pub use assign::{is_assignable, is_object_assignable};
pub(crate) use union::coerce_literal;
pub use union::{
	Compatibility, UnionContext, UnionResolution, cast_column, resolve_union, resolve_view_columns, union_compatible,
};
