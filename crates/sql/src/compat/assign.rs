// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_catalog::Catalog;
use strata_type::{
	Result,
	value::{ClassId, Domain, Type, check_cast},
};

/// Whether a value of domain `src` may be stored into `dest` without an
/// explicit cast.
pub fn is_assignable(catalog: &dyn Catalog, dest: &Domain, src: &Domain) -> Result<bool> {
	if src.ty == Type::None || dest.ty == Type::None {
		return Ok(false);
	}
	if src.ty.is_unknown() || dest.ty.is_unknown() {
		return Ok(true);
	}

	if dest.ty == Type::Object {
		return match src.ty {
			Type::Object => is_object_assignable(catalog, dest.class, src.class),
			_ => Ok(false),
		};
	}

	if dest.ty.is_collection() {
		return is_collection_assignable(catalog, dest, src);
	}

	if src.ty.is_object() || src.ty.is_collection() {
		return Ok(false);
	}

	if dest.ty == src.ty {
		return Ok(is_widening(dest, src));
	}

	Ok(check_cast(src.ty, dest.ty).is_valid())
}

/// Class compatibility of object domains. `None` is the wildcard class.
pub fn is_object_assignable(catalog: &dyn Catalog, dest: Option<ClassId>, src: Option<ClassId>) -> Result<bool> {
	let (Some(dest), Some(src)) = (dest, src) else {
		return Ok(true);
	};
	if dest == src || catalog.is_subclass(src, dest)? {
		return Ok(true);
	}
	// a view and the classes it is defined over stand for each other
	if catalog.is_view(dest)? && catalog.real_classes(dest)?.contains(&src) {
		return Ok(true);
	}
	if catalog.is_view(src)? && catalog.real_classes(src)?.contains(&dest) {
		return Ok(true);
	}
	Ok(false)
}

fn is_collection_assignable(catalog: &dyn Catalog, dest: &Domain, src: &Domain) -> Result<bool> {
	if dest.is_wildcard() {
		return Ok(src.ty.is_collection());
	}
	if !src.ty.is_collection() {
		return Ok(false);
	}
	match (dest.ty, src.ty) {
		(Type::Set, Type::Multiset | Type::Sequence) => return Ok(false),
		(Type::Sequence, Type::Multiset) => return Ok(false),
		_ => {}
	}

	// every source element type must be one of the destination's, without
	// coercion
	for element in &src.elements {
		let mut found = false;
		for candidate in &dest.elements {
			let matches = match (candidate.ty, element.ty) {
				(Type::Object, Type::Object) => is_object_assignable(catalog, candidate.class, element.class)?,
				(ty, other) if ty.is_collection() && other.is_collection() => {
					is_collection_assignable(catalog, candidate, element)?
				}
				(ty, other) => ty == other,
			};
			if matches {
				found = true;
				break;
			}
		}
		if !found {
			return Ok(false);
		}
	}
	Ok(true)
}

/// Same type, `dest` at least as wide as `src`
fn is_widening(dest: &Domain, src: &Domain) -> bool {
	if dest.ty == Type::Numeric {
		let (Some(dest_digits), Some(src_digits)) = (dest.integer_digits(), src.integer_digits()) else {
			return true;
		};
		return dest_digits >= src_digits && dest.scale_or_default() >= src.scale_or_default();
	}
	if !dest.ty.has_precision() {
		return true;
	}
	match (dest.precision_or_default(), src.precision_or_default()) {
		(None, _) => true,
		(Some(_), None) => false,
		(Some(d), Some(s)) => d >= s,
	}
}
