// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::value::{Domain, Type};

/// Type both operands can be converted to without losing their meaning.
/// Symmetric. `Type::None` when no such type exists.
pub fn common_type(a: Type, b: Type) -> Type {
	if a == Type::None || b == Type::None {
		return Type::None;
	}
	if a == b {
		return a;
	}

	if a.is_unknown() && b.is_unknown() {
		return if unknown_rank(a) >= unknown_rank(b) {
			a
		} else {
			b
		};
	}
	if a.is_unknown() {
		return b;
	}
	if b.is_unknown() {
		return a;
	}

	if let (Some(ra), Some(rb)) = (a.numeric_rank(), b.numeric_rank()) {
		return if ra >= rb {
			a
		} else {
			b
		};
	}

	if a.is_string() && b.is_string() {
		return match (a.is_national(), b.is_national()) {
			(true, true) => Type::VarNChar,
			(false, false) => Type::Varchar,
			_ => Type::None,
		};
	}

	if a.is_bit() && b.is_bit() {
		return Type::VarBit;
	}

	if (a.is_string() && b.is_numeric()) || (a.is_numeric() && b.is_string()) {
		let national = a.is_national() || b.is_national();
		return if national {
			Type::VarNChar
		} else {
			Type::Varchar
		};
	}

	if a.is_temporal() && b.is_temporal() {
		return match (a, b) {
			(Type::Time, _) | (_, Type::Time) => Type::None,
			(Type::Datetime, _) | (_, Type::Datetime) => Type::Datetime,
			_ => Type::Timestamp,
		};
	}

	if a.is_string() && b.is_temporal() {
		return b;
	}
	if a.is_temporal() && b.is_string() {
		return a;
	}

	if let (Some(ra), Some(rb)) = (a.collection_rank(), b.collection_rank()) {
		return if ra >= rb {
			a
		} else {
			b
		};
	}

	Type::None
}

fn unknown_rank(ty: Type) -> u8 {
	match ty {
		Type::Maybe => 3,
		Type::Na => 2,
		_ => 1,
	}
}

/// Domain both operands can be converted to, with precision and scale
/// derived from both sides.
///
/// Exact numerics keep every fractional digit and every integer digit of
/// either side: `scale = max(s1, s2)` and
/// `precision = max(p1 - s1, p2 - s2) + scale`. When that exceeds
/// `max_precision` the scale is reduced first.
pub fn common_domain(a: &Domain, b: &Domain, max_precision: u32) -> Option<Domain> {
	let ty = common_type(a.ty, b.ty);
	if ty == Type::None {
		return None;
	}

	let domain = match ty {
		Type::Numeric => {
			let sides: Vec<&Domain> = [a, b].into_iter().filter(|d| !d.ty.is_unknown()).collect();
			let mut scale = sides.iter().map(|d| d.scale_or_default()).max().unwrap_or(0);
			let integer = sides
				.iter()
				.filter_map(|d| d.precision_or_default().map(|p| p.saturating_sub(d.scale_or_default())))
				.max()
				.unwrap_or(0);
			let mut precision = integer + scale;
			if precision > max_precision {
				let excess = precision - max_precision;
				scale = scale.saturating_sub(excess);
				precision = max_precision;
			}
			Domain::numeric(precision.max(1), scale)
		}
		ty if ty.has_precision() => {
			let mut precision = Some(0u32);
			for side in [a, b].into_iter().filter(|d| !d.ty.is_unknown()) {
				precision = match (precision, textual_length(side)) {
					(Some(current), Some(len)) => Some(current.max(len)),
					_ => None,
				};
			}
			Domain::sized(ty, precision.filter(|p| *p > 0))
		}
		Type::Object => {
			let class = match (a.class, b.class) {
				(Some(x), Some(y)) if x == y => Some(x),
				(Some(x), None) if b.ty.is_unknown() => Some(x),
				(None, Some(y)) if a.ty.is_unknown() => Some(y),
				_ => None,
			};
			Domain::object(class)
		}
		ty if ty.is_collection() => {
			let wildcard = [a, b].into_iter().any(|d| d.ty.is_collection() && d.elements.is_empty());
			let mut elements: Vec<Domain> = vec![];
			if !wildcard {
				for element in a.elements.iter().chain(b.elements.iter()) {
					if !elements.contains(element) {
						elements.push(element.clone());
					}
				}
			}
			Domain::collection(ty, elements)
		}
		ty => Domain::new(ty),
	};
	Some(domain)
}

/// Characters (or bits) needed to hold every value of the domain. `None`
/// when unbounded.
fn textual_length(domain: &Domain) -> Option<u32> {
	match domain.ty {
		ty if ty.is_string() || ty.is_bit() => domain.precision_or_default(),
		// sign plus digits
		Type::SmallInt => Some(6),
		Type::Integer => Some(11),
		Type::BigInt => Some(20),
		// sign, point and digits
		Type::Numeric => domain.precision_or_default().map(|p| p + 2),
		_ => None,
	}
}
