// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::LazyLock;

use bigdecimal::BigDecimal;
use num_traits::{Signed, Zero};
use strata_catalog::{CatalogError, CatalogObjectKind, def::SerialRecord};
use strata_type::{
	MAX_NUMERIC_PRECISION, Result,
	fragment::Fragment,
	return_error,
	value::numeric::{integer_digit_count, pow10},
};
use tracing::{debug, instrument};

use crate::{
	ast::{AlterSerial, CreateSerial, DropSerial},
	check::Checker,
	error::CheckError,
};

/// 10^38 - 1, the widest serial bound
static SERIAL_LIMIT: LazyLock<BigDecimal> =
	LazyLock::new(|| BigDecimal::new(pow10(MAX_NUMERIC_PRECISION), 0) - BigDecimal::from(1));

/// Options as written, `None` where omitted
#[derive(Debug, Default)]
struct SerialOptions {
	start: Option<BigDecimal>,
	increment: Option<BigDecimal>,
	min: Option<BigDecimal>,
	max: Option<BigDecimal>,
	cached_num: Option<i64>,
}

#[derive(Debug, PartialEq)]
struct ResolvedSerial {
	start: BigDecimal,
	increment: BigDecimal,
	min: BigDecimal,
	max: BigDecimal,
	cached_num: i64,
}

impl<'a> Checker<'a> {
	#[instrument(name = "sql::check::create_serial", level = "debug", skip_all, fields(name = %create.name))]
	pub(crate) fn check_create_serial(&mut self, create: &mut CreateSerial) -> Result<()> {
		if self.catalog.find_serial(&create.name)?.is_some() {
			return Err(CatalogError::AlreadyExists {
				kind: CatalogObjectKind::Serial,
				name: create.name.clone(),
				fragment: create.fragment.clone(),
			}
			.into());
		}

		let resolved = resolve(
			SerialOptions {
				start: create.start.take(),
				increment: create.increment.take(),
				min: create.min.take(),
				max: create.max.take(),
				cached_num: create.cached_num,
			},
			&create.fragment,
		)?;
		debug!(start = %resolved.start, increment = %resolved.increment, "resolved serial options");
		create.start = Some(resolved.start);
		create.increment = Some(resolved.increment);
		create.min = Some(resolved.min);
		create.max = Some(resolved.max);
		create.cached_num = Some(resolved.cached_num);
		Ok(())
	}

	/// Merges the changed options with the stored serial and checks the
	/// result as a whole
	#[instrument(name = "sql::check::alter_serial", level = "debug", skip_all, fields(name = %alter.name))]
	pub(crate) fn check_alter_serial(&mut self, alter: &mut AlterSerial) -> Result<()> {
		let record = self.require_serial(&alter.name, &alter.fragment)?;
		reject_auto_increment(&record, &alter.fragment)?;

		let resolved = resolve(
			SerialOptions {
				start: alter.start.clone().or_else(|| Some(record.current_val.clone())),
				increment: alter.increment.clone().or_else(|| Some(record.increment_val.clone())),
				min: alter.min.clone().or_else(|| Some(record.min_val.clone())),
				max: alter.max.clone().or_else(|| Some(record.max_val.clone())),
				cached_num: alter.cached_num.or(Some(record.cached_num as i64)),
			},
			&alter.fragment,
		)?;
		alter.start = Some(resolved.start);
		alter.increment = Some(resolved.increment);
		alter.min = Some(resolved.min);
		alter.max = Some(resolved.max);
		alter.cached_num = Some(resolved.cached_num);
		alter.cyclic = Some(alter.cyclic.unwrap_or(record.cyclic));
		Ok(())
	}

	pub(crate) fn check_drop_serial(&mut self, drop: &mut DropSerial) -> Result<()> {
		let Some(record) = self.catalog.find_serial(&drop.name)? else {
			if drop.if_exists {
				return Ok(());
			}
			return Err(not_found(&drop.name, &drop.fragment));
		};
		reject_auto_increment(&record, &drop.fragment)
	}

	fn require_serial(&self, name: &str, fragment: &Fragment) -> Result<SerialRecord> {
		self.catalog.find_serial(name)?.ok_or_else(|| not_found(name, fragment))
	}
}

fn not_found(name: &str, fragment: &Fragment) -> strata_type::Error {
	CatalogError::NotFound {
		kind: CatalogObjectKind::Serial,
		name: name.to_string(),
		fragment: fragment.clone(),
	}
	.into()
}

/// Serials behind AUTO_INCREMENT attributes change with their attribute
fn reject_auto_increment(record: &SerialRecord, fragment: &Fragment) -> Result<()> {
	if let (Some(class), Some(attribute)) = (&record.class_name, &record.att_name) {
		return_error!(CheckError::SerialAutoIncrement {
			name: record.name.clone(),
			class: class.clone(),
			attribute: attribute.clone(),
			fragment: fragment.clone(),
		});
	}
	Ok(())
}

/// Fills omitted options and checks that they describe a usable range.
/// Defaults follow the sign of the increment: ascending serials run from 1
/// to 10^38-1 and start at the minimum, descending ones from -(10^38-1) to
/// -1 and start at the maximum.
fn resolve(options: SerialOptions, fragment: &Fragment) -> Result<ResolvedSerial> {
	for value in [&options.start, &options.increment, &options.min, &options.max].into_iter().flatten() {
		if integer_digit_count(value) > MAX_NUMERIC_PRECISION {
			return_error!(CheckError::SerialDigits {
				value: value.to_string(),
				digits: MAX_NUMERIC_PRECISION,
				fragment: fragment.clone(),
			});
		}
	}

	let increment = options.increment.unwrap_or_else(|| BigDecimal::from(1));
	if increment.is_zero() {
		return_error!(CheckError::SerialIncrementZero {
			fragment: fragment.clone(),
		});
	}

	let ascending = increment.is_positive();
	let min = options.min.unwrap_or_else(|| {
		if ascending {
			BigDecimal::from(1)
		} else {
			-SERIAL_LIMIT.clone()
		}
	});
	let max = options.max.unwrap_or_else(|| {
		if ascending {
			SERIAL_LIMIT.clone()
		} else {
			BigDecimal::from(-1)
		}
	});
	if min >= max {
		return_error!(CheckError::SerialBounds {
			min: min.to_string(),
			max: max.to_string(),
			fragment: fragment.clone(),
		});
	}

	let start = options.start.unwrap_or_else(|| if ascending { min.clone() } else { max.clone() });
	if start < min || start > max {
		return_error!(CheckError::SerialStart {
			start: start.to_string(),
			min: min.to_string(),
			max: max.to_string(),
			fragment: fragment.clone(),
		});
	}

	let span = &max - &min;
	if increment.abs() > span {
		return_error!(CheckError::SerialIncrementRange {
			increment: increment.to_string(),
			min: min.to_string(),
			max: max.to_string(),
			fragment: fragment.clone(),
		});
	}

	let cached_num = options.cached_num.unwrap_or(0);
	let values = (span.clone() / increment.abs()).with_scale(0) + BigDecimal::from(1);
	if cached_num < 0 || BigDecimal::from(cached_num) > values {
		return_error!(CheckError::SerialCache {
			cached: cached_num,
			values: values.to_string(),
			fragment: fragment.clone(),
		});
	}

	Ok(ResolvedSerial {
		start,
		increment,
		min,
		max,
		cached_num,
	})
}
