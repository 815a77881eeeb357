// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Checks of schema statements. Shared here: attribute definitions, the
//! class scope of index filters and trigger conditions, and partition key
//! resolution.

mod alter;
mod class;
mod drop;
mod grant;
mod index;
mod rename;
mod serial;
mod trigger;

use bigdecimal::BigDecimal;
use strata_catalog::{
	CatalogError, CatalogObjectKind,
	def::{AttributeDef, ClassDef},
};
use strata_type::{
	Result,
	fragment::Fragment,
	return_error,
	value::{ClassId, Domain, Type, numeric},
};
use tracing::trace;

use crate::{
	ast::{AttributeDefinition, Expr, PartitionSpec},
	check::{Checker, Clause},
	error::CheckError,
	partition::{PartitionValidator, check_key_type, key_column},
	scope::{SpecColumn, SpecId, SpecSource},
};

/// Longest declarable character or bit string
const MAX_STRING_PRECISION: u32 = 1_073_741_823;

impl<'a> Checker<'a> {
	/// Registers `class` as a source of the innermost scope
	pub(super) fn enter_class(&mut self, class: &ClassDef) -> SpecId {
		let id = self.specs.register(Some(class.name.clone()), SpecSource::Class(class.clone()), class_columns(class));
		if let Some(scope) = self.scopes.last_mut() {
			scope.push(id);
		}
		id
	}

	/// Resolves the object class of `definition`, validates its domain and
	/// coerces its default. Every problem is reported, none stops the
	/// statement.
	pub(super) fn check_attribute_definition(&mut self, definition: &mut AttributeDefinition) {
		if let Some(class_name) = &definition.class_name {
			match self.require_class(class_name, &definition.fragment) {
				Ok(class) => definition.domain.class = Some(class.id),
				Err(err) => self.report(err),
			}
		}

		let valid = self.attempt(self.validate_domain(&definition.domain, &definition.fragment)).is_some();

		if let Some(auto_increment) = &definition.auto_increment {
			if !auto_incrementable(&definition.domain) {
				self.report(
					CheckError::AutoIncrementType {
						attribute: definition.name.clone(),
						domain: definition.domain.clone(),
						fragment: definition.fragment.clone(),
					}
					.into(),
				);
			}
			trace!(attribute = %definition.name, start = ?auto_increment.start, "auto increment attribute");
		}

		if valid && let Some(default) = &mut definition.default {
			let attribute = provisional_attribute(definition.name.clone(), definition.domain.clone(), definition.not_null);
			let result = self.isolated(|checker| {
				let src = checker.type_expr(default, Clause::Default)?;
				checker.coerce_assignment(default, &attribute, src)
			});
			self.attempt(result);
		}
	}

	pub(super) fn validate_domain(&self, domain: &Domain, fragment: &Fragment) -> Result<()> {
		let invalid = |reason: String| CheckError::InvalidPrecision {
			domain: domain.clone(),
			reason,
			fragment: fragment.clone(),
		};

		match domain.ty {
			Type::Numeric => {
				let max = self.config.max_numeric_precision;
				let precision = domain.precision_or_default().unwrap_or(max);
				if precision == 0 || precision > max {
					return_error!(invalid(format!("precision must be between 1 and {}", max)));
				}
				if domain.scale_or_default() > precision {
					return_error!(invalid("scale exceeds precision".to_string()));
				}
			}
			ty if ty.has_precision() => {
				if let Some(precision) = domain.precision
					&& (precision == 0 || precision > MAX_STRING_PRECISION)
				{
					return_error!(invalid(format!("length must be between 1 and {}", MAX_STRING_PRECISION)));
				}
			}
			ty if ty.is_collection() => {
				for element in &domain.elements {
					self.validate_domain(element, fragment)?;
				}
			}
			_ => {}
		}
		Ok(())
	}

	/// Types the key of `partition` over `columns` and validates the
	/// partitioning. Boundary values are folded into the key domain.
	pub(super) fn check_partition_spec(
		&mut self,
		class: &str,
		columns: Vec<SpecColumn>,
		partition: &mut PartitionSpec,
	) -> Result<()> {
		let key = self.partition_key(class, columns, &mut partition.key)?;
		let errors = PartitionValidator::new(self.catalog, self.config).validate_spec(partition, &key);
		self.report_all(errors);
		Ok(())
	}

	fn partition_key(&mut self, class: &str, columns: Vec<SpecColumn>, key: &mut Expr) -> Result<Domain> {
		let column = key_column(key)?;
		if !columns.iter().any(|c| c.name.eq_ignore_ascii_case(&column)) {
			return Err(CatalogError::NotFound {
				kind: CatalogObjectKind::Attribute,
				name: format!("{}.{}", class, column),
				fragment: key.fragment(),
			}
			.into());
		}

		let domain = self.isolated(|checker| {
			checker.scoped(|checker| {
				let id = checker.specs.register(Some(class.to_string()), SpecSource::Derived, columns);
				if let Some(scope) = checker.scopes.last_mut() {
					scope.push(id);
				}
				checker.type_expr(key, Clause::PartitionKey)
			})
		})?;
		check_key_type(&column, &domain, key.fragment())?;
		Ok(domain)
	}
}

/// Columns of a class being created, as the partition key sees them
pub(super) fn definition_columns(definitions: &[AttributeDefinition]) -> Vec<SpecColumn> {
	definitions
		.iter()
		.map(|definition| SpecColumn {
			name: definition.name.clone(),
			domain: definition.domain.clone(),
			attribute: None,
		})
		.collect()
}

pub(super) fn class_columns(class: &ClassDef) -> Vec<SpecColumn> {
	class
		.attributes
		.iter()
		.map(|attribute| SpecColumn {
			name: attribute.name.clone(),
			domain: attribute.domain.clone(),
			attribute: Some(attribute.clone()),
		})
		.collect()
}

/// Attribute record used to check a default before the class exists
fn provisional_attribute(name: String, domain: Domain, not_null: bool) -> AttributeDef {
	AttributeDef {
		name,
		domain,
		declared_in: ClassId(0),
		not_null,
		unique: false,
		default: None,
		auto_increment: None,
		satellite_class: None,
	}
}

fn auto_incrementable(domain: &Domain) -> bool {
	domain.ty.is_integer() || (domain.ty == Type::Numeric && domain.scale_or_default() == 0)
}

/// Largest value an AUTO_INCREMENT attribute of `domain` can hold
pub(super) fn auto_increment_max(domain: &Domain) -> Option<BigDecimal> {
	match domain.ty {
		Type::SmallInt => Some(BigDecimal::from(i16::MAX)),
		Type::Integer => Some(BigDecimal::from(i32::MAX)),
		Type::BigInt => Some(BigDecimal::from(i64::MAX)),
		Type::Numeric => {
			let precision = domain.precision_or_default()?;
			Some(BigDecimal::new(numeric::pow10(precision), 0) - BigDecimal::from(1))
		}
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_auto_increment_max() {
		assert_eq!(auto_increment_max(&Domain::smallint()), Some(BigDecimal::from(32767)));
		assert_eq!(auto_increment_max(&Domain::numeric(3, 0)), Some(BigDecimal::from(999)));
		assert_eq!(auto_increment_max(&Domain::varchar(3)), None);
	}

	#[test]
	fn test_auto_incrementable() {
		assert!(auto_incrementable(&Domain::bigint()));
		assert!(auto_incrementable(&Domain::numeric(10, 0)));
		assert!(!auto_incrementable(&Domain::numeric(10, 2)));
		assert!(!auto_incrementable(&Domain::double()));
	}
}
