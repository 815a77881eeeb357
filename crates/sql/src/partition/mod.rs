// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Validation of PARTITION BY clauses and of partition maintenance.
//!
//! The checker resolves the partition key to a domain first. The validator
//! then folds every boundary value into a literal of that domain, rejects
//! duplicates and verifies the shape of the partitioning. Errors are
//! collected, a validator never stops at the first one.

mod alter;

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
};

use strata_catalog::{
	Catalog, CatalogError, CatalogObjectKind,
	def::{PartitionBound, PartitionKind},
};
use strata_type::{
	Error, Result, error,
	fragment::Fragment,
	return_error,
	value::{Domain, Type, Value},
};
use tracing::{instrument, trace};

use crate::{
	ast::{Expr, ExprKind, PartitionDefinition, PartitionSpec, PartitionValues, UnaryOp},
	config::CheckerConfig,
	error::CheckError,
};

/// A boundary value after folding
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
	Value(Value),
	Null,
	MaxValue,
}

impl Bound {
	fn from_value(value: &Value) -> Self {
		if value.is_null() {
			Bound::Null
		} else {
			Bound::Value(value.clone())
		}
	}

	/// Order of range bounds, MAXVALUE above everything. NULL is unordered.
	fn compare(&self, other: &Bound) -> Option<Ordering> {
		match (self, other) {
			(Bound::MaxValue, Bound::MaxValue) => Some(Ordering::Equal),
			(Bound::MaxValue, Bound::Value(_)) => Some(Ordering::Greater),
			(Bound::Value(_), Bound::MaxValue) => Some(Ordering::Less),
			(Bound::Value(l), Bound::Value(r)) => l.compare(r),
			_ => None,
		}
	}
}

impl Display for Bound {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Bound::Value(value) => Display::fmt(value, f),
			Bound::Null => f.write_str("NULL"),
			Bound::MaxValue => f.write_str("MAXVALUE"),
		}
	}
}

/// Boundary values seen during one validation, with the partition that
/// declared them
#[derive(Debug, Default)]
pub struct SeenValues {
	entries: Vec<(Bound, String)>,
}

impl SeenValues {
	pub fn new() -> Self {
		Self::default()
	}

	/// Values of existing partitions
	pub(crate) fn from_bounds<'b>(partitions: impl Iterator<Item = (&'b str, &'b PartitionBound)>) -> Self {
		let mut seen = Self::new();
		for (name, bound) in partitions {
			match bound {
				PartitionBound::Range {
					max: Some(max),
				} => seen.entries.push((Bound::from_value(max), name.to_string())),
				PartitionBound::Range {
					max: None,
				} => seen.entries.push((Bound::MaxValue, name.to_string())),
				PartitionBound::List(values) => {
					for value in values {
						seen.entries.push((Bound::from_value(value), name.to_string()));
					}
				}
				PartitionBound::Hash => {}
			}
		}
		seen
	}

	/// Records `bound` for `partition`. Returns the partition that already
	/// holds an equal value.
	pub fn insert(&mut self, bound: Bound, partition: &str) -> Option<String> {
		if let Some((_, owner)) = self.entries.iter().find(|(seen, _)| *seen == bound) {
			return Some(owner.clone());
		}
		self.entries.push((bound, partition.to_string()));
		None
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// The single column a partition key expression references
pub fn key_column(key: &Expr) -> Result<String> {
	let names = key.column_names();
	match names.as_slice() {
		[] => return_error!(CheckError::PartitionNoColumn {
			fragment: key.fragment(),
		}),
		[column] => Ok(column.clone()),
		_ => return_error!(CheckError::PartitionMultipleColumns {
			columns: names.join(", "),
			fragment: key.fragment(),
		}),
	}
}

/// Partition keys are ordinal, temporal or character typed
pub fn check_key_type(column: &str, domain: &Domain, fragment: Fragment) -> Result<()> {
	let ty = domain.ty;
	let allowed =
		ty.is_integer() || ty.is_temporal() || matches!(ty, Type::Char | Type::Varchar | Type::NChar | Type::VarNChar);
	if !allowed {
		return_error!(CheckError::PartitionKeyType {
			column: column.to_string(),
			domain: domain.clone(),
			fragment,
		});
	}
	Ok(())
}

pub struct PartitionValidator<'a> {
	catalog: &'a dyn Catalog,
	config: &'a CheckerConfig,
}

impl<'a> PartitionValidator<'a> {
	pub fn new(catalog: &'a dyn Catalog, config: &'a CheckerConfig) -> Self {
		Self {
			catalog,
			config,
		}
	}

	/// Validates a PARTITION BY clause over a key of domain `key`. Boundary
	/// values are rewritten into literals of the key domain.
	#[instrument(name = "sql::partition::validate", level = "trace", skip_all, fields(kind = %spec.kind))]
	pub fn validate_spec(&self, spec: &mut PartitionSpec, key: &Domain) -> Vec<Error> {
		let mut errors = vec![];
		let kind = spec.kind;

		if kind == PartitionKind::Hash {
			self.validate_hash(spec, &mut errors);
			return errors;
		}

		if spec.hash_size.is_some() {
			errors.push(definition_kind(kind, "a partition count", spec.fragment.clone()));
		}
		if !spec.nodes.is_empty() {
			errors.push(definition_kind(kind, "a node list", spec.fragment.clone()));
		}

		let mut seen = SeenValues::new();
		self.validate_definitions(kind, &mut spec.partitions, key, &mut seen, &[], &mut errors);
		if kind == PartitionKind::Range {
			check_range_order(None, &spec.partitions, &mut errors);
		}
		trace!(partitions = spec.partitions.len(), values = seen.len(), errors = errors.len(), "validated partitions");
		errors
	}

	fn validate_hash(&self, spec: &PartitionSpec, errors: &mut Vec<Error>) {
		let max = self.config.max_hash_partitions;
		let size = spec.hash_size.unwrap_or(0);
		let valid_size = size >= 1 && size as usize <= max;
		if !valid_size {
			errors.push(error!(CheckError::HashSize {
				size,
				max,
				fragment: spec.fragment.clone(),
			}));
		}
		if !spec.partitions.is_empty() {
			errors.push(definition_kind(PartitionKind::Hash, "partition values", spec.partitions[0].fragment()));
		}

		let mut names: Vec<String> = vec![];
		for node in &spec.nodes {
			if names.iter().any(|n| n.eq_ignore_ascii_case(node)) {
				errors.push(error!(CheckError::DuplicateName {
					name: node.clone(),
					fragment: spec.fragment.clone(),
				}));
				continue;
			}
			names.push(node.clone());
			match self.catalog.find_node(node) {
				Ok(Some(_)) => {}
				Ok(None) => errors.push(error!(CatalogError::NotFound {
					kind: CatalogObjectKind::Node,
					name: node.clone(),
					fragment: spec.fragment.clone(),
				})),
				Err(err) => errors.push(err),
			}
		}
		if valid_size && names.len() > size as usize {
			errors.push(error!(CheckError::NodeCount {
				nodes: names.len(),
				buckets: size as usize,
				fragment: spec.fragment.clone(),
			}));
		}
	}

	/// Checks names, count and values of new partitions. `existing` names the
	/// partitions that stay next to them.
	pub(crate) fn validate_definitions(
		&self,
		kind: PartitionKind,
		definitions: &mut [PartitionDefinition],
		key: &Domain,
		seen: &mut SeenValues,
		existing: &[&str],
		errors: &mut Vec<Error>,
	) {
		let count = existing.len() + definitions.len();
		let max = self.config.max_partitions;
		if count > max {
			errors.push(error!(CheckError::PartitionCount {
				count,
				max,
				fragment: definitions.first().map(PartitionDefinition::fragment).unwrap_or_default(),
			}));
		}

		let mut names: Vec<&str> = existing.to_vec();
		for definition in definitions.iter() {
			if names.iter().any(|n| n.eq_ignore_ascii_case(&definition.name)) {
				errors.push(error!(CheckError::PartitionDuplicateName {
					name: definition.name.clone(),
					fragment: definition.fragment(),
				}));
			} else {
				names.push(&definition.name);
			}
		}

		for definition in definitions.iter_mut() {
			check_values(kind, definition, key, seen, errors);
		}
	}
}

fn check_values(
	kind: PartitionKind,
	definition: &mut PartitionDefinition,
	key: &Domain,
	seen: &mut SeenValues,
	errors: &mut Vec<Error>,
) {
	let fragment = definition.fragment();
	let name = definition.name.clone();
	let mut record = |bound: Bound, errors: &mut Vec<Error>| {
		if seen.insert(bound.clone(), &name).is_some() {
			errors.push(error!(CheckError::PartitionDuplicateValue {
				value: bound.to_string(),
				partition: name.clone(),
				fragment: fragment.clone(),
			}));
		}
	};

	match (kind, &mut definition.values) {
		(PartitionKind::Range, PartitionValues::LessThan(expr)) => match constant_bound(expr, key) {
			Ok(Bound::Null) => errors.push(definition_kind(kind, "NULL", expr.fragment())),
			Ok(bound) => record(bound, errors),
			Err(err) => errors.push(err),
		},
		(PartitionKind::List, PartitionValues::In(values)) => {
			for expr in values.iter_mut() {
				match constant_bound(expr, key) {
					Ok(Bound::MaxValue) => errors.push(definition_kind(kind, "MAXVALUE", expr.fragment())),
					Ok(bound) => record(bound, errors),
					Err(err) => errors.push(err),
				}
			}
		}
		(PartitionKind::Range, PartitionValues::In(_)) => {
			errors.push(definition_kind(kind, "VALUES IN", fragment.clone()))
		}
		(PartitionKind::List, PartitionValues::LessThan(_)) => {
			errors.push(definition_kind(kind, "VALUES LESS THAN", fragment.clone()))
		}
		(PartitionKind::Hash, _) => errors.push(definition_kind(kind, "partition values", fragment.clone())),
	}
}

/// Range bounds must increase strictly, after `previous` when given, and
/// MAXVALUE can only close the list
fn check_range_order(previous: Option<Bound>, definitions: &[PartitionDefinition], errors: &mut Vec<Error>) {
	let mut previous = previous;
	for definition in definitions {
		let Some(bound) = range_bound(definition) else {
			continue;
		};
		if let Some(prev) = &previous {
			let out_of_order = match (prev, &bound) {
				(Bound::MaxValue, Bound::MaxValue) => false,
				(Bound::MaxValue, _) => true,
				// equal bounds are reported as duplicates
				_ => prev.compare(&bound) == Some(Ordering::Greater),
			};
			if out_of_order {
				errors.push(error!(CheckError::PartitionRangeOrder {
					partition: definition.name.clone(),
					fragment: definition.fragment(),
				}));
			}
		}
		previous = Some(bound);
	}
}

/// Upper bound of a range definition whose value already folded
pub(crate) fn range_bound(definition: &PartitionDefinition) -> Option<Bound> {
	let PartitionValues::LessThan(expr) = &definition.values else {
		return None;
	};
	match &expr.kind {
		ExprKind::MaxValue => Some(Bound::MaxValue),
		ExprKind::Literal(value) => Some(Bound::from_value(value)),
		_ => None,
	}
}

/// Folds a boundary expression into a literal of the key domain
fn constant_bound(expr: &mut Expr, key: &Domain) -> Result<Bound> {
	if matches!(expr.kind, ExprKind::MaxValue) {
		expr.domain = Some(key.clone());
		return Ok(Bound::MaxValue);
	}
	let fragment = expr.fragment();
	let Some(value) = fold_constant(expr) else {
		return_error!(CheckError::PartitionValueNotConstant {
			value: expr.to_string(),
			fragment,
		});
	};
	if value.is_null() {
		expr.kind = ExprKind::Literal(Value::Null);
		expr.domain = Some(key.clone());
		return Ok(Bound::Null);
	}
	match value.coerce(key) {
		Ok(coerced) => {
			expr.kind = ExprKind::Literal(coerced.clone());
			expr.domain = Some(key.clone());
			Ok(Bound::Value(coerced))
		}
		Err(err) if err.is_overflow() => Err(error!(err.at(fragment))),
		Err(_) => return_error!(CheckError::PartitionValueType {
			value: value.to_string(),
			domain: key.clone(),
			fragment,
		}),
	}
}

fn fold_constant(expr: &Expr) -> Option<Value> {
	match &expr.kind {
		ExprKind::Literal(value) => Some(value.clone()),
		ExprKind::Unary {
			op: UnaryOp::Neg,
			operand,
		} => negate(&fold_constant(operand)?),
		ExprKind::Cast {
			operand,
			target,
		} => fold_constant(operand)?.coerce(target).ok(),
		_ => None,
	}
}

fn negate(value: &Value) -> Option<Value> {
	match value {
		Value::Null => Some(Value::Null),
		Value::SmallInt(v) => v.checked_neg().map(Value::SmallInt),
		Value::Integer(v) => v.checked_neg().map(Value::Integer),
		Value::BigInt(v) => v.checked_neg().map(Value::BigInt),
		Value::Float(v) => Some(Value::float(-v.value())),
		Value::Double(v) => Some(Value::double(-v.value())),
		Value::Numeric(v) => Some(Value::Numeric(-v.clone())),
		_ => None,
	}
}

fn definition_kind(kind: PartitionKind, definition: &'static str, fragment: Fragment) -> Error {
	error!(CheckError::PartitionDefinitionKind {
		kind: kind.to_string(),
		definition,
		fragment,
	})
}

#[cfg(test)]
mod tests {
	use strata_catalog::{MaterializedCatalog, test_utils};
	use strata_type::value::{Domain, Value};

	use super::*;
	use crate::ast::{BinaryOp, Expr, PartitionDefinition, PartitionSpec};

	fn validate(catalog: &MaterializedCatalog, spec: &mut PartitionSpec, key: &Domain) -> Vec<String> {
		let config = CheckerConfig::default();
		PartitionValidator::new(catalog, &config)
			.validate_spec(spec, key)
			.into_iter()
			.map(|err| err.code().to_string())
			.collect()
	}

	fn list(values: &[i32]) -> Vec<Expr> {
		values.iter().map(|v| Expr::literal(*v)).collect()
	}

	#[test]
	fn test_list_duplicate_value() {
		let catalog = MaterializedCatalog::new();
		let mut spec = PartitionSpec::list(Expr::column("a"), vec![
			PartitionDefinition::values_in("p1", list(&[1, 2, 3])),
			PartitionDefinition::values_in("p2", list(&[3, 4])),
		]);
		let config = CheckerConfig::default();
		let errors = PartitionValidator::new(&catalog, &config).validate_spec(&mut spec, &Domain::integer());
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].code(), "PARTITION_004");
		assert!(errors[0].message.contains("value 3"));
		assert!(errors[0].message.contains("p2"));
	}

	#[test]
	fn test_list_null_twice() {
		let catalog = MaterializedCatalog::new();
		let mut spec = PartitionSpec::list(Expr::column("a"), vec![
			PartitionDefinition::values_in("p1", vec![Expr::null()]),
			PartitionDefinition::values_in("p2", vec![Expr::null(), Expr::literal(1)]),
		]);
		assert_eq!(validate(&catalog, &mut spec, &Domain::integer()), vec!["PARTITION_004"]);
	}

	#[test]
	fn test_values_are_coerced_to_key() {
		let catalog = MaterializedCatalog::new();
		let mut spec = PartitionSpec::range(Expr::column("a"), vec![
			PartitionDefinition::less_than("p1", Expr::unary(UnaryOp::Neg, Expr::literal(5))),
			PartitionDefinition::less_than("p2", Expr::cast(Expr::literal("10"), Domain::integer())),
			PartitionDefinition::less_than("p3", Expr::max_value()),
		]);
		assert!(validate(&catalog, &mut spec, &Domain::bigint()).is_empty());
		let PartitionValues::LessThan(first) = &spec.partitions[0].values else {
			unreachable!()
		};
		assert_eq!(first.as_literal(), Some(&Value::BigInt(-5)));
	}

	#[test]
	fn test_range_must_increase() {
		let catalog = MaterializedCatalog::new();
		let mut spec = PartitionSpec::range(Expr::column("a"), vec![
			PartitionDefinition::less_than("p1", Expr::literal(10)),
			PartitionDefinition::less_than("p2", Expr::literal(5)),
		]);
		assert_eq!(validate(&catalog, &mut spec, &Domain::integer()), vec!["PARTITION_009"]);

		let mut spec = PartitionSpec::range(Expr::column("a"), vec![
			PartitionDefinition::less_than("p1", Expr::max_value()),
			PartitionDefinition::less_than("p2", Expr::literal(5)),
		]);
		assert_eq!(validate(&catalog, &mut spec, &Domain::integer()), vec!["PARTITION_009"]);

		let mut spec = PartitionSpec::range(Expr::column("a"), vec![
			PartitionDefinition::less_than("p1", Expr::max_value()),
			PartitionDefinition::less_than("p2", Expr::max_value()),
		]);
		assert_eq!(validate(&catalog, &mut spec, &Domain::integer()), vec!["PARTITION_004"]);
	}

	#[test]
	fn test_value_errors() {
		let catalog = MaterializedCatalog::new();
		let mut spec = PartitionSpec::range(Expr::column("a"), vec![
			PartitionDefinition::less_than("p1", Expr::column("b")),
			PartitionDefinition::less_than("p2", Expr::literal("abc")),
			PartitionDefinition::less_than("p3", Expr::literal(100000)),
			PartitionDefinition::less_than("p4", Expr::null()),
		]);
		assert_eq!(
			validate(&catalog, &mut spec, &Domain::smallint()),
			vec!["PARTITION_006", "PARTITION_005", "COERCE_001", "PARTITION_007"]
		);
	}

	#[test]
	fn test_definition_kind() {
		let catalog = MaterializedCatalog::new();
		let mut spec = PartitionSpec::list(Expr::column("a"), vec![
			PartitionDefinition::less_than("p1", Expr::literal(1)),
			PartitionDefinition::values_in("p2", vec![Expr::max_value()]),
		]);
		assert_eq!(validate(&catalog, &mut spec, &Domain::integer()), vec!["PARTITION_007", "PARTITION_007"]);
	}

	#[test]
	fn test_duplicate_partition_name_and_count() {
		let catalog = MaterializedCatalog::new();
		let config = CheckerConfig {
			max_partitions: 2,
			..CheckerConfig::default()
		};
		let mut spec = PartitionSpec::list(Expr::column("a"), vec![
			PartitionDefinition::values_in("p", list(&[1])),
			PartitionDefinition::values_in("P", list(&[2])),
			PartitionDefinition::values_in("q", list(&[3])),
		]);
		let codes: Vec<String> = PartitionValidator::new(&catalog, &config)
			.validate_spec(&mut spec, &Domain::integer())
			.iter()
			.map(|e| e.code().to_string())
			.collect();
		assert_eq!(codes, vec!["PARTITION_008", "PARTITION_010"]);
	}

	#[test]
	fn test_hash() {
		let catalog = MaterializedCatalog::new();
		test_utils::create_node(&catalog, "n1");
		test_utils::create_node(&catalog, "n2");

		let mut spec = PartitionSpec::hash(Expr::column("a"), 4);
		spec.nodes = vec!["n1".to_string(), "n2".to_string()];
		assert!(validate(&catalog, &mut spec, &Domain::integer()).is_empty());

		let mut spec = PartitionSpec::hash(Expr::column("a"), 0);
		assert_eq!(validate(&catalog, &mut spec, &Domain::integer()), vec!["PARTITION_011"]);

		let mut spec = PartitionSpec::hash(Expr::column("a"), 1);
		spec.nodes = vec!["n1".to_string(), "n2".to_string(), "n3".to_string()];
		assert_eq!(validate(&catalog, &mut spec, &Domain::integer()), vec!["CATALOG_002", "PARTITION_012"]);
	}

	#[test]
	fn test_key_column() {
		assert_eq!(key_column(&Expr::column("a")).unwrap(), "a");
		assert_eq!(
			key_column(&Expr::binary(BinaryOp::Mod, Expr::column("a"), Expr::literal(7))).unwrap(),
			"a"
		);
		let err = key_column(&Expr::binary(BinaryOp::Add, Expr::column("a"), Expr::column("b"))).unwrap_err();
		assert_eq!(err.code(), "PARTITION_002");
		assert!(err.message.contains("a, b"));
		let err = key_column(&Expr::literal(3)).unwrap_err();
		assert_eq!(err.code(), "PARTITION_001");
	}

	#[test]
	fn test_key_type() {
		assert!(check_key_type("a", &Domain::integer(), Fragment::None).is_ok());
		assert!(check_key_type("a", &Domain::new(Type::Date), Fragment::None).is_ok());
		assert!(check_key_type("a", &Domain::varchar(3), Fragment::None).is_ok());
		let err = check_key_type("a", &Domain::double(), Fragment::None).unwrap_err();
		assert_eq!(err.code(), "PARTITION_003");
		assert!(check_key_type("a", &Domain::new(Type::VarBit), Fragment::None).is_err());
	}

	#[test]
	fn test_seen_values() {
		let mut seen = SeenValues::new();
		assert_eq!(seen.insert(Bound::MaxValue, "p1"), None);
		assert_eq!(seen.insert(Bound::Value(Value::Integer(1)), "p1"), None);
		assert_eq!(seen.insert(Bound::MaxValue, "p2"), Some("p1".to_string()));
		assert_eq!(seen.len(), 2);
	}
}
