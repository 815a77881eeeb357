// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_catalog::{
	CatalogError,
	def::{ClassDef, ClassKind},
};
use strata_type::{Result, error, fragment::Fragment, value::Domain};
use tracing::{debug, instrument};

use crate::{
	ast::{AttributeDefinition, AutoIncrementOwner, CreateClass, CreateSerial, Query, Statement},
	check::{
		Checker, RunWhen,
		ddl::{auto_increment_max, definition_columns},
		kind_name, object_kind,
	},
	compat::resolve_view_columns,
	error::CheckError,
};

impl<'a> Checker<'a> {
	#[instrument(name = "sql::check::create_class", level = "debug", skip_all, fields(name = %create.name))]
	pub(crate) fn check_create_class(&mut self, create: &mut CreateClass) -> Result<()> {
		if let Some(existing) = self.catalog.find_class(&create.name)? {
			if create.if_not_exists {
				debug!(kind = kind_name(existing.kind), "class exists, nothing to do");
				return Ok(());
			}
			return Err(CatalogError::AlreadyExists {
				kind: object_kind(existing.kind),
				name: create.name.clone(),
				fragment: create.fragment.clone(),
			}
			.into());
		}

		self.check_attribute_names(&create.attributes);
		for definition in create.attributes.iter_mut() {
			self.check_attribute_definition(definition);
		}
		self.superclasses(&create.superclasses, &create.fragment);

		if create.kind == ClassKind::View {
			self.check_view_specs(create);
			if create.partition.is_some() {
				self.report(error!(CheckError::KindMismatch {
					name: create.name.clone(),
					expected: kind_name(ClassKind::Class),
					actual: kind_name(ClassKind::View),
					fragment: create.fragment.clone(),
				}));
			}
			return Ok(());
		}

		for definition in &create.attributes {
			self.auto_increment_companion(&create.name, definition);
		}

		if let Some(partition) = &mut create.partition {
			let columns = definition_columns(&create.attributes);
			let result = self.check_partition_spec(&create.name, columns, partition);
			self.attempt(result);
		}
		Ok(())
	}

	fn check_attribute_names(&mut self, definitions: &[AttributeDefinition]) {
		for (i, definition) in definitions.iter().enumerate() {
			if definitions[..i].iter().any(|d| d.name.eq_ignore_ascii_case(&definition.name)) {
				self.report(error!(CheckError::DuplicateAttribute {
					name: definition.name.clone(),
					fragment: definition.fragment.clone(),
				}));
			}
		}
	}

	/// Resolves the superclasses of a new class. Views cannot be inherited
	/// from.
	pub(super) fn superclasses(&mut self, names: &[String], fragment: &Fragment) -> Vec<ClassDef> {
		let mut resolved: Vec<ClassDef> = vec![];
		for (i, name) in names.iter().enumerate() {
			if names[..i].iter().any(|n| n.eq_ignore_ascii_case(name)) {
				self.report(error!(CheckError::DuplicateName {
					name: name.clone(),
					fragment: fragment.clone(),
				}));
				continue;
			}
			let Some(class) = self.attempt(self.require_class(name, fragment)) else {
				continue;
			};
			if class.is_view() {
				self.report(error!(CheckError::SuperclassIsView {
					name: class.name.clone(),
					fragment: fragment.clone(),
				}));
				continue;
			}
			resolved.push(class);
		}
		resolved
	}

	/// Synthesizes the serial behind an AUTO_INCREMENT attribute, created
	/// before the class itself
	pub(super) fn auto_increment_companion(&mut self, class: &str, definition: &AttributeDefinition) {
		let Some(auto_increment) = &definition.auto_increment else {
			return;
		};
		let Some(max) = auto_increment_max(&definition.domain) else {
			return;
		};

		let mut serial = CreateSerial {
			name: format!("{}_ai_{}", class, definition.name),
			start: auto_increment.start.clone(),
			increment: auto_increment.increment.clone(),
			max: Some(max),
			owner: Some(AutoIncrementOwner {
				class: class.to_string(),
				attribute: definition.name.clone(),
			}),
			fragment: definition.fragment.clone(),
			..CreateSerial::default()
		};
		let checked = self.check_create_serial(&mut serial);
		if self.attempt(checked).is_some() {
			self.companion(RunWhen::Before, Statement::CreateSerial(serial));
		}
	}

	/// Checks every query specification of a new view. A view declared
	/// without attributes takes them from its first specification.
	fn check_view_specs(&mut self, create: &mut CreateClass) {
		for (i, spec) in create.query_specs.iter_mut().enumerate() {
			let checked = self.isolated(|checker| checker.check_query(spec));
			if self.attempt(checked).is_none() {
				continue;
			}
			if i == 0 && create.attributes.is_empty() {
				create.attributes = derived_attributes(spec);
				self.check_attribute_names(&create.attributes);
				continue;
			}
			let attributes: Vec<(String, Domain)> =
				create.attributes.iter().map(|a| (a.name.clone(), a.domain.clone())).collect();
			self.view_columns(&attributes, spec);
		}
	}

	pub(super) fn view_columns(&mut self, attributes: &[(String, Domain)], spec: &mut Query) {
		match resolve_view_columns(self.catalog, attributes, spec, self.config.max_numeric_precision) {
			Ok(casts) => self.casts += casts,
			Err(errors) => self.report_all(errors),
		}
	}
}

fn derived_attributes(spec: &Query) -> Vec<AttributeDefinition> {
	spec.column_names()
		.into_iter()
		.zip(spec.column_domains())
		.map(|(name, domain)| AttributeDefinition::new(name, domain))
		.collect()
}

#[cfg(test)]
mod tests {
	use bigdecimal::BigDecimal;
	use strata_catalog::{MaterializedCatalog, test_utils};
	use strata_type::value::{Domain, Type, Value};

	use crate::{
		ast::{
			AttributeDefinition, CreateClass, Expr, ExprKind, FromItem, PartitionDefinition, PartitionSpec, Query,
			Select, SelectItem, Statement,
		},
		check::{CheckState, Checked, Rejected, check},
		config::CheckerConfig,
	};

	fn catalog() -> MaterializedCatalog {
		let catalog = MaterializedCatalog::new();
		let person =
			test_utils::create_class(&catalog, "person", &[("name", Domain::varchar(20)), ("age", Domain::integer())]);
		test_utils::create_view(
			&catalog,
			"adults",
			&[("name", Domain::varchar(20))],
			"SELECT name FROM person WHERE age >= 18",
			&[person.id],
		);
		catalog
	}

	fn run(create: CreateClass) -> Result<Checked, Rejected> {
		check(&catalog(), &CheckerConfig::default(), Statement::CreateClass(create))
	}

	fn created(checked: &Checked) -> &CreateClass {
		match &checked.statement {
			Statement::CreateClass(create) => create,
			_ => unreachable!(),
		}
	}

	fn select(columns: &[&str]) -> Query {
		Query::select(
			Select::new(columns.iter().map(|c| SelectItem::new(Expr::column(*c))).collect())
				.from(FromItem::class("person")),
		)
	}

	mod create {
		use super::*;

		#[test]
		fn test_exists() {
			let rejected = run(CreateClass::class("person", vec![])).unwrap_err();
			assert_eq!(rejected.codes(), vec!["CATALOG_001"]);

			let mut create = CreateClass::class("person", vec![]);
			create.if_not_exists = true;
			assert!(run(create).is_ok());
		}

		#[test]
		fn test_duplicate_attribute() {
			let rejected = run(CreateClass::class(
				"t",
				vec![AttributeDefinition::new("a", Domain::integer()), AttributeDefinition::new("A", Domain::double())],
			))
			.unwrap_err();
			assert_eq!(rejected.codes(), vec!["DDL_001"]);
		}

		#[test]
		fn test_precision() {
			let rejected = run(CreateClass::class(
				"t",
				vec![
					AttributeDefinition::new("a", Domain::numeric(40, 0)),
					AttributeDefinition::new("b", Domain::numeric(5, 6)),
					AttributeDefinition::new("c", Domain::varchar(0)),
					AttributeDefinition::new("d", Domain::numeric(38, 38)),
				],
			))
			.unwrap_err();
			assert_eq!(rejected.codes(), vec!["DDL_002", "DDL_002", "DDL_002"]);
		}

		#[test]
		fn test_default_is_coerced() {
			let checked = run(CreateClass::class(
				"t",
				vec![AttributeDefinition::new("a", Domain::numeric(6, 2)).default_value(Expr::literal(3))],
			))
			.unwrap();
			let default = created(&checked).attributes[0].default.as_ref().unwrap();
			assert_eq!(default.kind, ExprKind::Literal(Value::Numeric("3.00".parse().unwrap())));
			assert_eq!(default.domain, Some(Domain::numeric(6, 2)));
		}

		#[test]
		fn test_default_overflow() {
			let rejected = run(CreateClass::class(
				"t",
				vec![AttributeDefinition::new("a", Domain::smallint()).default_value(Expr::literal(100000))],
			))
			.unwrap_err();
			assert_eq!(rejected.codes(), vec!["COERCE_001"]);
		}

		#[test]
		fn test_null_default_on_not_null() {
			let rejected = run(CreateClass::class(
				"t",
				vec![AttributeDefinition::new("a", Domain::integer()).not_null().default_value(Expr::null())],
			))
			.unwrap_err();
			assert_eq!(rejected.codes(), vec!["DML_007"]);
		}

		#[test]
		fn test_object_attribute() {
			let checked = run(CreateClass::class("t", vec![AttributeDefinition::object("owner", "person")])).unwrap();
			assert!(created(&checked).attributes[0].domain.class.is_some());

			let rejected = run(CreateClass::class("t", vec![AttributeDefinition::object("owner", "ghost")])).unwrap_err();
			assert_eq!(rejected.codes(), vec!["CATALOG_002"]);
		}

		#[test]
		fn test_superclasses() {
			assert!(run(CreateClass::class("student", vec![]).under("person")).is_ok());

			let rejected = run(CreateClass::class("t", vec![]).under("adults").under("person").under("PERSON")).unwrap_err();
			assert_eq!(rejected.codes(), vec!["DDL_003", "DDL_012"]);
		}
	}

	mod auto_increment {
		use super::*;

		#[test]
		fn test_companion_serial() {
			let checked =
				run(CreateClass::class("t", vec![AttributeDefinition::new("id", Domain::integer()).auto_increment()]))
					.unwrap();
			let before: Vec<&Statement> = checked.before().collect();
			assert_eq!(before.len(), 1);
			let Statement::CreateSerial(serial) = before[0] else {
				panic!("expected CREATE SERIAL");
			};
			assert_eq!(serial.name, "t_ai_id");
			assert_eq!(serial.max, Some(BigDecimal::from(i32::MAX)));
			assert_eq!(serial.start, Some(BigDecimal::from(1)));
			assert_eq!(serial.owner.as_ref().unwrap().attribute, "id");
		}

		#[test]
		fn test_requires_integer() {
			let rejected =
				run(CreateClass::class("t", vec![AttributeDefinition::new("id", Domain::double()).auto_increment()]))
					.unwrap_err();
			assert_eq!(rejected.codes(), vec!["DDL_006"]);
		}
	}

	mod view {
		use super::*;

		#[test]
		fn test_attributes_from_first_spec() {
			let checked = run(CreateClass::view("v", vec![], vec![select(&["name", "age"])])).unwrap();
			let names: Vec<&str> = created(&checked).attributes.iter().map(|a| a.name.as_str()).collect();
			assert_eq!(names, vec!["name", "age"]);
		}

		#[test]
		fn test_arity() {
			let rejected = run(CreateClass::view(
				"v",
				vec![AttributeDefinition::new("name", Domain::varchar(20))],
				vec![select(&["name", "age"])],
			))
			.unwrap_err();
			assert_eq!(rejected.codes(), vec!["DDL_007"]);
		}

		#[test]
		fn test_casts_to_attribute_domain() {
			let checked = run(CreateClass::view(
				"v",
				vec![AttributeDefinition::new("n", Domain::varchar(10))],
				vec![select(&["name"])],
			))
			.unwrap();
			assert_eq!(checked.state, CheckState::CastInserted);
			let Query::Select(select) = &created(&checked).query_specs[0] else {
				unreachable!()
			};
			assert!(matches!(select.list[0].expr.kind, ExprKind::Cast { .. }));
		}

		#[test]
		fn test_incompatible() {
			let rejected = run(CreateClass::view(
				"v",
				vec![AttributeDefinition::new("n", Domain::new(Type::Date))],
				vec![select(&["age"])],
			))
			.unwrap_err();
			assert_eq!(rejected.codes(), vec!["DDL_008"]);
		}

		#[test]
		fn test_partitioned_view() {
			let create = CreateClass::view("v", vec![], vec![select(&["age"])])
				.partition(PartitionSpec::hash(Expr::column("age"), 4));
			assert_eq!(run(create).unwrap_err().codes(), vec!["DDL_011"]);
		}
	}

	mod partition {
		use super::*;

		fn class() -> CreateClass {
			CreateClass::class(
				"t",
				vec![AttributeDefinition::new("a", Domain::integer()), AttributeDefinition::new("b", Domain::double())],
			)
		}

		#[test]
		fn test_range() {
			let create = class().partition(PartitionSpec::range(
				Expr::column("a"),
				vec![
					PartitionDefinition::less_than("p1", Expr::literal(10)),
					PartitionDefinition::less_than("p2", Expr::max_value()),
				],
			));
			assert!(run(create).is_ok());
		}

		#[test]
		fn test_unknown_key() {
			let create = class().partition(PartitionSpec::hash(Expr::column("c"), 4));
			assert_eq!(run(create).unwrap_err().codes(), vec!["CATALOG_002"]);
		}

		#[test]
		fn test_key_type() {
			let create = class().partition(PartitionSpec::hash(Expr::column("b"), 4));
			assert_eq!(run(create).unwrap_err().codes(), vec!["PARTITION_003"]);
		}

		#[test]
		fn test_values_reported_together() {
			let create = class().partition(PartitionSpec::list(
				Expr::column("a"),
				vec![
					PartitionDefinition::values_in("p1", vec![Expr::literal(1), Expr::literal(2)]),
					PartitionDefinition::values_in("p1", vec![Expr::literal(2)]),
				],
			));
			assert_eq!(run(create).unwrap_err().codes(), vec!["PARTITION_010", "PARTITION_004"]);
		}
	}
}
