// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_catalog::{CatalogError, CatalogObjectKind, def::TriggerEvent};
use strata_type::{Result, error, fragment::Fragment, return_error};
use tracing::{debug, instrument};

use crate::{
	ast::{AlterTrigger, CreateTrigger, DropTrigger},
	check::{Checker, Clause},
	error::CheckError,
};

impl<'a> Checker<'a> {
	#[instrument(name = "sql::check::create_trigger", level = "debug", skip_all, fields(name = %create.name))]
	pub(crate) fn check_create_trigger(&mut self, create: &mut CreateTrigger) -> Result<()> {
		if self.catalog.find_trigger(&create.name)?.is_some() {
			return Err(CatalogError::AlreadyExists {
				kind: CatalogObjectKind::Trigger,
				name: create.name.clone(),
				fragment: create.fragment.clone(),
			}
			.into());
		}

		let class = self.require_class(&create.class, &create.fragment)?;

		if let Some(attribute) = &create.attribute {
			if create.event != TriggerEvent::Update {
				return_error!(CheckError::TriggerAttribute {
					fragment: create.fragment.clone(),
				});
			}
			if class.attribute(attribute).is_none() {
				return Err(CatalogError::NotFound {
					kind: CatalogObjectKind::Attribute,
					name: format!("{}.{}", class.name, attribute),
					fragment: create.fragment.clone(),
				}
				.into());
			}
		}

		if let Some(condition) = &mut create.condition {
			let typed = self.scoped(|checker| {
				checker.enter_class(&class);
				checker.type_expr(condition, Clause::TriggerCondition)
			});
			self.attempt(typed);
		}
		Ok(())
	}

	pub(crate) fn check_alter_trigger(&mut self, alter: &mut AlterTrigger) -> Result<()> {
		self.require_trigger(&alter.name, &alter.fragment)?;
		debug!(name = %alter.name, active = alter.active, "trigger found");
		Ok(())
	}

	pub(crate) fn check_drop_trigger(&mut self, drop: &mut DropTrigger) -> Result<()> {
		for (i, name) in drop.names.iter().enumerate() {
			if drop.names[..i].iter().any(|n| n.eq_ignore_ascii_case(name)) {
				self.report(error!(CheckError::DuplicateName {
					name: name.clone(),
					fragment: drop.fragment.clone(),
				}));
				continue;
			}
			let found = self.require_trigger(name, &drop.fragment);
			self.attempt(found);
		}
		Ok(())
	}

	fn require_trigger(&self, name: &str, fragment: &Fragment) -> Result<()> {
		match self.catalog.find_trigger(name)? {
			Some(_) => Ok(()),
			None => Err(CatalogError::NotFound {
				kind: CatalogObjectKind::Trigger,
				name: name.to_string(),
				fragment: fragment.clone(),
			}
			.into()),
		}
	}
}

#[cfg(test)]
mod tests {
	use strata_catalog::{MaterializedCatalog, def::TriggerEvent, test_utils};
	use strata_type::{fragment::Fragment, value::Domain};

	use crate::{
		ast::{AggregateFunction, AlterTrigger, BinaryOp, CreateTrigger, DropTrigger, Expr, Statement},
		check::check,
		config::CheckerConfig,
	};

	fn catalog() -> MaterializedCatalog {
		let catalog = MaterializedCatalog::new();
		let t = test_utils::create_class(&catalog, "t", &[("a", Domain::integer()), ("b", Domain::varchar(10))]);
		test_utils::create_trigger(&catalog, "t_audit", t.id, TriggerEvent::Insert);
		catalog
	}

	fn codes(statement: Statement) -> Vec<String> {
		match check(&catalog(), &CheckerConfig::default(), statement) {
			Ok(_) => vec![],
			Err(rejected) => rejected.codes().into_iter().map(str::to_string).collect(),
		}
	}

	mod create {
		use super::*;

		#[test]
		fn test_ok() {
			let mut create = CreateTrigger::new("t_upd", "t", TriggerEvent::Update);
			create.attribute = Some("a".to_string());
			create.condition = Some(Expr::binary(BinaryOp::Gt, Expr::column("a"), Expr::literal(10)));
			assert!(codes(Statement::CreateTrigger(create)).is_empty());
		}

		#[test]
		fn test_target() {
			assert_eq!(
				codes(Statement::CreateTrigger(CreateTrigger::new("T_AUDIT", "t", TriggerEvent::Delete))),
				vec!["CATALOG_001"]
			);
			assert_eq!(
				codes(Statement::CreateTrigger(CreateTrigger::new("x", "ghost", TriggerEvent::Delete))),
				vec!["CATALOG_002"]
			);
		}

		#[test]
		fn test_attribute() {
			let mut create = CreateTrigger::new("x", "t", TriggerEvent::Insert);
			create.attribute = Some("a".to_string());
			assert_eq!(codes(Statement::CreateTrigger(create.clone())), vec!["TRIGGER_001"]);

			create.event = TriggerEvent::Update;
			create.attribute = Some("ghost".to_string());
			assert_eq!(codes(Statement::CreateTrigger(create)), vec!["CATALOG_002"]);
		}

		#[test]
		fn test_condition() {
			let mut create = CreateTrigger::new("x", "t", TriggerEvent::Insert);
			create.condition = Some(Expr::binary(
				BinaryOp::Gt,
				Expr::aggregate(AggregateFunction::Count, Expr::column("a")),
				Expr::literal(1),
			));
			assert_eq!(codes(Statement::CreateTrigger(create.clone())), vec!["AGGREGATE_001"]);

			create.condition = Some(Expr::binary(BinaryOp::Eq, Expr::column("c"), Expr::literal(1)));
			assert_eq!(codes(Statement::CreateTrigger(create)), vec!["QUERY_002"]);
		}
	}

	#[test]
	fn test_alter() {
		let alter = AlterTrigger {
			name: "t_audit".to_string(),
			active: false,
			fragment: Fragment::None,
		};
		assert!(codes(Statement::AlterTrigger(alter.clone())).is_empty());
		assert_eq!(
			codes(Statement::AlterTrigger(AlterTrigger {
				name: "ghost".to_string(),
				..alter
			})),
			vec!["CATALOG_002"]
		);
	}

	#[test]
	fn test_drop() {
		let drop = |names: &[&str]| {
			Statement::DropTrigger(DropTrigger {
				names: names.iter().map(|n| n.to_string()).collect(),
				fragment: Fragment::None,
			})
		};
		assert!(codes(drop(&["t_audit"])).is_empty());
		assert_eq!(codes(drop(&["t_audit", "ghost", "T_AUDIT"])), vec!["CATALOG_002", "DDL_012"]);
	}
}
