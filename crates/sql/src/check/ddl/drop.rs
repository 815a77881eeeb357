// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_catalog::CatalogError;
use strata_type::{Result, error};
use tracing::{debug, instrument};

use crate::{
	ast::DropClass,
	check::{Checker, kind_name, object_kind},
	error::CheckError,
};

impl<'a> Checker<'a> {
	#[instrument(name = "sql::check::drop_class", level = "debug", skip_all, fields(count = drop.names.len()))]
	pub(crate) fn check_drop_class(&mut self, drop: &mut DropClass) -> Result<()> {
		for (i, name) in drop.names.iter().enumerate() {
			if drop.names[..i].iter().any(|n| n.eq_ignore_ascii_case(name)) {
				self.report(error!(CheckError::DuplicateName {
					name: name.clone(),
					fragment: drop.fragment.clone(),
				}));
				continue;
			}

			let Some(class) = self.catalog.find_class(name)? else {
				if drop.if_exists {
					debug!(%name, "nothing to drop");
				} else {
					self.report(error!(CatalogError::NotFound {
						kind: object_kind(drop.kind),
						name: name.clone(),
						fragment: drop.fragment.clone(),
					}));
				}
				continue;
			};

			if class.kind != drop.kind {
				self.report(error!(CheckError::KindMismatch {
					name: class.name.clone(),
					expected: kind_name(drop.kind),
					actual: kind_name(class.kind),
					fragment: drop.fragment.clone(),
				}));
			} else if class.partition_of.is_some() {
				self.report(error!(CheckError::PartitionChild {
					name: class.name.clone(),
					fragment: drop.fragment.clone(),
				}));
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use strata_catalog::{ClassToCreate, MaterializedCatalog, test_utils};
	use strata_type::value::Domain;

	use crate::{
		ast::{DropClass, Statement},
		check::check,
		config::CheckerConfig,
	};

	fn catalog() -> MaterializedCatalog {
		let catalog = MaterializedCatalog::new();
		let t = test_utils::create_class(&catalog, "t", &[("a", Domain::integer())]);
		test_utils::create_view(&catalog, "v", &[("a", Domain::integer())], "SELECT a FROM t", &[t.id]);
		catalog
			.create_class(ClassToCreate {
				partition_of: Some(t.id),
				..ClassToCreate::class("t__p__p1", vec![])
			})
			.unwrap();
		catalog
	}

	fn codes(drop: DropClass) -> Vec<String> {
		match check(&catalog(), &CheckerConfig::default(), Statement::DropClass(drop)) {
			Ok(_) => vec![],
			Err(rejected) => rejected.codes().into_iter().map(str::to_string).collect(),
		}
	}

	#[test]
	fn test_drop() {
		assert!(codes(DropClass::classes(&["t"])).is_empty());
		assert!(codes(DropClass::views(&["v"])).is_empty());
	}

	#[test]
	fn test_kind_mismatch() {
		assert_eq!(codes(DropClass::classes(&["v"])), vec!["DDL_011"]);
		assert_eq!(codes(DropClass::views(&["t"])), vec!["DDL_011"]);
	}

	#[test]
	fn test_missing() {
		assert_eq!(codes(DropClass::classes(&["ghost", "t", "T"])), vec!["CATALOG_002", "DDL_012"]);
		let drop = DropClass {
			if_exists: true,
			..DropClass::classes(&["ghost"])
		};
		assert!(codes(drop).is_empty());
	}

	#[test]
	fn test_partition_child() {
		assert_eq!(codes(DropClass::classes(&["t__p__p1"])), vec!["DDL_013"]);
	}
}
