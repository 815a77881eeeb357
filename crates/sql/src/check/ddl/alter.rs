// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_catalog::{
	CatalogError, CatalogObjectKind,
	def::{AttributeDef, ClassDef, ClassKind},
};
use strata_type::{Result, error, fragment::Fragment, return_error, value::Domain};
use tracing::{debug, instrument};

use crate::{
	ast::{AlterAction, AlterClass, AttributeDefinition, DropClass, DropSerial, PartitionAlter, Query, Statement},
	check::{Checker, RunWhen, ddl::class_columns, kind_name},
	error::CheckError,
	partition::PartitionValidator,
};

impl<'a> Checker<'a> {
	#[instrument(name = "sql::check::alter_class", level = "debug", skip_all, fields(name = %alter.name))]
	pub(crate) fn check_alter_class(&mut self, alter: &mut AlterClass) -> Result<()> {
		let class = self.require_class(&alter.name, &alter.fragment)?;
		let fragment = alter.fragment.clone();
		for action in alter.actions.iter_mut() {
			let result = self.check_alter_action(&class, action, &fragment);
			self.attempt(result);
		}
		Ok(())
	}

	fn check_alter_action(&mut self, class: &ClassDef, action: &mut AlterAction, fragment: &Fragment) -> Result<()> {
		match action {
			AlterAction::AddAttribute(definition) => {
				if class.attribute(&definition.name).is_some() {
					return_error!(CheckError::DuplicateAttribute {
						name: definition.name.clone(),
						fragment: definition.fragment.clone(),
					});
				}
				self.check_attribute_definition(definition);
				if !class.is_view() {
					self.auto_increment_companion(&class.name, definition);
				}
				Ok(())
			}
			AlterAction::DropAttributes(names) => self.drop_attributes(class, names, fragment),
			AlterAction::ChangeAttribute {
				name,
				definition,
			} => self.change_attribute(class, name, definition, fragment),
			AlterAction::RenameAttribute {
				from,
				to,
			} => {
				self.owned_attribute(class, from, fragment)?;
				if !from.eq_ignore_ascii_case(to) && class.attribute(to).is_some() {
					return_error!(CheckError::DuplicateAttribute {
						name: to.clone(),
						fragment: fragment.clone(),
					});
				}
				Ok(())
			}
			AlterAction::AddQuerySpec(spec) => {
				require_view(class, fragment)?;
				self.add_query_spec(class, spec)
			}
			AlterAction::DropQuerySpec(position) => {
				require_view(class, fragment)?;
				let count = class.query_specs.len();
				if *position == 0 || *position > count {
					return_error!(CheckError::QuerySpecRange {
						position: *position,
						count,
						fragment: fragment.clone(),
					});
				}
				if count == 1 {
					return_error!(CheckError::LastQuerySpec {
						view: class.name.clone(),
						fragment: fragment.clone(),
					});
				}
				Ok(())
			}
			AlterAction::AddSuperclasses(names) => {
				for superclass in self.superclasses(names, fragment) {
					if class.superclasses.contains(&superclass.id) {
						self.report(error!(CheckError::AlreadySuperclass {
							class: class.name.clone(),
							superclass: superclass.name.clone(),
							fragment: fragment.clone(),
						}));
					}
				}
				Ok(())
			}
			AlterAction::DropSuperclasses(names) => {
				for name in names.iter() {
					let Some(superclass) = self.attempt(self.require_class(name, fragment)) else {
						continue;
					};
					if !class.superclasses.contains(&superclass.id) {
						self.report(error!(CheckError::NotSuperclass {
							class: class.name.clone(),
							superclass: superclass.name.clone(),
							fragment: fragment.clone(),
						}));
					}
				}
				Ok(())
			}
			AlterAction::Partition(partition) => self.alter_partition(class, partition, fragment),
		}
	}

	/// Attributes dropped with their AUTO_INCREMENT serial and satellite
	/// class, both removed after the attribute
	fn drop_attributes(&mut self, class: &ClassDef, names: &[String], fragment: &Fragment) -> Result<()> {
		for (i, name) in names.iter().enumerate() {
			if names[..i].iter().any(|n| n.eq_ignore_ascii_case(name)) {
				self.report(error!(CheckError::DuplicateName {
					name: name.clone(),
					fragment: fragment.clone(),
				}));
				continue;
			}
			let Some(attribute) = self.attempt(self.owned_attribute(class, name, fragment)) else {
				continue;
			};
			if let Some(info) = &class.partition
				&& info.key.eq_ignore_ascii_case(&attribute.name)
			{
				self.report(error!(CheckError::PartitionKeyAttribute {
					attribute: attribute.name.clone(),
					class: class.name.clone(),
					fragment: fragment.clone(),
				}));
				continue;
			}

			if let Some(serial) = &attribute.auto_increment {
				self.companion(
					RunWhen::After,
					Statement::DropSerial(DropSerial {
						name: serial.clone(),
						if_exists: true,
						fragment: fragment.clone(),
					}),
				);
			}
			if let Some(satellite) = attribute.satellite_class
				&& let Some(satellite) = self.catalog.get_class(satellite)?
			{
				self.companion(
					RunWhen::After,
					Statement::DropClass(DropClass {
						kind: ClassKind::Class,
						names: vec![satellite.name],
						if_exists: true,
						fragment: fragment.clone(),
					}),
				);
			}
		}
		Ok(())
	}

	fn change_attribute(
		&mut self,
		class: &ClassDef,
		name: &str,
		definition: &mut AttributeDefinition,
		fragment: &Fragment,
	) -> Result<()> {
		let attribute = self.owned_attribute(class, name, fragment)?;
		if !definition.name.eq_ignore_ascii_case(name) && class.attribute(&definition.name).is_some() {
			return_error!(CheckError::DuplicateAttribute {
				name: definition.name.clone(),
				fragment: definition.fragment.clone(),
			});
		}
		self.check_attribute_definition(definition);

		if let Some(info) = &class.partition
			&& info.key.eq_ignore_ascii_case(name)
			&& !definition.domain.same_parameters(&attribute.domain)
		{
			return_error!(CheckError::PartitionKeyAttribute {
				attribute: attribute.name,
				class: class.name.clone(),
				fragment: fragment.clone(),
			});
		}
		if attribute.auto_increment.is_none() && !class.is_view() {
			self.auto_increment_companion(&class.name, definition);
		}
		Ok(())
	}

	/// Attribute `name` of `class`, declared by `class` itself
	fn owned_attribute(&self, class: &ClassDef, name: &str, fragment: &Fragment) -> Result<AttributeDef> {
		let Some(attribute) = class.attribute(name) else {
			return Err(CatalogError::NotFound {
				kind: CatalogObjectKind::Attribute,
				name: format!("{}.{}", class.name, name),
				fragment: fragment.clone(),
			}
			.into());
		};
		if attribute.declared_in != class.id {
			let owner = self
				.catalog
				.get_class(attribute.declared_in)?
				.map(|owner| owner.name)
				.unwrap_or_else(|| attribute.declared_in.to_string());
			return_error!(CheckError::AttributeNotOwned {
				attribute: attribute.name.clone(),
				class: class.name.clone(),
				owner,
				fragment: fragment.clone(),
			});
		}
		Ok(attribute.clone())
	}

	fn add_query_spec(&mut self, view: &ClassDef, spec: &mut Query) -> Result<()> {
		self.isolated(|checker| checker.check_query(spec))?;
		let attributes: Vec<(String, Domain)> =
			view.attributes.iter().map(|a| (a.name.clone(), a.domain.clone())).collect();
		self.view_columns(&attributes, spec);
		Ok(())
	}

	fn alter_partition(&mut self, class: &ClassDef, partition: &mut PartitionAlter, fragment: &Fragment) -> Result<()> {
		if class.is_view() {
			return_error!(CheckError::KindMismatch {
				name: class.name.clone(),
				expected: kind_name(ClassKind::Class),
				actual: kind_name(ClassKind::View),
				fragment: fragment.clone(),
			});
		}

		let errors = PartitionValidator::new(self.catalog, self.config).validate_alter(class, partition, fragment);
		if !errors.is_empty() {
			self.report_all(errors);
			return Ok(());
		}
		if let PartitionAlter::Apply(spec) = partition {
			debug!(kind = %spec.kind, "partitioning existing class");
			self.check_partition_spec(&class.name, class_columns(class), spec)?;
		}
		Ok(())
	}
}

fn require_view(class: &ClassDef, fragment: &Fragment) -> Result<()> {
	if !class.is_view() {
		return_error!(CheckError::KindMismatch {
			name: class.name.clone(),
			expected: kind_name(ClassKind::View),
			actual: kind_name(class.kind),
			fragment: fragment.clone(),
		});
	}
	Ok(())
}
