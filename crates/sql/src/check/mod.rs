// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Semantic checking of a parsed statement.
//!
//! The checker resolves names against the catalog, derives the domain of
//! every expression, inserts casts where set operations or assignments need
//! them and collects every diagnostic it can find. A statement with at least
//! one diagnostic is handed back as [`Rejected`] and must not be planned.

mod ddl;
mod dml;
mod expr;
mod order;
mod query;

use strata_catalog::{
	Catalog, CatalogError, CatalogObjectKind,
	def::{ClassDef, ClassKind},
};
use strata_type::{Error, Result, error::Diagnostic, fragment::Fragment};
use tracing::{debug, instrument};

pub(crate) use expr::Clause;

use crate::{
	ast::Statement,
	config::CheckerConfig,
	scope::{SpecId, SpecTable},
};

/// Progress of a statement through the checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckState {
	Parsed,
	NameResolved,
	TypeChecked,
	/// Type checked, and casts were synthesized into the tree
	CastInserted,
	Errored,
}

/// When a synthesized statement runs relative to the statement it was
/// derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunWhen {
	Before,
	After,
}

/// Statement synthesized by the checker, e.g. the serial behind an
/// AUTO_INCREMENT attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Companion {
	pub when: RunWhen,
	pub statement: Statement,
}

/// A statement that passed every check
#[derive(Debug, Clone, PartialEq)]
pub struct Checked {
	pub statement: Statement,
	pub companions: Vec<Companion>,
	/// FROM sources the bindings of `statement` refer to
	pub specs: SpecTable,
	pub state: CheckState,
}

impl Checked {
	pub fn before(&self) -> impl Iterator<Item = &Statement> {
		self.companions.iter().filter(|c| c.when == RunWhen::Before).map(|c| &c.statement)
	}

	pub fn after(&self) -> impl Iterator<Item = &Statement> {
		self.companions.iter().filter(|c| c.when == RunWhen::After).map(|c| &c.statement)
	}
}

/// A statement with at least one diagnostic. The tree is returned as far as
/// the checker got with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
	pub statement: Statement,
	pub diagnostics: Vec<Diagnostic>,
}

impl Rejected {
	pub fn codes(&self) -> Vec<&str> {
		self.diagnostics.iter().map(|d| d.code.as_str()).collect()
	}

	pub fn has(&self, code: &str) -> bool {
		self.diagnostics.iter().any(|d| d.code == code)
	}
}

/// Checks one statement against `catalog`
pub fn check(catalog: &dyn Catalog, config: &CheckerConfig, statement: Statement) -> std::result::Result<Checked, Rejected> {
	Checker::new(catalog, config).check(statement)
}

pub struct Checker<'a> {
	pub(crate) catalog: &'a dyn Catalog,
	pub(crate) config: &'a CheckerConfig,
	pub(crate) specs: SpecTable,
	/// FROM scopes, innermost last
	pub(crate) scopes: Vec<Vec<SpecId>>,
	diagnostics: Vec<Diagnostic>,
	companions: Vec<Companion>,
	pub(crate) casts: usize,
	state: CheckState,
}

impl<'a> Checker<'a> {
	pub fn new(catalog: &'a dyn Catalog, config: &'a CheckerConfig) -> Self {
		Self {
			catalog,
			config,
			specs: SpecTable::new(),
			scopes: vec![],
			diagnostics: vec![],
			companions: vec![],
			casts: 0,
			state: CheckState::Parsed,
		}
	}

	#[instrument(name = "sql::check", level = "debug", skip_all, fields(kind = statement.kind()))]
	pub fn check(mut self, mut statement: Statement) -> std::result::Result<Checked, Rejected> {
		if let Err(err) = self.check_statement(&mut statement) {
			self.report(err);
		}

		if !self.diagnostics.is_empty() {
			self.state = CheckState::Errored;
			debug!(diagnostics = self.diagnostics.len(), "statement rejected");
			return Err(Rejected {
				statement,
				diagnostics: self.diagnostics,
			});
		}

		self.advance(CheckState::TypeChecked);
		if self.casts > 0 {
			self.advance(CheckState::CastInserted);
		}
		debug!(state = ?self.state, casts = self.casts, companions = self.companions.len(), "statement checked");

		Ok(Checked {
			statement,
			companions: self.companions,
			specs: self.specs,
			state: self.state,
		})
	}

	fn check_statement(&mut self, statement: &mut Statement) -> Result<()> {
		match statement {
			Statement::Query(query) => self.check_query(query),
			Statement::Insert(insert) => self.check_insert(insert),
			Statement::Update(update) => self.check_update(update),
			Statement::Delete(delete) => self.check_delete(delete),
			Statement::CreateClass(create) => self.check_create_class(create),
			Statement::AlterClass(alter) => self.check_alter_class(alter),
			Statement::DropClass(drop) => self.check_drop_class(drop),
			Statement::CreateIndex(create) => self.check_create_index(create),
			Statement::AlterIndex(alter) => self.check_alter_index(alter),
			Statement::DropIndex(drop) => self.check_drop_index(drop),
			Statement::CreateSerial(create) => self.check_create_serial(create),
			Statement::AlterSerial(alter) => self.check_alter_serial(alter),
			Statement::DropSerial(drop) => self.check_drop_serial(drop),
			Statement::Rename(rename) => self.check_rename(rename),
			Statement::Grant(grant) | Statement::Revoke(grant) => self.check_grant(grant),
			Statement::CreateTrigger(create) => self.check_create_trigger(create),
			Statement::AlterTrigger(alter) => self.check_alter_trigger(alter),
			Statement::DropTrigger(drop) => self.check_drop_trigger(drop),
		}
	}

	pub(crate) fn report(&mut self, err: Error) {
		debug!(code = err.code(), "{}", err.message);
		self.diagnostics.push(err.diagnostic());
	}

	pub(crate) fn report_all(&mut self, errors: Vec<Error>) {
		for err in errors {
			self.report(err);
		}
	}

	/// Records the error of a sub-check so its siblings still run
	pub(crate) fn attempt<T>(&mut self, result: Result<T>) -> Option<T> {
		match result {
			Ok(value) => Some(value),
			Err(err) => {
				self.report(err);
				None
			}
		}
	}

	pub(crate) fn advance(&mut self, state: CheckState) {
		if state > self.state {
			self.state = state;
		}
	}

	pub(crate) fn has_errors(&self) -> bool {
		!self.diagnostics.is_empty()
	}

	pub(crate) fn diagnostic_count(&self) -> usize {
		self.diagnostics.len()
	}

	pub(crate) fn companion(&mut self, when: RunWhen, statement: Statement) {
		debug!(kind = statement.kind(), ?when, "synthesized companion statement");
		self.companions.push(Companion {
			when,
			statement,
		});
	}

	/// Runs `f` without access to the enclosing FROM scopes
	pub(crate) fn isolated<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
		let outer = std::mem::take(&mut self.scopes);
		let result = f(self);
		self.scopes = outer;
		result
	}

	/// Runs `f` inside a fresh, empty FROM scope
	pub(crate) fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
		self.scopes.push(vec![]);
		let result = f(self);
		self.scopes.pop();
		result
	}

	pub(crate) fn require_class(&self, name: &str, fragment: &Fragment) -> Result<ClassDef> {
		match self.catalog.find_class(name)? {
			Some(class) => Ok(class),
			None => Err(CatalogError::NotFound {
				kind: CatalogObjectKind::Class,
				name: name.to_string(),
				fragment: fragment.clone(),
			}
			.into()),
		}
	}
}

pub(crate) fn kind_name(kind: ClassKind) -> &'static str {
	match kind {
		ClassKind::Class => "class",
		ClassKind::View => "view",
	}
}

pub(crate) fn object_kind(kind: ClassKind) -> CatalogObjectKind {
	match kind {
		ClassKind::Class => CatalogObjectKind::Class,
		ClassKind::View => CatalogObjectKind::View,
	}
}
