// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Statement tree handed over by the parser.
//!
//! Every node owns its children. Names resolved by the checker refer to
//! their FROM source through a [`SpecId`](crate::scope::SpecId) handle into
//! a side table, never through a reference into the tree, so subtrees can be
//! cloned and spliced freely.

mod ddl;
mod dml;
mod expr;
mod partition;
mod query;
mod walk;

pub use ddl::{
	AlterAction, AlterClass, AlterIndex, AlterSerial, AlterTrigger, AttributeDefinition, AutoIncrement,
	AutoIncrementOwner, CreateClass, CreateIndex, CreateSerial, CreateTrigger, DropClass, DropIndex, DropSerial,
	DropTrigger, Grant, IndexColumn, Privilege, Rename,
};
pub use dml::{Assignment, AssignmentSource, Delete, Insert, InsertSource, Update};
pub use expr::{AggregateFunction, BinaryOp, Binding, CollectionKind, ColumnRef, Expr, ExprKind, UnaryOp};
pub use partition::{PartitionAlter, PartitionDefinition, PartitionSpec, PartitionValues};
pub use query::{Compound, FromItem, FromSource, Query, Select, SelectItem, SetOperator, SortDirection, SortKey};
pub use walk::Walk;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
	Query(Query),
	Insert(Insert),
	Update(Update),
	Delete(Delete),
	CreateClass(CreateClass),
	AlterClass(AlterClass),
	DropClass(DropClass),
	CreateIndex(CreateIndex),
	AlterIndex(AlterIndex),
	DropIndex(DropIndex),
	CreateSerial(CreateSerial),
	AlterSerial(AlterSerial),
	DropSerial(DropSerial),
	Rename(Rename),
	Grant(Grant),
	Revoke(Grant),
	CreateTrigger(CreateTrigger),
	AlterTrigger(AlterTrigger),
	DropTrigger(DropTrigger),
}

impl Statement {
	/// Statement kind as written, for logging
	pub fn kind(&self) -> &'static str {
		match self {
			Statement::Query(_) => "SELECT",
			Statement::Insert(_) => "INSERT",
			Statement::Update(_) => "UPDATE",
			Statement::Delete(_) => "DELETE",
			Statement::CreateClass(_) => "CREATE CLASS",
			Statement::AlterClass(_) => "ALTER CLASS",
			Statement::DropClass(_) => "DROP CLASS",
			Statement::CreateIndex(_) => "CREATE INDEX",
			Statement::AlterIndex(_) => "ALTER INDEX",
			Statement::DropIndex(_) => "DROP INDEX",
			Statement::CreateSerial(_) => "CREATE SERIAL",
			Statement::AlterSerial(_) => "ALTER SERIAL",
			Statement::DropSerial(_) => "DROP SERIAL",
			Statement::Rename(_) => "RENAME",
			Statement::Grant(_) => "GRANT",
			Statement::Revoke(_) => "REVOKE",
			Statement::CreateTrigger(_) => "CREATE TRIGGER",
			Statement::AlterTrigger(_) => "ALTER TRIGGER",
			Statement::DropTrigger(_) => "DROP TRIGGER",
		}
	}

	pub fn is_ddl(&self) -> bool {
		!matches!(self, Statement::Query(_) | Statement::Insert(_) | Statement::Update(_) | Statement::Delete(_))
	}
}
