// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use strata_type::value::ClassId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDef {
	pub name: String,
	pub class: ClassId,
	pub columns: Vec<String>,
	pub unique: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerEvent {
	Insert,
	Update,
	Delete,
	Commit,
	Rollback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerDef {
	pub name: String,
	pub class: ClassId,
	pub event: TriggerEvent,
	/// Attribute watched by an UPDATE trigger
	pub attribute: Option<String>,
	pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDef {
	pub name: String,
}

/// A physical node of a distributed deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDef {
	pub name: String,
	pub host: String,
}
