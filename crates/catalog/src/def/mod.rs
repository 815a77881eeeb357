// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod class;
mod object;
mod partition;
pub mod serial;

pub use class::{AttributeDef, ClassDef, ClassKind};
pub use object::{IndexDef, NodeDef, TriggerDef, TriggerEvent, UserDef};
pub use partition::{PartitionBound, PartitionDef, PartitionInfo, PartitionKind};
pub use serial::{SerialOid, SerialRecord, SerialRow};
