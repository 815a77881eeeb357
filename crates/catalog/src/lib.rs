// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use catalog::Catalog;
pub use error::{CatalogError, CatalogObjectKind};
pub use materialized::{AttributeToCreate, ClassToCreate, MaterializedCatalog};
pub use strata_type::{Error, Result};

mod catalog;
pub mod def;
mod error;
pub mod materialized;
pub mod test_utils;
