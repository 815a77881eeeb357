// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Semantic checking of parsed SQL statements.
//!
//! [`check`] takes one statement tree, resolves names against a
//! [`Catalog`](strata_catalog::Catalog), derives a domain for every
//! expression and synthesizes the casts a UNION or an assignment needs. A
//! statement either comes back [`Checked`], together with any companion
//! statements it implies, or [`Rejected`] with every diagnostic found.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use check::{CheckState, Checked, Checker, Companion, Rejected, RunWhen, check};
pub use config::CheckerConfig;
pub use error::CheckError;

pub mod ast;
pub mod check;
pub mod compat;
pub mod config;
pub mod error;
pub mod partition;
pub mod scope;
