// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashSet;

use strata_catalog::{CatalogError, CatalogObjectKind};
use strata_type::{Result, error};
use tracing::{debug, instrument};

use crate::{ast::Rename, check::Checker, error::CheckError};

impl<'a> Checker<'a> {
	/// Pairs apply left to right, so `a TO b, b TO c` is valid and a name
	/// freed by an earlier pair may be taken by a later one.
	#[instrument(name = "sql::check::rename", level = "debug", skip_all, fields(pairs = rename.pairs.len()))]
	pub(crate) fn check_rename(&mut self, rename: &mut Rename) -> Result<()> {
		let mut freed: HashSet<String> = HashSet::new();
		let mut taken: HashSet<String> = HashSet::new();

		for (i, (from, to)) in rename.pairs.iter().enumerate() {
			let earlier = &rename.pairs[..i];
			let repeated = if earlier.iter().any(|(f, _)| f.eq_ignore_ascii_case(from)) {
				Some(from)
			} else if earlier.iter().any(|(_, t)| t.eq_ignore_ascii_case(to)) {
				Some(to)
			} else {
				None
			};
			if let Some(name) = repeated {
				self.report(error!(CheckError::DuplicateName {
					name: name.clone(),
					fragment: rename.fragment.clone(),
				}));
				continue;
			}

			let from_key = from.to_lowercase();
			let to_key = to.to_lowercase();

			let exists = taken.contains(&from_key)
				|| (!freed.contains(&from_key) && self.catalog.find_class(from)?.is_some());
			if !exists {
				self.report(error!(CatalogError::NotFound {
					kind: CatalogObjectKind::Class,
					name: from.clone(),
					fragment: rename.fragment.clone(),
				}));
				continue;
			}

			let occupied = taken.contains(&to_key)
				|| (!freed.contains(&to_key) && self.catalog.find_class(to)?.is_some());
			if occupied && from_key != to_key {
				self.report(error!(CatalogError::AlreadyExists {
					kind: CatalogObjectKind::Class,
					name: to.clone(),
					fragment: rename.fragment.clone(),
				}));
				continue;
			}

			taken.remove(&from_key);
			freed.insert(from_key);
			freed.remove(&to_key);
			taken.insert(to_key);
			debug!(%from, %to, "rename accepted");
		}
		Ok(())
	}
}
