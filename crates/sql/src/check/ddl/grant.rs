// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_catalog::{CatalogError, CatalogObjectKind};
use strata_type::{Result, error};
use tracing::instrument;

use crate::{ast::Grant, check::Checker, error::CheckError};

impl<'a> Checker<'a> {
	/// Checks GRANT and REVOKE alike
	#[instrument(name = "sql::check::grant", level = "debug", skip_all)]
	pub(crate) fn check_grant(&mut self, grant: &mut Grant) -> Result<()> {
		for (i, privilege) in grant.privileges.iter().enumerate() {
			if grant.privileges[..i].contains(privilege) {
				self.report(error!(CheckError::DuplicatePrivilege {
					privilege: privilege.to_string(),
					fragment: grant.fragment.clone(),
				}));
			}
		}

		for (i, class) in grant.classes.iter().enumerate() {
			if grant.classes[..i].iter().any(|c| c.eq_ignore_ascii_case(class)) {
				self.report(error!(CheckError::DuplicateName {
					name: class.clone(),
					fragment: grant.fragment.clone(),
				}));
				continue;
			}
			let found = self.require_class(class, &grant.fragment);
			self.attempt(found);
		}

		for user in &grant.users {
			if self.catalog.find_user(user)?.is_none() {
				self.report(error!(CatalogError::NotFound {
					kind: CatalogObjectKind::User,
					name: user.clone(),
					fragment: grant.fragment.clone(),
				}));
			}
		}
		Ok(())
	}
}
