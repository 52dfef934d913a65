// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeSet;

use coursedb_type::{Error, Result, Secret, Username};
use serde::Serialize;

use crate::model::role::{GrantedRole, RoleGrant};

/// The administrative principal the bootstrap ensures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalSpec {
	pub username: Username,
	pub secret: Secret,
	pub roles: Vec<RoleGrant>,
}

impl PrincipalSpec {
	pub fn new(username: Username, secret: Secret, roles: Vec<RoleGrant>) -> Result<Self> {
		if roles.is_empty() {
			return Err(Error::validation(format!("principal '{}' needs at least one role", username)));
		}

		let mut seen = BTreeSet::new();
		for grant in &roles {
			if !seen.insert(grant) {
				return Err(Error::validation(format!(
					"role '{}' is listed twice for principal '{}'",
					grant, username
				)));
			}
		}

		Ok(Self {
			username,
			secret,
			roles,
		})
	}

	pub fn granted_roles(&self) -> BTreeSet<GrantedRole> {
		self.roles.iter().map(GrantedRole::from).collect()
	}
}

/// A principal as it currently exists on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalInfo {
	pub username: String,
	pub database: String,
	pub roles: BTreeSet<GrantedRole>,
}

impl PrincipalInfo {
	pub fn diff(&self, expected: &BTreeSet<GrantedRole>) -> RoleDiff {
		RoleDiff {
			missing: expected.difference(&self.roles).cloned().collect(),
			extra: self.roles.difference(expected).cloned().collect(),
		}
	}
}

/// Difference between the configured roles and the roles a principal holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleDiff {
	pub missing: Vec<GrantedRole>,
	pub extra: Vec<GrantedRole>,
}

impl RoleDiff {
	pub fn is_empty(&self) -> bool {
		self.missing.is_empty() && self.extra.is_empty()
	}

	pub fn into_error(self, username: &Username) -> Error {
		Error::RoleDrift {
			username: username.to_string(),
			missing: self.missing.iter().map(ToString::to_string).collect(),
			extra: self.extra.iter().map(ToString::to_string).collect(),
		}
	}
}
