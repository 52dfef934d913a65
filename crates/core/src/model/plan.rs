// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use coursedb_type::{DatabaseName, Error, Result};
use serde::{Deserialize, Serialize};

use crate::model::{collection::CollectionSpec, principal::PrincipalSpec};

/// What to do when the principal already exists with roles that differ from
/// the configured set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleDriftPolicy {
	/// Leave the existing principal untouched and report the drift.
	#[default]
	Preserve,
	/// Replace the principal's roles with exactly the configured set.
	Reconcile,
	/// Abort the bootstrap.
	Fail,
}

impl Display for RoleDriftPolicy {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			RoleDriftPolicy::Preserve => f.write_str("preserve"),
			RoleDriftPolicy::Reconcile => f.write_str("reconcile"),
			RoleDriftPolicy::Fail => f.write_str("fail"),
		}
	}
}

impl FromStr for RoleDriftPolicy {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"preserve" => Ok(RoleDriftPolicy::Preserve),
			"reconcile" => Ok(RoleDriftPolicy::Reconcile),
			"fail" => Ok(RoleDriftPolicy::Fail),
			other => Err(Error::config(format!(
				"unknown role drift policy '{}', expected preserve, reconcile or fail",
				other
			))),
		}
	}
}

/// A fully validated bootstrap. Building one is the only validation step;
/// nothing is sent to a store before it exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapPlan {
	pub admin_database: DatabaseName,
	pub principal: PrincipalSpec,
	pub target: DatabaseName,
	pub collections: CollectionSpec,
	pub role_drift: RoleDriftPolicy,
}

impl BootstrapPlan {
	pub fn new(
		admin_database: DatabaseName,
		principal: PrincipalSpec,
		target: DatabaseName,
		collections: CollectionSpec,
		role_drift: RoleDriftPolicy,
	) -> Result<Self> {
		for collection in &collections {
			collection.qualified(&target)?;
		}

		Ok(Self {
			admin_database,
			principal,
			target,
			collections,
			role_drift,
		})
	}
}
