// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use coursedb_core::{
	BootstrapPlan, DocumentStore, Error, GrantedRole, PrincipalInfo, Result, RoleDiff, RoleDriftPolicy,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::initializer::Initializer;

/// What happened to the administrative principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PrincipalOutcome {
	Created,
	/// Existed with exactly the configured roles.
	Unchanged,
	/// Existed with other roles and was left as is.
	Drifted {
		diff: RoleDiff,
	},
	/// Existed with other roles, which were replaced by the configured set.
	Reconciled {
		diff: RoleDiff,
	},
}

impl PrincipalOutcome {
	pub fn is_noop(&self) -> bool {
		matches!(
			self,
			PrincipalOutcome::Unchanged
				| PrincipalOutcome::Drifted {
					..
				}
		)
	}
}

impl<S: DocumentStore> Initializer<S> {
	/// Creates the principal when absent. An existing principal keeps its
	/// credential; its roles are handled by the plan's drift policy.
	#[instrument(
		name = "bootstrap::ensure_principal",
		level = "debug",
		skip(self, plan),
		fields(database = %plan.admin_database, username = %plan.principal.username)
	)]
	pub async fn ensure_principal(&self, plan: &BootstrapPlan) -> Result<PrincipalOutcome> {
		let database = &plan.admin_database;
		let principal = &plan.principal;

		let existing = match self.store.find_principal(database, &principal.username).await? {
			Some(existing) => existing,
			None => match self.store.create_principal(database, principal).await {
				Ok(()) => {
					info!(roles = %describe(&principal.granted_roles()), "created principal");
					return Ok(PrincipalOutcome::Created);
				}
				Err(err) if err.is_already_exists() => {
					debug!("principal was created concurrently");
					self.store.find_principal(database, &principal.username).await?.ok_or_else(|| {
						Error::store(
							"usersInfo",
							format!(
								"principal '{}' reported as existing but not found",
								principal.username
							),
						)
					})?
				}
				Err(err) => return Err(err),
			},
		};

		self.apply_drift_policy(plan, existing).await
	}

	async fn apply_drift_policy(&self, plan: &BootstrapPlan, existing: PrincipalInfo) -> Result<PrincipalOutcome> {
		let diff = existing.diff(&plan.principal.granted_roles());
		if diff.is_empty() {
			debug!("principal exists with the configured roles");
			return Ok(PrincipalOutcome::Unchanged);
		}

		match plan.role_drift {
			RoleDriftPolicy::Preserve => {
				warn!(
					missing = %describe(&diff.missing),
					extra = %describe(&diff.extra),
					"principal exists with different roles, leaving them untouched"
				);
				Ok(PrincipalOutcome::Drifted {
					diff,
				})
			}
			RoleDriftPolicy::Reconcile => {
				self.store
					.set_principal_roles(&plan.admin_database, &plan.principal.username, &plan.principal.roles)
					.await?;
				info!(
					granted = %describe(&diff.missing),
					revoked = %describe(&diff.extra),
					"reconciled principal roles"
				);
				Ok(PrincipalOutcome::Reconciled {
					diff,
				})
			}
			RoleDriftPolicy::Fail => Err(diff.into_error(&plan.principal.username)),
		}
	}
}

fn describe<'a>(roles: impl IntoIterator<Item = &'a GrantedRole>) -> String {
	roles.into_iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
