// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Read-only inspection of a deployment against a plan.

use coursedb_core::{BootstrapPlan, CollectionName, DatabaseName, DocumentStore, Result, RoleDiff, Username};
use serde::Serialize;
use tracing::{info, instrument};

use crate::initializer::Initializer;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
	pub principal: PrincipalCheck,
	pub target: DatabaseName,
	pub collections: Vec<CollectionCheck>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalCheck {
	pub username: Username,
	pub database: DatabaseName,
	pub exists: bool,
	/// Present when the principal exists.
	pub roles: Option<RoleDiff>,
	/// Present when the login check was requested.
	pub authenticated: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionCheck {
	pub name: CollectionName,
	pub exists: bool,
	pub documents: Option<u64>,
}

impl PrincipalCheck {
	pub fn is_satisfied(&self) -> bool {
		self.exists && self.roles.as_ref().is_some_and(RoleDiff::is_empty) && self.authenticated != Some(false)
	}
}

impl VerificationReport {
	pub fn is_satisfied(&self) -> bool {
		self.principal.is_satisfied() && self.collections.iter().all(|c| c.exists)
	}

	/// One line per unmet expectation.
	pub fn problems(&self) -> Vec<String> {
		let mut problems = Vec::new();
		let principal = &self.principal;

		if !principal.exists {
			problems.push(format!("principal '{}' does not exist in '{}'", principal.username, principal.database));
		}
		if let Some(diff) = principal.roles.as_ref().filter(|diff| !diff.is_empty()) {
			for role in &diff.missing {
				problems.push(format!("principal '{}' lacks role {}", principal.username, role));
			}
			for role in &diff.extra {
				problems.push(format!("principal '{}' holds unexpected role {}", principal.username, role));
			}
		}
		if principal.authenticated == Some(false) {
			problems.push(format!("principal '{}' does not authenticate with the configured secret", principal.username));
		}
		for collection in self.collections.iter().filter(|c| !c.exists) {
			problems.push(format!("collection '{}.{}' does not exist", self.target, collection.name));
		}

		problems
	}
}

impl<S: DocumentStore> Initializer<S> {
	/// Reports how far the deployment matches `plan` without changing it.
	/// With `check_login` the configured secret is tried against the server.
	#[instrument(name = "bootstrap::verify", level = "info", skip(self, plan), fields(target = %plan.target))]
	pub async fn verify(&self, plan: &BootstrapPlan, check_login: bool) -> Result<VerificationReport> {
		self.store.ping().await?;

		let database = &plan.admin_database;
		let username = &plan.principal.username;

		let existing = self.store.find_principal(database, username).await?;
		let authenticated = match (&existing, check_login) {
			(Some(_), true) => Some(self.store.authenticate(database, username, &plan.principal.secret).await?),
			(None, true) => Some(false),
			(_, false) => None,
		};
		let principal = PrincipalCheck {
			username: username.clone(),
			database: database.clone(),
			exists: existing.is_some(),
			roles: existing.map(|info| info.diff(&plan.principal.granted_roles())),
			authenticated,
		};

		let present = self.store.list_collections(&plan.target).await?;
		let mut collections = Vec::with_capacity(plan.collections.len());
		for name in &plan.collections {
			let exists = present.iter().any(|p| p == name.as_str());
			let documents = if exists {
				Some(self.store.count_documents(&plan.target, name).await?)
			} else {
				None
			};
			collections.push(CollectionCheck {
				name: name.clone(),
				exists,
				documents,
			});
		}

		let report = VerificationReport {
			principal,
			target: plan.target.clone(),
			collections,
		};
		info!(satisfied = report.is_satisfied(), "verification finished");
		Ok(report)
	}
}
