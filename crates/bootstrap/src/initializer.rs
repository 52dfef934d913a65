// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use coursedb_core::{
	BootstrapPlan, CollectionSpec, DatabaseName, DocumentStore, PrincipalSpec, Result, RoleDriftPolicy,
};
use tracing::{info, instrument};

use crate::{
	listener::BootstrapListener,
	report::{BootstrapReport, PrincipalReport},
};

/// Runs bootstrap plans against a store. Holds no state between runs.
pub struct Initializer<S> {
	pub(crate) store: S,
	pub(crate) listeners: Vec<Box<dyn BootstrapListener>>,
}

impl<S: DocumentStore> Initializer<S> {
	pub fn new(store: S) -> Self {
		Self {
			store,
			listeners: Vec::new(),
		}
	}

	pub fn with_listener(mut self, listener: impl BootstrapListener + 'static) -> Self {
		self.listeners.push(Box::new(listener));
		self
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	/// Ensures the principal, then the collections. Nothing is rolled back
	/// on failure; a re-run picks up where the failed one stopped.
	#[instrument(
		name = "bootstrap::initialize",
		level = "info",
		skip(self, plan),
		fields(principal = %plan.principal.username, target = %plan.target)
	)]
	pub async fn initialize(&self, plan: &BootstrapPlan) -> Result<BootstrapReport> {
		for listener in &self.listeners {
			listener.on_start(plan);
		}

		self.store.ping().await?;

		let outcome = self.ensure_principal(plan).await?;
		for listener in &self.listeners {
			listener.on_principal(&outcome);
		}

		let collections = self.ensure_collections(plan).await?;

		let report = BootstrapReport {
			principal: PrincipalReport {
				username: plan.principal.username.clone(),
				database: plan.admin_database.clone(),
				outcome,
			},
			target: plan.target.clone(),
			collections,
		};

		info!(
			created = report.created_collections().count(),
			existing = report.existing_collections().count(),
			noop = report.is_noop(),
			"bootstrap finished"
		);

		for listener in &self.listeners {
			listener.on_complete(&report);
		}
		Ok(report)
	}

	/// Validates raw names into a plan on the admin database and runs it.
	/// Malformed input fails before the store sees any call.
	pub async fn initialize_with<I, N>(
		&self,
		principal: PrincipalSpec,
		target: &str,
		collections: I,
	) -> Result<BootstrapReport>
	where
		I: IntoIterator<Item = N>,
		N: Into<String>,
	{
		let plan = BootstrapPlan::new(
			DatabaseName::admin(),
			principal,
			DatabaseName::parse(target)?,
			CollectionSpec::parse(collections)?,
			RoleDriftPolicy::default(),
		)?;
		self.initialize(&plan).await
	}
}
