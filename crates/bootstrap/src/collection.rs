// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use coursedb_core::{BootstrapPlan, CollectionName, DatabaseName, DocumentStore, Result};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{initializer::Initializer, report::CollectionReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionOutcome {
	Created,
	/// Already present; its documents were not touched.
	Existing,
}

impl<S: DocumentStore> Initializer<S> {
	/// Ensures every collection of the plan in order. The first failure other
	/// than a conflict aborts; collections created before it stay.
	#[instrument(
		name = "bootstrap::ensure_collections",
		level = "debug",
		skip(self, plan),
		fields(database = %plan.target, count = plan.collections.len())
	)]
	pub async fn ensure_collections(&self, plan: &BootstrapPlan) -> Result<Vec<CollectionReport>> {
		let mut reports = Vec::with_capacity(plan.collections.len());

		for name in &plan.collections {
			let outcome = self.ensure_collection(&plan.target, name).await?;
			for listener in &self.listeners {
				listener.on_collection(name, outcome);
			}
			reports.push(CollectionReport {
				name: name.clone(),
				outcome,
			});
		}

		Ok(reports)
	}

	/// Creates `name` in `database` unless it is already listed. Some servers
	/// acknowledge `create` on an existing collection, so only the listing
	/// decides `Existing`; a conflict from a concurrent creator counts too.
	/// The database itself comes into existence with its first collection.
	pub async fn ensure_collection(&self, database: &DatabaseName, name: &CollectionName) -> Result<CollectionOutcome> {
		let existing = self.store.list_collections(database).await?;
		if existing.iter().any(|collection| collection == name.as_str()) {
			debug!(database = %database, collection = %name, "collection already exists");
			return Ok(CollectionOutcome::Existing);
		}

		match self.store.create_collection(database, name).await {
			Ok(()) => {
				info!(database = %database, collection = %name, "created collection");
				Ok(CollectionOutcome::Created)
			}
			Err(err) if err.is_already_exists() => {
				debug!(database = %database, collection = %name, "collection created concurrently");
				Ok(CollectionOutcome::Existing)
			}
			Err(err) => Err(err),
		}
	}
}
