// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use coursedb_core::{CollectionName, DatabaseName, Username};
use serde::Serialize;

use crate::{collection::CollectionOutcome, principal::PrincipalOutcome};

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
	pub principal: PrincipalReport,
	pub target: DatabaseName,
	pub collections: Vec<CollectionReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalReport {
	pub username: Username,
	pub database: DatabaseName,
	pub outcome: PrincipalOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionReport {
	pub name: CollectionName,
	pub outcome: CollectionOutcome,
}

impl BootstrapReport {
	pub fn created_collections(&self) -> impl Iterator<Item = &CollectionName> {
		self.collections.iter().filter(|c| c.outcome == CollectionOutcome::Created).map(|c| &c.name)
	}

	pub fn existing_collections(&self) -> impl Iterator<Item = &CollectionName> {
		self.collections.iter().filter(|c| c.outcome == CollectionOutcome::Existing).map(|c| &c.name)
	}

	/// True when the run changed nothing on the server.
	pub fn is_noop(&self) -> bool {
		self.principal.outcome.is_noop() && self.created_collections().next().is_none()
	}
}
