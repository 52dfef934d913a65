// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use async_trait::async_trait;
use coursedb_type::{CollectionName, DatabaseName, Result, Secret, Username};

use crate::model::{PrincipalInfo, PrincipalSpec, RoleGrant};

/// Operations the bootstrap needs from a document database.
///
/// Every call names the database it acts on; implementations keep no notion
/// of a "current" database. Creation calls fail with
/// [`coursedb_type::Error::AlreadyExists`] when the object is already present
/// and must leave it untouched in that case.
#[async_trait]
pub trait DocumentStore: Send + Sync {
	/// Round trip to the server, failing with `Connection` when unreachable.
	async fn ping(&self) -> Result<()>;

	async fn find_principal(&self, database: &DatabaseName, username: &Username) -> Result<Option<PrincipalInfo>>;

	async fn create_principal(&self, database: &DatabaseName, principal: &PrincipalSpec) -> Result<()>;

	/// Replace the roles of an existing principal, leaving its credential alone.
	async fn set_principal_roles(&self, database: &DatabaseName, username: &Username, roles: &[RoleGrant])
	-> Result<()>;

	/// Whether `username` can log in to `database` with `secret`.
	async fn authenticate(&self, database: &DatabaseName, username: &Username, secret: &Secret) -> Result<bool>;

	/// Names of the collections in `database`, empty when it does not exist.
	async fn list_collections(&self, database: &DatabaseName) -> Result<Vec<String>>;

	async fn create_collection(&self, database: &DatabaseName, name: &CollectionName) -> Result<()>;

	async fn count_documents(&self, database: &DatabaseName, name: &CollectionName) -> Result<u64>;
}
