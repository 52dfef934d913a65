// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Memory implementation of DocumentStore.
//!
//! Principals and collections live in BTreeMaps behind a RwLock. The store
//! follows the server's rules closely enough for the bootstrap: databases
//! appear with their first collection, creation of an existing object fails
//! with `AlreadyExists`, and principals are keyed by database and username.

#![cfg_attr(not(debug_assertions), deny(warnings))]

use std::{
	collections::{BTreeMap, BTreeSet},
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
};

use async_trait::async_trait;
use coursedb_core::{
	DocumentStore,
	model::{GrantedRole, PrincipalInfo, PrincipalSpec, RoleGrant},
};
use coursedb_type::{CollectionName, DatabaseName, Error, ObjectKind, Result, Secret, Username};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::instrument;

#[derive(Clone, Default)]
pub struct MemoryStore {
	inner: Arc<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
	state: RwLock<State>,
	/// Successful writes issued through `DocumentStore`.
	mutations: AtomicU64,
}

#[derive(Default)]
struct State {
	principals: BTreeMap<(String, String), StoredPrincipal>,
	databases: BTreeMap<String, BTreeMap<String, Vec<Value>>>,
}

struct StoredPrincipal {
	secret: Secret,
	roles: BTreeSet<GrantedRole>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of writes performed through the `DocumentStore` interface.
	pub fn mutations(&self) -> u64 {
		self.inner.mutations.load(Ordering::SeqCst)
	}

	/// Seeds a principal directly, bypassing the mutation counter.
	pub async fn seed_principal(
		&self,
		database: &str,
		username: &str,
		secret: Secret,
		roles: impl IntoIterator<Item = GrantedRole>,
	) {
		let mut state = self.inner.state.write().await;
		state.principals.insert(
			(database.to_string(), username.to_string()),
			StoredPrincipal {
				secret,
				roles: roles.into_iter().collect(),
			},
		);
	}

	/// Appends documents, creating the collection (and database) when
	/// missing. Bypasses the mutation counter.
	pub async fn insert_documents(&self, database: &str, collection: &str, documents: impl IntoIterator<Item = Value>) {
		let mut state = self.inner.state.write().await;
		state.databases
			.entry(database.to_string())
			.or_default()
			.entry(collection.to_string())
			.or_default()
			.extend(documents);
	}

	pub async fn documents(&self, database: &str, collection: &str) -> Vec<Value> {
		let state = self.inner.state.read().await;
		state.databases.get(database).and_then(|db| db.get(collection)).cloned().unwrap_or_default()
	}

	pub async fn principal_count(&self) -> usize {
		self.inner.state.read().await.principals.len()
	}

	pub async fn database_exists(&self, database: &str) -> bool {
		self.inner.state.read().await.databases.contains_key(database)
	}

	fn record_mutation(&self) {
		self.inner.mutations.fetch_add(1, Ordering::SeqCst);
	}
}

#[async_trait]
impl DocumentStore for MemoryStore {
	#[instrument(name = "store::memory::ping", level = "trace", skip(self))]
	async fn ping(&self) -> Result<()> {
		Ok(())
	}

	#[instrument(name = "store::memory::find_principal", level = "trace", skip(self), fields(database = %database, username = %username))]
	async fn find_principal(&self, database: &DatabaseName, username: &Username) -> Result<Option<PrincipalInfo>> {
		let state = self.inner.state.read().await;
		let key = (database.to_string(), username.to_string());
		Ok(state.principals.get(&key).map(|stored| PrincipalInfo {
			username: username.to_string(),
			database: database.to_string(),
			roles: stored.roles.clone(),
		}))
	}

	#[instrument(name = "store::memory::create_principal", level = "debug", skip(self, principal), fields(database = %database, username = %principal.username))]
	async fn create_principal(&self, database: &DatabaseName, principal: &PrincipalSpec) -> Result<()> {
		let mut state = self.inner.state.write().await;
		let key = (database.to_string(), principal.username.to_string());
		if state.principals.contains_key(&key) {
			return Err(Error::AlreadyExists {
				kind: ObjectKind::Principal,
				namespace: database.to_string(),
				name: principal.username.to_string(),
			});
		}

		state.principals.insert(
			key,
			StoredPrincipal {
				secret: principal.secret.clone(),
				roles: principal.granted_roles(),
			},
		);
		self.record_mutation();
		Ok(())
	}

	#[instrument(name = "store::memory::set_principal_roles", level = "debug", skip(self, roles), fields(database = %database, username = %username))]
	async fn set_principal_roles(
		&self,
		database: &DatabaseName,
		username: &Username,
		roles: &[RoleGrant],
	) -> Result<()> {
		let mut state = self.inner.state.write().await;
		let key = (database.to_string(), username.to_string());
		let Some(stored) = state.principals.get_mut(&key) else {
			return Err(Error::store(
				"updateUser",
				format!("principal '{}' not found in '{}'", username, database),
			));
		};

		stored.roles = roles.iter().map(GrantedRole::from).collect();
		self.record_mutation();
		Ok(())
	}

	#[instrument(name = "store::memory::authenticate", level = "trace", skip(self, secret), fields(database = %database, username = %username))]
	async fn authenticate(&self, database: &DatabaseName, username: &Username, secret: &Secret) -> Result<bool> {
		let state = self.inner.state.read().await;
		let key = (database.to_string(), username.to_string());
		Ok(state.principals.get(&key).is_some_and(|stored| stored.secret.expose() == secret.expose()))
	}

	#[instrument(name = "store::memory::list_collections", level = "trace", skip(self), fields(database = %database))]
	async fn list_collections(&self, database: &DatabaseName) -> Result<Vec<String>> {
		let state = self.inner.state.read().await;
		Ok(state.databases.get(database.as_str()).map(|db| db.keys().cloned().collect()).unwrap_or_default())
	}

	#[instrument(name = "store::memory::create_collection", level = "debug", skip(self), fields(database = %database, collection = %name))]
	async fn create_collection(&self, database: &DatabaseName, name: &CollectionName) -> Result<()> {
		let mut state = self.inner.state.write().await;
		let collections = state.databases.entry(database.to_string()).or_default();
		if collections.contains_key(name.as_str()) {
			return Err(Error::AlreadyExists {
				kind: ObjectKind::Collection,
				namespace: database.to_string(),
				name: name.to_string(),
			});
		}

		collections.insert(name.to_string(), Vec::new());
		self.record_mutation();
		Ok(())
	}

	#[instrument(name = "store::memory::count_documents", level = "trace", skip(self), fields(database = %database, collection = %name))]
	async fn count_documents(&self, database: &DatabaseName, name: &CollectionName) -> Result<u64> {
		let state = self.inner.state.read().await;
		Ok(state.databases
			.get(database.as_str())
			.and_then(|db| db.get(name.as_str()))
			.map(|documents| documents.len() as u64)
			.unwrap_or(0))
	}
}

#[cfg(test)]
mod tests {
	use coursedb_core::model::RoleGrant;
	use serde_json::json;

	use super::*;

	fn db(name: &str) -> DatabaseName {
		DatabaseName::parse(name).unwrap()
	}

	fn collection(name: &str) -> CollectionName {
		CollectionName::parse(name).unwrap()
	}

	fn admin_spec() -> PrincipalSpec {
		PrincipalSpec::new(
			Username::parse("admin").unwrap(),
			Secret::new("s3cret").unwrap(),
			RoleGrant::administrator_defaults(),
		)
		.unwrap()
	}

	#[tokio::test]
	async fn test_create_collection_creates_database() {
		let store = MemoryStore::new();
		assert!(!store.database_exists("courses_db").await);

		store.create_collection(&db("courses_db"), &collection("courses")).await.unwrap();

		assert!(store.database_exists("courses_db").await);
		assert_eq!(store.list_collections(&db("courses_db")).await.unwrap(), vec!["courses"]);
		assert_eq!(store.mutations(), 1);
	}

	#[tokio::test]
	async fn test_create_existing_collection_keeps_documents() {
		let store = MemoryStore::new();
		store.insert_documents("courses_db", "courses", [json!({"title": "Rust"})]).await;

		let err = store.create_collection(&db("courses_db"), &collection("courses")).await.unwrap_err();
		assert!(err.is_already_exists());
		assert_eq!(store.count_documents(&db("courses_db"), &collection("courses")).await.unwrap(), 1);
		assert_eq!(store.mutations(), 0);
	}

	#[tokio::test]
	async fn test_principal_lifecycle() {
		let store = MemoryStore::new();
		let admin = db("admin");
		let spec = admin_spec();

		assert!(store.find_principal(&admin, &spec.username).await.unwrap().is_none());
		store.create_principal(&admin, &spec).await.unwrap();

		let info = store.find_principal(&admin, &spec.username).await.unwrap().unwrap();
		assert_eq!(info.roles, spec.granted_roles());

		let err = store.create_principal(&admin, &spec).await.unwrap_err();
		assert!(err.is_already_exists());

		assert!(store.authenticate(&admin, &spec.username, &spec.secret).await.unwrap());
		assert!(!store.authenticate(&admin, &spec.username, &Secret::new("wrong").unwrap()).await.unwrap());
		assert!(!store.authenticate(&db("courses_db"), &spec.username, &spec.secret).await.unwrap());
	}

	#[tokio::test]
	async fn test_set_principal_roles() {
		let store = MemoryStore::new();
		let admin = db("admin");
		let spec = admin_spec();
		store.create_principal(&admin, &spec).await.unwrap();

		let roles = vec![RoleGrant::parse("root", "admin").unwrap()];
		store.set_principal_roles(&admin, &spec.username, &roles).await.unwrap();

		let info = store.find_principal(&admin, &spec.username).await.unwrap().unwrap();
		assert_eq!(info.roles.into_iter().collect::<Vec<_>>(), vec![GrantedRole::new("root", "admin")]);
		assert!(store.authenticate(&admin, &spec.username, &spec.secret).await.unwrap());

		let missing = Username::parse("nobody").unwrap();
		assert!(store.set_principal_roles(&admin, &missing, &roles).await.is_err());
	}
}
