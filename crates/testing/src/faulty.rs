// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! A [`DocumentStore`] wrapper that fails chosen operations.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use coursedb_core::{
	CollectionName, DatabaseName, DocumentStore, Error, PrincipalInfo, PrincipalSpec, Result, RoleGrant, Secret,
	Username,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
	Ping,
	FindPrincipal,
	CreatePrincipal,
	SetPrincipalRoles,
	Authenticate,
	ListCollections,
	CreateCollection,
	CountDocuments,
}

impl Operation {
	pub fn is_mutation(&self) -> bool {
		matches!(self, Operation::CreatePrincipal | Operation::SetPrincipalRoles | Operation::CreateCollection)
	}
}

struct Fault {
	operation: Operation,
	error: Error,
	/// `None` fails every call.
	remaining: Option<usize>,
}

pub struct FaultyStore<S> {
	inner: S,
	faults: Mutex<Vec<Fault>>,
	calls: Mutex<Vec<Operation>>,
}

impl<S: DocumentStore> FaultyStore<S> {
	pub fn new(inner: S) -> Self {
		Self {
			inner,
			faults: Mutex::new(Vec::new()),
			calls: Mutex::new(Vec::new()),
		}
	}

	/// Fails every call of `operation` with `error`.
	pub fn fail(self, operation: Operation, error: Error) -> Self {
		self.push(operation, error, None)
	}

	/// Fails the next `times` calls of `operation`, then delegates.
	pub fn fail_times(self, operation: Operation, error: Error, times: usize) -> Self {
		self.push(operation, error, Some(times))
	}

	fn push(self, operation: Operation, error: Error, remaining: Option<usize>) -> Self {
		self.faults.lock().unwrap_or_else(PoisonError::into_inner).push(Fault {
			operation,
			error,
			remaining,
		});
		self
	}

	pub fn inner(&self) -> &S {
		&self.inner
	}

	/// Every operation issued so far, including failed ones.
	pub fn calls(&self) -> Vec<Operation> {
		self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
	}

	fn enter(&self, operation: Operation) -> Result<()> {
		self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(operation);

		let mut faults = self.faults.lock().unwrap_or_else(PoisonError::into_inner);
		let Some(fault) = faults.iter_mut().find(|fault| {
			fault.operation == operation && fault.remaining.is_none_or(|remaining| remaining > 0)
		}) else {
			return Ok(());
		};

		if let Some(remaining) = fault.remaining.as_mut() {
			*remaining -= 1;
		}
		Err(fault.error.clone())
	}
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for FaultyStore<S> {
	async fn ping(&self) -> Result<()> {
		self.enter(Operation::Ping)?;
		self.inner.ping().await
	}

	async fn find_principal(&self, database: &DatabaseName, username: &Username) -> Result<Option<PrincipalInfo>> {
		self.enter(Operation::FindPrincipal)?;
		self.inner.find_principal(database, username).await
	}

	async fn create_principal(&self, database: &DatabaseName, principal: &PrincipalSpec) -> Result<()> {
		self.enter(Operation::CreatePrincipal)?;
		self.inner.create_principal(database, principal).await
	}

	async fn set_principal_roles(
		&self,
		database: &DatabaseName,
		username: &Username,
		roles: &[RoleGrant],
	) -> Result<()> {
		self.enter(Operation::SetPrincipalRoles)?;
		self.inner.set_principal_roles(database, username, roles).await
	}

	async fn authenticate(&self, database: &DatabaseName, username: &Username, secret: &Secret) -> Result<bool> {
		self.enter(Operation::Authenticate)?;
		self.inner.authenticate(database, username, secret).await
	}

	async fn list_collections(&self, database: &DatabaseName) -> Result<Vec<String>> {
		self.enter(Operation::ListCollections)?;
		self.inner.list_collections(database).await
	}

	async fn create_collection(&self, database: &DatabaseName, name: &CollectionName) -> Result<()> {
		self.enter(Operation::CreateCollection)?;
		self.inner.create_collection(database, name).await
	}

	async fn count_documents(&self, database: &DatabaseName, name: &CollectionName) -> Result<u64> {
		self.enter(Operation::CountDocuments)?;
		self.inner.count_documents(database, name).await
	}
}
