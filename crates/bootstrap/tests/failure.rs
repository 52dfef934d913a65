// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	io::{self, Write},
	sync::{Arc, Mutex},
};

use coursedb_bootstrap::{
	BannerListener, Initializer, PrincipalOutcome,
	listener::{COMPLETE_BANNER, START_BANNER},
};
use coursedb_core::{DocumentStore, Error, ErrorKind};
use coursedb_store_memory::MemoryStore;
use coursedb_testing::{FaultyStore, Operation, TARGET_DATABASE, standard_plan};

fn unauthorized(action: &str) -> Error {
	Error::Authorization {
		action: action.to_string(),
		reason: "not authorized on courses_db to execute command".to_string(),
	}
}

#[tokio::test]
async fn test_unreachable_server_aborts_before_mutation() {
	let store = FaultyStore::new(MemoryStore::new()).fail(
		Operation::Ping,
		Error::Connection {
			reason: "server selection timeout".to_string(),
		},
	);

	let err = Initializer::new(store).initialize(&standard_plan()).await.unwrap_err();

	assert_eq!(err.kind(), ErrorKind::Connection);
}

#[tokio::test]
async fn test_ping_precedes_every_mutation() {
	let store = FaultyStore::new(MemoryStore::new());
	let initializer = Initializer::new(store);

	initializer.initialize(&standard_plan()).await.unwrap();

	let calls = initializer.store().calls();
	assert_eq!(calls.first(), Some(&Operation::Ping));
	assert_eq!(calls.iter().filter(|op| op.is_mutation()).count(), 5);
}

#[tokio::test]
async fn test_denied_principal_creation_is_fatal() {
	let store = FaultyStore::new(MemoryStore::new()).fail(Operation::CreatePrincipal, unauthorized("createUser"));
	let initializer = Initializer::new(store);

	let err = initializer.initialize(&standard_plan()).await.unwrap_err();

	assert_eq!(err.kind(), ErrorKind::Authorization);
	assert!(!initializer.store().calls().contains(&Operation::CreateCollection));
}

#[tokio::test]
async fn test_partial_application_completed_by_rerun() {
	let memory = MemoryStore::new();
	let store =
		FaultyStore::new(memory.clone()).fail_times(Operation::CreateCollection, unauthorized("create"), 1);
	let initializer = Initializer::new(store);
	let plan = standard_plan();

	let err = initializer.initialize(&plan).await.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Authorization);
	assert_eq!(memory.principal_count().await, 1);
	assert!(!memory.database_exists(TARGET_DATABASE).await);

	let report = initializer.initialize(&plan).await.unwrap();
	assert_eq!(report.principal.outcome, PrincipalOutcome::Unchanged);
	assert_eq!(report.created_collections().count(), 4);
	assert_eq!(memory.list_collections(&plan.target).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_store_error_keeps_earlier_collections() {
	let memory = MemoryStore::new();
	let store = FaultyStore::new(memory.clone());
	let plan = standard_plan();
	Initializer::new(store).ensure_collection(&plan.target, plan.collections.iter().next().unwrap()).await.unwrap();

	let store = FaultyStore::new(memory.clone()).fail(Operation::CreateCollection, Error::store("create", "disk full"));
	let err = Initializer::new(store).initialize(&plan).await.unwrap_err();

	assert_eq!(err.kind(), ErrorKind::Store);
	assert_eq!(err.diagnostic().code, "STORE_001");
	assert_eq!(memory.list_collections(&plan.target).await.unwrap(), vec!["courses"]);
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.lock().unwrap().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl SharedBuffer {
	fn contents(&self) -> String {
		String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
	}
}

#[tokio::test]
async fn test_failed_run_prints_no_completion_banner() {
	let output = SharedBuffer::default();
	let store = FaultyStore::new(MemoryStore::new()).fail(Operation::CreatePrincipal, unauthorized("createUser"));
	let initializer = Initializer::new(store).with_listener(BannerListener::new(output.clone()));

	assert!(initializer.initialize(&standard_plan()).await.is_err());

	assert_eq!(output.contents(), format!("{}\n", START_BANNER));
}

#[tokio::test]
async fn test_successful_run_prints_both_banners() {
	let output = SharedBuffer::default();
	let initializer = Initializer::new(MemoryStore::new()).with_listener(BannerListener::new(output.clone()));

	initializer.initialize(&standard_plan()).await.unwrap();

	assert_eq!(output.contents(), format!("{}\n{}\n", START_BANNER, COMPLETE_BANNER));
}
