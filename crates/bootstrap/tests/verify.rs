// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use coursedb_bootstrap::Initializer;
use coursedb_core::{DocumentStore, Error, ErrorKind, GrantedRole, Secret};
use coursedb_store_memory::MemoryStore;
use coursedb_testing::{ADMIN_SECRET, FaultyStore, Operation, TARGET_DATABASE, standard_plan};
use serde_json::json;

#[tokio::test]
async fn test_satisfied_after_initialize() {
	let store = MemoryStore::new();
	let initializer = Initializer::new(store.clone());
	let plan = standard_plan();
	initializer.initialize(&plan).await.unwrap();
	let mutations = store.mutations();

	let report = initializer.verify(&plan, true).await.unwrap();

	assert!(report.is_satisfied());
	assert!(report.problems().is_empty());
	assert!(report.principal.exists);
	assert!(report.principal.roles.as_ref().unwrap().is_empty());
	assert_eq!(report.principal.authenticated, Some(true));
	assert!(report.collections.iter().all(|c| c.exists && c.documents == Some(0)));
	assert_eq!(store.mutations(), mutations);
}

#[tokio::test]
async fn test_drifted_roles_are_reported() {
	let store = MemoryStore::new();
	let plan = standard_plan();
	store.seed_principal(
		"admin",
		"admin",
		Secret::new(ADMIN_SECRET).unwrap(),
		[
			GrantedRole::new("userAdminAnyDatabase", "admin"),
			GrantedRole::new("readWriteAnyDatabase", "admin"),
			GrantedRole::new("clusterMonitor", "admin"),
		],
	)
	.await;
	let initializer = Initializer::new(store.clone());
	initializer.ensure_collections(&plan).await.unwrap();

	let report = initializer.verify(&plan, false).await.unwrap();

	assert!(!report.is_satisfied());
	let diff = report.principal.roles.clone().unwrap();
	assert_eq!(diff.missing, vec![GrantedRole::new("dbAdminAnyDatabase", "admin")]);
	assert_eq!(diff.extra, vec![GrantedRole::new("clusterMonitor", "admin")]);
	assert_eq!(report.principal.authenticated, None);
	assert_eq!(
		report.problems(),
		vec![
			"principal 'admin' lacks role dbAdminAnyDatabase@admin".to_string(),
			"principal 'admin' holds unexpected role clusterMonitor@admin".to_string(),
		]
	);
}

#[tokio::test]
async fn test_wrong_secret_fails_login_check() {
	let store = MemoryStore::new();
	let plan = standard_plan();
	store.seed_principal("admin", "admin", Secret::new("rotated").unwrap(), plan.principal.granted_roles()).await;
	let initializer = Initializer::new(store.clone());
	initializer.ensure_collections(&plan).await.unwrap();

	let unchecked = initializer.verify(&plan, false).await.unwrap();
	assert!(unchecked.is_satisfied());

	let checked = initializer.verify(&plan, true).await.unwrap();
	assert_eq!(checked.principal.authenticated, Some(false));
	assert!(!checked.is_satisfied());
	assert_eq!(
		checked.problems(),
		vec!["principal 'admin' does not authenticate with the configured secret".to_string()]
	);
}

#[tokio::test]
async fn test_document_counts_and_missing_collections() {
	let store = MemoryStore::new();
	let plan = standard_plan();
	store.insert_documents(TARGET_DATABASE, "courses", [json!({"title": "Rust"}), json!({"title": "Go"})]).await;
	store.insert_documents(TARGET_DATABASE, "enrollments", [json!({"course": "Rust"})]).await;

	let report = Initializer::new(store.clone()).verify(&plan, true).await.unwrap();

	let counts = report.collections.iter().map(|c| (c.name.as_str(), c.exists, c.documents)).collect::<Vec<_>>();
	assert_eq!(
		counts,
		vec![
			("courses", true, Some(2)),
			("enrollments", true, Some(1)),
			("submissions", false, None),
			("assignments", false, None),
		]
	);
	assert!(!report.principal.exists);
	assert_eq!(report.principal.authenticated, Some(false));
	assert!(report.problems().contains(&"collection 'courses_db.submissions' does not exist".to_string()));
	assert_eq!(store.list_collections(&plan.target).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_unreachable_server_fails_verify() {
	let store = FaultyStore::new(MemoryStore::new()).fail(
		Operation::Ping,
		Error::Connection {
			reason: "server selection timeout".to_string(),
		},
	);

	let err = Initializer::new(store).verify(&standard_plan(), false).await.unwrap_err();

	assert_eq!(err.kind(), ErrorKind::Connection);
}
