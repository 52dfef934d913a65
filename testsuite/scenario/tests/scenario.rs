// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Runs every scenario file under `tests/scenarios` against a fresh memory
//! store. A scenario seeds the store, runs the bootstrap one or more times
//! with its configuration and checks the end state.

use std::{
	collections::{BTreeMap, BTreeSet},
	fs,
	path::Path,
};

use coursedb_bootstrap::{BootstrapReport, Initializer};
use coursedb_core::{BootstrapConfig, DocumentStore, GrantedRole, Secret};
use coursedb_store_memory::MemoryStore;
use serde::Deserialize;
use serde_json::json;
use test_each_file::test_each_path;
use tokio::runtime::Runtime;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Scenario {
	#[serde(default = "one")]
	runs: usize,
	#[serde(default)]
	config: BootstrapConfig,
	#[serde(default)]
	seed: Seed,
	expect: Expect,
}

fn one() -> usize {
	1
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Seed {
	principals: Vec<SeedPrincipal>,
	documents: Vec<SeedDocuments>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedPrincipal {
	database: String,
	username: String,
	password: String,
	roles: Vec<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedDocuments {
	database: String,
	collection: String,
	count: usize,
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Expect {
	/// Diagnostic code of the failing run.
	error: Option<String>,
	/// Principal status reported by the last run.
	principal: Option<String>,
	/// Roles the configured principal holds afterwards, as role@database.
	roles: Option<Vec<String>>,
	/// Exact collection set of the target database.
	collections: Option<Vec<String>>,
	documents: BTreeMap<String, u64>,
	created: Option<usize>,
	last_run_mutations: Option<u64>,
	database_exists: Option<bool>,
	authenticates_with: Option<String>,
}

fn granted(role: &str) -> GrantedRole {
	let (role, database) = role.split_once('@').unwrap_or_else(|| panic!("expected role@database, got {role}"));
	GrantedRole::new(role, database)
}

async fn run(scenario: Scenario) {
	let store = MemoryStore::new();
	for principal in &scenario.seed.principals {
		store.seed_principal(
			&principal.database,
			&principal.username,
			Secret::new(principal.password.as_str()).unwrap(),
			principal.roles.iter().map(|role| granted(role)),
		)
		.await;
	}
	for documents in &scenario.seed.documents {
		let values = (0..documents.count).map(|seq| json!({ "seq": seq }));
		store.insert_documents(&documents.database, &documents.collection, values).await;
	}

	let expect = scenario.expect;
	let plan = match scenario.config.into_plan() {
		Ok(plan) => plan,
		Err(err) => {
			assert_eq!(expect.error.as_deref(), Some(err.diagnostic().code.as_str()), "{err}");
			assert_eq!(store.mutations(), 0);
			return;
		}
	};

	let initializer = Initializer::new(store.clone());
	let mut last: Option<BootstrapReport> = None;
	let mut mutations_before = 0;
	for _ in 0..scenario.runs {
		mutations_before = store.mutations();
		match initializer.initialize(&plan).await {
			Ok(report) => last = Some(report),
			Err(err) => {
				assert_eq!(expect.error.as_deref(), Some(err.diagnostic().code.as_str()), "{err}");
				last = None;
				break;
			}
		}
	}

	if let Some(report) = &last {
		assert_eq!(expect.error, None, "expected a failure, got {report:?}");

		if let Some(status) = &expect.principal {
			let json = serde_json::to_value(&report.principal.outcome).unwrap();
			assert_eq!(json["status"], status.as_str());
		}
		if let Some(created) = expect.created {
			assert_eq!(report.created_collections().count(), created);
		}
	}

	if let Some(mutations) = expect.last_run_mutations {
		assert_eq!(store.mutations() - mutations_before, mutations);
	}

	let target = &plan.target;
	if let Some(exists) = expect.database_exists {
		assert_eq!(store.database_exists(target.as_str()).await, exists);
	}

	if let Some(expected) = &expect.collections {
		let mut actual = store.list_collections(target).await.unwrap();
		actual.sort();
		let mut expected = expected.clone();
		expected.sort();
		assert_eq!(actual, expected);
	}

	for (collection, count) in &expect.documents {
		assert_eq!(store.documents(target.as_str(), collection).await.len() as u64, *count, "{collection}");
	}

	let username = &plan.principal.username;
	if let Some(roles) = &expect.roles {
		let info = store.find_principal(&plan.admin_database, username).await.unwrap().unwrap();
		let expected: BTreeSet<GrantedRole> = roles.iter().map(|role| granted(role)).collect();
		assert_eq!(info.roles, expected);
	}

	if let Some(secret) = &expect.authenticates_with {
		let secret = Secret::new(secret.as_str()).unwrap();
		assert!(store.authenticate(&plan.admin_database, username, &secret).await.unwrap());
	}

}

fn test_scenario(path: &Path) {
	let content = fs::read_to_string(path).unwrap();
	let scenario: Scenario = toml::from_str(&content).unwrap_or_else(|err| panic!("{}: {err}", path.display()));
	Runtime::new().unwrap().block_on(run(scenario));
}

test_each_path! { in "testsuite/scenario/tests/scenarios" as memory => test_scenario }
