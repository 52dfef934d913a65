// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! MongoDB implementation of DocumentStore.

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod command;
mod error;

use async_trait::async_trait;
use coursedb_core::{
	ConnectionConfig, DocumentStore,
	model::{PrincipalInfo, PrincipalSpec, RoleGrant},
};
use coursedb_type::{CollectionName, DatabaseName, Error, ErrorKind, ObjectKind, Result, Secret, Username};
use mongodb::{
	Client,
	bson::{Document, doc},
	options::{ClientOptions, Credential},
};
use tracing::{debug, instrument};

use crate::error::{classify_code, command_code, map_error};

pub struct MongoStore {
	client: Client,
	options: ClientOptions,
}

impl MongoStore {
	/// Builds a client from `config`. The driver connects lazily, so an
	/// unreachable server surfaces on the first command (see `ping`).
	#[instrument(name = "store::mongo::connect", level = "debug", skip(config), fields(app_name = %config.app_name))]
	pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
		let mut options = ClientOptions::parse(&config.uri).await.map_err(|err| map_error("connect", err))?;
		options.app_name = Some(config.app_name.clone());
		options.connect_timeout = Some(config.connect_timeout());
		options.server_selection_timeout = Some(config.server_selection_timeout());

		if let Some(credential) = config.credential()? {
			debug!(username = %credential.username, source = %credential.source, "using connection credential");
			options.credential = Some(
				Credential::builder()
					.username(credential.username.into_inner())
					.password(credential.password.expose().to_string())
					.source(credential.source.into_inner())
					.build(),
			);
		}

		let client = Client::with_options(options.clone()).map_err(|err| map_error("connect", err))?;
		Ok(Self {
			client,
			options,
		})
	}

	async fn run(&self, database: &DatabaseName, operation: &str, command: Document) -> Result<Document> {
		self.client.database(database.as_str()).run_command(command).await.map_err(|err| map_error(operation, err))
	}
}

fn already_exists(kind: ObjectKind, database: &DatabaseName, name: &str) -> Error {
	Error::AlreadyExists {
		kind,
		namespace: database.to_string(),
		name: name.to_string(),
	}
}

#[async_trait]
impl DocumentStore for MongoStore {
	#[instrument(name = "store::mongo::ping", level = "debug", skip(self))]
	async fn ping(&self) -> Result<()> {
		self.run(&DatabaseName::admin(), "ping", command::ping()).await?;
		Ok(())
	}

	#[instrument(name = "store::mongo::find_principal", level = "debug", skip(self), fields(database = %database, username = %username))]
	async fn find_principal(&self, database: &DatabaseName, username: &Username) -> Result<Option<PrincipalInfo>> {
		let reply = self.run(database, "usersInfo", command::users_info(database, username)).await?;
		command::parse_users_info(&reply)
	}

	#[instrument(name = "store::mongo::create_principal", level = "debug", skip(self, principal), fields(database = %database, username = %principal.username))]
	async fn create_principal(&self, database: &DatabaseName, principal: &PrincipalSpec) -> Result<()> {
		let result = self.client.database(database.as_str()).run_command(command::create_user(principal)).await;

		match result {
			Ok(_) => Ok(()),
			Err(err) if command_code(&err).and_then(classify_code) == Some(ErrorKind::AlreadyExists) => {
				Err(already_exists(ObjectKind::Principal, database, principal.username.as_str()))
			}
			Err(err) => Err(map_error("createUser", err)),
		}
	}

	#[instrument(name = "store::mongo::set_principal_roles", level = "debug", skip(self, roles), fields(database = %database, username = %username))]
	async fn set_principal_roles(
		&self,
		database: &DatabaseName,
		username: &Username,
		roles: &[RoleGrant],
	) -> Result<()> {
		self.run(database, "updateUser", command::update_user_roles(username, roles)).await?;
		Ok(())
	}

	#[instrument(name = "store::mongo::authenticate", level = "debug", skip(self, secret), fields(database = %database, username = %username))]
	async fn authenticate(&self, database: &DatabaseName, username: &Username, secret: &Secret) -> Result<bool> {
		let mut options = self.options.clone();
		options.credential = Some(
			Credential::builder()
				.username(username.to_string())
				.password(secret.expose().to_string())
				.source(database.to_string())
				.build(),
		);

		let client = Client::with_options(options).map_err(|err| map_error("authenticate", err))?;
		let result = client.database(database.as_str()).run_command(command::connection_status()).await;

		match result.map_err(|err| map_error("authenticate", err)) {
			Ok(_) => Ok(true),
			Err(err) if err.kind() == ErrorKind::Authentication => Ok(false),
			Err(err) => Err(err),
		}
	}

	#[instrument(name = "store::mongo::list_collections", level = "debug", skip(self), fields(database = %database))]
	async fn list_collections(&self, database: &DatabaseName) -> Result<Vec<String>> {
		self.client
			.database(database.as_str())
			.list_collection_names()
			.await
			.map_err(|err| map_error("listCollections", err))
	}

	#[instrument(name = "store::mongo::create_collection", level = "debug", skip(self), fields(database = %database, collection = %name))]
	async fn create_collection(&self, database: &DatabaseName, name: &CollectionName) -> Result<()> {
		let db = self.client.database(database.as_str());
		let listed = db
			.list_collection_names()
			.filter(doc! { "name": name.as_str() })
			.await
			.map_err(|err| map_error("listCollections", err))?;
		if !listed.is_empty() {
			return Err(already_exists(ObjectKind::Collection, database, name.as_str()));
		}

		match db.create_collection(name.as_str()).await {
			Ok(()) => Ok(()),
			Err(err) if command_code(&err).and_then(classify_code) == Some(ErrorKind::AlreadyExists) => {
				Err(already_exists(ObjectKind::Collection, database, name.as_str()))
			}
			Err(err) => Err(map_error("create", err)),
		}
	}

	#[instrument(name = "store::mongo::count_documents", level = "debug", skip(self), fields(database = %database, collection = %name))]
	async fn count_documents(&self, database: &DatabaseName, name: &CollectionName) -> Result<u64> {
		self.client
			.database(database.as_str())
			.collection::<Document>(name.as_str())
			.count_documents(doc! {})
			.await
			.map_err(|err| map_error("count", err))
	}
}
