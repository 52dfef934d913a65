// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Bootstrap configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! [`Overrides`] collected from the environment and command line. Raw values
//! stay unvalidated until [`BootstrapConfig::into_plan`] turns them into a
//! [`BootstrapPlan`].

use std::{
	fs,
	path::{Path, PathBuf},
	time::Duration,
};

use coursedb_type::{DatabaseName, Error, Result, Secret, Username};
use serde::Deserialize;
use tracing::debug;

use crate::model::{
	BootstrapPlan, CollectionPreset, CollectionSpec, PrincipalSpec, RoleDriftPolicy, RoleGrant,
};

pub const DEFAULT_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_APP_NAME: &str = "coursedb-init";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_TARGET_DATABASE: &str = "courses_db";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
	pub connection: ConnectionConfig,
	pub principal: PrincipalConfig,
	pub target: TargetConfig,
}

/// How to reach and log in to the server. The credential here is the one
/// used to connect, not the principal being created.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionConfig {
	pub uri: String,
	pub username: Option<String>,
	pub password: Option<Secret>,
	pub password_file: Option<PathBuf>,
	pub auth_source: Option<String>,
	pub app_name: String,
	pub connect_timeout_ms: u64,
	pub server_selection_timeout_ms: u64,
}

impl Default for ConnectionConfig {
	fn default() -> Self {
		Self {
			uri: DEFAULT_URI.to_string(),
			username: None,
			password: None,
			password_file: None,
			auth_source: None,
			app_name: DEFAULT_APP_NAME.to_string(),
			connect_timeout_ms: DEFAULT_TIMEOUT_MS,
			server_selection_timeout_ms: DEFAULT_TIMEOUT_MS,
		}
	}
}

/// Resolved login for the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionCredential {
	pub username: Username,
	pub password: Secret,
	pub source: DatabaseName,
}

impl ConnectionConfig {
	pub fn connect_timeout(&self) -> Duration {
		Duration::from_millis(self.connect_timeout_ms)
	}

	pub fn server_selection_timeout(&self) -> Duration {
		Duration::from_millis(self.server_selection_timeout_ms)
	}

	pub fn credential(&self) -> Result<Option<ConnectionCredential>> {
		let password = resolve_secret(self.password.as_ref(), self.password_file.as_deref(), "connection")?;

		let Some(username) = &self.username else {
			if password.is_some() {
				return Err(Error::config("connection.password is set but connection.username is not"));
			}
			return Ok(None);
		};

		let username = Username::parse(username)?;
		let password = password.ok_or_else(|| {
			Error::config(format!(
				"connection.username '{}' has no password; set connection.password, connection.password_file or COURSEDB_PASSWORD",
				username
			))
		})?;
		let source = match &self.auth_source {
			Some(source) => DatabaseName::parse(source)?,
			None => DatabaseName::admin(),
		};

		Ok(Some(ConnectionCredential {
			username,
			password,
			source,
		}))
	}
}

/// The administrative principal to ensure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrincipalConfig {
	pub database: String,
	pub username: String,
	pub password: Option<Secret>,
	pub password_file: Option<PathBuf>,
	pub roles: Vec<RoleGrant>,
	pub role_drift: RoleDriftPolicy,
}

impl Default for PrincipalConfig {
	fn default() -> Self {
		Self {
			database: coursedb_type::identifier::ADMIN_DATABASE.to_string(),
			username: DEFAULT_ADMIN_USERNAME.to_string(),
			password: None,
			password_file: None,
			roles: RoleGrant::administrator_defaults(),
			role_drift: RoleDriftPolicy::default(),
		}
	}
}

/// The database and collections to ensure. `collections` wins over `preset`
/// only when set through [`Overrides`]; a file may set one of the two.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
	pub database: String,
	pub preset: Option<CollectionPreset>,
	pub collections: Option<Vec<String>>,
}

impl Default for TargetConfig {
	fn default() -> Self {
		Self {
			database: DEFAULT_TARGET_DATABASE.to_string(),
			preset: None,
			collections: None,
		}
	}
}

/// Values from the environment and command line, applied over a file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
	pub uri: Option<String>,
	pub username: Option<String>,
	pub password: Option<Secret>,
	pub auth_source: Option<String>,
	pub connect_timeout_ms: Option<u64>,
	pub admin_username: Option<String>,
	pub admin_password: Option<Secret>,
	pub admin_password_file: Option<PathBuf>,
	pub roles: Option<Vec<RoleGrant>>,
	pub role_drift: Option<RoleDriftPolicy>,
	pub database: Option<String>,
	pub preset: Option<CollectionPreset>,
	pub collections: Option<Vec<String>>,
}

impl BootstrapConfig {
	/// Loads `path` when given, otherwise starts from the defaults.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		match path {
			Some(path) => Self::from_file(path),
			None => Ok(Self::default()),
		}
	}

	pub fn from_file(path: &Path) -> Result<Self> {
		let content = fs::read_to_string(path)
			.map_err(|err| Error::config(format!("cannot read {}: {}", path.display(), err)))?;
		debug!(path = %path.display(), "loaded configuration file");
		Self::from_toml(&content).map_err(|err| match err {
			Error::Config {
				reason,
			} => Error::config(format!("{}: {}", path.display(), reason)),
			other => other,
		})
	}

	pub fn from_toml(content: &str) -> Result<Self> {
		toml::from_str(content).map_err(|err| Error::config(err.to_string().trim_end().to_string()))
	}

	pub fn apply(mut self, overrides: Overrides) -> Self {
		let connection = &mut self.connection;
		if let Some(uri) = overrides.uri {
			connection.uri = uri;
		}
		if let Some(username) = overrides.username {
			connection.username = Some(username);
		}
		if let Some(password) = overrides.password {
			connection.password = Some(password);
			connection.password_file = None;
		}
		if let Some(auth_source) = overrides.auth_source {
			connection.auth_source = Some(auth_source);
		}
		if let Some(timeout) = overrides.connect_timeout_ms {
			connection.connect_timeout_ms = timeout;
			connection.server_selection_timeout_ms = timeout;
		}

		let principal = &mut self.principal;
		if let Some(username) = overrides.admin_username {
			principal.username = username;
		}
		if let Some(password) = overrides.admin_password {
			principal.password = Some(password);
			principal.password_file = None;
		}
		if let Some(path) = overrides.admin_password_file {
			principal.password_file = Some(path);
			principal.password = None;
		}
		if let Some(roles) = overrides.roles {
			principal.roles = roles;
		}
		if let Some(policy) = overrides.role_drift {
			principal.role_drift = policy;
		}

		let target = &mut self.target;
		if let Some(database) = overrides.database {
			target.database = database;
		}
		if let Some(preset) = overrides.preset {
			target.preset = Some(preset);
			target.collections = None;
		}
		if let Some(collections) = overrides.collections {
			target.collections = Some(collections);
			target.preset = None;
		}

		self
	}

	/// Validates every value and produces the plan the initializer runs.
	pub fn into_plan(&self) -> Result<BootstrapPlan> {
		let admin_database = DatabaseName::parse(&self.principal.database)?;
		let username = Username::parse(&self.principal.username)?;
		let secret =
			resolve_secret(self.principal.password.as_ref(), self.principal.password_file.as_deref(), "principal")?
				.ok_or_else(|| {
					Error::config(format!(
						"no secret configured for principal '{}'; set principal.password, principal.password_file or COURSEDB_ADMIN_PASSWORD",
						username
					))
				})?;
		let principal = PrincipalSpec::new(username, secret, self.principal.roles.clone())?;

		let target = DatabaseName::parse(&self.target.database)?;
		let collections = match (&self.target.collections, self.target.preset) {
			(Some(_), Some(_)) => {
				return Err(Error::config("set either target.collections or target.preset, not both"));
			}
			(Some(names), None) => CollectionSpec::parse(names.iter().cloned())?,
			(None, preset) => preset.unwrap_or_default().spec()?,
		};

		BootstrapPlan::new(admin_database, principal, target, collections, self.principal.role_drift)
	}
}

fn resolve_secret(inline: Option<&Secret>, file: Option<&Path>, section: &str) -> Result<Option<Secret>> {
	match (inline, file) {
		(Some(_), Some(_)) => {
			Err(Error::config(format!("set only one of {}.password and {}.password_file", section, section)))
		}
		(Some(secret), None) => Ok(Some(secret.clone())),
		(None, Some(path)) => {
			let content = fs::read_to_string(path).map_err(|err| {
				Error::config(format!("cannot read password file {}: {}", path.display(), err))
			})?;
			let secret = Secret::new(content.trim_end_matches(&['\r', '\n'][..]))
				.map_err(|_| Error::config(format!("password file {} is empty", path.display())))?;
			Ok(Some(secret))
		}
		(None, None) => Ok(None),
	}
}
