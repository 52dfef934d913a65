// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use coursedb_core::{CollectionPreset, Overrides, RoleDriftPolicy, RoleGrant, Secret};
use coursedb_sub_tracing::LogFormat;
use tracing::Level;

/// Ensures the courses administrator and collections exist.
///
/// Settings are layered: built-in defaults, the configuration file, the
/// environment, then flags.
#[derive(Parser)]
#[command(name = "coursedb-init", version, about, long_about = None)]
pub struct Cli {
	/// TOML configuration file
	#[arg(short, long, env = "COURSEDB_CONFIG", global = true)]
	pub config: Option<PathBuf>,

	#[arg(long, env = "COURSEDB_LOG_LEVEL", default_value = "info", global = true)]
	pub log_level: Level,

	/// pretty, compact or json
	#[arg(long, env = "COURSEDB_LOG_FORMAT", default_value = "compact", global = true)]
	pub log_format: LogFormat,

	/// EnvFilter directive, overrides --log-level and RUST_LOG
	#[arg(long, env = "COURSEDB_LOG_FILTER", global = true)]
	pub log_filter: Option<String>,

	#[arg(long, global = true)]
	pub no_color: bool,

	#[command(flatten)]
	pub connection: ConnectionArgs,

	#[command(flatten)]
	pub principal: PrincipalArgs,

	#[command(flatten)]
	pub target: TargetArgs,

	#[command(subcommand)]
	pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
	/// Create the principal and collections (default)
	Init(InitArgs),
	/// Check an existing deployment without changing it
	Verify(VerifyArgs),
	/// Print the validated plan without connecting
	Plan(PlanArgs),
}

impl Default for Command {
	fn default() -> Self {
		Command::Init(InitArgs::default())
	}
}

#[derive(Args, Default)]
pub struct InitArgs {
	#[arg(long, value_enum, default_value_t)]
	pub report: ReportFormat,

	/// Run against an empty in-memory store instead of the server
	#[arg(long)]
	pub dry_run: bool,
}

#[derive(Args, Default)]
pub struct VerifyArgs {
	#[arg(long, value_enum, default_value_t)]
	pub report: ReportFormat,

	/// Also log in as the principal with the configured secret
	#[arg(long)]
	pub check_login: bool,
}

#[derive(Args, Default)]
pub struct PlanArgs {
	#[arg(long, value_enum, default_value_t)]
	pub report: ReportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
	#[default]
	Text,
	Json,
}

#[derive(Args)]
pub struct ConnectionArgs {
	/// Connection string
	#[arg(long, env = "COURSEDB_URI", global = true)]
	pub uri: Option<String>,

	/// User to connect as
	#[arg(long, env = "COURSEDB_USERNAME", global = true)]
	pub username: Option<String>,

	#[arg(long, env = "COURSEDB_PASSWORD", hide_env_values = true, global = true)]
	pub password: Option<Secret>,

	/// Database the connecting user authenticates against
	#[arg(long, env = "COURSEDB_AUTH_SOURCE", global = true)]
	pub auth_source: Option<String>,

	/// Connect and server selection timeout
	#[arg(long, env = "COURSEDB_TIMEOUT_MS", global = true)]
	pub timeout_ms: Option<u64>,
}

#[derive(Args)]
pub struct PrincipalArgs {
	/// Administrator to ensure
	#[arg(long, env = "COURSEDB_ADMIN_USERNAME", global = true)]
	pub admin_username: Option<String>,

	#[arg(long, env = "COURSEDB_ADMIN_PASSWORD", hide_env_values = true, global = true)]
	pub admin_password: Option<Secret>,

	/// File holding the administrator secret
	#[arg(long, env = "COURSEDB_ADMIN_PASSWORD_FILE", conflicts_with = "admin_password", global = true)]
	pub admin_password_file: Option<PathBuf>,

	/// Role grant as role@database, repeatable; replaces the configured roles
	#[arg(long = "role", global = true)]
	pub roles: Vec<RoleGrant>,

	/// preserve, reconcile or fail
	#[arg(long, env = "COURSEDB_ROLE_DRIFT", global = true)]
	pub role_drift: Option<RoleDriftPolicy>,
}

#[derive(Args)]
pub struct TargetArgs {
	/// Database holding the collections
	#[arg(long, env = "COURSEDB_DATABASE", global = true)]
	pub database: Option<String>,

	/// minimal, standard or service
	#[arg(long, env = "COURSEDB_PRESET", global = true)]
	pub preset: Option<CollectionPreset>,

	/// Comma separated collection names
	#[arg(long, env = "COURSEDB_COLLECTIONS", value_delimiter = ',', conflicts_with = "preset", global = true)]
	pub collections: Option<Vec<String>>,
}

impl Cli {
	pub fn overrides(&self) -> Overrides {
		Overrides {
			uri: self.connection.uri.clone(),
			username: self.connection.username.clone(),
			password: self.connection.password.clone(),
			auth_source: self.connection.auth_source.clone(),
			connect_timeout_ms: self.connection.timeout_ms,
			admin_username: self.principal.admin_username.clone(),
			admin_password: self.principal.admin_password.clone(),
			admin_password_file: self.principal.admin_password_file.clone(),
			roles: (!self.principal.roles.is_empty()).then(|| self.principal.roles.clone()),
			role_drift: self.principal.role_drift,
			database: self.target.database.clone(),
			preset: self.target.preset,
			collections: self.target.collections.clone(),
		}
	}
}
