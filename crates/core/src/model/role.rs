// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use coursedb_type::{DatabaseName, Error, Result, identifier::ADMIN_DATABASE};
use serde::{Deserialize, Serialize};

/// The server's built-in role vocabulary. Custom roles are never defined by
/// the bootstrap procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuiltinRole {
	Read,
	ReadWrite,
	DbAdmin,
	DbOwner,
	UserAdmin,
	ClusterAdmin,
	ClusterManager,
	ClusterMonitor,
	HostManager,
	Backup,
	Restore,
	ReadAnyDatabase,
	ReadWriteAnyDatabase,
	UserAdminAnyDatabase,
	DbAdminAnyDatabase,
	Root,
}

impl BuiltinRole {
	pub const ALL: [BuiltinRole; 16] = [
		BuiltinRole::Read,
		BuiltinRole::ReadWrite,
		BuiltinRole::DbAdmin,
		BuiltinRole::DbOwner,
		BuiltinRole::UserAdmin,
		BuiltinRole::ClusterAdmin,
		BuiltinRole::ClusterManager,
		BuiltinRole::ClusterMonitor,
		BuiltinRole::HostManager,
		BuiltinRole::Backup,
		BuiltinRole::Restore,
		BuiltinRole::ReadAnyDatabase,
		BuiltinRole::ReadWriteAnyDatabase,
		BuiltinRole::UserAdminAnyDatabase,
		BuiltinRole::DbAdminAnyDatabase,
		BuiltinRole::Root,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			BuiltinRole::Read => "read",
			BuiltinRole::ReadWrite => "readWrite",
			BuiltinRole::DbAdmin => "dbAdmin",
			BuiltinRole::DbOwner => "dbOwner",
			BuiltinRole::UserAdmin => "userAdmin",
			BuiltinRole::ClusterAdmin => "clusterAdmin",
			BuiltinRole::ClusterManager => "clusterManager",
			BuiltinRole::ClusterMonitor => "clusterMonitor",
			BuiltinRole::HostManager => "hostManager",
			BuiltinRole::Backup => "backup",
			BuiltinRole::Restore => "restore",
			BuiltinRole::ReadAnyDatabase => "readAnyDatabase",
			BuiltinRole::ReadWriteAnyDatabase => "readWriteAnyDatabase",
			BuiltinRole::UserAdminAnyDatabase => "userAdminAnyDatabase",
			BuiltinRole::DbAdminAnyDatabase => "dbAdminAnyDatabase",
			BuiltinRole::Root => "root",
		}
	}

	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|role| role.as_str() == name)
	}

	/// Roles the server only accepts when granted on the admin database.
	pub fn admin_only(&self) -> bool {
		!matches!(
			self,
			BuiltinRole::Read
				| BuiltinRole::ReadWrite
				| BuiltinRole::DbAdmin
				| BuiltinRole::DbOwner
				| BuiltinRole::UserAdmin
		)
	}
}

impl Display for BuiltinRole {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for BuiltinRole {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

/// A built-in role granted on a database, e.g. `readWriteAnyDatabase@admin`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRoleGrant")]
pub struct RoleGrant {
	pub role: BuiltinRole,
	#[serde(rename = "db")]
	pub database: DatabaseName,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRoleGrant {
	role: String,
	db: String,
}

impl TryFrom<RawRoleGrant> for RoleGrant {
	type Error = Error;

	fn try_from(raw: RawRoleGrant) -> Result<Self> {
		RoleGrant::parse(&raw.role, &raw.db)
	}
}

impl RoleGrant {
	pub fn new(role: BuiltinRole, database: DatabaseName) -> Result<Self> {
		if role.admin_only() && database != ADMIN_DATABASE {
			return Err(Error::InvalidRole {
				role: role.to_string(),
				database: database.into_inner(),
				reason: format!("'{}' can only be granted on the '{}' database", role, ADMIN_DATABASE),
			});
		}
		Ok(Self {
			role,
			database,
		})
	}

	pub fn parse(role: &str, database: &str) -> Result<Self> {
		let Some(builtin) = BuiltinRole::from_name(role) else {
			return Err(Error::InvalidRole {
				role: role.to_string(),
				database: database.to_string(),
				reason: "not a built-in role".to_string(),
			});
		};
		Self::new(builtin, DatabaseName::parse(database)?)
	}

	/// The three roles the courses deployment grants its administrator.
	pub fn administrator_defaults() -> Vec<RoleGrant> {
		[BuiltinRole::UserAdminAnyDatabase, BuiltinRole::ReadWriteAnyDatabase, BuiltinRole::DbAdminAnyDatabase]
			.into_iter()
			.map(|role| RoleGrant {
				role,
				database: DatabaseName::admin(),
			})
			.collect()
	}
}

impl Display for RoleGrant {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}@{}", self.role, self.database)
	}
}

/// Parses the `role@database` form used on the command line.
impl FromStr for RoleGrant {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.split_once('@') {
			Some((role, database)) => RoleGrant::parse(role, database),
			None => Err(Error::InvalidRole {
				role: s.to_string(),
				database: String::new(),
				reason: "expected the form role@database".to_string(),
			}),
		}
	}
}

/// A role held by an existing principal as reported by the server. Unlike
/// [`RoleGrant`] it may name a custom role.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GrantedRole {
	pub role: String,
	pub database: String,
}

impl GrantedRole {
	pub fn new(role: impl Into<String>, database: impl Into<String>) -> Self {
		Self {
			role: role.into(),
			database: database.into(),
		}
	}
}

impl From<&RoleGrant> for GrantedRole {
	fn from(grant: &RoleGrant) -> Self {
		GrantedRole::new(grant.role.as_str(), grant.database.as_str())
	}
}

impl Display for GrantedRole {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}@{}", self.role, self.database)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_role_names_round_trip_vocabulary() {
		for role in BuiltinRole::ALL {
			assert_eq!(BuiltinRole::from_name(role.as_str()), Some(role));
		}
		assert_eq!(BuiltinRole::from_name("superuser"), None);
		assert_eq!(BuiltinRole::from_name("ReadWrite"), None);
	}

	#[test]
	fn test_any_database_roles_require_admin() {
		let err = RoleGrant::parse("readWriteAnyDatabase", "courses_db").unwrap_err();
		assert!(matches!(err, Error::InvalidRole { .. }));

		let grant = RoleGrant::parse("readWrite", "courses_db").unwrap();
		assert_eq!(grant.to_string(), "readWrite@courses_db");
	}

	#[test]
	fn test_from_str() {
		let grant: RoleGrant = "dbAdminAnyDatabase@admin".parse().unwrap();
		assert_eq!(grant.role, BuiltinRole::DbAdminAnyDatabase);
		assert!("dbAdminAnyDatabase".parse::<RoleGrant>().is_err());
		assert!("owner@admin".parse::<RoleGrant>().is_err());
	}

	#[test]
	fn test_administrator_defaults() {
		let names: Vec<String> = RoleGrant::administrator_defaults().iter().map(ToString::to_string).collect();
		assert_eq!(
			names,
			vec!["userAdminAnyDatabase@admin", "readWriteAnyDatabase@admin", "dbAdminAnyDatabase@admin"]
		);
	}

	#[test]
	fn test_deserialize_from_document_form() {
		let grant: RoleGrant = serde_json::from_str(r#"{"role": "root", "db": "admin"}"#).unwrap();
		assert_eq!(grant.role, BuiltinRole::Root);
		assert!(serde_json::from_str::<RoleGrant>(r#"{"role": "root", "db": "courses_db"}"#).is_err());
	}
}
