// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! User management commands and their replies. The driver has no typed API
//! for these, so they are sent through `run_command`.

use std::collections::BTreeSet;

use coursedb_core::model::{GrantedRole, PrincipalInfo, PrincipalSpec, RoleGrant};
use coursedb_type::{DatabaseName, Error, Result, Username};
use mongodb::bson::{Bson, Document, doc};

pub(crate) fn ping() -> Document {
	doc! { "ping": 1 }
}

pub(crate) fn connection_status() -> Document {
	doc! { "connectionStatus": 1 }
}

pub(crate) fn users_info(database: &DatabaseName, username: &Username) -> Document {
	doc! {
		"usersInfo": { "user": username.as_str(), "db": database.as_str() },
	}
}

pub(crate) fn create_user(principal: &PrincipalSpec) -> Document {
	doc! {
		"createUser": principal.username.as_str(),
		"pwd": principal.secret.expose(),
		"roles": roles(&principal.roles),
	}
}

pub(crate) fn update_user_roles(username: &Username, grants: &[RoleGrant]) -> Document {
	doc! {
		"updateUser": username.as_str(),
		"roles": roles(grants),
	}
}

fn roles(grants: &[RoleGrant]) -> Vec<Document> {
	grants.iter().map(|grant| doc! { "role": grant.role.as_str(), "db": grant.database.as_str() }).collect()
}

/// Reads the first entry of a `usersInfo` reply.
pub(crate) fn parse_users_info(reply: &Document) -> Result<Option<PrincipalInfo>> {
	let users = reply.get_array("users").map_err(|err| malformed(format!("users: {}", err)))?;

	let Some(user) = users.first() else {
		return Ok(None);
	};
	let user = user.as_document().ok_or_else(|| malformed("user entry is not a document"))?;

	let username = user.get_str("user").map_err(|err| malformed(format!("user: {}", err)))?;
	let database = user.get_str("db").map_err(|err| malformed(format!("db: {}", err)))?;

	let mut roles = BTreeSet::new();
	if let Some(Bson::Array(entries)) = user.get("roles") {
		for entry in entries {
			let entry = entry.as_document().ok_or_else(|| malformed("role entry is not a document"))?;
			let role = entry.get_str("role").map_err(|err| malformed(format!("role: {}", err)))?;
			let db = entry.get_str("db").map_err(|err| malformed(format!("role db: {}", err)))?;
			roles.insert(GrantedRole::new(role, db));
		}
	}

	Ok(Some(PrincipalInfo {
		username: username.to_string(),
		database: database.to_string(),
		roles,
	}))
}

fn malformed(reason: impl Into<String>) -> Error {
	Error::store("usersInfo", format!("unexpected reply: {}", reason.into()))
}

#[cfg(test)]
mod tests {
	use coursedb_type::Secret;

	use super::*;

	#[test]
	fn test_create_user_command() {
		let principal = PrincipalSpec::new(
			Username::parse("admin").unwrap(),
			Secret::new("s3cret").unwrap(),
			RoleGrant::administrator_defaults(),
		)
		.unwrap();

		let command = create_user(&principal);
		assert_eq!(command.get_str("createUser").unwrap(), "admin");
		assert_eq!(command.get_str("pwd").unwrap(), "s3cret");

		let roles = command.get_array("roles").unwrap();
		assert_eq!(roles.len(), 3);
		assert_eq!(roles[0].as_document().unwrap(), &doc! { "role": "userAdminAnyDatabase", "db": "admin" });
	}

	#[test]
	fn test_update_user_roles_has_no_password() {
		let command = update_user_roles(
			&Username::parse("admin").unwrap(),
			&[RoleGrant::parse("root", "admin").unwrap()],
		);
		assert_eq!(command.get_str("updateUser").unwrap(), "admin");
		assert!(!command.contains_key("pwd"));
	}

	#[test]
	fn test_parse_users_info() {
		let reply = doc! {
			"users": [{
				"_id": "admin.admin",
				"user": "admin",
				"db": "admin",
				"roles": [
					{ "role": "readWriteAnyDatabase", "db": "admin" },
					{ "role": "reporting", "db": "courses_db" },
				],
			}],
			"ok": 1.0,
		};

		let info = parse_users_info(&reply).unwrap().unwrap();
		assert_eq!(info.username, "admin");
		assert_eq!(info.database, "admin");
		assert!(info.roles.contains(&GrantedRole::new("reporting", "courses_db")));
		assert_eq!(info.roles.len(), 2);
	}

	#[test]
	fn test_parse_users_info_empty() {
		let reply = doc! { "users": [], "ok": 1.0 };
		assert_eq!(parse_users_info(&reply).unwrap(), None);
	}

	#[test]
	fn test_parse_users_info_malformed() {
		let reply = doc! { "ok": 1.0 };
		assert!(parse_users_info(&reply).is_err());
	}
}
