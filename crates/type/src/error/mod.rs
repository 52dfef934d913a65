// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

pub mod diagnostic;

use std::fmt::{self, Display, Formatter};

/// The kind of identifier a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
	Database,
	Collection,
	Username,
	Secret,
}

impl Display for NameKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			NameKind::Database => f.write_str("database"),
			NameKind::Collection => f.write_str("collection"),
			NameKind::Username => f.write_str("username"),
			NameKind::Secret => f.write_str("secret"),
		}
	}
}

/// Durable objects the bootstrap procedure creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
	Principal,
	Collection,
}

impl Display for ObjectKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ObjectKind::Principal => f.write_str("principal"),
			ObjectKind::Collection => f.write_str("collection"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	Validation,
	Config,
	Connection,
	Authentication,
	Authorization,
	AlreadyExists,
	RoleDrift,
	Store,
}

impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ErrorKind::Validation => f.write_str("validation"),
			ErrorKind::Config => f.write_str("config"),
			ErrorKind::Connection => f.write_str("connection"),
			ErrorKind::Authentication => f.write_str("authentication"),
			ErrorKind::Authorization => f.write_str("authorization"),
			ErrorKind::AlreadyExists => f.write_str("already exists"),
			ErrorKind::RoleDrift => f.write_str("role drift"),
			ErrorKind::Store => f.write_str("store"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("invalid {kind} name '{name}': {reason}")]
	InvalidName {
		kind: NameKind,
		name: String,
		reason: String,
	},

	#[error("invalid role grant '{role}@{database}': {reason}")]
	InvalidRole {
		role: String,
		database: String,
		reason: String,
	},

	#[error("validation failed: {reason}")]
	Validation {
		reason: String,
	},

	#[error("configuration error: {reason}")]
	Config {
		reason: String,
	},

	#[error("cannot reach database: {reason}")]
	Connection {
		reason: String,
	},

	#[error("authentication failed: {reason}")]
	Authentication {
		reason: String,
	},

	#[error("not authorized to {action}: {reason}")]
	Authorization {
		action: String,
		reason: String,
	},

	#[error("{kind} '{namespace}.{name}' already exists")]
	AlreadyExists {
		kind: ObjectKind,
		namespace: String,
		name: String,
	},

	#[error(
		"principal '{username}' holds different roles than configured (missing: [{}], extra: [{}])",
		.missing.join(", "),
		.extra.join(", ")
	)]
	RoleDrift {
		username: String,
		missing: Vec<String>,
		extra: Vec<String>,
	},

	#[error("database operation '{operation}' failed: {reason}")]
	Store {
		operation: String,
		reason: String,
	},
}

impl Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::InvalidName {
				..
			}
			| Error::InvalidRole {
				..
			}
			| Error::Validation {
				..
			} => ErrorKind::Validation,
			Error::Config {
				..
			} => ErrorKind::Config,
			Error::Connection {
				..
			} => ErrorKind::Connection,
			Error::Authentication {
				..
			} => ErrorKind::Authentication,
			Error::Authorization {
				..
			} => ErrorKind::Authorization,
			Error::AlreadyExists {
				..
			} => ErrorKind::AlreadyExists,
			Error::RoleDrift {
				..
			} => ErrorKind::RoleDrift,
			Error::Store {
				..
			} => ErrorKind::Store,
		}
	}

	pub fn is_already_exists(&self) -> bool {
		self.kind() == ErrorKind::AlreadyExists
	}

	pub fn validation(reason: impl Into<String>) -> Self {
		Error::Validation {
			reason: reason.into(),
		}
	}

	pub fn config(reason: impl Into<String>) -> Self {
		Error::Config {
			reason: reason.into(),
		}
	}

	pub fn store(operation: impl Into<String>, reason: impl Into<String>) -> Self {
		Error::Store {
			operation: operation.into(),
			reason: reason.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_kind_groups_validation_failures() {
		let name = Error::InvalidName {
			kind: NameKind::Collection,
			name: String::new(),
			reason: "must not be empty".to_string(),
		};
		let role = Error::InvalidRole {
			role: "superuser".to_string(),
			database: "admin".to_string(),
			reason: "not a built-in role".to_string(),
		};

		assert_eq!(name.kind(), ErrorKind::Validation);
		assert_eq!(role.kind(), ErrorKind::Validation);
		assert_eq!(Error::validation("duplicate").kind(), ErrorKind::Validation);
	}

	#[test]
	fn test_role_drift_message_lists_roles() {
		let err = Error::RoleDrift {
			username: "admin".to_string(),
			missing: vec!["dbAdminAnyDatabase@admin".to_string()],
			extra: vec!["read@courses_db".to_string(), "root@admin".to_string()],
		};

		assert_eq!(
			err.to_string(),
			"principal 'admin' holds different roles than configured (missing: [dbAdminAnyDatabase@admin], extra: [read@courses_db, root@admin])"
		);
	}

	#[test]
	fn test_already_exists() {
		let err = Error::AlreadyExists {
			kind: ObjectKind::Collection,
			namespace: "courses_db".to_string(),
			name: "courses".to_string(),
		};

		assert!(err.is_already_exists());
		assert_eq!(err.to_string(), "collection 'courses_db.courses' already exists");
		assert!(!Error::store("ping", "boom").is_already_exists());
	}
}
