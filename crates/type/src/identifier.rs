// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Validated names for databases, collections and principals.
//!
//! Every name is checked when it is constructed, so a value of one of these
//! types can be handed to a store without further validation.

use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
	Result,
	error::{Error, NameKind},
	return_error,
};

/// Name of the database that holds users and cluster-wide role grants.
pub const ADMIN_DATABASE: &str = "admin";

pub const MAX_DATABASE_NAME_BYTES: usize = 63;
pub const MAX_NAMESPACE_BYTES: usize = 255;
pub const MAX_USERNAME_BYTES: usize = 256;

const FORBIDDEN_DATABASE_CHARS: &[char] = &['/', '\\', '.', '"', '$', '*', '<', '>', ':', '|', '?', ' ', '\0'];

macro_rules! identifier {
	($name:ident, $validate:ident) => {
		#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);

		impl $name {
			pub fn parse(value: impl Into<String>) -> Result<Self> {
				let value = value.into();
				$validate(&value)?;
				Ok(Self(value))
			}

			pub fn as_str(&self) -> &str {
				&self.0
			}

			pub fn into_inner(self) -> String {
				self.0
			}
		}

		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}

		impl FromStr for $name {
			type Err = Error;

			fn from_str(s: &str) -> Result<Self> {
				Self::parse(s)
			}
		}

		impl TryFrom<String> for $name {
			type Error = Error;

			fn try_from(value: String) -> Result<Self> {
				Self::parse(value)
			}
		}

		impl TryFrom<&str> for $name {
			type Error = Error;

			fn try_from(value: &str) -> Result<Self> {
				Self::parse(value)
			}
		}

		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}

		impl PartialEq<str> for $name {
			fn eq(&self, other: &str) -> bool {
				self.0 == other
			}
		}

		impl PartialEq<&str> for $name {
			fn eq(&self, other: &&str) -> bool {
				self.0 == *other
			}
		}
	};
}

identifier!(DatabaseName, validate_database_name);
identifier!(CollectionName, validate_collection_name);
identifier!(Username, validate_username);

impl DatabaseName {
	pub fn admin() -> Self {
		Self(ADMIN_DATABASE.to_string())
	}
}

impl CollectionName {
	/// The fully qualified `<database>.<collection>` namespace, checked
	/// against the server's namespace length limit.
	pub fn qualified(&self, database: &DatabaseName) -> Result<String> {
		let namespace = format!("{}.{}", database, self);
		if namespace.len() > MAX_NAMESPACE_BYTES {
			return_error!(invalid(
				NameKind::Collection,
				&self.0,
				format!(
					"namespace '{}' is {} bytes, the limit is {}",
					namespace,
					namespace.len(),
					MAX_NAMESPACE_BYTES
				)
			));
		}
		Ok(namespace)
	}
}

fn invalid(kind: NameKind, name: &str, reason: impl Into<String>) -> Error {
	Error::InvalidName {
		kind,
		name: name.to_string(),
		reason: reason.into(),
	}
}

fn validate_database_name(name: &str) -> Result<()> {
	if name.is_empty() {
		return_error!(invalid(NameKind::Database, name, "must not be empty"));
	}
	if name.len() > MAX_DATABASE_NAME_BYTES {
		return_error!(invalid(
			NameKind::Database,
			name,
			format!("is {} bytes, the limit is {}", name.len(), MAX_DATABASE_NAME_BYTES)
		));
	}
	if let Some(c) = name.chars().find(|c| FORBIDDEN_DATABASE_CHARS.contains(c)) {
		return_error!(invalid(NameKind::Database, name, format!("contains forbidden character {:?}", c)));
	}
	Ok(())
}

fn validate_collection_name(name: &str) -> Result<()> {
	if name.is_empty() {
		return_error!(invalid(NameKind::Collection, name, "must not be empty"));
	}
	if name.contains('$') {
		return_error!(invalid(NameKind::Collection, name, "contains '$'"));
	}
	if name.contains('\0') {
		return_error!(invalid(NameKind::Collection, name, "contains a NUL character"));
	}
	if name.starts_with("system.") {
		return_error!(invalid(NameKind::Collection, name, "the 'system.' prefix is reserved"));
	}
	if name.starts_with('.') {
		return_error!(invalid(NameKind::Collection, name, "must not start with '.'"));
	}
	if name.len() > MAX_NAMESPACE_BYTES {
		return_error!(invalid(
			NameKind::Collection,
			name,
			format!("is {} bytes, the limit is {}", name.len(), MAX_NAMESPACE_BYTES)
		));
	}
	Ok(())
}

fn validate_username(name: &str) -> Result<()> {
	if name.is_empty() {
		return_error!(invalid(NameKind::Username, name, "must not be empty"));
	}
	if name.len() > MAX_USERNAME_BYTES {
		return_error!(invalid(
			NameKind::Username,
			name,
			format!("is {} bytes, the limit is {}", name.len(), MAX_USERNAME_BYTES)
		));
	}
	if name.chars().any(char::is_control) {
		return_error!(invalid(NameKind::Username, name, "contains a control character"));
	}
	Ok(())
}
