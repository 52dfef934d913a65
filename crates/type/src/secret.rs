// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Debug, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize, Serializer};

use crate::{
	Result,
	error::{Error, NameKind},
};

const REDACTED: &str = "***";

/// A credential that never renders its value through `Debug` or serde.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Secret(String);

impl Secret {
	pub fn new(value: impl Into<String>) -> Result<Self> {
		let value = value.into();
		if value.is_empty() {
			return Err(Error::InvalidName {
				kind: NameKind::Secret,
				name: String::new(),
				reason: "must not be empty".to_string(),
			});
		}
		Ok(Self(value))
	}

	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "Secret({})", REDACTED)
	}
}

impl Serialize for Secret {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.serialize_str(REDACTED)
	}
}

impl TryFrom<String> for Secret {
	type Error = Error;

	fn try_from(value: String) -> Result<Self> {
		Self::new(value)
	}
}

impl FromStr for Secret {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Self::new(s)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_debug_is_redacted() {
		let secret = Secret::new("hunter2").unwrap();
		assert_eq!(format!("{:?}", secret), "Secret(***)");
		assert_eq!(secret.expose(), "hunter2");
	}

	#[test]
	fn test_serialize_is_redacted() {
		let secret = Secret::new("hunter2").unwrap();
		assert_eq!(serde_json::to_string(&secret).unwrap(), "\"***\"");
	}

	#[test]
	fn test_empty_rejected() {
		assert!(Secret::new("").is_err());
		assert!(serde_json::from_str::<Secret>("\"\"").is_err());
	}
}
