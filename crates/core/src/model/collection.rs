// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::HashSet,
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use coursedb_type::{CollectionName, Error, Result};
use serde::{Deserialize, Serialize};

/// Named collection sets of the courses deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionPreset {
	/// Only `courses`.
	Minimal,
	/// `courses`, `enrollments`, `submissions` and `assignments`.
	#[default]
	Standard,
	/// The standard set plus every other collection the courses service
	/// writes to.
	Service,
}

impl CollectionPreset {
	pub fn names(&self) -> &'static [&'static str] {
		match self {
			CollectionPreset::Minimal => &["courses"],
			CollectionPreset::Standard => &["courses", "enrollments", "submissions", "assignments"],
			CollectionPreset::Service => &[
				"courses",
				"enrollments",
				"submissions",
				"assignments",
				"forum_questions",
				"teacher_activity_logs",
			],
		}
	}

	pub fn spec(&self) -> Result<CollectionSpec> {
		CollectionSpec::parse(self.names().iter().copied())
	}
}

impl Display for CollectionPreset {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			CollectionPreset::Minimal => f.write_str("minimal"),
			CollectionPreset::Standard => f.write_str("standard"),
			CollectionPreset::Service => f.write_str("service"),
		}
	}
}

impl FromStr for CollectionPreset {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"minimal" => Ok(CollectionPreset::Minimal),
			"standard" => Ok(CollectionPreset::Standard),
			"service" => Ok(CollectionPreset::Service),
			other => Err(Error::config(format!(
				"unknown collection preset '{}', expected minimal, standard or service",
				other
			))),
		}
	}
}

/// Ordered, duplicate free list of collections to ensure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CollectionSpec(Vec<CollectionName>);

impl CollectionSpec {
	pub fn new(names: Vec<CollectionName>) -> Result<Self> {
		if names.is_empty() {
			return Err(Error::validation("the collection list is empty"));
		}

		let mut seen = HashSet::with_capacity(names.len());
		for name in &names {
			if !seen.insert(name) {
				return Err(Error::validation(format!("collection '{}' is listed more than once", name)));
			}
		}

		Ok(Self(names))
	}

	pub fn parse<I, S>(names: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let names = names.into_iter().map(CollectionName::parse).collect::<Result<Vec<_>>>()?;
		Self::new(names)
	}

	pub fn iter(&self) -> impl Iterator<Item = &CollectionName> {
		self.0.iter()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.0.iter().any(|c| c == name)
	}
}

impl<'a> IntoIterator for &'a CollectionSpec {
	type Item = &'a CollectionName;
	type IntoIter = std::slice::Iter<'a, CollectionName>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

#[cfg(test)]
mod tests {
	use coursedb_type::ErrorKind;

	use super::*;

	#[test]
	fn test_presets() {
		assert_eq!(CollectionPreset::Minimal.spec().unwrap().len(), 1);
		assert_eq!(CollectionPreset::default(), CollectionPreset::Standard);

		let standard = CollectionPreset::Standard.spec().unwrap();
		let names: Vec<&str> = standard.iter().map(CollectionName::as_str).collect();
		assert_eq!(names, vec!["courses", "enrollments", "submissions", "assignments"]);

		let service = CollectionPreset::Service.spec().unwrap();
		assert!(service.contains("teacher_activity_logs"));
		assert_eq!(service.len(), 6);
	}

	#[test]
	fn test_preset_from_str() {
		assert_eq!("service".parse::<CollectionPreset>().unwrap(), CollectionPreset::Service);
		assert_eq!("everything".parse::<CollectionPreset>().unwrap_err().kind(), ErrorKind::Config);
	}

	#[test]
	fn test_empty_name_rejected() {
		let err = CollectionSpec::parse(["courses", ""]).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Validation);
	}

	#[test]
	fn test_duplicates_rejected() {
		let err = CollectionSpec::parse(["courses", "enrollments", "courses"]).unwrap_err();
		assert_eq!(err, Error::validation("collection 'courses' is listed more than once"));
	}

	#[test]
	fn test_empty_list_rejected() {
		assert!(CollectionSpec::parse(Vec::<String>::new()).is_err());
	}
}
