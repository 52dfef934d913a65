// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use coursedb_type::Error;

/// Output format of log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
	/// Multi-line, human oriented.
	Pretty,
	#[default]
	Compact,
	/// One JSON object per event, for log shippers.
	Json,
}

impl Display for LogFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			LogFormat::Pretty => f.write_str("pretty"),
			LogFormat::Compact => f.write_str("compact"),
			LogFormat::Json => f.write_str("json"),
		}
	}
}

impl FromStr for LogFormat {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"pretty" => Ok(LogFormat::Pretty),
			"compact" => Ok(LogFormat::Compact),
			"json" => Ok(LogFormat::Json),
			other => Err(Error::config(format!("unknown log format '{}', expected pretty, compact or json", other))),
		}
	}
}
