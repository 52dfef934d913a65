// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Installs the global `tracing` subscriber.
//!
//! Events are written to stderr. Standard output is reserved for the
//! bootstrap banners and reports, so piping the binary's output never mixes
//! in log lines.

use std::io;

use coursedb_type::{Error, Result};
use tracing::{Level, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::format::LogFormat;

#[derive(Debug, Clone)]
pub struct TracingBuilder {
	level: Level,
	format: LogFormat,
	ansi: bool,
	target: bool,
	filter: Option<String>,
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self {
			level: Level::INFO,
			format: LogFormat::default(),
			ansi: true,
			target: false,
			filter: None,
		}
	}

	/// Default level when neither an explicit filter nor `RUST_LOG` is set.
	pub fn with_level(mut self, level: Level) -> Self {
		self.level = level;
		self
	}

	pub fn with_format(mut self, format: LogFormat) -> Self {
		self.format = format;
		self
	}

	pub fn with_ansi(mut self, ansi: bool) -> Self {
		self.ansi = ansi;
		self
	}

	pub fn with_target(mut self, target: bool) -> Self {
		self.target = target;
		self
	}

	/// An `EnvFilter` directive such as `coursedb=debug,mongodb=warn`. Takes
	/// precedence over `RUST_LOG`.
	pub fn with_filter(mut self, directive: impl Into<String>) -> Self {
		self.filter = Some(directive.into());
		self
	}

	pub fn env_filter(&self) -> Result<EnvFilter> {
		match &self.filter {
			Some(directive) => EnvFilter::try_new(directive)
				.map_err(|err| Error::config(format!("invalid log filter '{}': {}", directive, err))),
			None => EnvFilter::builder()
				.with_default_directive(LevelFilter::from_level(self.level).into())
				.from_env()
				.map_err(|err| Error::config(format!("invalid RUST_LOG: {}", err))),
		}
	}

	/// Installs the subscriber. Fails when one is already installed.
	pub fn init(self) -> Result<()> {
		let filter = self.env_filter()?;
		let registry = tracing_subscriber::registry().with(filter);

		let result = match self.format {
			LogFormat::Pretty => registry
				.with(fmt::layer()
					.pretty()
					.with_writer(io::stderr)
					.with_ansi(self.ansi)
					.with_target(self.target))
				.try_init(),
			LogFormat::Compact => registry
				.with(fmt::layer()
					.compact()
					.with_writer(io::stderr)
					.with_ansi(self.ansi)
					.with_target(self.target))
				.try_init(),
			LogFormat::Json => registry
				.with(fmt::layer().json().with_writer(io::stderr).with_target(self.target))
				.try_init(),
		};

		result.map_err(|err| Error::config(format!("cannot install tracing subscriber: {}", err)))
	}
}
