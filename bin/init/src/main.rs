// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod cli;
mod command;
mod output;

use std::process::ExitCode;

use clap::Parser;
use coursedb_sub_tracing::TracingBuilder;
use coursedb_type::{Error, IntoDiagnostic};
use tracing::error;

use crate::cli::Cli;

fn tracing_configuration(cli: &Cli) -> TracingBuilder {
	let builder = TracingBuilder::new()
		.with_level(cli.log_level)
		.with_format(cli.log_format)
		.with_ansi(!cli.no_color);

	match &cli.log_filter {
		Some(directive) => builder.with_filter(directive),
		None => builder,
	}
}

fn fail(err: Error) -> ExitCode {
	let code = err.kind().exit_code();
	eprintln!("{}", err.into_diagnostic());
	ExitCode::from(code)
}

#[tokio::main]
async fn main() -> ExitCode {
	let cli = Cli::parse();

	if let Err(err) = tracing_configuration(&cli).init() {
		return fail(err);
	}

	match command::run(cli).await {
		Ok(status) => status.into(),
		Err(err) => {
			error!(kind = %err.kind(), "{}", err);
			fail(err)
		}
	}
}
