// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::process::ExitCode;

use coursedb_bootstrap::{BannerListener, BootstrapReport, Initializer};
use coursedb_core::{BootstrapConfig, BootstrapPlan, DocumentStore, Result};
use coursedb_store_memory::MemoryStore;
use coursedb_store_mongo::MongoStore;
use tracing::{info, warn};

use crate::{
	cli::{Cli, Command, InitArgs, PlanArgs, ReportFormat, VerifyArgs},
	output,
};

/// Exit status of `verify` when the deployment does not match the plan.
pub const EXIT_UNSATISFIED: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
	Success,
	/// `verify` found differences between the deployment and the plan.
	Unsatisfied,
}

impl From<Status> for ExitCode {
	fn from(status: Status) -> Self {
		match status {
			Status::Success => ExitCode::SUCCESS,
			Status::Unsatisfied => ExitCode::from(EXIT_UNSATISFIED),
		}
	}
}

pub async fn run(cli: Cli) -> Result<Status> {
	let overrides = cli.overrides();
	let config = BootstrapConfig::load(cli.config.as_deref())?.apply(overrides);
	let plan = config.into_plan()?;

	match cli.command.unwrap_or_default() {
		Command::Init(args) => init(&config, &plan, args).await,
		Command::Verify(args) => verify(&config, &plan, args).await,
		Command::Plan(args) => print_plan(&plan, args),
	}
}

async fn init(config: &BootstrapConfig, plan: &BootstrapPlan, args: InitArgs) -> Result<Status> {
	let report = if args.dry_run {
		info!("dry run against an empty in-memory store");
		initialize(MemoryStore::new(), plan, args.report).await?
	} else {
		let store = MongoStore::connect(&config.connection).await?;
		initialize(store, plan, args.report).await?
	};

	output::print_bootstrap(&report, args.report)?;
	Ok(Status::Success)
}

async fn initialize<S: DocumentStore>(store: S, plan: &BootstrapPlan, format: ReportFormat) -> Result<BootstrapReport> {
	let mut initializer = Initializer::new(store);
	// Banners would break a JSON document on stdout.
	if format == ReportFormat::Text {
		initializer = initializer.with_listener(BannerListener::stdout());
	}
	initializer.initialize(plan).await
}

async fn verify(config: &BootstrapConfig, plan: &BootstrapPlan, args: VerifyArgs) -> Result<Status> {
	let store = MongoStore::connect(&config.connection).await?;
	let report = Initializer::new(store).verify(plan, args.check_login).await?;

	output::print_verification(&report, args.report)?;

	if report.is_satisfied() {
		return Ok(Status::Success);
	}
	for problem in report.problems() {
		warn!("{}", problem);
	}
	Ok(Status::Unsatisfied)
}

fn print_plan(plan: &BootstrapPlan, args: PlanArgs) -> Result<Status> {
	output::print_plan(plan, args.report)?;
	Ok(Status::Success)
}
