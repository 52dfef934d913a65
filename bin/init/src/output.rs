// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Reports on stdout.

use std::{
	fmt::Write as _,
	io::{self, Write},
};

use coursedb_bootstrap::{BootstrapReport, CollectionOutcome, PrincipalOutcome, VerificationReport};
use coursedb_core::{BootstrapPlan, Error, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::ReportFormat;

pub fn print_bootstrap(report: &BootstrapReport, format: ReportFormat) -> Result<()> {
	write_bootstrap(&mut io::stdout().lock(), report, format)
}

/// In text mode the banners are all `init` writes to `out`; the summary goes
/// to the log.
pub fn write_bootstrap<W: Write>(out: &mut W, report: &BootstrapReport, format: ReportFormat) -> Result<()> {
	match format {
		ReportFormat::Json => write_json(out, report),
		ReportFormat::Text => {
			for line in bootstrap_text(report).lines() {
				info!("{}", line);
			}
			Ok(())
		}
	}
}

pub fn print_verification(report: &VerificationReport, format: ReportFormat) -> Result<()> {
	let mut out = io::stdout().lock();
	match format {
		ReportFormat::Json => write_json(&mut out, report),
		ReportFormat::Text => write_text(&mut out, &verification_text(report)),
	}
}

pub fn print_plan(plan: &BootstrapPlan, format: ReportFormat) -> Result<()> {
	let mut out = io::stdout().lock();
	match format {
		ReportFormat::Json => write_json(&mut out, plan),
		ReportFormat::Text => write_text(&mut out, &plan_text(plan)),
	}
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
	let json = serde_json::to_string_pretty(value).map_err(|err| Error::store("report", err.to_string()))?;
	write_text(out, &format!("{}\n", json))
}

fn write_text<W: Write>(out: &mut W, text: &str) -> Result<()> {
	out.write_all(text.as_bytes())
		.and_then(|_| out.flush())
		.map_err(|err| Error::store("report", format!("cannot write to stdout: {}", err)))
}

fn bootstrap_text(report: &BootstrapReport) -> String {
	let principal = &report.principal;
	let outcome = match &principal.outcome {
		PrincipalOutcome::Created => "created".to_string(),
		PrincipalOutcome::Unchanged => "unchanged".to_string(),
		PrincipalOutcome::Drifted {
			diff,
		} => format!("left with {} missing and {} extra role(s)", diff.missing.len(), diff.extra.len()),
		PrincipalOutcome::Reconciled {
			diff,
		} => format!("roles reconciled ({} granted, {} revoked)", diff.missing.len(), diff.extra.len()),
	};

	let mut text = String::new();
	let _ = writeln!(text, "principal {}@{}: {}", principal.username, principal.database, outcome);
	for collection in &report.collections {
		let status = match collection.outcome {
			CollectionOutcome::Created => "created",
			CollectionOutcome::Existing => "exists",
		};
		let _ = writeln!(text, "collection {}.{}: {}", report.target, collection.name, status);
	}
	text
}

fn verification_text(report: &VerificationReport) -> String {
	let principal = &report.principal;
	let mut text = String::new();

	let status = if principal.is_satisfied() {
		"ok"
	} else if principal.exists {
		"mismatch"
	} else {
		"missing"
	};
	let _ = writeln!(text, "principal {}@{}: {}", principal.username, principal.database, status);

	for collection in &report.collections {
		match collection.documents {
			Some(documents) => {
				let _ = writeln!(text, "collection {}.{}: {} document(s)", report.target, collection.name, documents);
			}
			None => {
				let _ = writeln!(text, "collection {}.{}: missing", report.target, collection.name);
			}
		}
	}
	for problem in report.problems() {
		let _ = writeln!(text, "  - {}", problem);
	}
	text
}

fn plan_text(plan: &BootstrapPlan) -> String {
	let roles = plan.principal.roles.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
	let collections = plan.collections.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");

	let mut text = String::new();
	let _ = writeln!(text, "principal {}@{} roles [{}]", plan.principal.username, plan.admin_database, roles);
	let _ = writeln!(text, "role drift: {}", plan.role_drift);
	let _ = writeln!(text, "target {}: {}", plan.target, collections);
	text
}
