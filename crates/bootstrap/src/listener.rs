// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	io::{self, Stdout, Write},
	sync::{Mutex, PoisonError},
};

use coursedb_core::{BootstrapPlan, CollectionName};
use tracing::warn;

use crate::{collection::CollectionOutcome, principal::PrincipalOutcome, report::BootstrapReport};

pub const START_BANNER: &str = "MongoDB initialization script starting...";
pub const COMPLETE_BANNER: &str = "MongoDB initialization completed successfully!";

/// Observes the steps of a bootstrap run. Every method defaults to a no-op.
pub trait BootstrapListener: Send + Sync {
	fn on_start(&self, _plan: &BootstrapPlan) {}

	fn on_principal(&self, _outcome: &PrincipalOutcome) {}

	fn on_collection(&self, _name: &CollectionName, _outcome: CollectionOutcome) {}

	/// Only invoked when every step succeeded.
	fn on_complete(&self, _report: &BootstrapReport) {}
}

/// Prints the start and completion banners.
pub struct BannerListener<W: Write + Send = Stdout> {
	out: Mutex<W>,
}

impl BannerListener<Stdout> {
	pub fn stdout() -> Self {
		Self::new(io::stdout())
	}
}

impl<W: Write + Send> BannerListener<W> {
	pub fn new(out: W) -> Self {
		Self {
			out: Mutex::new(out),
		}
	}

	pub fn into_inner(self) -> W {
		self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
	}

	fn print(&self, line: &str) {
		let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
		if let Err(err) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
			warn!(error = %err, "cannot write bootstrap banner");
		}
	}
}

impl<W: Write + Send> BootstrapListener for BannerListener<W> {
	fn on_start(&self, _plan: &BootstrapPlan) {
		self.print(START_BANNER);
	}

	fn on_complete(&self, _report: &BootstrapReport) {
		self.print(COMPLETE_BANNER);
	}
}

#[cfg(test)]
mod tests {
	use coursedb_core::{DatabaseName, Username};
	use coursedb_testing::standard_plan;

	use super::*;
	use crate::report::PrincipalReport;

	#[test]
	fn test_banners() {
		let listener = BannerListener::new(Vec::new());
		let plan = standard_plan();

		listener.on_start(&plan);
		listener.on_complete(&BootstrapReport {
			principal: PrincipalReport {
				username: Username::parse("admin").unwrap(),
				database: DatabaseName::admin(),
				outcome: PrincipalOutcome::Created,
			},
			target: plan.target.clone(),
			collections: vec![],
		});

		let output = String::from_utf8(listener.into_inner()).unwrap();
		assert_eq!(output, "MongoDB initialization script starting...\nMongoDB initialization completed successfully!\n");
	}
}
