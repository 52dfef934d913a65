// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Plans used across the test suites. They mirror the courses deployment:
//! principal `admin` on `admin` with the three administrator roles, target
//! database `courses_db`.

use coursedb_core::{
	BootstrapPlan, CollectionPreset, CollectionSpec, DatabaseName, PrincipalSpec, Result, RoleDriftPolicy,
	RoleGrant, Secret, Username,
};

pub const ADMIN_SECRET: &str = "s3cret";

pub const TARGET_DATABASE: &str = "courses_db";

fn principal() -> Result<PrincipalSpec> {
	PrincipalSpec::new(Username::parse("admin")?, Secret::new(ADMIN_SECRET)?, RoleGrant::administrator_defaults())
}

fn plan(collections: CollectionSpec, role_drift: RoleDriftPolicy) -> Result<BootstrapPlan> {
	BootstrapPlan::new(
		DatabaseName::admin(),
		principal()?,
		DatabaseName::parse(TARGET_DATABASE)?,
		collections,
		role_drift,
	)
}

/// The four canonical collections with the default drift policy.
pub fn standard_plan() -> BootstrapPlan {
	plan_with_policy(RoleDriftPolicy::default())
}

pub fn plan_with_policy(role_drift: RoleDriftPolicy) -> BootstrapPlan {
	CollectionPreset::Standard
		.spec()
		.and_then(|collections| plan(collections, role_drift))
		.unwrap_or_else(|err| panic!("standard plan is valid: {}", err))
}

/// Builds a plan over `names`, surfacing validation errors to the caller.
pub fn plan_with_collections(names: &[&str]) -> Result<BootstrapPlan> {
	plan(CollectionSpec::parse(names.iter().copied())?, RoleDriftPolicy::default())
}
