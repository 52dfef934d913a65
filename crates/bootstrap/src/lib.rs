// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Ensures the administrative principal and the target collections of a
//! courses deployment exist.
//!
//! [`Initializer::initialize`] runs a validated [`BootstrapPlan`] against any
//! [`DocumentStore`]. Every step is ensure-exists: a second run with the same
//! plan changes nothing and succeeds.
//!
//! [`BootstrapPlan`]: coursedb_core::BootstrapPlan
//! [`DocumentStore`]: coursedb_core::DocumentStore

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod collection;
mod initializer;
pub mod listener;
mod principal;
mod report;
mod verify;

pub use collection::CollectionOutcome;
pub use initializer::Initializer;
pub use listener::{BannerListener, BootstrapListener};
pub use principal::PrincipalOutcome;
pub use report::{BootstrapReport, CollectionReport, PrincipalReport};
pub use verify::{CollectionCheck, PrincipalCheck, VerificationReport};
