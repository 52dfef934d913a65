// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod faulty;
pub mod fixture;
pub mod tempdir;

pub use faulty::{FaultyStore, Operation};
pub use fixture::{ADMIN_SECRET, TARGET_DATABASE, plan_with_collections, plan_with_policy, standard_plan};
pub use tempdir::temp_dir;
