// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod collection;
pub mod plan;
pub mod principal;
pub mod role;

pub use collection::{CollectionPreset, CollectionSpec};
pub use plan::{BootstrapPlan, RoleDriftPolicy};
pub use principal::{PrincipalInfo, PrincipalSpec, RoleDiff};
pub use role::{BuiltinRole, GrantedRole, RoleGrant};
