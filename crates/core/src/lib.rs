// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod config;
pub mod interface;
pub mod model;

pub use config::{BootstrapConfig, ConnectionConfig, ConnectionCredential, Overrides};
pub use coursedb_type::{CollectionName, DatabaseName, Error, ErrorKind, Result, Secret, Username};
pub use interface::DocumentStore;
pub use model::{
	BootstrapPlan, BuiltinRole, CollectionPreset, CollectionSpec, GrantedRole, PrincipalInfo, PrincipalSpec,
	RoleDiff, RoleDriftPolicy, RoleGrant,
};
