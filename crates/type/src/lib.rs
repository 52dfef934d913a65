// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod identifier;
pub mod secret;

pub use error::{
	Error, ErrorKind, NameKind, ObjectKind,
	diagnostic::{Diagnostic, IntoDiagnostic},
};
pub use identifier::{CollectionName, DatabaseName, Username};
pub use secret::Secret;

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! return_error {
	($err:expr) => {
		return Err($err.into())
	};
}
