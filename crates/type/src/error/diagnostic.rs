// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

pub mod auth;
pub mod catalog;
pub mod connection;
pub mod name;

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::error::{Error, ErrorKind};

/// A user-facing rendering of an error with a stable code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	pub help: Option<String>,
	pub notes: Vec<String>,
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "[{}] {}", self.code, self.message)?;
		if let Some(help) = &self.help {
			write!(f, "\n  help: {}", help)?;
		}
		for note in &self.notes {
			write!(f, "\n  note: {}", note)?;
		}
		Ok(())
	}
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Error {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			Error::InvalidName {
				kind,
				name,
				reason,
			} => name::invalid_name(kind, &name, &reason),
			Error::InvalidRole {
				role,
				database,
				reason,
			} => name::invalid_role(&role, &database, &reason),
			Error::Validation {
				reason,
			} => name::validation_failed(&reason),
			Error::Config {
				reason,
			} => connection::config_invalid(&reason),
			Error::Connection {
				reason,
			} => connection::connection_failed(&reason),
			Error::Authentication {
				reason,
			} => auth::authentication_failed(&reason),
			Error::Authorization {
				action,
				reason,
			} => auth::authorization_denied(&action, &reason),
			Error::AlreadyExists {
				kind,
				namespace,
				name,
			} => catalog::already_exists(kind, &namespace, &name),
			Error::RoleDrift {
				username,
				missing,
				extra,
			} => auth::role_drift(&username, &missing, &extra),
			Error::Store {
				operation,
				reason,
			} => catalog::store_failed(&operation, &reason),
		}
	}
}

impl Error {
	pub fn diagnostic(&self) -> Diagnostic {
		self.clone().into_diagnostic()
	}
}

impl ErrorKind {
	/// Process exit status reported by the command line for this kind of failure.
	pub fn exit_code(&self) -> u8 {
		match self {
			ErrorKind::Store | ErrorKind::AlreadyExists => 1,
			ErrorKind::Validation | ErrorKind::Config => 2,
			ErrorKind::Connection | ErrorKind::Authentication => 3,
			ErrorKind::Authorization => 4,
			ErrorKind::RoleDrift => 5,
		}
	}
}
