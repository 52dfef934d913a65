// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use coursedb_type::{Error, ErrorKind};
use mongodb::error::{Error as MongoError, ErrorKind as MongoErrorKind};

pub(crate) const UNAUTHORIZED: i32 = 13;
pub(crate) const AUTHENTICATION_FAILED: i32 = 18;
pub(crate) const NAMESPACE_EXISTS: i32 = 48;
pub(crate) const DUPLICATE_KEY: i32 = 11000;
pub(crate) const USER_ALREADY_EXISTS: i32 = 51003;

/// The server error code of a failed command, if the failure was one.
pub(crate) fn command_code(err: &MongoError) -> Option<i32> {
	match err.kind.as_ref() {
		MongoErrorKind::Command(command) => Some(command.code),
		_ => None,
	}
}

/// Error codes that map to a specific kind regardless of the operation.
pub(crate) fn classify_code(code: i32) -> Option<ErrorKind> {
	match code {
		UNAUTHORIZED => Some(ErrorKind::Authorization),
		AUTHENTICATION_FAILED => Some(ErrorKind::Authentication),
		NAMESPACE_EXISTS | DUPLICATE_KEY | USER_ALREADY_EXISTS => Some(ErrorKind::AlreadyExists),
		_ => None,
	}
}

/// Maps a driver error for `operation`. Conflicts are not handled here; the
/// caller knows which object already exists.
pub(crate) fn map_error(operation: &str, err: MongoError) -> Error {
	let reason = err.to_string();

	if let Some(code) = command_code(&err) {
		match classify_code(code) {
			Some(ErrorKind::Authorization) => {
				return Error::Authorization {
					action: operation.to_string(),
					reason,
				};
			}
			Some(ErrorKind::Authentication) => {
				return Error::Authentication {
					reason,
				};
			}
			_ => return Error::store(operation, reason),
		}
	}

	match err.kind.as_ref() {
		MongoErrorKind::Authentication {
			..
		} => Error::Authentication {
			reason,
		},
		MongoErrorKind::ServerSelection {
			..
		}
		| MongoErrorKind::Io(_)
		| MongoErrorKind::ConnectionPoolCleared {
			..
		}
		| MongoErrorKind::DnsResolve {
			..
		} => Error::Connection {
			reason,
		},
		MongoErrorKind::InvalidArgument {
			..
		} => Error::config(reason),
		_ => Error::store(operation, reason),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_classify_code() {
		assert_eq!(classify_code(13), Some(ErrorKind::Authorization));
		assert_eq!(classify_code(18), Some(ErrorKind::Authentication));
		assert_eq!(classify_code(48), Some(ErrorKind::AlreadyExists));
		assert_eq!(classify_code(51003), Some(ErrorKind::AlreadyExists));
		assert_eq!(classify_code(11000), Some(ErrorKind::AlreadyExists));
		assert_eq!(classify_code(26), None);
	}
}
