// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::error::{NameKind, diagnostic::Diagnostic};

pub fn invalid_name(kind: NameKind, name: &str, reason: &str) -> Diagnostic {
	let code = match kind {
		NameKind::Database => "NAME_001",
		NameKind::Collection => "NAME_002",
		NameKind::Username => "NAME_003",
		NameKind::Secret => "NAME_004",
	};

	let help = match kind {
		NameKind::Database => {
			Some("Database names are at most 63 bytes and cannot contain /\\. \"$*<>:|? or spaces".to_string())
		}
		NameKind::Collection => Some(
			"Collection names cannot be empty, contain '$' or start with 'system.'".to_string(),
		),
		NameKind::Username | NameKind::Secret => None,
	};

	Diagnostic {
		code: code.to_string(),
		message: format!("invalid {} name '{}': {}", kind, name, reason),
		help,
		notes: vec![],
	}
}

pub fn invalid_role(role: &str, database: &str, reason: &str) -> Diagnostic {
	Diagnostic {
		code: "ROLE_001".to_string(),
		message: format!("invalid role grant '{}@{}': {}", role, database, reason),
		help: Some("Use a built-in role such as readWriteAnyDatabase scoped to the admin database".to_string()),
		notes: vec![],
	}
}

pub fn validation_failed(reason: &str) -> Diagnostic {
	Diagnostic {
		code: "VALIDATION_001".to_string(),
		message: format!("validation failed: {}", reason),
		help: None,
		notes: vec![],
	}
}
