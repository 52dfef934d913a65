// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::error::{ObjectKind, diagnostic::Diagnostic};

/// A principal or collection is already present
pub fn already_exists(kind: ObjectKind, namespace: &str, name: &str) -> Diagnostic {
	Diagnostic {
		code: "CATALOG_001".to_string(),
		message: format!("{} '{}.{}' already exists", kind, namespace, name),
		help: None,
		notes: vec![],
	}
}

/// Any other failure reported by the database
pub fn store_failed(operation: &str, reason: &str) -> Diagnostic {
	Diagnostic {
		code: "STORE_001".to_string(),
		message: format!("database operation '{}' failed: {}", operation, reason),
		help: None,
		notes: vec![],
	}
}
