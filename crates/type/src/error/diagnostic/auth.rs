// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

/// Authentication failed due to invalid credentials or other reasons
pub fn authentication_failed(reason: &str) -> Diagnostic {
	Diagnostic {
		code: "AUTH_001".to_string(),
		message: format!("authentication failed: {}", reason),
		help: Some("Check the connection username, password and auth source".to_string()),
		notes: vec![],
	}
}

/// The connected user lacks the privilege for a bootstrap step
pub fn authorization_denied(action: &str, reason: &str) -> Diagnostic {
	Diagnostic {
		code: "AUTHZ_001".to_string(),
		message: format!("not authorized to {}: {}", action, reason),
		help: Some("Connect as a user that can create users and collections in the admin database".to_string()),
		notes: vec!["Nothing was rolled back; re-running after fixing privileges completes the bootstrap".to_string()],
	}
}

/// An existing principal holds roles that differ from the configured set
pub fn role_drift(username: &str, missing: &[String], extra: &[String]) -> Diagnostic {
	let mut notes = vec![];
	if !missing.is_empty() {
		notes.push(format!("missing: {}", missing.join(", ")));
	}
	if !extra.is_empty() {
		notes.push(format!("extra: {}", extra.join(", ")));
	}

	Diagnostic {
		code: "DRIFT_001".to_string(),
		message: format!(
			"principal '{}' holds different roles than configured (missing: [{}], extra: [{}])",
			username,
			missing.join(", "),
			extra.join(", ")
		),
		help: Some("Set principal.role_drift to 'preserve' or 'reconcile' to proceed".to_string()),
		notes,
	}
}
