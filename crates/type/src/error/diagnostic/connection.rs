// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

pub fn connection_failed(reason: &str) -> Diagnostic {
	Diagnostic {
		code: "CONN_001".to_string(),
		message: format!("cannot reach database: {}", reason),
		help: Some("Check connection.uri and that the server is accepting connections".to_string()),
		notes: vec![],
	}
}

pub fn config_invalid(reason: &str) -> Diagnostic {
	Diagnostic {
		code: "CONFIG_001".to_string(),
		message: format!("configuration error: {}", reason),
		help: Some("Run `coursedb-init plan` to see the resolved configuration".to_string()),
		notes: vec![],
	}
}
