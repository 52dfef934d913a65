// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	env, fs,
	path::{Path, PathBuf},
};

use uuid::Uuid;

/// Runs `f` with a fresh directory that is removed afterwards, whatever `f`
/// returns.
pub fn temp_dir<F, T>(f: F) -> std::io::Result<T>
where
	F: FnOnce(&Path) -> std::io::Result<T>,
{
	let path: PathBuf = env::temp_dir().join(format!("coursedb-{}", Uuid::new_v4()));

	fs::create_dir(&path)?;
	let result = f(&path);

	let _ = fs::remove_dir_all(&path);
	result
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_removed_afterwards() {
		let kept = temp_dir(|dir| {
			fs::write(dir.join("plan.toml"), "[target]\n")?;
			Ok(dir.to_path_buf())
		})
		.unwrap();
		assert!(!kept.exists());
	}
}
