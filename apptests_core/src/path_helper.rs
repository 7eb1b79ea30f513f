// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use crate::errors::{AppTestError, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

/// Resolves fixture and output paths for one suite.
///
/// Inputs (fixtures and golden files) live under `<source_base>/<tests_dir>`.  Outputs go to a
/// temporary directory that is created with the helper and removed either by
/// [`TestPathHelper::delete_temp_dir`] or, if that is never reached, when the helper is dropped.
pub struct TestPathHelper {
    source_base: PathBuf,
    binary_base: PathBuf,
    tests_dir: PathBuf,
    temp_dir: TempDir,
}

impl TestPathHelper {
    pub fn new(
        source_base: impl Into<PathBuf>,
        binary_base: impl Into<PathBuf>,
        tests_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let temp_dir = tempfile::Builder::new()
            .prefix("apptests.")
            .tempdir()
            .map_err(AppTestError::TempDir)?;
        Ok(TestPathHelper {
            source_base: source_base.into(),
            binary_base: binary_base.into(),
            tests_dir: tests_dir.into(),
            temp_dir,
        })
    }

    /// Path of a fixture or golden file.
    pub fn in_file(&self, name: impl AsRef<Path>) -> PathBuf {
        self.source_base.join(&self.tests_dir).join(name)
    }

    /// Path of an output file inside the temporary directory.
    pub fn out_file(&self, name: impl AsRef<Path>) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    pub fn binary_base(&self) -> &Path {
        &self.binary_base
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Remove the temporary directory and everything in it.
    pub fn delete_temp_dir(self) -> Result<()> {
        let path = self.temp_dir.path().to_path_buf();
        self.temp_dir
            .close()
            .map_err(|source| AppTestError::Cleanup { path, source })
    }
}
