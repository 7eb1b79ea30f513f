// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use crate::conf::TestConf;
use crate::errors::{AppTestError, Result};
use crate::locate::autolocate_binary;
use crate::path_helper::TestPathHelper;
use std::path::{Path, PathBuf};

/// An executable a suite needs, as `<binary root>/<subpath>/<name>`.
#[derive(Clone, Copy, Debug)]
pub struct BinarySpec {
    pub subpath: &'static str,
    pub name: &'static str,
}

/// The located executables of one suite, in declaration order.
#[derive(Clone, Debug)]
pub struct Programs {
    suite: String,
    paths: Vec<(&'static str, PathBuf)>,
}

impl Programs {
    /// Locate every binary of the suite.  The first one missing is an error.
    pub fn locate(suite: &dyn Suite, binary_base: &Path) -> Result<Self> {
        let mut paths = Vec::new();
        for b in suite.binaries() {
            paths.push((b.name, autolocate_binary(binary_base, b.subpath, b.name)?));
        }
        Ok(Programs {
            suite: suite.name().to_string(),
            paths,
        })
    }

    pub fn get(&self, name: &str) -> Result<&Path> {
        self.paths
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| p.as_path())
            .ok_or_else(|| AppTestError::UnknownProgram {
                suite: self.suite.clone(),
                name: name.to_string(),
            })
    }
}

/// A fixed list of cases for one family of tools.
///
/// `build_cases` must not depend on anything but its arguments: the list is complete before
/// the first case runs.
pub trait Suite {
    fn name(&self) -> &'static str;

    /// Directory of fixtures and golden files, relative to the source root.
    fn tests_dir(&self) -> &'static str;

    fn binaries(&self) -> &'static [BinarySpec];

    fn build_cases(&self, ph: &TestPathHelper, programs: &Programs) -> Result<Vec<TestConf>>;
}
