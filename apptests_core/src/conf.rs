// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use itertools::Itertools;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

/// A golden file and the file the program is expected to reproduce it in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffPair {
    pub expected: PathBuf,
    pub actual: PathBuf,
}

/// One invocation of an external program plus the files to compare afterwards.
///
/// Built once with the chained setters below and only read after that.
#[derive(Clone, Debug)]
pub struct TestConf {
    program: PathBuf,
    args: Vec<OsString>,
    redir_stdout: Option<PathBuf>,
    redir_stderr: Option<PathBuf>,
    to_diff: Vec<DiffPair>,
}

impl TestConf {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        TestConf {
            program: program.into(),
            args: Vec::new(),
            redir_stdout: None,
            redir_stderr: None,
            to_diff: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn redir_stdout(mut self, path: impl Into<PathBuf>) -> Self {
        self.redir_stdout = Some(path.into());
        self
    }

    pub fn redir_stderr(mut self, path: impl Into<PathBuf>) -> Self {
        self.redir_stderr = Some(path.into());
        self
    }

    /// Require `actual` to equal `expected` byte for byte.
    pub fn diff(mut self, expected: impl Into<PathBuf>, actual: impl Into<PathBuf>) -> Self {
        self.to_diff.push(DiffPair {
            expected: expected.into(),
            actual: actual.into(),
        });
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    pub fn stdout_target(&self) -> Option<&Path> {
        self.redir_stdout.as_deref()
    }

    pub fn stderr_target(&self) -> Option<&Path> {
        self.redir_stderr.as_deref()
    }

    pub fn to_diff(&self) -> &[DiffPair] {
        &self.to_diff
    }

    /// The program followed by its arguments, separated by single spaces.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(|a| a.as_os_str()))
            .map(|a| a.to_string_lossy())
            .format(" ")
            .to_string()
    }
}
