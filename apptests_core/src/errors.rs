// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

//! Errors raised by the test runner.
//!
//! Only some of these stop a run.  A failure to locate a binary or to create the temporary
//! output directory is fatal.  A failure to launch a program is caught by the case that
//! launched it and turned into a FAILED line.  A failure to delete the temporary directory
//! is logged and otherwise ignored.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for runner operations.
pub type Result<T> = std::result::Result<T, AppTestError>;

#[derive(Error, Debug)]
pub enum AppTestError {
    /// No candidate location held the executable.
    #[error(
        "could not find executable '{name}' under {}, tried {} locations",
        .root.display(),
        .tried.len()
    )]
    Locate {
        name: String,
        root: PathBuf,
        tried: Vec<PathBuf>,
    },

    /// A suite asked for a program it did not declare.
    #[error("suite '{suite}' has no binary named '{name}'")]
    UnknownProgram { suite: String, name: String },

    /// No suite is registered under the requested name.
    #[error("unknown suite '{0}'")]
    UnknownSuite(String),

    /// The program could not be launched.
    #[error("failed to execute {}: {source}", .program.display())]
    Execution {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A stdout or stderr redirection target could not be created.
    #[error("failed to create redirection target {}: {source}", .path.display())]
    Redirect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create temporary output directory: {0}")]
    TempDir(#[source] io::Error),

    #[error("failed to delete temporary output directory {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}
