// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Golden-output regression testing of command-line tools.  The tools are black boxes: run
// them on fixtures, then require their output files to equal recorded golden files.

pub mod compare;
pub mod conf;
pub mod errors;
pub mod locate;
pub mod path_helper;
pub mod run_test;
pub mod runner;
pub mod suite;
pub mod summary;

pub use conf::{DiffPair, TestConf};
pub use errors::{AppTestError, Result};
pub use path_helper::TestPathHelper;
pub use runner::{Runner, RunnerConfig};
pub use suite::{BinarySpec, Programs, Suite};
pub use summary::Summary;
