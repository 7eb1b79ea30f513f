// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// The suites known to run_tests.  Each one mirrors the way its golden files were generated:
// same binaries, same arguments, same fixtures.

pub mod flexbar;
pub mod sam2matrix;

use apptests_core::{AppTestError, Result, Suite};

pub use flexbar::SeqanFlexbar;
pub use sam2matrix::Sam2Matrix;

/// Every suite, in the order they run by default.
pub const SUITES: &[&dyn Suite] = &[&SeqanFlexbar, &Sam2Matrix];

pub fn suite_by_name(name: &str) -> Result<&'static dyn Suite> {
    SUITES
        .iter()
        .copied()
        .find(|s| s.name() == name)
        .ok_or_else(|| AppTestError::UnknownSuite(name.to_string()))
}
