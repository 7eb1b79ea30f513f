// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use std::fmt;

/// Pass/fail counts.  A case counts once no matter how many of its pairs differ.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    total: usize,
    failed: usize,
}

impl Summary {
    pub fn record(&mut self, passed: bool) {
        self.total += 1;
        if !passed {
            self.failed += 1;
        }
    }

    pub fn absorb(&mut self, other: Summary) {
        self.total += other.total;
        self.failed += other.failed;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn succeeded(&self) -> usize {
        self.total - self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

const RULE: &str = "==============================";

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "{:>16}: {}", "total tests", self.total)?;
        writeln!(f, "{:>16}: {}", "failed tests", self.failed)?;
        writeln!(f, "{:>16}: {}", "successful tests", self.succeeded())?;
        writeln!(f, "{RULE}")
    }
}
