// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Drive suites: locate every binary, then for each suite build its cases, run them in order,
// print one line per case and a summary, and delete the suite's temporary directory.

use crate::errors::Result;
use crate::path_helper::TestPathHelper;
use crate::run_test::{describe_failure, run_case};
use crate::suite::{Programs, Suite};
use crate::summary::Summary;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

/// Where the fixtures and the built binaries live.
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    pub source_base: PathBuf,
    pub binary_base: PathBuf,
}

pub struct Runner {
    config: RunnerConfig,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Self {
        Runner { config }
    }

    /// Run the given suites in order.  A binary that cannot be found stops everything before
    /// any case runs; a failing case never does.
    pub fn run_all(&self, suites: &[&dyn Suite], out: &mut dyn Write) -> Result<Summary> {
        let mut located = Vec::with_capacity(suites.len());
        for suite in suites {
            located.push(Programs::locate(*suite, &self.config.binary_base)?);
        }
        let mut total = Summary::default();
        for (suite, programs) in suites.iter().zip(located.iter()) {
            total.absorb(self.run_suite(*suite, programs, out)?);
        }
        if suites.len() > 1 {
            writeln!(out, "\nAll suites:")?;
            write!(out, "{total}")?;
        }
        Ok(total)
    }

    pub fn run_suite(
        &self,
        suite: &dyn Suite,
        programs: &Programs,
        out: &mut dyn Write,
    ) -> Result<Summary> {
        let t = Instant::now();
        let title = format!("Executing test for {}", suite.name());
        writeln!(out, "{title}\n{}\n", "=".repeat(title.len()))?;

        let ph = TestPathHelper::new(
            &self.config.source_base,
            &self.config.binary_base,
            suite.tests_dir(),
        )?;
        log::debug!("temporary output directory {}", ph.temp_dir().display());
        let cases = suite.build_cases(&ph, programs)?;

        let mut summary = Summary::default();
        for conf in &cases {
            let res = run_case(conf);
            summary.record(res.passed());
            writeln!(
                out,
                "{} {}",
                conf.command_line(),
                if res.passed() { "OK" } else { "FAILED" }
            )?;
            out.flush()?;
            if !res.passed() {
                log::error!("{}", describe_failure(&res));
            }
        }

        // Cleanup.  Failure here does not change the outcome.

        if let Err(e) = ph.delete_temp_dir() {
            log::error!("{e}");
        }

        write!(out, "{summary}")?;
        log::info!(
            "{}: {} of {} cases passed, used {:.1} seconds",
            suite.name(),
            summary.succeeded(),
            summary.total(),
            t.elapsed().as_secs_f64()
        );
        Ok(summary)
    }
}
