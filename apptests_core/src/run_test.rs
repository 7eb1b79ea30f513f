// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use crate::compare::{compare_pair, DiffOutcome};
use crate::conf::{DiffPair, TestConf};
use crate::errors::{AppTestError, Result};
use io_utils::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus, Output, Stdio};

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

/// Lifecycle of a case.  Passed and Failed are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseState {
    Pending,
    Running,
    Passed,
    Failed,
}

impl CaseState {
    pub fn is_terminal(self) -> bool {
        matches!(self, CaseState::Passed | CaseState::Failed)
    }
}

/// How the program ended, if it ran at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExitReport {
    Exited(i32),
    Signaled(i32),
    /// No exit code and no signal, which should not happen.
    Unknown,
    NotStarted(String),
}

impl ExitReport {
    fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ExitReport::Exited(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(sig) = status.signal() {
                return ExitReport::Signaled(sig);
            }
        }
        ExitReport::Unknown
    }

    pub fn is_clean(&self) -> bool {
        *self == ExitReport::Exited(0)
    }
}

/// What happened when a case was run.
pub struct RunResult<'a> {
    pub conf: &'a TestConf,
    pub state: CaseState,
    pub exit: ExitReport,
    /// Captured stdout; empty when stdout was redirected to a file.
    pub stdout: Vec<u8>,
    /// Captured stderr; empty when stderr was redirected to a file.
    pub stderr: Vec<u8>,
    pub diffs: Vec<(&'a DiffPair, DiffOutcome)>,
}

impl<'a> RunResult<'a> {
    pub fn passed(&self) -> bool {
        self.state == CaseState::Passed
    }

    /// The pairs that did not compare equal.
    pub fn mismatches(&self) -> impl Iterator<Item = &(&'a DiffPair, DiffOutcome)> {
        self.diffs.iter().filter(|(_, d)| !d.is_same())
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

fn redirect_to(path: &Path) -> Result<Stdio> {
    let f = File::create(path).map_err(|source| AppTestError::Redirect {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Stdio::from(f))
}

/// Spawn the program and block until it exits.  There is no timeout.
pub fn spawn_and_wait(conf: &TestConf) -> Result<Output> {
    let mut cmd = Command::new(conf.program());
    cmd.args(conf.arguments()).stdin(Stdio::null());
    if let Some(path) = conf.stdout_target() {
        cmd.stdout(redirect_to(path)?);
    }
    if let Some(path) = conf.stderr_target() {
        cmd.stderr(redirect_to(path)?);
    }
    cmd.output().map_err(|source| AppTestError::Execution {
        program: conf.program().to_path_buf(),
        source,
    })
}

/// Run one case.  The case passes only if the program exits with status zero and every pair
/// compares equal.  Pairs are compared even after a bad exit, for diagnostics.
pub fn run_case(conf: &TestConf) -> RunResult<'_> {
    let mut state = CaseState::Pending;
    log::debug!("{:?} -> Running: {}", state, conf.command_line());
    state = CaseState::Running;

    let (exit, stdout, stderr) = match spawn_and_wait(conf) {
        Ok(out) => (ExitReport::from_status(out.status), out.stdout, out.stderr),
        Err(e) => (ExitReport::NotStarted(e.to_string()), Vec::new(), Vec::new()),
    };
    let diffs = conf
        .to_diff()
        .iter()
        .map(|pair| (pair, compare_pair(pair)))
        .collect::<Vec<_>>();
    let ok = exit.is_clean() && diffs.iter().all(|(_, d)| d.is_same());

    let next = if ok { CaseState::Passed } else { CaseState::Failed };
    log::debug!("{:?} -> {:?}", state, next);
    RunResult {
        conf,
        state: next,
        exit,
        stdout,
        stderr,
        diffs,
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

/// Explain why a case failed.  Empty for a case that passed.
pub fn describe_failure(res: &RunResult) -> String {
    let mut log = Vec::<u8>::new();
    if res.passed() {
        return String::new();
    }
    fwriteln!(log, "\nCommand failed:\n{}\n", res.conf.command_line());
    match &res.exit {
        ExitReport::Exited(code) => fwriteln!(log, "exit status {}", code),
        ExitReport::Signaled(sig) => fwriteln!(log, "killed by signal {}", sig),
        ExitReport::Unknown => {
            fwriteln!(log, "Something really funky happened, status code unavailable.")
        }
        ExitReport::NotStarted(why) => fwriteln!(log, "{}", why),
    }
    if !res.stderr.is_empty() {
        fwriteln!(log, "stderr has {} bytes:", res.stderr.len());
        fwrite!(log, "{}", String::from_utf8_lossy(&res.stderr));
        if !res.stderr.ends_with(b"\n") {
            fwriteln!(log, "");
        }
    }
    for (pair, outcome) in res.mismatches() {
        fwriteln!(
            log,
            "\n{} vs {}",
            pair.expected.display(),
            pair.actual.display()
        );
        match outcome {
            DiffOutcome::Same => {}
            DiffOutcome::ExpectedUnreadable(e) => {
                fwriteln!(log, "could not read expected file: {}", e)
            }
            DiffOutcome::ActualUnreadable(e) => {
                fwriteln!(log, "could not read actual file: {}", e)
            }
            DiffOutcome::Differ {
                expected_len,
                actual_len,
                first,
            } => {
                fwriteln!(
                    log,
                    "expected has length {} and actual has length {}",
                    expected_len,
                    actual_len
                );
                fwriteln!(
                    log,
                    "first difference is at byte {}, line {}:\nexpected = {}\nactual   = {}",
                    first.byte,
                    first.line,
                    first.expected_line,
                    first.actual_line
                );
            }
        }
    }
    String::from_utf8_lossy(&log).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!CaseState::Pending.is_terminal());
        assert!(!CaseState::Running.is_terminal());
        assert!(CaseState::Passed.is_terminal());
        assert!(CaseState::Failed.is_terminal());
    }

    #[test]
    fn test_missing_program_fails_case() {
        let dir = tempfile::tempdir().unwrap();
        let conf = TestConf::new(dir.path().join("no_such_program"))
            .redir_stdout(dir.path().join("out.stdout"));
        let res = run_case(&conf);
        assert_eq!(res.state, CaseState::Failed);
        assert!(matches!(res.exit, ExitReport::NotStarted(_)));
        assert!(describe_failure(&res).contains("failed to execute"));
    }

    #[test]
    fn test_passed_case_has_no_description() {
        let conf = TestConf::new("unused");
        let res = RunResult {
            conf: &conf,
            state: CaseState::Passed,
            exit: ExitReport::Exited(0),
            stdout: Vec::new(),
            stderr: Vec::new(),
            diffs: Vec::new(),
        };
        assert!(describe_failure(&res).is_empty());
    }

    #[cfg(unix)]
    mod unix {
        use super::super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;

        fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
            let p = dir.join(name);
            fs::write(&p, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&p, fs::Permissions::from_mode(0o755)).unwrap();
            p
        }

        #[test]
        fn test_matching_outputs_pass() {
            let dir = tempfile::tempdir().unwrap();
            let d = dir.path();
            fs::write(d.join("gold.stdout"), "hello\n").unwrap();
            fs::write(d.join("gold_out.fa"), ">r\nACGT\n").unwrap();
            let prog = script(d, "tool", "echo hello\nprintf '>r\\nACGT\\n' > \"$1\"");
            let conf = TestConf::new(prog)
                .arg(d.join("out.fa"))
                .redir_stdout(d.join("out.stdout"))
                .diff(d.join("gold.stdout"), d.join("out.stdout"))
                .diff(d.join("gold_out.fa"), d.join("out.fa"));
            let res = run_case(&conf);
            assert!(res.passed(), "{}", describe_failure(&res));
            assert!(res.stdout.is_empty());
        }

        #[test]
        fn test_nonzero_exit_fails_even_if_outputs_match() {
            let dir = tempfile::tempdir().unwrap();
            let d = dir.path();
            fs::write(d.join("gold.stdout"), "hello\n").unwrap();
            let prog = script(d, "tool", "echo hello\necho oops >&2\nexit 3");
            let conf = TestConf::new(prog)
                .redir_stdout(d.join("out.stdout"))
                .diff(d.join("gold.stdout"), d.join("out.stdout"));
            let res = run_case(&conf);
            assert_eq!(res.state, CaseState::Failed);
            assert_eq!(res.exit, ExitReport::Exited(3));
            assert!(res.diffs[0].1.is_same());
            let why = describe_failure(&res);
            assert!(why.contains("exit status 3"), "{why}");
            assert!(why.contains("oops"), "{why}");
        }

        #[test]
        fn test_signal_fails_case() {
            let dir = tempfile::tempdir().unwrap();
            let prog = script(dir.path(), "tool", "kill -9 $$");
            let conf = TestConf::new(prog);
            let res = run_case(&conf);
            assert_eq!(res.exit, ExitReport::Signaled(9));
            assert_eq!(res.state, CaseState::Failed);
        }

        #[test]
        fn test_one_mismatch_fails_case() {
            let dir = tempfile::tempdir().unwrap();
            let d = dir.path();
            fs::write(d.join("gold_a.fq"), "a\n").unwrap();
            fs::write(d.join("gold_b.fq"), "b\n").unwrap();
            let prog = script(d, "tool", "echo a > \"$1\"\necho x > \"$2\"");
            let conf = TestConf::new(prog)
                .arg(d.join("a.fq"))
                .arg(d.join("b.fq"))
                .diff(d.join("gold_a.fq"), d.join("a.fq"))
                .diff(d.join("gold_b.fq"), d.join("b.fq"));
            let res = run_case(&conf);
            assert_eq!(res.state, CaseState::Failed);
            assert_eq!(res.mismatches().count(), 1);
            assert!(describe_failure(&res).contains("gold_b.fq"));
        }

        #[test]
        fn test_clean_exit_mismatch_report_layout() {
            let dir = tempfile::tempdir().unwrap();
            let d = dir.path();
            fs::write(d.join("gold_a.fq"), "a\n").unwrap();
            let prog = script(d, "tool", "echo x > \"$1\"");
            let conf = TestConf::new(prog)
                .arg(d.join("a.fq"))
                .diff(d.join("gold_a.fq"), d.join("a.fq"));
            let res = run_case(&conf);
            assert_eq!(res.exit, ExitReport::Exited(0));
            let why = describe_failure(&res);
            assert!(why.contains("exit status 0\n"), "{why}");
            assert!(!why.contains("\n\n\n"), "{why}");
            assert!(why.contains("expected = a\nactual   = x"), "{why}");
        }

        #[test]
        fn test_stderr_redirect() {
            let dir = tempfile::tempdir().unwrap();
            let d = dir.path();
            fs::write(d.join("gold.stderr"), "warning\n").unwrap();
            let prog = script(d, "tool", "echo warning >&2");
            let conf = TestConf::new(prog)
                .redir_stderr(d.join("out.stderr"))
                .diff(d.join("gold.stderr"), d.join("out.stderr"));
            let res = run_case(&conf);
            assert!(res.passed(), "{}", describe_failure(&res));
            assert!(res.stderr.is_empty());
        }
    }
}
