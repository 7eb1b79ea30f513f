// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use crate::conf::DiffPair;
use std::fs::read;
use std::path::Path;

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

/// Where two files first disagree.  Lines are numbered from one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirstDifference {
    pub byte: usize,
    pub line: usize,
    pub expected_line: String,
    pub actual_line: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffOutcome {
    Same,
    Differ {
        expected_len: usize,
        actual_len: usize,
        first: FirstDifference,
    },
    /// The golden file could not be read.
    ExpectedUnreadable(String),
    /// The program did not produce the file, or it could not be read.
    ActualUnreadable(String),
}

impl DiffOutcome {
    pub fn is_same(&self) -> bool {
        *self == DiffOutcome::Same
    }
}

/// Compare the two files of a pair.  There is no tolerance of any kind.
pub fn compare_pair(pair: &DiffPair) -> DiffOutcome {
    compare_files(&pair.expected, &pair.actual)
}

pub fn compare_files(expected: &Path, actual: &Path) -> DiffOutcome {
    let old = match read(expected) {
        Ok(x) => x,
        Err(e) => return DiffOutcome::ExpectedUnreadable(e.to_string()),
    };
    let new = match read(actual) {
        Ok(x) => x,
        Err(e) => return DiffOutcome::ActualUnreadable(e.to_string()),
    };
    compare_bytes(&old, &new)
}

pub fn compare_bytes(old: &[u8], new: &[u8]) -> DiffOutcome {
    match first_difference(old, new) {
        None => DiffOutcome::Same,
        Some(first) => DiffOutcome::Differ {
            expected_len: old.len(),
            actual_len: new.len(),
            first,
        },
    }
}

// If one input is a proper prefix of the other, the difference is at the end of the shorter
// one, and its "line" there is whatever partial line precedes the end.

fn first_difference(old: &[u8], new: &[u8]) -> Option<FirstDifference> {
    if old == new {
        return None;
    }
    let i = old
        .iter()
        .zip(new.iter())
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| old.len().min(new.len()));
    let line = 1 + old[..i].iter().filter(|&&c| c == b'\n').count();
    Some(FirstDifference {
        byte: i,
        line,
        expected_line: line_at(old, i),
        actual_line: line_at(new, i),
    })
}

fn line_at(x: &[u8], i: usize) -> String {
    let i = i.min(x.len());
    let start = x[..i].iter().rposition(|&c| c == b'\n').map_or(0, |j| j + 1);
    let stop = x[i..].iter().position(|&c| c == b'\n').map_or(x.len(), |j| i + j);
    String::from_utf8_lossy(&x[start..stop]).to_string()
}
