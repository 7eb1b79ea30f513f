// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use crate::errors::{AppTestError, Result};
use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};

// Multi-configuration generators put binaries one level below the usual place.

const CONFIG_DIRS: [&str; 5] = ["", "Release", "Debug", "RelWithDebInfo", "MinSizeRel"];

/// All locations tried for `name`, in the order they are tried.
pub fn binary_candidates(root: &Path, subpath: &str, name: &str) -> Vec<PathBuf> {
    let mut dirs = vec![root.join(subpath), root.join("bin"), root.to_path_buf()];
    dirs.dedup();
    let mut names = vec![name.to_string()];
    if !EXE_SUFFIX.is_empty() {
        names.push(format!("{name}{EXE_SUFFIX}"));
    }
    let mut candidates = Vec::new();
    for dir in &dirs {
        for config in CONFIG_DIRS {
            for n in &names {
                let p = if config.is_empty() {
                    dir.join(n)
                } else {
                    dir.join(config).join(n)
                };
                if !candidates.contains(&p) {
                    candidates.push(p);
                }
            }
        }
    }
    candidates
}

/// Find the executable `name` below `root`, preferring `root/subpath`.
pub fn autolocate_binary(root: &Path, subpath: &str, name: &str) -> Result<PathBuf> {
    let tried = binary_candidates(root, subpath, name);
    match tried.iter().find(|p| p.is_file()) {
        Some(p) => {
            log::debug!("located {} at {}", name, p.display());
            Ok(p.clone())
        }
        None => {
            for p in &tried {
                log::debug!("not found: {}", p.display());
            }
            Err(AppTestError::Locate {
                name: name.to_string(),
                root: root.to_path_buf(),
                tried,
            })
        }
    }
}
