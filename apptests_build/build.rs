// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Set VERSION_STRING for apptests_build::version_string().  The fields are separated by " : "
// and the third one is the build date, which the panic handler parses.

use chrono::prelude::*;
use std::env::consts::{ARCH, OS};
use std::process::Command;
use string_utils::TextUtils;

#[cfg(debug_assertions)]
const BUILD_TYPE: &str = "debug";
#[cfg(not(debug_assertions))]
const BUILD_TYPE: &str = "release";

fn main() {
    let version_string = format!(
        "{} : {}{} : {} : {} : {} : {}",
        get_branch_name(),
        get_commit_hash(),
        if is_working_tree_clean() { "" } else { "+" },
        Local::now().to_string().before(" "),
        BUILD_TYPE,
        OS,
        ARCH
    );
    println!("cargo:rustc-env=VERSION_STRING={version_string}");
    println!("cargo:rerun-if-changed=build.rs");
}

// Run git in the crate directory.  Builds from a source tarball have no git, so every
// failure here yields None rather than stopping the build.

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
}

fn get_commit_hash() -> String {
    if let Ok(v) = std::env::var("GITHUB_SHA") {
        return v.chars().take(7).collect();
    }
    git(&["log", "-1", "--pretty=format:%h"]).unwrap_or_else(|| "unknown".to_string())
}

fn get_branch_name() -> String {
    if std::env::var("GITHUB_SHA").is_ok() {
        return std::env::var("GITHUB_REF").unwrap_or_else(|_| "master".to_string());
    }
    git(&["rev-parse", "--abbrev-ref", "HEAD"]).unwrap_or_else(|| "unknown".to_string())
}

fn is_working_tree_clean() -> bool {
    if std::env::var("GITHUB_SHA").is_ok() {
        return true;
    }
    match Command::new("git")
        .args(["diff", "--quiet", "--exit-code"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .status()
    {
        Ok(status) => status.code() == Some(0),
        Err(_) => true,
    }
}
