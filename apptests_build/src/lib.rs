// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use chrono::{Local, NaiveDate};
use itertools::Itertools;

use backtrace::Backtrace;

use std::{panic, sync::atomic::AtomicBool, sync::atomic::Ordering::SeqCst, thread};

static PANICKING: AtomicBool = AtomicBool::new(false);

/// Number of days after which a panic report suggests looking for a newer build.
const STALE_BUILD_DAYS: i64 = 30;

/// Set up panic handling.
/// This function ensures that we always collect a stack trace, regardless of
/// whether or not an env var was set. It also limits concurrent panics to a
/// single thread, whichever panics first, to ensure that if more than one thread
/// panics at once, we don't end up with interleaved stack trace messages.
///
/// A panic in the runner is a bug in the runner, never a test failure, so the handler exits
/// with status 101 to keep it distinguishable from the exit codes of a normal run.
pub fn set_panic_handler(args: &[String]) {
    let mut elapsed_message = String::new();
    if let Some(days) = days_since_build() {
        if days > STALE_BUILD_DAYS {
            elapsed_message = format!(
                "Your build is {days} days old.  You might want to rebuild before \
                reporting this.\n\n"
            );
        }
    }

    let trailer = format!(
        "You have probably encountered an internal error in run_tests.\n\n\
            Please file an issue including the traceback shown above and also the\n\
            following version information:\n\
            {} : {}.\n\n\
            Your command was:\n\n{}\n\n\
            {}",
        env!("CARGO_PKG_VERSION"),
        version_string(),
        args.iter().format(" "),
        elapsed_message,
    );

    let _ = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        // Prevent multiple threads from issuing tracebacks.
        if PANICKING.swap(true, SeqCst) {
            return;
        }

        let backtrace = Backtrace::new();

        let thread = thread::current();
        let thread = thread.name().unwrap_or("unnamed");
        match info.location() {
            Some(location) => eprintln!(
                "thread '{}' panicked at {}:{}",
                thread,
                location.file(),
                location.line()
            ),
            None => eprintln!("thread '{thread}' panicked "),
        };

        let msg = match info.payload().downcast_ref::<&'static str>() {
            Some(s) => *s,
            None => match info.payload().downcast_ref::<String>() {
                Some(s) => s.as_str(),
                None => "Box<Any>",
            },
        };
        eprintln!("{msg}\n{backtrace:?}\n{trailer}");

        std::process::exit(101);
    }));
}

// The build date is the third " : " separated field of the version string.  Builds without
// git information still carry a date, but be lenient anyway.

fn days_since_build() -> Option<i64> {
    let build_date = build_date(&version_string())?;
    let then = NaiveDate::parse_from_str(&build_date, "%Y-%m-%d").ok()?;
    let now = Local::now().date_naive();
    Some((now - then).num_days())
}

fn build_date(version: &str) -> Option<String> {
    let date = version.split(" : ").nth(2)?;
    if date.is_empty() {
        None
    } else {
        Some(date.to_string())
    }
}

const VERSION_STRING: &str = env!("VERSION_STRING");

// WARNING: the version string will not be up to date unless apptests_build/build.rs is rerun.

pub fn version_string() -> String {
    VERSION_STRING.to_string()
}
