#![forbid(unsafe_code)]

//! Command-line and environment options for the demo.
//!
//! Environment variables (`FTK_DEMO_*`) set defaults; flags override them.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
ftk demo: a small form driven through screen traversal

USAGE:
    ftk-demo [OPTIONS]

OPTIONS:
    --ascii          Draw borders with plain ASCII
    --log=PATH       Write JSON logs to PATH (filter from FTK_LOG / RUST_LOG)
    --help, -h       Show this help message
    --version, -V    Show version

KEYS:
    Tab / Shift-Tab  Next / previous field
    F10              Accept the form
    Ctrl-X           Cancel
    Ctrl-R, F2       Reset fields to their saved values
    Ctrl-L           Redraw
    Ctrl-S           Jump to the OK button

ENVIRONMENT VARIABLES:
    FTK_DEMO_ASCII=1     Same as --ascii
    FTK_DEMO_LOG=PATH    Same as --log";

/// Parsed options.
#[derive(Debug, Default)]
pub struct Opts {
    pub ascii: bool,
    pub log_file: Option<PathBuf>,
}

impl Opts {
    pub fn parse() -> Self {
        let mut opts = Self::default();

        if let Ok(val) = env::var("FTK_DEMO_ASCII") {
            opts.ascii = matches!(val.as_str(), "1" | "true" | "yes");
        }
        if let Ok(val) = env::var("FTK_DEMO_LOG")
            && !val.is_empty()
        {
            opts.log_file = Some(PathBuf::from(val));
        }

        for arg in env::args().skip(1) {
            match arg.as_str() {
                "--ascii" => opts.ascii = true,
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("ftk-demo {VERSION}");
                    process::exit(0);
                }
                other => {
                    if let Some(path) = other.strip_prefix("--log=") {
                        opts.log_file = Some(PathBuf::from(path));
                    } else {
                        eprintln!("Unknown argument: {other}");
                        eprintln!("Run with --help for usage.");
                        process::exit(1);
                    }
                }
            }
        }
        opts
    }
}
