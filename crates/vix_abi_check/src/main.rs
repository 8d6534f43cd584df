//! vix-abi-check CLI
//!
//! Compiles minimal C and C++ programs against `include/vix/ffi/vix_ffi.h` to
//! verify structure layouts on the current toolchain.
//!
//! Exit code is `0` on success, the failing compiler's exit code on a layout
//! mismatch, and `1` for any other error.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vix_abi_check::{CheckConfig, CheckMode, SUCCESS_MESSAGE};

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Compile-time ABI sanity check for vix-ffi headers.
#[derive(Parser)]
#[command(name = "vix-abi-check")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Repository root
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// C compiler
    #[arg(long, default_value = "cc")]
    cc: String,

    /// C++ compiler
    #[arg(long, default_value = "c++")]
    cxx: String,

    /// Which compile mode to check
    #[arg(long, value_enum, default_value_t = CheckMode::Both)]
    mode: CheckMode,

    /// C standard
    #[arg(long, default_value = "c11")]
    std: String,

    /// C++ standard
    #[arg(long, default_value = "c++17")]
    cxx_std: String,

    /// Extra compiler flags, split with shell quoting rules
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    extra: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cc = if cli.cc.trim().is_empty() { "cc" } else { cli.cc.trim() };
    let cxx = if cli.cxx.trim().is_empty() { "c++" } else { cli.cxx.trim() };

    let outcome = CheckConfig::new(&cli.root)
        .with_cc(cc)
        .with_cxx(cxx)
        .with_mode(cli.mode)
        .with_c_std(cli.std.as_str())
        .with_cxx_std(cli.cxx_std.as_str())
        .with_extra(&cli.extra)
        .and_then(|config| vix_abi_check::run(&config));

    match outcome {
        Ok(report) => {
            if cli.format == OutputFormat::Json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("error: {e}");
                        return ExitCode::from(1);
                    }
                }
            }
            println!("{SUCCESS_MESSAGE}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code().clamp(1, 255) as u8)
        }
    }
}
