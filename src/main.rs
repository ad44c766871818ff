//! Kodegen Bundler Flavor - flavored electron-builder builds.
//!
//! This binary applies build flavors to `package.json`, runs electron-builder
//! for the selected platforms and restores the project afterwards.

use kodegen_bundler_flavor::cli;
use std::process;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse_args();

    // RUST_LOG takes precedence over the verbosity flags
    let default_filter = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let exit_code = match cli::execute(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
