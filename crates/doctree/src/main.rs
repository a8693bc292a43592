use clap::Parser;
use tracing_subscriber::EnvFilter;

use doctree::commands::{self, Cli};

fn handle_schema_flag() -> bool {
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(|s| s.as_str()) != Some("--schema") {
        return false;
    }

    let response = serde_json::json!({
        "config_path": ".doctree/config.toml",
        "format": "toml",
        "schema": schemars::schema_for!(doctree::DoctreeConfig)
    });
    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("error: {}", e),
    }
    true
}

/// Restore default SIGPIPE handling so piping into `head` ends the process quietly.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: only changes the signal disposition of SIGPIPE back to the
    // POSIX default; no memory is touched.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("DOCTREE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    reset_sigpipe();

    // Handle --schema before clap parsing
    if handle_schema_flag() {
        return;
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    std::process::exit(commands::run(cli));
}
