use std::io::{self, BufWriter, IsTerminal, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use logscan::analyzer;
use logscan::cli::{Cli, ColorMode};
use logscan::config::Config;
use logscan::formatter::{format_record, format_statistics};
use logscan::parser::parse_files_parallel;

fn main() -> ExitCode {
    // Reset SIGPIPE to default behavior so `logscan ... | head` exits quietly.
    reset_sigpipe();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "logscan", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    init_tracing(cli.verbose);

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("logscan: {e}");
            return ExitCode::from(1);
        }
    };

    let mut parser = config.build_parser();
    let (batch, stats) = if config.parallel {
        parse_files_parallel(&parser, &cli.files)
    } else {
        let batch = parser.parse_files(&cli.files);
        (batch, *parser.statistics())
    };

    let selected = config.select(&batch.records);
    let use_color = !config.json_output && resolve_color_mode(config.color_mode);

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let mut line_buf = String::new();

    for record in &selected {
        line_buf.clear();
        format_record(record, &config, use_color, &mut line_buf);

        if let Err(e) = writeln!(writer, "{line_buf}") {
            if e.kind() == io::ErrorKind::BrokenPipe {
                return ExitCode::SUCCESS;
            }
            eprintln!("logscan: write error: {e}");
            return ExitCode::from(2);
        }
    }

    if let Err(e) = writer.flush() {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return ExitCode::SUCCESS;
        }
        eprintln!("logscan: flush error: {e}");
        return ExitCode::from(2);
    }

    if config.show_stats {
        let mut report = String::new();
        let counts = analyzer::count_by_level(&batch.records);
        format_statistics(&stats, &counts, batch.failures.len(), &mut report);
        eprintln!("{report}");
    }

    if !cli.files.is_empty() && batch.failures.len() == cli.files.len() {
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "logscan=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn resolve_color_mode(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            let stdout = io::stdout();
            if !stdout.is_terminal() {
                return false;
            }
            if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
                return false;
            }
            if std::env::var("TERM").is_ok_and(|v| v == "dumb") {
                return false;
            }
            true
        }
    }
}

/// Reset SIGPIPE to the default (terminate) behavior.
///
/// By default, Rust ignores SIGPIPE to surface `BrokenPipe` I/O errors.
/// Restoring `SIG_DFL` lets a downstream `head` close the pipe without
/// `logscan` reporting a write error.
#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}
