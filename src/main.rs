//! `snub` binary: wires the CLI criteria builder to a search session and
//! renders the outcome. Stdout carries results only; all logging goes to
//! stderr so `--json` output stays machine-parseable, mirroring
//! `examples/agentika-labs-grepika/src/main.rs`'s "stdout is JSON-RPC"
//! discipline.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use snub::cli::Cli;
use snub::output;
use snub::session::{self, SearchCallbacks, SearchStatus};
use snub::types::SearchCriteria;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("snub=info".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    let stream = cli.stream;
    let color = !json && std::io::stdout().is_terminal();

    let criteria: SearchCriteria = match cli.try_into() {
        Ok(c) => c,
        Err(err) => {
            tracing::error!(error = %err, "invalid search criteria");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let on_result: Option<snub::sink::StreamCallback> = if stream && !json {
        Some(Box::new(|m| {
            println!("{}", m.path);
            true
        }))
    } else {
        None
    };

    let callbacks = SearchCallbacks {
        on_result,
        on_progress: Some(Box::new(|snapshot| {
            tracing::trace!(
                processed_files = snapshot.processed_files,
                queued_dirs = snapshot.queued_dirs,
                total_results = snapshot.total_results,
                "search in progress"
            );
            true
        })),
    };

    let outcome = match session::search(criteria, callbacks) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(error = %err, code = err.code(), "search failed to start");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match outcome.status {
        SearchStatus::Ok => {}
        SearchStatus::Timeout => eprintln!("warning: search timed out; showing partial results"),
    }

    if !stream || json {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        let render_result = if json {
            output::render_json(&mut handle, &outcome)
        } else {
            output::render_text(&mut handle, &outcome.results, color)
        };
        if let Err(err) = render_result {
            tracing::error!(error = %err, "failed to write results");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
