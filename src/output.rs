//! Result rendering: plain text (one path per line) and the structured
//! JSON object from spec.md §6.
//!
//! Grounded on `output_json_results` in `examples/original_source/
//! src/cli.c` for the JSON shape, and on `fmt_search`/`fmt_refs` in
//! `examples/agentika-labs-grepika/src/fmt.rs` for the `color: bool`
//! threading pattern.

use std::io::{self, Write};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::session::SearchOutcome;
use crate::types::SearchMatch;

#[derive(Serialize)]
struct JsonReport<'a> {
    r#type: &'static str,
    version: &'static str,
    count: u64,
    results: Vec<JsonMatch<'a>>,
}

#[derive(Serialize)]
struct JsonMatch<'a> {
    path: &'a str,
    size: u64,
    modified: String,
}

fn iso8601(t: SystemTime) -> String {
    let dt: DateTime<Utc> = t.into();
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Writes one path per line, bolded when `color` is set and writer is a
/// terminal.
pub fn render_text(w: &mut impl Write, results: &[SearchMatch], color: bool) -> io::Result<()> {
    for result in results {
        if color {
            writeln!(w, "{}", result.path.as_str().bold())?;
        } else {
            writeln!(w, "{}", result.path)?;
        }
    }
    Ok(())
}

/// Writes the `{type, version, count, results}` JSON object from spec.md
/// §6, with each result's `modified` field rendered as ISO 8601 local time.
pub fn render_json(w: &mut impl Write, outcome: &SearchOutcome) -> io::Result<()> {
    let report = JsonReport {
        r#type: "snub.search_result",
        version: env!("CARGO_PKG_VERSION"),
        count: outcome.count,
        results: outcome
            .results
            .iter()
            .map(|r| JsonMatch {
                path: &r.path,
                size: r.size,
                modified: iso8601(r.mtime),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *w, &report)?;
    writeln!(w)
}
