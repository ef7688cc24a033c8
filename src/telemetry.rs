use std::io::{self, IsTerminal};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

type Timer = fn(&mut Writer<'_>) -> std::fmt::Result;

/// Whole-second UTC timestamp, e.g. `2025-09-12T10:20:30Z`.
fn utc_seconds(w: &mut Writer<'_>) -> std::fmt::Result {
    write!(w, "{}", chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"))
}

/// Installs the global subscriber: `RUST_LOG` (or `info`), compact single-line
/// output on stderr, ANSI colors only on a terminal.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_timer(utc_seconds as Timer)
        .with_target(true)
        .with_ansi(io::stderr().is_terminal())
        .compact();

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
