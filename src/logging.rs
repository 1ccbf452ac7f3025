//! Tracing initialization.

use std::io::{self, IsTerminal};
use std::sync::Once;

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "BENCH_COMPARE_LOG";

static INIT: Once = Once::new();

/// Initialize logging to stderr.
///
/// Reads `BENCH_COMPARE_LOG` (e.g. `bench_compare=debug,bench_classifier=warn`)
/// and falls back to `default_filter` when it is unset or invalid. Colors are
/// only used when stderr is a terminal. Calling this more than once has no
/// effect.
pub fn init_tracing(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

        tracing_subscriber::registry()
            .with(fmt_layer(io::stderr, io::stderr().is_terminal()))
            .with(filter)
            .init();
    });
}

fn fmt_layer<S, W>(writer: W, ansi: bool) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer().with_writer(writer).with_ansi(ansi).with_target(true)
}
