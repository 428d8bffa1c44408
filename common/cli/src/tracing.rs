use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Log to stderr at the level selected by `-v`/`-q`, and everything to the trace file, when given.
pub fn configure_tracing(trace: Option<PathBuf>, verbose: Verbosity<InfoLevel>) -> anyhow::Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(verbosity_filter(&verbose));

    let trace_layer = match trace {
        Some(path) => {
            let file =
                File::create(&path).with_context(|| format!("Unable to create trace log. path: {:?}", path))?;

            Some(
                fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false)
                    .with_filter(LevelFilter::TRACE),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(trace_layer)
        .try_init()
        .context("Unable to configure tracing")?;

    Ok(())
}

pub fn verbosity_filter(verbose: &Verbosity<InfoLevel>) -> LevelFilter {
    verbose.log_level_filter().as_trace()
}
