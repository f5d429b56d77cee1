use std::str::FromStr;

use anyhow::Context as _;
use tracing::{Level, Metadata};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    layer::{Context, Filter},
    prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
    Layer,
};

use crate::config::LogConfig;

/// Drops everything above `max_level`, and keeps only a random sample of
/// TRACE events since the draw loop emits one per frame.
#[derive(Debug)]
pub struct TraceFilter {
    max_level: Level,
    trace_sample_rate: f32,
}

impl TraceFilter {
    pub fn new(max_level: Level, trace_sample_rate: f32) -> Self {
        Self {
            max_level,
            trace_sample_rate,
        }
    }

    fn admits(&self, level: Level, roll: f32) -> bool {
        if level > self.max_level {
            false
        } else if level == Level::TRACE {
            roll < self.trace_sample_rate
        } else {
            true
        }
    }
}

impl<S> Filter<S> for TraceFilter {
    fn enabled(&self, meta: &Metadata<'_>, _: &Context<'_, S>) -> bool {
        self.admits(*meta.level(), rand::random::<f32>())
    }
}

/// Logs go to a rolling file, the terminal belongs to the UI. Keep the guard
/// alive until exit or buffered lines are lost.
pub fn init(config: &LogConfig) -> anyhow::Result<WorkerGuard> {
    let level = Level::from_str(&config.level)
        .with_context(|| format!("Invalid log level {:?}", config.level))?;

    let file_appender =
        RollingFileAppender::new(Rotation::HOURLY, &config.directory, &config.file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_thread_names(true)
        .with_level(true);
    let filter = TraceFilter::new(level, config.trace_sample_rate);
    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}
