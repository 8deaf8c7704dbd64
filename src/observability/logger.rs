use anyhow::Context;
use chrono::Local;
use std::fmt;
use std::path::Path;
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Local time, millisecond precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Formats events as `<timestamp> - <LEVEL> - <message>`
pub struct AuditFormat;

impl<S, N> FormatEvent<S, N> for AuditFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} - {} - ",
            Local::now().format(TIMESTAMP_FORMAT),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Keeps the file sink alive; dropping it flushes pending lines
#[must_use = "dropping the guard stops the audit log file sink"]
pub struct LogGuard {
    _file_guard: WorkerGuard,
}

/// Append-only writer for the audit log file, never rotated
pub fn audit_file_writer(
    log_dir: &Path,
    file_name: &str,
) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(log_dir)
        .with_context(|| format!("Failed to open log file {}", log_dir.join(file_name).display()))?;

    Ok(tracing_appender::non_blocking(file_appender))
}

/// Install the process-wide audit log: stderr plus the log file
pub fn init_logging(level: &str, log_dir: &Path, file_name: &str) -> anyhow::Result<LogGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let (file_writer, file_guard) = audit_file_writer(log_dir, file_name)?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .event_format(AuditFormat)
        .with_writer(std::io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .event_format(AuditFormat)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Logger already initialized")?;

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}
