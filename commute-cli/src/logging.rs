//! Tracing setup for the command-line front end.
//!
//! Records go to stderr so the report on stdout can be piped, and optionally
//! to a log file opened after startup. Both outputs share one reloadable
//! level filter.

use anyhow::{Context, Result};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

use crate::config::LoggingConfig;

// --- Formatter ---

/// `<local timestamp> <LEVEL> <file:line> <fields>`, coloured on a terminal.
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let paint = |code: &'static str| if ansi { code } else { "" };

        write!(
            writer,
            "{}{}{} ",
            paint("\x1b[2m"),
            Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"),
            paint("\x1b[0m")
        )?;

        let colour = match *meta.level() {
            Level::ERROR => "\x1b[1;31m",
            Level::WARN => "\x1b[1;33m",
            Level::INFO => "\x1b[1;32m",
            Level::DEBUG => "\x1b[1;34m",
            Level::TRACE => "\x1b[1;35m",
        };
        write!(
            writer,
            "{}{:>5}{} ",
            paint(colour),
            meta.level(),
            paint("\x1b[0m")
        )?;

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            let file = file
                .rsplit_once("src/")
                .or_else(|| file.rsplit_once("src\\"))
                .map_or(file, |(_, rest)| rest);
            write!(
                writer,
                "{}{file}:{line}{} ",
                paint("\x1b[36m"),
                paint("\x1b[0m")
            )?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Late-bound file writer ---

type SharedFile = Arc<Mutex<Option<File>>>;

fn lock_slot(slot: &Mutex<Option<File>>) -> MutexGuard<'_, Option<File>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A MakeWriter that can be pointed at a file after initialization.
/// While no file is set, all writes are silently discarded.
#[derive(Clone)]
struct FileSlot(SharedFile);

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(lock_slot(&self.0))
    }
}

// --- Handles ---

type FilterHandle = Box<dyn Fn(EnvFilter) -> Result<()> + Send + Sync>;

static LEVEL_HANDLE: OnceLock<FilterHandle> = OnceLock::new();
static STDERR_HANDLE: OnceLock<FilterHandle> = OnceLock::new();
static FILE_SLOT: OnceLock<SharedFile> = OnceLock::new();

fn store_handle<S>(
    cell: &OnceLock<FilterHandle>,
    handle: reload::Handle<EnvFilter, S>,
) where
    S: Subscriber + Send + Sync + 'static,
{
    let _ = cell.set(Box::new(move |filter: EnvFilter| {
        handle
            .reload(filter)
            .map_err(|e| anyhow::anyhow!("filter reload failed: {e}"))
    }));
}

fn reload_with(
    cell: &OnceLock<FilterHandle>,
    filter: EnvFilter,
) -> Result<()> {
    match cell.get() {
        Some(reload) => reload(filter),
        None => anyhow::bail!("logging not yet initialized"),
    }
}

// --- Public API ---

/// Installs the global subscriber. Call once at startup.
///
/// The level comes from `RUST_LOG` when set, otherwise `default_filter`.
/// File output stays inactive until [`enable_file_logging`] is called.
pub fn init_logging(default_filter: &str) {
    let file_inner: SharedFile = Arc::new(Mutex::new(None));
    let _ = FILE_SLOT.set(file_inner.clone());

    let initial =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Global level ceiling for both outputs.
    let (level_filter, level_handle) = reload::Layer::new(initial);
    // Per-stderr on/off gate; starts open.
    let (stderr_gate, stderr_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_filter(stderr_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(false)
        .with_writer(FileSlot(file_inner));

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        store_handle(&LEVEL_HANDLE, level_handle);
        store_handle(&STDERR_HANDLE, stderr_handle);
    }
}

/// Changes the active log filter at runtime.
/// Accepts a bare level ("error", "warn", "info", "debug", "trace")
/// or any full EnvFilter directive.
pub fn set_log_level(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .map_err(|e| anyhow::anyhow!("invalid log level '{level}': {e}"))?;
    reload_with(&LEVEL_HANDLE, filter)
}

/// Shows or hides stderr log output without affecting file logging.
pub fn set_stderr_enabled(enabled: bool) -> Result<()> {
    let filter = EnvFilter::new(if enabled { "trace" } else { "off" });
    reload_with(&STDERR_HANDLE, filter)
}

/// Starts appending log output to `path`, replacing any open log file.
/// The directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    match FILE_SLOT.get() {
        Some(slot) => {
            *lock_slot(slot) = Some(file);
            Ok(())
        }
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Closes the current log file.
pub fn disable_file_logging() {
    if let Some(slot) = FILE_SLOT.get() {
        *lock_slot(slot) = None;
    }
}

/// Picks the filter that replaces the one installed at startup.
///
/// The command line wins over the config file. `None` means neither set a
/// level, so the startup filter (`RUST_LOG`, else the default) stays.
pub fn filter_override<'a>(
    config_level: Option<&'a str>,
    cli_level: Option<&'a str>,
) -> Option<&'a str> {
    cli_level.or(config_level)
}

/// Applies the `[logging]` table of the configuration file, with the
/// command-line level taking precedence over the file's.
pub fn apply_config(
    config: &LoggingConfig,
    cli_level: Option<&str>,
) -> Result<()> {
    if let Some(level) = filter_override(config.level.as_deref(), cli_level) {
        set_log_level(level)?;
    }
    set_stderr_enabled(config.stderr)?;
    match &config.file {
        Some(path) => enable_file_logging(path),
        None => {
            disable_file_logging();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn startup_filter_kept_without_any_level() {
        assert_eq!(filter_override(None, None), None);
    }

    #[test]
    fn config_level_replaces_startup_filter() {
        assert_eq!(filter_override(Some("warn"), None), Some("warn"));
    }

    #[test]
    fn cli_level_wins_over_config() {
        assert_eq!(filter_override(Some("warn"), Some("debug")), Some("debug"));
        assert_eq!(filter_override(None, Some("trace")), Some("trace"));
    }

    #[test]
    fn default_config_leaves_level_untouched() {
        let config = LoggingConfig::default();

        assert_eq!(filter_override(config.level.as_deref(), None), None);
    }
}
