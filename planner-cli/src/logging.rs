//! Logging setup for the `tax-planner` binary.
//!
//! Log lines go to stderr so the report on stdout stays clean to pipe.
//! A log file can be attached after startup (from `--log-file` or the
//! `[logging]` config section), and the level can be changed once the
//! configuration has been read.

use anyhow::Result;
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

const DEFAULT_DIRECTIVE: &str = "warn";

// --- Formatter ---

/// `<local time> <LEVEL> <target>: <fields>`, dimmed/coloured on a terminal.
struct PlannerFmt;

impl<S, N> FormatEvent<S, N> for PlannerFmt
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
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if ansi {
            let colour = match *meta.level() {
                Level::ERROR => "\x1b[1;31m",
                Level::WARN => "\x1b[1;33m",
                Level::INFO => "\x1b[1;32m",
                Level::DEBUG => "\x1b[1;34m",
                Level::TRACE => "\x1b[1;35m",
            };
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m {colour}{:>5}\x1b[0m \x1b[36m{}\x1b[0m: ",
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Late-bound file writer ---

/// A MakeWriter that can be pointed at a file after initialization.
/// While no file is set, all writes are discarded.
#[derive(Clone)]
struct FileSlot(Arc<Mutex<Option<File>>>);

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
        SlotWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

// --- Statics ---

type ReloadFn = Box<dyn Fn(EnvFilter) -> Result<()> + Send + Sync>;

static LEVEL_RELOAD: OnceLock<ReloadFn> = OnceLock::new();
static CONSOLE_RELOAD: OnceLock<ReloadFn> = OnceLock::new();
static FILE_SLOT: OnceLock<Arc<Mutex<Option<File>>>> = OnceLock::new();

fn store_reload<S>(
    cell: &OnceLock<ReloadFn>,
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

fn parse_directive(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| anyhow::anyhow!("invalid log level '{level}': {e}"))
}

// --- Public API ---

/// Initializes logging. Call once at startup; later calls are ignored.
///
/// - Level: `RUST_LOG` if set, otherwise `warn`.
/// - Console: stderr, coloured when attached to a terminal.
/// - File: inactive until [`enable_file_logging`] is called.
pub fn init_logging() {
    let file_inner: Arc<Mutex<Option<File>>> = Arc::new(Mutex::new(None));
    let _ = FILE_SLOT.set(file_inner.clone());

    let initial = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let (level_filter, level_handle) = reload::Layer::new(initial);
    // Console on/off gate; the global level filter is still the ceiling.
    let (console_gate, console_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(PlannerFmt)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(console_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(PlannerFmt)
        .with_ansi(false)
        .with_writer(FileSlot(file_inner));

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        store_reload(&LEVEL_RELOAD, level_handle);
        store_reload(&CONSOLE_RELOAD, console_handle);
    }
}

/// Changes the active log filter at runtime.
/// Accepts a bare level ("error", "warn", "info", "debug", "trace")
/// or any full EnvFilter directive.
pub fn set_log_level(level: &str) -> Result<()> {
    let filter = parse_directive(level)?;
    match LEVEL_RELOAD.get() {
        Some(reload) => reload(filter),
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Shows or hides console log output without affecting file logging.
pub fn set_console_enabled(enabled: bool) -> Result<()> {
    let filter = EnvFilter::new(if enabled { "trace" } else { "off" });
    match CONSOLE_RELOAD.get() {
        Some(reload) => reload(filter),
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Starts appending log output to `path`, replacing any open log file.
/// The directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow::anyhow!("cannot open log file '{}': {e}", path.display()))?;

    match FILE_SLOT.get() {
        Some(slot) => {
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
            Ok(())
        }
        None => anyhow::bail!("logging not yet initialized"),
    }
}
