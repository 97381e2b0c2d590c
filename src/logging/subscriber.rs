//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use super::logger::STAGE_TARGET;

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
pub(super) struct MessageExtractor {
    pub(super) message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// Render one event as a plain (uncoloured) log line.
fn plain_line(level: tracing::Level, target: &str, msg: &str) -> String {
    match level {
        tracing::Level::INFO if target == STAGE_TARGET => format!("==> {msg}"),
        tracing::Level::ERROR => format!("    [error] {msg}"),
        tracing::Level::WARN => format!("    [warn] {msg}"),
        tracing::Level::DEBUG | tracing::Level::TRACE => format!("    [debug] {msg}"),
        tracing::Level::INFO => format!("    {msg}"),
    }
}

/// A [`tracing_subscriber::Layer`] that appends all events to a log file.
///
/// Always captures events at `DEBUG` level and above regardless of the
/// console verbosity.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate `path`, write a run header, and return a layer appending to it.
    pub(super) fn new(path: &Path) -> std::io::Result<Self> {
        let version = super::version();
        fs::write(path, format!("resource-links {version}\n"))?;
        let file = fs::OpenOptions::new().append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let line = plain_line(*metadata.level(), metadata.target(), &extractor.message);

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits the console style:
/// bold stage arrows, coloured warnings and errors, dimmed debug lines.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;

        match level {
            tracing::Level::ERROR => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            tracing::Level::WARN => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            tracing::Level::INFO if metadata.target() == STAGE_TARGET => {
                writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m")
            }
            tracing::Level::INFO => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Where console events are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    /// Warnings and errors to stderr, everything else to stdout.
    Split,
    /// Every event to stderr; stdout carries command output only.
    Stderr,
}

impl ConsoleTarget {
    fn make_writer(self) -> tracing_subscriber::fmt::writer::BoxMakeWriter {
        use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt as _};

        match self {
            Self::Split => BoxMakeWriter::new(
                std::io::stderr
                    .with_max_level(tracing::Level::WARN)
                    .and(std::io::stdout.with_min_level(tracing::Level::INFO)),
            ),
            Self::Stderr => BoxMakeWriter::new(std::io::stderr),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console verbosity is `DEBUG` with `verbose` and `INFO` otherwise, unless
/// `RUST_LOG` is set.  `console` decides which stream the events go to.
/// With `log_file`, every event at `DEBUG` and above is also appended to
/// that file.  Must be called once, before any logging.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn init_subscriber(
    verbose: bool,
    console: ConsoleTarget,
    log_file: Option<&Path>,
) -> std::io::Result<()> {
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(console.make_writer())
        .with_filter(console_filter);

    let file_layer = log_file
        .map(FileLayer::new)
        .transpose()?
        .map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    Ok(())
}
