//! Logging infrastructure for console and file output.

mod logger;
mod subscriber;

pub use logger::{Log, Logger, NullLog, STAGE_TARGET};
pub use subscriber::{ConsoleTarget, init_subscriber};

/// Version string embedded at build time, falling back to the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("RESOURCE_LINKS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Run `f` under a thread-local subscriber and return every event it
/// emitted as `(level, message)` pairs.
#[cfg(test)]
pub(crate) fn capture_events(f: impl FnOnce()) -> Vec<(String, String)> {
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt as _;

    struct Capture(Arc<Mutex<Vec<(String, String)>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Capture {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let mut extractor = subscriber::MessageExtractor::default();
            event.record(&mut extractor);
            if let Ok(mut events) = self.0.lock() {
                events.push((event.metadata().level().to_string(), extractor.message));
            }
        }
    }

    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(Capture(Arc::clone(&events)));
    tracing::subscriber::with_default(subscriber, f);
    let captured = events
        .lock()
        .map(|guard| guard.clone())
        .unwrap_or_default();
    captured
}
