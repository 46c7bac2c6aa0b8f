//! Console logging handle.
//!
//! Every component receives a [`ConsoleLogger`] when it is built instead of
//! reaching for a global subscriber. The handle owns its own `tracing`
//! dispatcher, so two loggers in the same process never interfere.

use std::fmt::Display;
use std::io;

use tracing::{dispatcher, Dispatch, Level};
use tracing_subscriber::fmt::time::Uptime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::FmtSubscriber;

#[derive(Clone)]
pub struct ConsoleLogger {
    name: String,
    dispatch: Dispatch,
}

impl ConsoleLogger {
    /// Build a debug level logger that writes through `make_writer`.
    ///
    /// Lines carry the thread name, the time since the logger was created,
    /// the logger name, the level and the message.
    pub fn with_writer<W>(name: &str, make_writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_thread_names(true)
            .with_timer(Uptime::default())
            .with_target(false)
            .with_ansi(false)
            .with_writer(make_writer)
            .finish();

        Self {
            name: name.to_owned(),
            dispatch: Dispatch::new(subscriber),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn debug(&self, message: impl Display) {
        self.scoped(|| tracing::debug!("{message}"));
    }

    pub fn info(&self, message: impl Display) {
        self.scoped(|| tracing::info!("{message}"));
    }

    pub fn warn(&self, message: impl Display) {
        self.scoped(|| tracing::warn!("{message}"));
    }

    pub fn error(&self, message: impl Display) {
        self.scoped(|| tracing::error!("{message}"));
    }

    // Events are routed to this logger's dispatcher inside a span carrying its name
    fn scoped(&self, emit: impl FnOnce()) {
        dispatcher::with_default(&self.dispatch, || {
            let _span = tracing::info_span!("logger", name = %self.name).entered();
            emit();
        });
    }
}

impl std::fmt::Debug for ConsoleLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleLogger")
            .field("name", &self.name)
            .finish()
    }
}

/// Create a logger that prints to standard output at debug verbosity.
pub fn create_console_logger(name: &str) -> ConsoleLogger {
    ConsoleLogger::with_writer(name, io::stdout)
}


#[cfg(test)]
mod tests {
    use super::capture::capturing_logger;
    use super::*;

    #[test]
    fn logs_name_level_and_message() {
        let (logger, buffer) = capturing_logger("Anime Project Logger");
        logger.info("hello dataset");

        let output = buffer.contents();
        assert!(output.contains("INFO"));
        assert!(output.contains("Anime Project Logger"));
        assert!(output.contains("hello dataset"));
    }

    #[test]
    fn debug_messages_are_not_filtered() {
        let (logger, buffer) = capturing_logger("test");
        logger.debug("fine grained");
        assert!(buffer.contents().contains("DEBUG"));
        assert!(buffer.contents().contains("fine grained"));
    }

    #[test]
    fn loggers_do_not_share_sinks() {
        let (first, first_buffer) = capturing_logger("first");
        let (_second, second_buffer) = capturing_logger("second");

        first.warn("only here");

        assert!(first_buffer.contents().contains("only here"));
        assert!(second_buffer.contents().is_empty());
    }

    #[test]
    fn console_logger_keeps_its_name() {
        let logger = create_console_logger("Anime Project Logger");
        assert_eq!(logger.name(), "Anime Project Logger");
    }
}
