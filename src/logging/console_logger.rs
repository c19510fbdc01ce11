use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Route `tracing` output to the browser devtools console.
///
/// # Errors
/// Returns an error if the filter directive is invalid or a global subscriber is
/// already installed.
pub fn setup_logging(directive: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_new(directive)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(ConsoleMakeWriter)
                // No wall clock in wasm32-unknown-unknown, and the console stamps lines anyway
                .without_time()
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init()?;

    tracing::info!("Logging initialized to browser console ({})", directive);

    Ok(())
}

/// Hands out one [`ConsoleWriter`] per event, tagged with the event level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and emits it as a single console call on drop.
#[derive(Debug)]
pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    const fn new(level: Level) -> Self {
        Self {
            level,
            buf: Vec::new(),
        }
    }

    /// The buffered line without the trailing newline the formatter appends
    fn message(&self) -> String {
        String::from_utf8_lossy(&self.buf).trim_end().to_string()
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }

        let line = wasm_bindgen::JsValue::from(self.message());
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_writer_buffers_whole_event() {
        let mut writer = ConsoleWriter::new(Level::WARN);
        write!(writer, "WARN vendor_buddy::api: ").unwrap();
        writeln!(writer, "catalog shape unrecognized").unwrap();

        assert_eq!(
            writer.message(),
            "WARN vendor_buddy::api: catalog shape unrecognized"
        );

        // Clear so dropping does not call into the browser console natively
        writer.buf.clear();
    }

    #[test]
    fn test_default_directive_parses() {
        assert!(EnvFilter::try_new(crate::config::DEFAULT_LOG_DIRECTIVE).is_ok());
    }
}
