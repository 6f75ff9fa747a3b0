//! Capture sink shared between the session and its pty reader thread.
//!
//! Whatever the sink receives is what the surrounding terminal recorder
//! sees. Disabling it is the secret-handling mechanism: bytes read from the
//! pty while the sink is off are still available for expectation matching
//! but never leave the process.

use std::io::Write;
use std::sync::{Arc, Mutex};

struct SinkInner {
    writer: Box<dyn Write + Send>,
    enabled: bool,
}

/// A toggleable writer. Cloning shares the underlying writer.
#[derive(Clone)]
pub struct CaptureSink {
    inner: Arc<Mutex<SinkInner>>,
}

impl CaptureSink {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SinkInner {
                writer,
                enabled: true,
            })),
        }
    }

    /// A sink forwarding to the process stdout, for running under the
    /// terminal recorder.
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    pub fn set_enabled(&self, enabled: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.enabled = enabled;
        }
    }

    /// Write bytes if the sink is enabled. Errors are swallowed: a broken
    /// capture pipe must not kill the session mid-command.
    pub fn write(&self, bytes: &[u8]) {
        if let Ok(mut inner) = self.inner.lock() {
            if inner.enabled {
                let _ = inner.writer.write_all(bytes);
                let _ = inner.writer.flush();
            }
        }
    }
}

/// A sink capturing into memory, for tests.
#[derive(Clone, Default)]
pub struct MemorySink(Arc<Mutex<Vec<u8>>>);

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Vec<u8> {
        self.0.lock().map(|b| b.clone()).unwrap_or_default()
    }

    pub fn contents_lossy(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut bytes) = self.0.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
