//! Build log sinks.

use std::sync::Mutex;

/// Destination of a build's log output.
///
/// `println` receives ordinary log lines and every line the compiler prints;
/// `fatal_error` is the channel for failures that end the step.
pub trait BuildListener: Send + Sync {
    /// Appends one line to the build log.
    fn println(&self, line: &str);

    /// Reports a failure that ends the step.
    fn fatal_error(&self, message: &str);
}

/// A listener that keeps everything in memory.
///
/// Fatal messages are recorded both in their own list and, prefixed with
/// `FATAL: `, in the line log so the log keeps its original order.
#[derive(Debug, Default)]
pub struct BufferListener {
    lines: Mutex<Vec<String>>,
    fatal: Mutex<Vec<String>>,
}

impl BufferListener {
    /// Creates an empty listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every logged line in order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Returns the fatal messages in order.
    pub fn fatal_errors(&self) -> Vec<String> {
        self.fatal.lock().map(|f| f.clone()).unwrap_or_default()
    }

    /// Returns the whole log joined with newlines.
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }
}

impl BuildListener for BufferListener {
    fn println(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }

    fn fatal_error(&self, message: &str) {
        if let Ok(mut fatal) = self.fatal.lock() {
            fatal.push(message.to_string());
        }
        self.println(&format!("FATAL: {message}"));
    }
}
