//! Output Emitter
//!
//! Abstraction for output production during printing.

/// Trait for emitting formatted output.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`), dropping trailing blanks of the
    /// line it ends.
    fn emit_newline(&mut self);

    /// Emit indentation as the given number of tabs.
    fn emit_indent(&mut self, level: usize);

    /// Emit a single space.
    fn emit_space(&mut self);
}

/// String-based emitter for in-memory printing.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Ensure the output ends with a single newline.
    pub fn ensure_trailing_newline(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
    }

    /// Remove trailing whitespace and blank lines.
    pub fn trim_trailing_blank_lines(&mut self) {
        let kept = self.buffer.trim_end_matches([' ', '\t', '\n']).len();
        self.buffer.truncate(kept);
    }

    /// Get the formatted output.
    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        let kept = self.buffer.trim_end_matches([' ', '\t']).len();
        self.buffer.truncate(kept);
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level {
            self.buffer.push('\t');
        }
    }

    fn emit_space(&mut self) {
        self.buffer.push(' ');
    }
}
