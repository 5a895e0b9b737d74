//! Output Emitter
//!
//! Abstraction for output production during emission, plus an indentation-aware
//! writer layered on top of it.

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// Trait for emitting generated output.
///
/// Section writers write to an emitter. The only implementation in use builds
/// an in-memory string; the trait keeps writers independent of the sink.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit indentation as the given number of levels.
    fn emit_indent(&mut self, levels: usize);
}

/// String-based emitter.
///
/// Owned by exactly one emission call and never shared.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    /// Create a new string emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Get the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Currently allocated capacity.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Get the emitted output.
    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, levels: usize) {
        for _ in 0..levels * INDENT_WIDTH {
            self.buffer.push(' ');
        }
    }
}

/// Line-oriented writer tracking the current indentation level.
pub struct SourceWriter<E: Emitter> {
    emitter: E,
    indent: usize,
}

impl<E: Emitter> SourceWriter<E> {
    pub fn new(emitter: E) -> Self {
        Self { emitter, indent: 0 }
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write a line at the current indentation.
    pub fn line(&mut self, text: &str) {
        self.emitter.emit_indent(self.indent);
        self.emitter.emit(text);
        self.emitter.emit_newline();
    }

    /// Write an empty line (no trailing whitespace).
    pub fn blank_line(&mut self) {
        self.emitter.emit_newline();
    }

    /// Write `open`, indent, run `body`, dedent, write `close`.
    pub fn block(&mut self, open: &str, close: &str, body: impl FnOnce(&mut Self)) {
        self.line(open);
        self.indent();
        body(self);
        self.dedent();
        self.line(close);
    }

    /// Current indentation level.
    pub fn depth(&self) -> usize {
        self.indent
    }

    /// Release the underlying emitter.
    pub fn finish(self) -> E {
        self.emitter
    }
}
