//! An indenting line writer for generated source.

/// Spaces per indentation level.
const INDENT_WIDTH: usize = 4;

/// Builds source text line by line at a tracked indentation level.
///
/// Lines are always terminated with `\n`; blank lines carry no trailing
/// whitespace.
#[derive(Debug, Default)]
pub struct SourceWriter {
    buffer: String,
    level: usize,
}

impl SourceWriter {
    /// Creates an empty writer at indentation level zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one line at the current indentation.
    pub fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.buffer.push('\n');
            return;
        }
        for _ in 0..self.level * INDENT_WIDTH {
            self.buffer.push(' ');
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    /// Writes `header` followed by an opening brace and indents. An empty
    /// header writes the brace alone.
    pub fn open(&mut self, header: &str) {
        if !header.is_empty() {
            self.line(header);
        }
        self.line("{");
        self.level += 1;
    }

    /// Dedents and writes a closing brace followed by `suffix`.
    pub fn close_with(&mut self, suffix: &str) {
        self.level = self.level.saturating_sub(1);
        self.line(&format!("}}{suffix}"));
    }

    /// Dedents and writes a closing brace.
    pub fn close(&mut self) {
        self.close_with("");
    }

    /// Increases the indentation level.
    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// Decreases the indentation level.
    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// The current indentation level.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns the text written so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consumes the writer and returns its text.
    pub fn finish(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_blocks() {
        let mut w = SourceWriter::new();
        w.open("namespace A");
        w.open("class B");
        w.line("int x;");
        w.close();
        w.close();
        assert_eq!(
            w.finish(),
            "namespace A\n{\n    class B\n    {\n        int x;\n    }\n}\n"
        );
    }

    #[test]
    fn blank_lines_have_no_indent() {
        let mut w = SourceWriter::new();
        w.indent();
        w.line("a");
        w.line("");
        w.blank();
        w.line("b");
        assert_eq!(w.as_str(), "    a\n\n\n    b\n");
    }

    #[test]
    fn open_without_header() {
        let mut w = SourceWriter::new();
        w.line("x switch");
        w.open("");
        w.close_with(";");
        assert_eq!(w.finish(), "x switch\n{\n};\n");
    }

    #[test]
    fn close_with_suffix() {
        let mut w = SourceWriter::new();
        w.open("x = new[]");
        w.close_with(";");
        assert_eq!(w.finish(), "x = new[]\n{\n};\n");
    }

    #[test]
    fn dedent_saturates() {
        let mut w = SourceWriter::new();
        w.dedent();
        assert_eq!(w.level(), 0);
    }
}
