//! Line-oriented assembly of emitted source files.

/// Accumulates the body of one generated module line by line.
#[derive(Debug, Default)]
pub struct ModuleWriter {
    lines: Vec<String>,
}

impl ModuleWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Push a line at the given indent depth (two spaces per level).
    pub fn push_at(&mut self, depth: usize, line: impl Into<String>) {
        self.lines.push(format!("{}{}", "  ".repeat(depth), line.into()));
    }

    /// Push a blank separator line unless the body is empty or already ends
    /// with one.
    pub fn blank(&mut self) {
        if !self.lines.is_empty() && self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Assemble the final file: generated-file header, imports, body, with a
    /// trailing newline.
    pub fn assemble(self, header: &str, imports: Vec<String>) -> String {
        let mut out: Vec<String> = vec![header.to_string(), String::new()];
        if !imports.is_empty() {
            out.extend(imports);
            out.push(String::new());
        }
        out.extend(self.lines);
        while out.last().is_some_and(String::is_empty) {
            out.pop();
        }
        out.push(String::new());
        out.join("\n")
    }
}
