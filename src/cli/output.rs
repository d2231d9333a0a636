//! Buildpack log output
//!
//! The lifecycle shows buildpack stdout to the user building the image, so
//! this output is plain indented text. Diagnostics go through `tracing`
//! instead.

use std::io::{self, Write};

const PROCESS_INDENT: &str = "  ";
const SUBPROCESS_INDENT: &str = "    ";

/// Writes titled, indented build output
pub struct Emitter<W: Write> {
    writer: W,
}

impl Emitter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Emitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn title(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)
    }

    pub fn process(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}{}", PROCESS_INDENT, line)
    }

    pub fn subprocess(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}{}", SUBPROCESS_INDENT, line)
    }

    pub fn break_line(&mut self) -> io::Result<()> {
        writeln!(self.writer)?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_levels() {
        let mut emitter = Emitter::new(Vec::new());

        emitter.title("Some Buildpack some-version").unwrap();
        emitter.process("Assigning launch processes:").unwrap();
        emitter.subprocess("web (default): sh /workspace/start.sh").unwrap();
        emitter.break_line().unwrap();

        let output = String::from_utf8(emitter.into_inner()).unwrap();
        assert_eq!(
            output,
            "Some Buildpack some-version\n  Assigning launch processes:\n    web (default): sh /workspace/start.sh\n\n"
        );
    }
}
