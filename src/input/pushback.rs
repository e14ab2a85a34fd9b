//! Line source with one-line (or deeper) push-back.
//!
//! Report grouping has to look one hit past the end of a query's block to
//! notice the query changed; the overshoot line is pushed back and re-read
//! by the next report.

use std::io::{self, BufRead};

pub struct PushbackLineReader<R> {
    src: R,
    stack: Vec<String>,
}

impl<R: BufRead> PushbackLineReader<R> {
    pub fn new(src: R) -> Self {
        PushbackLineReader {
            src,
            stack: Vec::new(),
        }
    }

    /// Next line, with the trailing newline stripped. Pushed-back lines are
    /// returned first, most recent first. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        if let Some(line) = self.stack.pop() {
            return Ok(Some(line));
        }
        let mut buf = String::new();
        let n = self.src.read_line(&mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    /// Return a line to the source; the next `read_line` yields it again.
    pub fn push_back(&mut self, line: String) {
        self.stack.push(line);
    }
}
