use std::io::{self, BufRead, Lines};

/// Line iterator that remembers the 1-based number of the last line read.
pub(crate) struct NumberedLines<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> NumberedLines<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// Number of the last line returned, or 0 before the first read.
    pub(crate) const fn line(&self) -> usize {
        self.line
    }

    /// Next line with its number, or `None` at end of input.
    pub(crate) fn next_line(&mut self) -> io::Result<Option<(usize, String)>> {
        match self.lines.next() {
            None => Ok(None),
            Some(result) => {
                self.line += 1;
                Ok(Some((self.line, result?)))
            }
        }
    }
}
