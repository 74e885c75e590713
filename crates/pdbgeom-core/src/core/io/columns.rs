use thiserror::Error;

/// A line did not satisfy the fixed-column layout it was read against.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedLine {
    #[error("line is {actual} characters long, at least {required} are required")]
    TooShort { required: usize, actual: usize },
    #[error("columns {start}-{end} do not fall on character boundaries")]
    NotColumnAligned { start: usize, end: usize },
}

/// A line whose length has been checked against a record layout.
///
/// Every slice taken through [`FixedColumns::field`] lies within the validated
/// length, so field access never panics on short input.
#[derive(Debug, Clone, Copy)]
pub struct FixedColumns<'a> {
    line: &'a str,
}

impl<'a> FixedColumns<'a> {
    /// Validates that `line` holds at least `min_len` bytes.
    pub fn new(line: &'a str, min_len: usize) -> Result<Self, MalformedLine> {
        if line.len() < min_len {
            return Err(MalformedLine::TooShort {
                required: min_len,
                actual: line.len(),
            });
        }
        Ok(Self { line })
    }

    /// The untrimmed text of columns `start..end` (0-based, half-open).
    ///
    /// Columns past the end of the line read as empty.
    pub fn raw(&self, start: usize, end: usize) -> Result<&'a str, MalformedLine> {
        let len = self.line.len();
        let (start, end) = (start.min(len), end.min(len));
        self.line
            .get(start..end)
            .ok_or(MalformedLine::NotColumnAligned { start, end })
    }

    /// The trimmed text of columns `start..end`.
    pub fn field(&self, start: usize, end: usize) -> Result<&'a str, MalformedLine> {
        self.raw(start, end).map(str::trim)
    }

    /// A single-character column, `' '` when blank or absent.
    pub fn char_at(&self, col: usize) -> Result<char, MalformedLine> {
        Ok(self.raw(col, col + 1)?.chars().next().unwrap_or(' '))
    }

    pub fn line(&self) -> &'a str {
        self.line
    }
}

/// Trimmed columns `start..end`, or `""` when the line is too short.
pub fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}
