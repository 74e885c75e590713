use super::{SymmetryWarning, record_warning};
use crate::core::io::columns::{FixedColumns, MalformedLine};
use crate::core::models::spec::MAX_CHAIN_LABEL_LEN;
use crate::core::utils::geometry::{AffineTransform, IDENTITY_TOLERANCE};
use nalgebra::{Matrix3, Vector3};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, trace};

pub const GROUP_HEADER: &str = "REMARK 350 APPLY THE FOLLOWING TO CHAINS:";
pub const FIRST_ROW_PREFIX: &str = "REMARK 350   BIOMT1";
pub const BIOMT_LINE_LEN: usize = 68;

const REMARK_350: &str = "REMARK 350";
const AND_CHAINS: &str = "AND CHAINS:";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BiomtRowError {
    #[error(transparent)]
    Malformed(#[from] MalformedLine),
    #[error("expected '{expected}' in columns {columns}, found '{found}'")]
    UnexpectedField {
        columns: &'static str,
        expected: &'static str,
        found: String,
    },
    #[error("invalid number '{value}' in columns {columns}")]
    InvalidNumber { columns: &'static str, value: String },
}

/// One `REMARK 350   BIOMTn` line: a matrix row and its translation component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomtRow {
    /// Row index as written, 1 to 3.
    pub row: usize,
    pub instance: usize,
    pub rotation: [f64; 3],
    pub translation: f64,
}

impl BiomtRow {
    /// Parses the fixed-column BIOMT layout.
    ///
    /// | Columns | Field |
    /// |---|---|
    /// | 1-6 | `REMARK` |
    /// | 7-10 | `350` |
    /// | 14-18 | `BIOMT` |
    /// | 19 | row index |
    /// | 20-23 | operator instance |
    /// | 24-33, 34-43, 44-53 | matrix row |
    /// | 54-68 | translation, right-justified |
    pub fn parse(line: &str) -> Result<Self, BiomtRowError> {
        let cols = FixedColumns::new(line, BIOMT_LINE_LEN)?;
        expect_field(&cols, 0, 6, "1-6", "REMARK")?;
        expect_field(&cols, 6, 10, "7-10", "350")?;
        expect_field(&cols, 13, 18, "14-18", "BIOMT")?;

        Ok(Self {
            row: parse_number(&cols, 18, 19, "19")?,
            instance: parse_number(&cols, 19, 23, "20-23")?,
            rotation: [
                parse_number(&cols, 23, 33, "24-33")?,
                parse_number(&cols, 33, 43, "34-43")?,
                parse_number(&cols, 43, 53, "44-53")?,
            ],
            translation: parse_number(&cols, 53, 68, "54-68")?,
        })
    }
}

fn expect_field(
    cols: &FixedColumns<'_>,
    start: usize,
    end: usize,
    columns: &'static str,
    expected: &'static str,
) -> Result<(), BiomtRowError> {
    let found = cols.field(start, end)?;
    if found != expected {
        return Err(BiomtRowError::UnexpectedField {
            columns,
            expected,
            found: found.to_string(),
        });
    }
    Ok(())
}

fn parse_number<T: FromStr>(
    cols: &FixedColumns<'_>,
    start: usize,
    end: usize,
    columns: &'static str,
) -> Result<T, BiomtRowError> {
    let value = cols.field(start, end)?;
    value.parse().map_err(|_| BiomtRowError::InvalidNumber {
        columns,
        value: value.to_string(),
    })
}

/// A chain set with the transform to apply to each of its chains.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetryOperator {
    /// Chain labels in listing order, without duplicates.
    pub chains: Vec<String>,
    pub transform: AffineTransform,
    /// BIOMT instance number, 0 if no row could be read.
    pub instance: usize,
    /// Set when at least one matrix row was missing or unreadable and was
    /// replaced by zeros.
    pub degraded: bool,
}

impl SymmetryOperator {
    pub fn is_identity(&self) -> bool {
        self.transform.is_identity(IDENTITY_TOLERANCE)
    }
}

/// An operator together with the problems met while reading it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOperator {
    pub operator: SymmetryOperator,
    pub warnings: Vec<SymmetryWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    SeekGroup,
    InGroupHeader,
    InMatrixRows { row: usize },
    Done,
}

/// Position of the operator parser within a header.
///
/// The cursor only moves forward; once it reports the end of the operators it
/// stays there.
#[derive(Debug, Clone)]
pub struct OperatorCursor {
    line: usize,
    state: ParserState,
    chains: Vec<String>,
    // True right after an operator; a BIOMT1 on the next line reuses `chains`.
    group_open: bool,
}

impl Default for OperatorCursor {
    fn default() -> Self {
        Self {
            line: 0,
            state: ParserState::SeekGroup,
            chains: Vec::new(),
            group_open: false,
        }
    }
}

impl OperatorCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next header line to be examined.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn is_done(&self) -> bool {
        self.state == ParserState::Done
    }
}

#[derive(Default)]
struct OperatorBuilder {
    rotation: Matrix3<f64>,
    translation: Vector3<f64>,
    instance: Option<usize>,
    degraded: bool,
    warnings: Vec<SymmetryWarning>,
}

impl OperatorBuilder {
    fn degrade(&mut self, warning: SymmetryWarning) {
        self.degraded = true;
        record_warning(&mut self.warnings, warning);
    }

    fn read_row(&mut self, row: usize, line: &str, line_no: usize) {
        let parsed = match BiomtRow::parse(line) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.degrade(SymmetryWarning::MalformedRow {
                    line: line_no,
                    row: row + 1,
                    reason: e.to_string(),
                });
                return;
            }
        };
        if parsed.row != row + 1 {
            self.degrade(SymmetryWarning::MalformedRow {
                line: line_no,
                row: row + 1,
                reason: format!("found row index {}", parsed.row),
            });
            return;
        }
        match self.instance {
            Some(expected) if expected != parsed.instance => {
                self.degrade(SymmetryWarning::InstanceMismatch {
                    line: line_no,
                    row: row + 1,
                    expected,
                    found: parsed.instance,
                });
                return;
            }
            Some(_) => {}
            None => self.instance = Some(parsed.instance),
        }

        for (col, value) in parsed.rotation.iter().enumerate() {
            self.rotation[(row, col)] = *value;
        }
        self.translation[row] = parsed.translation;
    }

    fn finish(self, chains: Vec<String>) -> ParsedOperator {
        ParsedOperator {
            operator: SymmetryOperator {
                chains,
                transform: AffineTransform::new(self.rotation, self.translation),
                instance: self.instance.unwrap_or(0),
                degraded: self.degraded,
            },
            warnings: self.warnings,
        }
    }
}

/// Adds the chain labels listed in `list` to `chains`.
///
/// Labels are separated by whitespace and/or commas. Duplicates and labels
/// longer than four characters are reported and skipped.
fn read_chain_list(list: &str, line_no: usize, chains: &mut Vec<String>, warnings: &mut Vec<SymmetryWarning>) {
    for token in list
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
    {
        if token.chars().count() > MAX_CHAIN_LABEL_LEN {
            record_warning(
                warnings,
                SymmetryWarning::ChainLabelTooLong {
                    line: line_no,
                    chain: token.to_string(),
                },
            );
        } else if chains.iter().any(|chain| chain == token) {
            record_warning(
                warnings,
                SymmetryWarning::DuplicateChain {
                    line: line_no,
                    chain: token.to_string(),
                },
            );
        } else {
            chains.push(token.to_string());
        }
    }
}

/// The chain list of a `REMARK 350 ... AND CHAINS:` continuation line.
fn and_chains_list(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(REMARK_350)?.trim_start();
    rest.strip_prefix(AND_CHAINS)
}

/// Reads the next symmetry operator from `header`, advancing `cursor` past it.
///
/// Returns `None` once no further operator exists. Unreadable rows never end
/// the scan: they are zero-filled, reported in
/// [`ParsedOperator::warnings`] and flag the operator as degraded. A group
/// header found where a matrix row was expected closes the current operator
/// early and is left for the next call.
pub fn next_operator(header: &[String], cursor: &mut OperatorCursor) -> Option<ParsedOperator> {
    let mut builder = OperatorBuilder::default();
    let mut first_line = cursor.line + 1;

    loop {
        match cursor.state {
            ParserState::Done => return None,

            ParserState::SeekGroup => {
                let Some(line) = header.get(cursor.line) else {
                    cursor.state = ParserState::Done;
                    return None;
                };
                if line.starts_with(GROUP_HEADER) {
                    cursor.state = ParserState::InGroupHeader;
                } else if cursor.group_open && line.starts_with(FIRST_ROW_PREFIX) {
                    first_line = cursor.line + 1;
                    cursor.state = ParserState::InMatrixRows { row: 0 };
                } else {
                    cursor.group_open = false;
                    cursor.line += 1;
                }
            }

            ParserState::InGroupHeader => {
                first_line = cursor.line + 1;
                cursor.chains.clear();
                let list = header[cursor.line].get(GROUP_HEADER.len()..).unwrap_or("");
                read_chain_list(list, first_line, &mut cursor.chains, &mut builder.warnings);
                cursor.line += 1;

                while let Some(list) = header.get(cursor.line).and_then(|line| and_chains_list(line)) {
                    read_chain_list(list, cursor.line + 1, &mut cursor.chains, &mut builder.warnings);
                    cursor.line += 1;
                }
                debug!(
                    "Symmetry group at header line {} applies to chains {:?}.",
                    first_line, cursor.chains
                );
                cursor.state = ParserState::InMatrixRows { row: 0 };
            }

            ParserState::InMatrixRows { row: 3 } => {
                cursor.state = ParserState::SeekGroup;
                cursor.group_open = true;
                let parsed = builder.finish(cursor.chains.clone());
                trace!("Read symmetry operator {}.", parsed.operator.instance);
                return Some(parsed);
            }

            ParserState::InMatrixRows { row } => match header.get(cursor.line) {
                Some(line) if !line.starts_with(GROUP_HEADER) => {
                    builder.read_row(row, line, cursor.line + 1);
                    cursor.line += 1;
                    cursor.state = ParserState::InMatrixRows { row: row + 1 };
                }
                next => {
                    builder.degrade(SymmetryWarning::TruncatedOperator {
                        line: first_line,
                        rows: row,
                    });
                    cursor.state = if next.is_some() {
                        ParserState::SeekGroup
                    } else {
                        ParserState::Done
                    };
                    cursor.group_open = false;
                    return Some(builder.finish(cursor.chains.clone()));
                }
            },
        }
    }
}

/// Iterator over the symmetry operators of a header, in file order.
#[derive(Debug, Clone)]
pub struct SymmetryOperators<'a> {
    header: &'a [String],
    cursor: OperatorCursor,
}

impl<'a> SymmetryOperators<'a> {
    pub fn new(header: &'a [String]) -> Self {
        Self {
            header,
            cursor: OperatorCursor::new(),
        }
    }
}

impl Iterator for SymmetryOperators<'_> {
    type Item = ParsedOperator;

    fn next(&mut self) -> Option<Self::Item> {
        next_operator(self.header, &mut self.cursor)
    }
}

pub fn operators(header: &[String]) -> SymmetryOperators<'_> {
    SymmetryOperators::new(header)
}
