use super::atom::AtomRecord;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest chain label a residue specifier may carry.
pub const MAX_CHAIN_LABEL_LEN: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("Residue specifier is empty")]
    Empty,
    #[error("Residue specifier '{0}' has no residue number")]
    MissingNumber(String),
    #[error("Residue specifier '{spec}' has a non-numeric residue number '{value}'")]
    InvalidNumber { spec: String, value: String },
    #[error("Chain label '{label}' in '{spec}' is longer than {max} characters", max = MAX_CHAIN_LABEL_LEN)]
    ChainTooLong { spec: String, label: String },
    #[error("Insertion code '{code}' in '{spec}' must be a single character")]
    InvalidInsertion { spec: String, code: String },
}

/// A pointer to one residue: `[chain]resnum[insert]`.
///
/// A leading alphabetic character is taken as the chain label (`"A23"`,
/// `"L27A"`). Numeric or multi-character chain labels are written with a dot
/// separator (`"1.23"`, `"AB.10"`). The residue number may be negative.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResidueSpecifier {
    pub chain: Option<String>,
    pub res_seq: isize,
    pub insertion: Option<char>,
}

impl ResidueSpecifier {
    pub fn new(chain: Option<&str>, res_seq: isize, insertion: Option<char>) -> Self {
        Self {
            chain: chain.map(str::to_string),
            res_seq,
            insertion,
        }
    }

    /// Returns `true` if `atom` belongs to the residue this specifier names.
    ///
    /// An absent chain matches any chain; an absent insertion code only
    /// matches atoms without one.
    pub fn matches(&self, atom: &AtomRecord) -> bool {
        let chain_ok = self.chain.as_deref().is_none_or(|c| c == atom.chain);
        chain_ok && atom.res_seq == self.res_seq && atom.insertion == self.insertion.unwrap_or(' ')
    }
}

impl FromStr for ResidueSpecifier {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        if spec.is_empty() {
            return Err(SpecError::Empty);
        }

        let (chain, rest) = if let Some((chain, rest)) = spec.split_once('.') {
            (Some(chain), rest)
        } else if spec.starts_with(|c: char| c.is_ascii_alphabetic()) {
            let (chain, rest) = spec.split_at(1);
            (Some(chain), rest)
        } else {
            (None, spec)
        };

        if let Some(label) = chain {
            if label.chars().count() > MAX_CHAIN_LABEL_LEN {
                return Err(SpecError::ChainTooLong {
                    spec: spec.to_string(),
                    label: label.to_string(),
                });
            }
        }

        let number_end = rest
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
            .map_or(rest.len(), |(i, _)| i);
        let (number, insertion) = rest.split_at(number_end);

        if number.is_empty() {
            return Err(SpecError::MissingNumber(spec.to_string()));
        }
        let res_seq: isize = number.parse().map_err(|_| SpecError::InvalidNumber {
            spec: spec.to_string(),
            value: number.to_string(),
        })?;

        let mut codes = insertion.chars();
        let insertion = match (codes.next(), codes.next()) {
            (None, _) => None,
            (Some(c), None) if c.is_ascii_alphabetic() => Some(c),
            _ => {
                return Err(SpecError::InvalidInsertion {
                    spec: spec.to_string(),
                    code: insertion.to_string(),
                });
            }
        };

        Ok(Self {
            chain: chain.filter(|c| !c.is_empty()).map(str::to_string),
            res_seq,
            insertion,
        })
    }
}

impl fmt::Display for ResidueSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.chain.as_deref() {
            Some(chain) if chain.len() == 1 && chain.chars().all(|c| c.is_ascii_alphabetic()) => {
                write!(f, "{}", chain)?
            }
            Some(chain) => write!(f, "{}.", chain)?,
            None => {}
        }
        write!(f, "{}", self.res_seq)?;
        if let Some(code) = self.insertion {
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn parse(s: &str) -> Result<ResidueSpecifier, SpecError> {
        s.parse()
    }

    #[test]
    fn parses_chain_number_and_insertion() {
        assert_eq!(parse("L27A").unwrap(), ResidueSpecifier::new(Some("L"), 27, Some('A')));
        assert_eq!(parse("A23").unwrap(), ResidueSpecifier::new(Some("A"), 23, None));
        assert_eq!(parse("23").unwrap(), ResidueSpecifier::new(None, 23, None));
        assert_eq!(parse("100B").unwrap(), ResidueSpecifier::new(None, 100, Some('B')));
    }

    #[test]
    fn parses_dotted_and_negative_forms() {
        assert_eq!(parse("1.23").unwrap(), ResidueSpecifier::new(Some("1"), 23, None));
        assert_eq!(parse("AB.10C").unwrap(), ResidueSpecifier::new(Some("AB"), 10, Some('C')));
        assert_eq!(parse("-3").unwrap(), ResidueSpecifier::new(None, -3, None));
        assert_eq!(parse("H-1").unwrap(), ResidueSpecifier::new(Some("H"), -1, None));
        assert_eq!(parse(".5").unwrap(), ResidueSpecifier::new(None, 5, None));
    }

    #[test]
    fn rejects_malformed_specifiers() {
        assert_eq!(parse("  "), Err(SpecError::Empty));
        assert!(matches!(parse("A"), Err(SpecError::MissingNumber(_))));
        assert!(matches!(parse("Axyz"), Err(SpecError::MissingNumber(_))));
        assert!(matches!(parse("ABCDE.1"), Err(SpecError::ChainTooLong { .. })));
        assert!(matches!(parse("A12XY"), Err(SpecError::InvalidInsertion { .. })));
        assert!(matches!(parse("A12?"), Err(SpecError::InvalidInsertion { .. })));
        assert!(matches!(parse("-"), Err(SpecError::InvalidNumber { .. })));
    }

    #[test]
    fn display_round_trips() {
        for text in ["L27A", "23", "1.23", "AB.10C", "H-1"] {
            assert_eq!(parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn matches_respects_optional_chain_and_insertion() {
        let mut atom = AtomRecord::new(1, "CA", "GLY", "L", 27, Point3::origin());
        assert!(parse("L27").unwrap().matches(&atom));
        assert!(parse("27").unwrap().matches(&atom));
        assert!(!parse("H27").unwrap().matches(&atom));
        assert!(!parse("L27A").unwrap().matches(&atom));

        atom.insertion = 'A';
        assert!(parse("L27A").unwrap().matches(&atom));
        assert!(!parse("L27").unwrap().matches(&atom));
    }
}
