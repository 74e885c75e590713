use thiserror::Error;

/// Number of distinct labels in the `A..Z, 1..9, a..z` ordering.
pub const LABEL_SPACE: usize = 61;

/// The label the sequence falls back to once `z` has been used.
pub const FIRST_LABEL: char = 'A';

/// The cursor position that makes the first generated label `'1'`,
/// i.e. all upper-case letters are left to the input structure.
pub const DEFAULT_CURSOR: char = 'Z';

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("More than {LABEL_SPACE} chains generated; reusing chain label '{reused}'")]
pub struct LabelsExhausted {
    pub reused: char,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("'{0}' is not a chain label (expected A-Z, 1-9 or a-z)")]
pub struct InvalidChainLabel(pub char);

pub fn is_chain_label(label: char) -> bool {
    matches!(label, 'A'..='Z' | '1'..='9' | 'a'..='z')
}

/// The label following `label` in `A..Z, 1..9, a..z`.
///
/// Returns `None` after `z` and for characters outside the ordering.
pub fn next_label(label: char) -> Option<char> {
    match label {
        'A'..='Y' | '1'..='8' | 'a'..='y' => char::from_u32(label as u32 + 1),
        'Z' => Some('1'),
        '9' => Some('a'),
        _ => None,
    }
}

/// A cursor handing out fresh chain labels for generated chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainLabelSequence {
    current: char,
}

impl Default for ChainLabelSequence {
    fn default() -> Self {
        Self {
            current: DEFAULT_CURSOR,
        }
    }
}

impl ChainLabelSequence {
    /// Places the cursor on `label`; the first [`advance`](Self::advance)
    /// returns the label after it.
    pub fn starting_at(label: char) -> Result<Self, InvalidChainLabel> {
        if !is_chain_label(label) {
            return Err(InvalidChainLabel(label));
        }
        Ok(Self { current: label })
    }

    /// The most recently issued label (or the starting cursor).
    pub fn current(&self) -> char {
        self.current
    }

    /// Moves to the next label.
    ///
    /// # Errors
    ///
    /// Past `z` the cursor wraps to `A` and returns [`LabelsExhausted`]
    /// carrying the reused label. The error is a warning: the cursor has
    /// already moved and `reused` is the label to use.
    pub fn advance(&mut self) -> Result<char, LabelsExhausted> {
        match next_label(self.current) {
            Some(label) => {
                self.current = label;
                Ok(label)
            }
            None => {
                self.current = FIRST_LABEL;
                Err(LabelsExhausted {
                    reused: FIRST_LABEL,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_covers_sixty_one_labels() {
        let mut label = FIRST_LABEL;
        let mut count = 1;
        while let Some(next) = next_label(label) {
            label = next;
            count += 1;
        }
        assert_eq!(count, LABEL_SPACE);
        assert_eq!(label, 'z');
    }

    #[test]
    fn advance_crosses_group_boundaries() {
        let mut seq = ChainLabelSequence::starting_at('Z').unwrap();
        assert_eq!(seq.advance(), Ok('1'));

        let mut seq = ChainLabelSequence::starting_at('9').unwrap();
        assert_eq!(seq.advance(), Ok('a'));

        let mut seq = ChainLabelSequence::starting_at('C').unwrap();
        assert_eq!(seq.advance(), Ok('D'));
    }

    #[test]
    fn advance_past_z_wraps_with_a_warning() {
        let mut seq = ChainLabelSequence::starting_at('z').unwrap();
        assert_eq!(seq.advance(), Err(LabelsExhausted { reused: 'A' }));
        assert_eq!(seq.current(), 'A');
        assert_eq!(seq.advance(), Ok('B'));
    }

    #[test]
    fn default_cursor_issues_digits_first() {
        let mut seq = ChainLabelSequence::default();
        assert_eq!(seq.current(), 'Z');
        assert_eq!(seq.advance(), Ok('1'));
    }

    #[test]
    fn starting_at_rejects_labels_outside_the_ordering() {
        assert_eq!(ChainLabelSequence::starting_at('0'), Err(InvalidChainLabel('0')));
        assert_eq!(ChainLabelSequence::starting_at('#'), Err(InvalidChainLabel('#')));
        assert!(!is_chain_label(' '));
    }
}
