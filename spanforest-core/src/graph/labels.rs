//! Automatic node labels.
//!
//! Labels run `A`..`Z`, then `AA`, `AB`, ... (bijective base-26) so the
//! sequence never wraps back onto a label it already produced.

const ALPHABET_LEN: u64 = 26;

/// Generator of spreadsheet-style node labels.
///
/// # Examples
/// ```
/// use spanforest_core::LabelSequence;
///
/// let mut labels = LabelSequence::new();
/// assert_eq!(labels.next_label(), "A");
/// assert_eq!(labels.next_label(), "B");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSequence {
    position: u64,
}

impl LabelSequence {
    /// Creates a sequence starting at `A`.
    #[must_use]
    pub const fn new() -> Self {
        Self { position: 0 }
    }

    /// Returns the next label and advances the sequence.
    pub fn next_label(&mut self) -> String {
        let label = encode(self.position);
        self.position = self.position.saturating_add(1);
        label
    }

    /// Returns the next label for which `taken` is `false`.
    ///
    /// Labels skipped because they are taken are consumed.
    pub fn next_free(&mut self, mut taken: impl FnMut(&str) -> bool) -> String {
        loop {
            let label = self.next_label();
            if !taken(&label) {
                return label;
            }
        }
    }

    /// Rewinds the sequence to `A`.
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

fn encode(position: u64) -> String {
    let mut letters = Vec::new();
    let mut remaining = position.saturating_add(1);
    while remaining > 0 {
        remaining = remaining.saturating_sub(1);
        let offset = remaining
            .checked_rem(ALPHABET_LEN)
            .and_then(|digit| u8::try_from(digit).ok())
            .unwrap_or(0);
        letters.push(char::from(b'A'.saturating_add(offset)));
        remaining = remaining.checked_div(ALPHABET_LEN).unwrap_or(0);
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, "A")]
    #[case(25, "Z")]
    #[case(26, "AA")]
    #[case(27, "AB")]
    #[case(51, "AZ")]
    #[case(52, "BA")]
    #[case(701, "ZZ")]
    #[case(702, "AAA")]
    fn encode_matches_spreadsheet_columns(#[case] position: u64, #[case] expected: &str) {
        assert_eq!(encode(position), expected);
    }

    #[test]
    fn next_free_skips_taken_labels() {
        let mut labels = LabelSequence::new();
        let label = labels.next_free(|candidate| candidate == "A" || candidate == "B");
        assert_eq!(label, "C");
        assert_eq!(labels.next_label(), "D");
    }

    #[test]
    fn rewind_restarts_at_a() {
        let mut labels = LabelSequence::new();
        labels.next_label();
        labels.next_label();
        labels.rewind();
        assert_eq!(labels.next_label(), "A");
    }
}
