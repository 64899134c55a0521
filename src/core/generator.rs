// File: src/core/generator.rs
use crate::core::alphabet::AlphabetKind;
use crate::core::types::{StimulusRow, SymbolPair, TransformType};
use crate::error::Result;

/// Produces the full, ordered stimulus set for one (alphabet, rule) choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StimulusGenerator {
    alphabet: AlphabetKind,
    transform: TransformType,
}

impl StimulusGenerator {
    pub fn new(alphabet: AlphabetKind, transform: TransformType) -> Self {
        Self { alphabet, transform }
    }

    /// Builds a generator from raw selections such as `"letter"` and `"type2"`.
    pub fn from_selection(alphabet: &str, transform: &str) -> Result<Self> {
        Ok(Self::new(alphabet.parse()?, transform.parse()?))
    }

    pub fn alphabet(&self) -> AlphabetKind {
        self.alphabet
    }

    pub fn transform(&self) -> TransformType {
        self.transform
    }

    /// Ordered pairs of distinct symbols: outer loop over the primary
    /// symbol, inner loop over the secondary, diagonal skipped.
    pub fn pairs(&self) -> impl Iterator<Item = SymbolPair> {
        let symbols = self.alphabet.symbols();
        let inner = symbols.clone();
        symbols
            .into_iter()
            .flat_map(move |primary| {
                inner
                    .clone()
                    .into_iter()
                    .filter_map(move |secondary| SymbolPair::new(primary, secondary))
            })
    }

    /// Materializes every row, in pair order.
    pub fn generate(&self) -> Vec<StimulusRow> {
        let rows: Vec<StimulusRow> = self
            .pairs()
            .map(|pair| self.transform.apply(self.alphabet, &pair))
            .collect();
        tracing::debug!(
            alphabet = %self.alphabet,
            transform = %self.transform,
            rows = rows.len(),
            "generated stimulus set"
        );
        rows
    }
}

/// Generates the stimulus set for an alphabet and transform type.
pub fn generate_stimuli(alphabet: AlphabetKind, transform: TransformType) -> Vec<StimulusRow> {
    StimulusGenerator::new(alphabet, transform).generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StimulusError;

    #[test]
    fn row_count_is_n_times_n_minus_one() {
        for alphabet in AlphabetKind::ALL {
            for ty in TransformType::ALL {
                let rows = generate_stimuli(alphabet, ty);
                assert_eq!(rows.len(), alphabet.pair_count(), "{} {}", alphabet, ty);
            }
        }
    }

    #[test]
    fn letters_type1_start_with_a_primary() {
        let rows = generate_stimuli(AlphabetKind::Letters, TransformType::Type1);
        let wrongs: Vec<&str> = rows[..25].iter().map(|r| r.wrong_option.text.as_str()).collect();
        assert!(rows[..25].iter().all(|r| r.title.text == "AAAAAA"));
        assert_eq!(wrongs[0], "BBBBB");
        assert_eq!(wrongs[1], "CCCCC");
        assert_eq!(wrongs[24], "ZZZZZ");
        assert_eq!(rows[25].texts(), ["BBBBBB", "AAAAA", "BBBBB"]);
        assert_eq!(rows.last().unwrap().texts(), ["ZZZZZZ", "YYYYY", "ZZZZZ"]);
    }

    #[test]
    fn pairs_are_distinct_and_unique() {
        let generator = StimulusGenerator::new(AlphabetKind::Digits, TransformType::Type3);
        let pairs: Vec<_> = generator.pairs().collect();
        assert!(pairs.iter().all(|p| p.primary != p.secondary));
        let unique: std::collections::HashSet<_> =
            pairs.iter().map(|p| (p.primary.label, p.secondary.label)).collect();
        assert_eq!(unique.len(), 72);
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_stimuli(AlphabetKind::Colors, TransformType::Type2);
        let b = generate_stimuli(AlphabetKind::Colors, TransformType::Type2);
        assert_eq!(a, b);
    }

    #[test]
    fn stroop_first_row() {
        let rows = generate_stimuli(AlphabetKind::Colors, TransformType::Type1);
        assert_eq!(rows[0].texts(), ["Red", "Blue", "Red"]);
        assert_eq!(rows[0].wrong_option.color.as_deref(), Some("0000FF"));
    }

    #[test]
    fn rejects_unknown_selection() {
        let err = StimulusGenerator::from_selection("greek", "type1").unwrap_err();
        assert!(matches!(err, StimulusError::InvalidConfiguration(_)));
        let err = StimulusGenerator::from_selection("letter", "type9").unwrap_err();
        assert!(matches!(err, StimulusError::InvalidConfiguration(_)));
        assert!(StimulusGenerator::from_selection("number", "type4").is_ok());
    }
}
