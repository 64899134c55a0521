// File: src/core/transform.rs
//
// The four layout rules. Flanker rules arrange repeated symbols; Stroop rules
// keep the labels fixed at [p, s, p] and vary which symbol colors each cell.
use crate::core::alphabet::{AlphabetKind, OPTION_REPEAT};
use crate::core::color::DisplayColor;
use crate::core::types::{Cell, StimulusRow, Symbol, SymbolPair, TransformType};

/// Which symbol of the pair a field is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Primary,
    Secondary,
}

impl Role {
    fn pick(self, pair: &SymbolPair) -> Symbol {
        match self {
            Role::Primary => pair.primary,
            Role::Secondary => pair.secondary,
        }
    }
}

/// Shape of one flanker field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    /// Primary symbol repeated to the alphabet's title length.
    TitleRun,
    /// A symbol repeated five times.
    Run(Role),
    /// Two copies of the outer symbol around one of the inner: `ooioo`.
    Flanked { outer: Role },
}

impl TransformType {
    fn flanker_fields(self) -> [Field; 3] {
        use Field::*;
        use Role::*;
        match self {
            TransformType::Type1 => [TitleRun, Run(Secondary), Run(Primary)],
            TransformType::Type2 => [
                Flanked { outer: Primary },
                Flanked { outer: Primary },
                Flanked { outer: Secondary },
            ],
            TransformType::Type3 => [TitleRun, Flanked { outer: Primary }, Flanked { outer: Secondary }],
            TransformType::Type4 => [Flanked { outer: Primary }, Run(Secondary), Run(Primary)],
        }
    }

    /// Which symbol's color each Stroop cell is displayed in.
    fn stroop_colors(self) -> [Role; 3] {
        use Role::*;
        match self {
            TransformType::Type1 => [Primary, Secondary, Primary],
            TransformType::Type2 => [Secondary, Primary, Secondary],
            TransformType::Type3 => [Primary, Primary, Secondary],
            TransformType::Type4 => [Secondary, Secondary, Primary],
        }
    }

    /// Arranges a pair into a row for the given alphabet.
    pub fn apply(self, alphabet: AlphabetKind, pair: &SymbolPair) -> StimulusRow {
        match alphabet {
            AlphabetKind::Colors => self.apply_stroop(pair),
            _ => self.apply_flanker(alphabet, pair),
        }
    }

    fn apply_flanker(self, alphabet: AlphabetKind, pair: &SymbolPair) -> StimulusRow {
        let [title, wrong, right] = self.flanker_fields().map(|field| {
            let text = match field {
                Field::TitleRun => pair.primary.label.repeat(alphabet.title_repeat()),
                Field::Run(role) => role.pick(pair).label.repeat(OPTION_REPEAT),
                Field::Flanked { outer } => {
                    let inner = if outer == Role::Primary { Role::Secondary } else { Role::Primary };
                    flank(outer.pick(pair).label, inner.pick(pair).label)
                }
            };
            Cell::plain(text)
        });
        StimulusRow { title, wrong_option: wrong, right_option: right }
    }

    fn apply_stroop(self, pair: &SymbolPair) -> StimulusRow {
        let labels = [pair.primary, pair.secondary, pair.primary];
        let roles = self.stroop_colors();
        let cell = |i: usize| {
            let color = roles[i].pick(pair).color.unwrap_or(DisplayColor::BLACK);
            Cell::colored(labels[i].label, color)
        };
        StimulusRow { title: cell(0), wrong_option: cell(1), right_option: cell(2) }
    }

    /// Inverts a row back to the pair that produced it under this rule.
    /// Returns `None` if the row is not an output of this rule.
    pub fn recover_pair(self, alphabet: AlphabetKind, row: &StimulusRow) -> Option<SymbolPair> {
        let (primary, secondary) = match alphabet {
            AlphabetKind::Colors => (row.title.text.clone(), row.wrong_option.text.clone()),
            _ => {
                let first = |cell: &Cell| cell.text.get(0..1).map(str::to_owned);
                let middle = |cell: &Cell| cell.text.get(2..3).map(str::to_owned);
                match self {
                    TransformType::Type1 => (first(&row.title)?, first(&row.wrong_option)?),
                    TransformType::Type2 | TransformType::Type4 => (first(&row.title)?, middle(&row.title)?),
                    TransformType::Type3 => (first(&row.title)?, middle(&row.wrong_option)?),
                }
            }
        };
        self.verified(alphabet, row, &primary, &secondary)
    }

    fn verified(
        self,
        alphabet: AlphabetKind,
        row: &StimulusRow,
        primary: &str,
        secondary: &str,
    ) -> Option<SymbolPair> {
        let pair = SymbolPair::new(alphabet.find(primary)?, alphabet.find(secondary)?)?;
        (self.apply(alphabet, &pair) == *row).then_some(pair)
    }
}

/// `oo` + `i` + `oo`
fn flank(outer: &str, inner: &str) -> String {
    let mut s = String::with_capacity(outer.len() * 4 + inner.len());
    s.push_str(outer);
    s.push_str(outer);
    s.push_str(inner);
    s.push_str(outer);
    s.push_str(outer);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(alphabet: AlphabetKind, p: &str, s: &str) -> SymbolPair {
        SymbolPair::new(alphabet.find(p).unwrap(), alphabet.find(s).unwrap()).unwrap()
    }

    #[test]
    fn letters_type1() {
        let row = TransformType::Type1.apply(AlphabetKind::Letters, &pair(AlphabetKind::Letters, "A", "B"));
        assert_eq!(row.texts(), ["AAAAAA", "BBBBB", "AAAAA"]);
    }

    #[test]
    fn letters_type2_to_type4() {
        let ab = pair(AlphabetKind::Letters, "A", "B");
        assert_eq!(TransformType::Type2.apply(AlphabetKind::Letters, &ab).texts(), ["AABAA", "AABAA", "BBABB"]);
        assert_eq!(TransformType::Type3.apply(AlphabetKind::Letters, &ab).texts(), ["AAAAAA", "AABAA", "BBABB"]);
        assert_eq!(TransformType::Type4.apply(AlphabetKind::Letters, &ab).texts(), ["AABAA", "BBBBB", "AAAAA"]);
    }

    #[test]
    fn digits_use_five_symbol_titles() {
        let p = pair(AlphabetKind::Digits, "1", "2");
        assert_eq!(TransformType::Type1.apply(AlphabetKind::Digits, &p).texts(), ["11111", "22222", "11111"]);
        assert_eq!(TransformType::Type3.apply(AlphabetKind::Digits, &p).texts(), ["11111", "11211", "22122"]);
        assert_eq!(TransformType::Type4.apply(AlphabetKind::Digits, &p).texts(), ["11211", "22222", "11111"]);
    }

    #[test]
    fn flanker_cells_have_no_color() {
        let row = TransformType::Type2.apply(AlphabetKind::Digits, &pair(AlphabetKind::Digits, "3", "7"));
        assert!(row.cells().iter().all(|c| c.color.is_none()));
    }

    #[test]
    fn stroop_labels_are_fixed_and_colors_vary() {
        let alphabet = AlphabetKind::Colors;
        let p = pair(alphabet, "Red", "Blue");
        let red = Some("FF0000".to_string());
        let blue = Some("0000FF".to_string());

        let expected = [
            (TransformType::Type1, [&red, &blue, &red]),
            (TransformType::Type2, [&blue, &red, &blue]),
            (TransformType::Type3, [&red, &red, &blue]),
            (TransformType::Type4, [&blue, &blue, &red]),
        ];
        for (ty, colors) in expected {
            let row = ty.apply(alphabet, &p);
            assert_eq!(row.texts(), ["Red", "Blue", "Red"], "{}", ty);
            let got: Vec<_> = row.cells().iter().map(|c| c.color.clone()).collect();
            let want: Vec<_> = colors.iter().map(|c| (*c).clone()).collect();
            assert_eq!(got, want, "{}", ty);
        }
    }

    #[test]
    fn recovers_pairs_for_every_rule() {
        for alphabet in AlphabetKind::ALL {
            for ty in TransformType::ALL {
                let symbols = alphabet.symbols();
                let p = SymbolPair::new(symbols[1], symbols[0]).unwrap();
                let row = ty.apply(alphabet, &p);
                assert_eq!(ty.recover_pair(alphabet, &row), Some(p), "{} {}", alphabet, ty);
            }
        }
    }

    #[test]
    fn recover_rejects_foreign_rows() {
        let row = TransformType::Type1.apply(AlphabetKind::Letters, &pair(AlphabetKind::Letters, "C", "D"));
        assert_eq!(TransformType::Type2.recover_pair(AlphabetKind::Letters, &row), None);

        let garbage = StimulusRow {
            title: Cell::plain(""),
            wrong_option: Cell::plain("?"),
            right_option: Cell::plain("!"),
        };
        assert_eq!(TransformType::Type1.recover_pair(AlphabetKind::Letters, &garbage), None);
    }
}
