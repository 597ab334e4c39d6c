//! Turns user input into ordered lists of digit strings to look for.
//!
//! Both strategies return candidates in priority order with duplicates removed;
//! the first occurrence of a string keeps its slot.

use std::collections::HashSet;

/// Collects strings in insertion order, dropping repeats
#[derive(Debug, Default)]
struct OrderedCandidates {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl OrderedCandidates {
    fn push(&mut self, candidate: String) {
        if self.seen.insert(candidate.clone()) {
            self.items.push(candidate);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// Digit encodings of a month/day/year date, most specific first:
///
/// 1. `MMDDYYYY` (`07201991`)
/// 2. `MDDYYYY` when the month is a single digit (`7201991`)
/// 3. `MMDDYY` (`072091`)
/// 4. `MDDYY` when the month is a single digit (`72091`)
///
/// The day is always two digits. The year is rendered four wide and its short
/// form is the last two characters of that. A zero month or day yields nothing.
pub fn date_candidates(month: u32, day: u32, year: u32) -> Vec<String> {
    if month == 0 || day == 0 {
        return Vec::new();
    }

    let mm = format!("{month:02}");
    let dd = format!("{day:02}");
    let yyyy = format!("{year:04}");
    let yy = &yyyy[yyyy.len() - 2..];
    let single_month = month < 10;

    let mut out = OrderedCandidates::default();
    out.push(format!("{mm}{dd}{yyyy}"));
    if single_month {
        out.push(format!("{month}{dd}{yyyy}"));
    }
    out.push(format!("{mm}{dd}{yy}"));
    if single_month {
        out.push(format!("{month}{dd}{yy}"));
    }
    out.into_vec()
}

/// Position of an ASCII uppercase letter in the alphabet, `A` = 1
fn letter_position(c: char) -> Option<u32> {
    c.is_ascii_uppercase().then(|| c as u32 - 'A' as u32 + 1)
}

/// The digits a name encodes to, or `None` if it has no Latin letters.
///
/// Letters are read left to right and their positions concatenated without
/// padding: `"AB"` is `"12"`, `"J"` is `"10"`.
pub fn name_digits(name: &str) -> Option<String> {
    let digits: String = name
        .to_uppercase()
        .chars()
        .filter_map(letter_position)
        .map(|n| n.to_string())
        .collect();

    (!digits.is_empty()).then_some(digits)
}

/// Candidate list for a name: the single encoding, or empty without letters
pub fn name_candidates(name: &str) -> Vec<String> {
    name_digits(name).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_candidates_single_digit_month() {
        assert_eq!(
            date_candidates(7, 20, 1991),
            vec!["07201991", "7201991", "072091", "72091"]
        );
    }

    #[test]
    fn test_date_candidates_two_digit_month_collapses() {
        assert_eq!(date_candidates(12, 5, 1991), vec!["12051991", "120591"]);
        assert_eq!(date_candidates(10, 31, 2000), vec!["10312000", "103100"]);
    }

    #[test]
    fn test_date_candidates_pads_day_and_year() {
        assert_eq!(
            date_candidates(1, 2, 5),
            vec!["01020005", "1020005", "010205", "10205"]
        );
        assert_eq!(date_candidates(11, 9, 2009), vec!["11092009", "110909"]);
    }

    #[test]
    fn test_date_candidates_zero_fields_yield_nothing() {
        assert!(date_candidates(0, 12, 1999).is_empty());
        assert!(date_candidates(3, 0, 1999).is_empty());
    }

    #[test]
    fn test_date_candidates_lengths_and_uniqueness() {
        for month in 1..=12 {
            for day in [1, 9, 10, 28, 31] {
                for year in [1, 99, 1000, 1991, 2024, 9999] {
                    let candidates = date_candidates(month, day, year);
                    let unique: HashSet<_> = candidates.iter().collect();
                    assert_eq!(unique.len(), candidates.len());
                    assert_eq!(candidates.len(), if month < 10 { 4 } else { 2 });
                    for c in &candidates {
                        assert!((5..=8).contains(&c.len()), "{c} has {} digits", c.len());
                        assert!(c.bytes().all(|b| b.is_ascii_digit()));
                    }
                }
            }
        }
    }

    #[test]
    fn test_name_candidates_left_to_right() {
        assert_eq!(name_candidates("Ada"), vec!["141"]);
        assert_eq!(name_candidates("AB"), vec!["12"]);
        assert_eq!(name_candidates("J"), vec!["10"]);
        assert_eq!(name_candidates("Zoe"), vec!["26155"]);
    }

    #[test]
    fn test_name_candidates_ignores_non_letters() {
        assert_eq!(name_candidates("o'Brien-2"), name_candidates("OBRIEN"));
        assert_eq!(name_candidates("  ada  lovelace "), name_candidates("adalovelace"));
        assert_eq!(name_candidates("Zoë"), vec!["2615"]);
    }

    #[test]
    fn test_name_candidates_without_letters_is_empty() {
        assert!(name_candidates("").is_empty());
        assert!(name_candidates("123").is_empty());
        assert!(name_candidates("--- !").is_empty());
        assert_eq!(name_digits("42"), None);
    }
}
