//! Spreadsheet column letters (A, B, …, Z, AA, …) and their 0-based indices.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColumnError;

/// Map a column letter to its 0-based index (`A` → 0, `Z` → 25, `AA` → 26).
///
/// Bijective base 26: there is no zero digit. Lowercase letters are accepted.
pub fn column_letter_to_index(letter: &str) -> Result<usize, ColumnError> {
    if letter.is_empty() {
        return Err(ColumnError::Empty);
    }

    let mut index: usize = 0;
    for found in letter.chars() {
        let upper = found.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(ColumnError::InvalidCharacter {
                letter: letter.to_string(),
                found,
            });
        }
        let digit = (upper as u8 - b'A') as usize + 1;
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(|| ColumnError::OutOfRange(letter.to_string()))?;
    }
    Ok(index - 1)
}

/// Inverse of [`column_letter_to_index`].
pub fn index_to_column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index as u128 + 1;
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

// ---------------------------------------------------------------------------
// ColumnRef – a validated column address
// ---------------------------------------------------------------------------

/// A column letter resolved once, at configuration time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnRef {
    letter: String,
    index: usize,
}

impl ColumnRef {
    pub fn from_index(index: usize) -> Self {
        ColumnRef {
            letter: index_to_column_letter(index),
            index,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn letter(&self) -> &str {
        &self.letter
    }
}

impl FromStr for ColumnRef {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index = column_letter_to_index(s)?;
        Ok(ColumnRef {
            letter: s.to_ascii_uppercase(),
            index,
        })
    }
}

impl TryFrom<String> for ColumnRef {
    type Error = ColumnError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ColumnRef> for String {
    fn from(column: ColumnRef) -> Self {
        column.letter
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_and_double_letters() {
        assert_eq!(column_letter_to_index("A"), Ok(0));
        assert_eq!(column_letter_to_index("Z"), Ok(25));
        assert_eq!(column_letter_to_index("AA"), Ok(26));
        assert_eq!(column_letter_to_index("AZ"), Ok(51));
        assert_eq!(column_letter_to_index("BA"), Ok(52));
        assert_eq!(column_letter_to_index("ZZ"), Ok(701));
        assert_eq!(column_letter_to_index("AAA"), Ok(702));
    }

    #[test]
    fn lowercase_is_accepted() {
        assert_eq!(column_letter_to_index("x"), Ok(23));
        let col: ColumnRef = "ab".parse().unwrap();
        assert_eq!(col.letter(), "AB");
        assert_eq!(col.index(), 27);
    }

    #[test]
    fn rejects_bad_letters() {
        assert_eq!(column_letter_to_index(""), Err(ColumnError::Empty));
        assert!(matches!(
            column_letter_to_index("A1"),
            Err(ColumnError::InvalidCharacter { found: '1', .. })
        ));
        assert!(matches!(
            column_letter_to_index("Ñ"),
            Err(ColumnError::InvalidCharacter { .. })
        ));
        let huge = "Z".repeat(40);
        assert!(matches!(
            column_letter_to_index(&huge),
            Err(ColumnError::OutOfRange(_))
        ));
    }

    #[test]
    fn index_to_letter_inverts_mapping() {
        for index in [0, 1, 25, 26, 27, 51, 52, 701, 702, 18277] {
            let letter = index_to_column_letter(index);
            assert_eq!(column_letter_to_index(&letter), Ok(index), "{letter}");
        }
        assert_eq!(ColumnRef::from_index(23).letter(), "X");
    }

    #[test]
    fn serde_validates_letters() {
        let col: ColumnRef = serde_json::from_str("\"V\"").unwrap();
        assert_eq!(col.index(), 21);
        assert_eq!(serde_json::to_string(&col).unwrap(), "\"V\"");
        assert!(serde_json::from_str::<ColumnRef>("\"7\"").is_err());
    }
}
