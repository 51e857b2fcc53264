//! Structural scores over a mask.
//!
//! Neither score is information-theoretic.  Complexity counts how many classes a mask draws from;
//! "entropy" sums each class token's cardinality, a coarse proxy for how large the search space
//! behind the mask is per position.

use std::fmt;

use crate::{parse_mask, Class, MaskItem};

fn class_counts(mask: &str) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for item in parse_mask(mask) {
        if let MaskItem::Class(class) = item {
            if let Some(index) = Class::ALL.iter().position(|c| *c == class) {
                counts[index] += 1;
            }
        }
    }
    counts
}

/// The number of distinct class tokens present in `mask`, from 0 to 4.
///
/// ```
/// assert_eq!(4, maskcat::complexity("?u?l?l?l?l?s?s?u?l?l?l?l?d?s"));
/// assert_eq!(0, maskcat::complexity("password"));
/// ```
pub fn complexity(mask: &str) -> usize {
    class_counts(mask).iter().filter(|count| **count > 0).count()
}

/// The sum over class tokens in `mask` of the token's class cardinality.
///
/// ```
/// assert_eq!(369, maskcat::entropy("?u?l?l?l?l?s?s?u?l?l?l?l?d?s"));
/// ```
pub fn entropy(mask: &str) -> usize {
    class_counts(mask)
        .iter()
        .zip(Class::ALL)
        .map(|(count, class)| count * class.cardinality())
        .sum()
}

///////////////////////////////////////////// MaskStats ////////////////////////////////////////////

/// A mask and its scores, as printed in verbose mode.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct MaskStats {
    /// The mask itself.
    pub mask: String,
    /// The length, in code points, of the text the mask came from.
    pub length: usize,
    /// See [complexity].
    pub complexity: usize,
    /// See [entropy].
    pub entropy: usize,
}

impl MaskStats {
    /// Score `mask`, which was generated from `text`.
    ///
    /// ```
    /// use maskcat::MaskStats;
    ///
    /// let stats = MaskStats::new("Hello1", "?u?l?l?l?l?d".to_string());
    /// assert_eq!("?u?l?l?l?l?d:6:3:140", stats.to_string());
    /// ```
    pub fn new(text: &str, mask: String) -> Self {
        Self {
            length: text.chars().count(),
            complexity: complexity(&mask),
            entropy: entropy(&mask),
            mask,
        }
    }
}

impl fmt::Display for MaskStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.mask, self.length, self.complexity, self.entropy
        )
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
