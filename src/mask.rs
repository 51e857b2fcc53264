//! Mask lexing, validation, and the mask sets `match` reads from disk.
//!
//! A mask is literal text in which the sentinel opens a two-character class token.  Validation
//! only cares about sentinels: every other code point is a literal and always allowed.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};

use utf8path::Path;

use crate::{Class, Error, MaskError, MULTIBYTE_FLAG, SENTINEL};

///////////////////////////////////////////// MaskItem /////////////////////////////////////////////

/// One position of a mask: a class placeholder or a literal character.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum MaskItem {
    /// A placeholder standing for any single character of the class.
    Class(Class),
    /// A character copied through from the literal text.
    Literal(char),
}

/// Lex `mask` into items.  The sentinel followed by a class flag is a token; every other code
/// point, including a stray sentinel, is a literal.
///
/// ```
/// use maskcat::{parse_mask, Class, MaskItem};
///
/// assert_eq!(
///     vec![MaskItem::Class(Class::Upper), MaskItem::Literal('x'), MaskItem::Class(Class::Digit)],
///     parse_mask("?ux?d"),
/// );
/// ```
pub fn parse_mask(mask: &str) -> Vec<MaskItem> {
    let mut items = Vec::with_capacity(mask.len());
    let mut chars = mask.chars().peekable();
    while let Some(c) = chars.next() {
        if c == SENTINEL {
            if let Some(class) = chars.peek().copied().and_then(Class::from_flag) {
                chars.next();
                items.push(MaskItem::Class(class));
                continue;
            }
        }
        items.push(MaskItem::Literal(c));
    }
    items
}

/// Check that every sentinel in `mask` opens one of `?u`, `?l`, `?d`, `?s`.  Literal characters
/// other than the sentinel are allowed anywhere.
pub fn validate_mask(mask: &str) -> Result<(), MaskError> {
    check_sentinels(mask, false)
}

/// Like [validate_mask], but `?b` is also accepted.  This is the form of a mask after the
/// multi-byte pass.
///
/// ```
/// use maskcat::{validate_mask, validate_multibyte_mask};
///
/// assert!(validate_multibyte_mask("?u?b?b?d").is_ok());
/// assert!(validate_mask("?u?b?b?d").is_err());
/// ```
pub fn validate_multibyte_mask(mask: &str) -> Result<(), MaskError> {
    check_sentinels(mask, true)
}

fn check_sentinels(mask: &str, multibyte: bool) -> Result<(), MaskError> {
    let mut chars = mask.chars().enumerate().peekable();
    while let Some((position, c)) = chars.next() {
        if c != SENTINEL {
            continue;
        }
        match chars.peek() {
            Some((_, flag))
                if Class::from_flag(*flag).is_some() || (multibyte && *flag == MULTIBYTE_FLAG) =>
            {
                chars.next();
            }
            _ => return Err(MaskError::StraySentinel { position }),
        }
    }
    Ok(())
}

/// True iff `mask` is a well-formed mask.
///
/// ```
/// use maskcat::is_valid_mask;
///
/// assert!(is_valid_mask("?u?l?l?d"));
/// assert!(is_valid_mask("Pass?d?d"));
/// assert!(!is_valid_mask("?u?x"));
/// assert!(!is_valid_mask("?l?"));
/// ```
pub fn is_valid_mask(mask: &str) -> bool {
    validate_mask(mask).is_ok()
}

////////////////////////////////////////////// MaskSet /////////////////////////////////////////////

/// The masks read from a mask file.
///
/// Lines that are not well-formed masks are skipped with a warning; one bad line never stops the
/// rest of the file from loading.  A multi-byte set also accepts `?b` tokens, so it can hold the
/// masks of text that went through [crate::encode_multibyte].
#[derive(Clone, Debug, Default)]
pub struct MaskSet {
    masks: HashSet<String>,
    skipped: usize,
    multibyte: bool,
}

impl MaskSet {
    /// An empty set.  When `multibyte` is true, `?b` tokens are well-formed.
    pub fn new(multibyte: bool) -> Self {
        Self {
            multibyte,
            ..Self::default()
        }
    }

    /// Load the masks in the file at `path`.
    pub fn open(path: &Path, multibyte: bool) -> Result<Self, Error> {
        let file = File::open(path.as_str()).map_err(|err| Error::file(path.as_str(), err))?;
        Self::from_reader(BufReader::new(file), multibyte)
    }

    /// Load newline-delimited masks from `reader`.
    pub fn from_reader<R: BufRead>(reader: R, multibyte: bool) -> Result<Self, Error> {
        let mut set = Self::new(multibyte);
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if let Err(err) = set.insert(&line) {
                log::warn!(
                    "[SKIP] line {}: input mask contains non-mask characters: {line}: {err}",
                    number + 1
                );
            }
        }
        log::debug!(
            "loaded {} masks, skipped {} lines",
            set.masks.len(),
            set.skipped
        );
        Ok(set)
    }

    /// Add `mask` if it is well-formed.  Rejected masks count toward [MaskSet::skipped].
    pub fn insert(&mut self, mask: &str) -> Result<(), MaskError> {
        match check_sentinels(mask, self.multibyte) {
            Ok(()) => {
                self.masks.insert(mask.to_string());
                Ok(())
            }
            Err(err) => {
                self.skipped += 1;
                Err(err)
            }
        }
    }

    /// True iff `mask` is in the set.
    pub fn contains(&self, mask: &str) -> bool {
        self.masks.contains(mask)
    }

    /// The number of distinct masks loaded.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// True iff no mask was loaded.
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// The number of lines rejected as malformed.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
