//! Canonicalization: literal text to masks.
//!
//! A mask replaces every character of a requested class with that class's placeholder token and
//! copies every other code point through unchanged.

use crate::{Class, ClassSpec, MaskItem, SENTINEL};

///////////////////////////////////////// ReplacementTable /////////////////////////////////////////

/// The literal-to-token mapping for one class configuration.
///
/// Built once per run and shared, read-only, by every line the run processes.  The mapping is a
/// predicate over class membership rather than an enumerated table, so characters outside the
/// requested classes are simply not in its domain.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ReplacementTable {
    spec: ClassSpec,
}

impl ReplacementTable {
    /// A table covering exactly the classes in `spec`.
    pub const fn new(spec: ClassSpec) -> Self {
        Self { spec }
    }

    /// A table covering the classes named in `spec`.  Unrecognized characters are ignored; a spec
    /// with no recognized characters yields the identity table.
    ///
    /// ```
    /// use maskcat::ReplacementTable;
    ///
    /// let table = ReplacementTable::from_spec("ud");
    /// assert_eq!("?uello?d", table.canonicalize("Hello1"));
    /// assert_eq!("Hello1", ReplacementTable::from_spec("").canonicalize("Hello1"));
    /// ```
    pub fn from_spec(spec: &str) -> Self {
        Self::new(ClassSpec::lenient(spec))
    }

    /// The table for all four classes.
    pub const fn all() -> Self {
        Self::new(ClassSpec::all())
    }

    /// The class specification this table was built from.
    pub fn spec(&self) -> &ClassSpec {
        &self.spec
    }

    /// The class `c` maps to under this table, or `None` if `c` passes through.
    pub fn lookup(&self, c: char) -> Option<Class> {
        Class::classify(c).filter(|class| self.spec.contains(*class))
    }

    /// The mask of `text`.
    ///
    /// ```
    /// use maskcat::ReplacementTable;
    ///
    /// let table = ReplacementTable::all();
    /// assert_eq!("?u?l?l?l?l?s?s?u?l?l?l?l?d?s", table.canonicalize("Hello, World1!"));
    /// ```
    pub fn canonicalize(&self, text: &str) -> String {
        let mut mask = String::with_capacity(text.len() * 2);
        for c in text.chars() {
            match self.lookup(c) {
                Some(class) => mask.push_str(class.token()),
                None => mask.push(c),
            }
        }
        mask
    }

    /// The structured mask of `text`: exactly one item per code point.
    pub fn mask_items(&self, text: &str) -> Vec<MaskItem> {
        text.chars()
            .map(|c| match self.lookup(c) {
                Some(class) => MaskItem::Class(class),
                None => MaskItem::Literal(c),
            })
            .collect()
    }
}

impl Default for ReplacementTable {
    fn default() -> Self {
        Self::all()
    }
}

/////////////////////////////////////////// partial masks //////////////////////////////////////////

/// Mask only the classes in `spec`, leaving the rest of `text` literal.
///
/// Requesting the special class together with upper, lower, or digit is not a partial mask this
/// tool produces:  the whole result collapses to the empty string.  The special class on its own
/// masks only special characters.
///
/// ```
/// use maskcat::{partial_canonicalize, ClassSpec};
///
/// assert_eq!("Hello?s?sWorld1?s", partial_canonicalize("Hello, World1!", &ClassSpec::lenient("s")));
/// assert_eq!("", partial_canonicalize("Hello, World1!", &ClassSpec::lenient("us")));
/// ```
pub fn partial_canonicalize(text: &str, spec: &ClassSpec) -> String {
    if spec.mixes_special() {
        return String::new();
    }
    ReplacementTable::new(*spec).canonicalize(text)
}

/// Keep only the ASCII letters of `text`.
///
/// ```
/// assert_eq!("HelloWorld", maskcat::make_token("Hello, World1!"));
/// ```
pub fn make_token(text: &str) -> String {
    text.chars().filter(char::is_ascii_alphabetic).collect()
}

/// Remove every placeholder token (`?u`, `?l`, `?d`, `?s`, `?b`) from `mask`, keeping its literal
/// characters.
///
/// ```
/// assert_eq!("", maskcat::strip_tokens("?u?l?d?s"));
/// assert_eq!("ello", maskcat::strip_tokens("?uello?d"));
/// ```
pub fn strip_tokens(mask: &str) -> String {
    let mut stripped = String::with_capacity(mask.len());
    let mut chars = mask.chars().peekable();
    while let Some(c) = chars.next() {
        if c == SENTINEL {
            if let Some(&next) = chars.peek() {
                if next == MULTIBYTE_FLAG || Class::from_flag(next).is_some() {
                    chars.next();
                    continue;
                }
            }
        }
        stripped.push(c);
    }
    stripped
}

//////////////////////////////////////////// multi-byte ////////////////////////////////////////////

/// The flag of the any-byte token emitted by [encode_multibyte].
pub const MULTIBYTE_FLAG: char = 'b';

/// Replace every non-ASCII code point with one `?b` token per byte of its UTF-8 encoding.
///
/// ```
/// assert_eq!("?u?l?b?b", maskcat::encode_multibyte("?u?lé"));
/// ```
pub fn encode_multibyte(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            encoded.push(c);
        } else {
            for _ in 0..c.len_utf8() {
                encoded.push(SENTINEL);
                encoded.push(MULTIBYTE_FLAG);
            }
        }
    }
    encoded
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
