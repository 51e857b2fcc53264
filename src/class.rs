use std::fmt;

use crate::Error;

/// The sentinel that opens every placeholder token.
pub const SENTINEL: char = '?';

////////////////////////////////////////////// Class ///////////////////////////////////////////////

/// One of the four character classes a mask position can stand for.
///
/// Membership is ASCII-only.  Anything outside these ranges belongs to no class and passes through
/// canonicalization untouched.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Class {
    /// `a` through `z`.
    Lower,
    /// `A` through `Z`.
    Upper,
    /// `0` through `9`.
    Digit,
    /// Space and the 32 ASCII punctuation characters.
    Special,
}

impl Class {
    /// Every class, in the order tokens are scored.
    pub const ALL: [Class; 4] = [Class::Upper, Class::Lower, Class::Digit, Class::Special];

    /// The number of literal characters this class covers.
    pub const fn cardinality(self) -> usize {
        match self {
            Class::Lower => 26,
            Class::Upper => 26,
            Class::Digit => 10,
            Class::Special => 33,
        }
    }

    /// The two-character placeholder token for this class.
    pub const fn token(self) -> &'static str {
        match self {
            Class::Lower => "?l",
            Class::Upper => "?u",
            Class::Digit => "?d",
            Class::Special => "?s",
        }
    }

    /// The character that follows the sentinel in this class's token.
    pub const fn flag(self) -> char {
        match self {
            Class::Lower => 'l',
            Class::Upper => 'u',
            Class::Digit => 'd',
            Class::Special => 's',
        }
    }

    /// The class named by a token flag, if any.
    pub const fn from_flag(flag: char) -> Option<Class> {
        match flag {
            'l' => Some(Class::Lower),
            'u' => Some(Class::Upper),
            'd' => Some(Class::Digit),
            's' => Some(Class::Special),
            _ => None,
        }
    }

    /// True iff `c` is a member of this class.
    pub fn contains(self, c: char) -> bool {
        match self {
            Class::Lower => c.is_ascii_lowercase(),
            Class::Upper => c.is_ascii_uppercase(),
            Class::Digit => c.is_ascii_digit(),
            Class::Special => c == ' ' || c.is_ascii_punctuation(),
        }
    }

    /// The class `c` belongs to, or `None` for characters outside every class.
    ///
    /// ```
    /// use maskcat::Class;
    ///
    /// assert_eq!(Some(Class::Upper), Class::classify('H'));
    /// assert_eq!(Some(Class::Special), Class::classify('?'));
    /// assert_eq!(None, Class::classify('é'));
    /// ```
    pub fn classify(c: char) -> Option<Class> {
        Class::ALL.into_iter().find(|class| class.contains(c))
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

//////////////////////////////////////////// ClassSpec /////////////////////////////////////////////

/// A requested subset of classes, written on the command line as a string like `"ulds"` or `"ud"`.
///
/// The additional flag `b` asks for the multi-byte pass over the result; it selects no class.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ClassSpec {
    lower: bool,
    upper: bool,
    digit: bool,
    special: bool,
    multibyte: bool,
}

impl ClassSpec {
    /// The flags a spec may contain.
    pub const FLAGS: &'static str = "uldsb";

    /// All four classes, no multi-byte pass.
    pub const fn all() -> Self {
        Self {
            lower: true,
            upper: true,
            digit: true,
            special: true,
            multibyte: false,
        }
    }

    /// Parse a spec strictly.  Order and repetition do not matter; any character that is not one
    /// of `u`, `l`, `d`, `s`, `b` is an error.
    ///
    /// ```
    /// use maskcat::{Class, ClassSpec};
    ///
    /// let spec = ClassSpec::parse("dud").unwrap();
    /// assert!(spec.contains(Class::Upper));
    /// assert!(!spec.contains(Class::Lower));
    /// assert!(ClassSpec::parse("ulx").is_err());
    /// ```
    pub fn parse(spec: &str) -> Result<Self, Error> {
        if let Some(invalid) = spec.chars().find(|c| !Self::FLAGS.contains(*c)) {
            return Err(Error::InvalidClassSpec {
                spec: spec.to_string(),
                invalid,
            });
        }
        Ok(Self::lenient(spec))
    }

    /// Build a spec from whatever recognized flags `spec` contains, ignoring everything else.
    pub fn lenient(spec: &str) -> Self {
        let mut this = Self::default();
        for c in spec.chars() {
            match c {
                'l' => this.lower = true,
                'u' => this.upper = true,
                'd' => this.digit = true,
                's' => this.special = true,
                'b' => this.multibyte = true,
                _ => {}
            }
        }
        this
    }

    /// True iff `class` was requested.
    pub fn contains(&self, class: Class) -> bool {
        match class {
            Class::Lower => self.lower,
            Class::Upper => self.upper,
            Class::Digit => self.digit,
            Class::Special => self.special,
        }
    }

    /// True iff the multi-byte pass was requested.
    pub fn multibyte(&self) -> bool {
        self.multibyte
    }

    /// True iff no class was requested.
    pub fn is_empty(&self) -> bool {
        !(self.lower || self.upper || self.digit || self.special)
    }

    /// The requested classes.
    pub fn classes(&self) -> impl Iterator<Item = Class> + '_ {
        Class::ALL.into_iter().filter(|class| self.contains(*class))
    }

    /// True iff the special class is requested together with any identifiable class.
    pub fn mixes_special(&self) -> bool {
        self.special && (self.upper || self.lower || self.digit)
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
