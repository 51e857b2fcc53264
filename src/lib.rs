#![deny(missing_docs)]

//! maskcat: character-class masks for password-candidate research.
//!
//! maskcat turns literal text into masks, strings where each character of a requested class is
//! replaced by a two-character placeholder token, scores masks by their structure, and runs the
//! reverse direction: splicing tokens back into mask-shaped templates to synthesize new candidate
//! strings.
//!
//! # Core Concepts
//!
//! - **Class**: lower (`?l`), upper (`?u`), digit (`?d`), or special (`?s`)
//! - **ReplacementTable**: the classes a run masks; canonicalizes text into masks
//! - **Mask**: literal text with class characters replaced by placeholder tokens
//! - **substitute**: pattern-aligned substitution of a token into a subject shaped like it
//! - **TokenPool** and **Mutator**: the streaming mutation engine, which replays every chunk it has
//!   seen against every line that follows
//!
//! # Example
//!
//! ```
//! use maskcat::{complexity, entropy, substitute, ReplacementTable};
//!
//! let table = ReplacementTable::all();
//! let mask = table.canonicalize("Winter!24");
//! assert_eq!("?u?l?l?l?l?l?s?d?d", mask);
//! assert_eq!(4, complexity(&mask));
//! assert_eq!(209, entropy(&mask));
//! assert_eq!(
//!     Some("Summer!24".to_string()),
//!     substitute("Winter!24", &mask, "Summer", &table, 1),
//! );
//! ```

/// Line drivers for each mode of the command-line tool.
pub mod modes;

mod canonical;
mod chunk;
mod class;
mod errors;
mod mask;
mod mutate;
mod score;
mod substitute;

pub use canonical::{
    encode_multibyte, make_token, partial_canonicalize, strip_tokens, ReplacementTable,
    MULTIBYTE_FLAG,
};
pub use chunk::chunk;
pub use class::{Class, ClassSpec, SENTINEL};
pub use errors::{Error, MaskError};
pub use mask::{
    is_valid_mask, parse_mask, validate_mask, validate_multibyte_mask, MaskItem, MaskSet,
};
pub use mutate::{mutate_line, substitute_line, ChunkSize, Mutator, TokenPool};
pub use score::{complexity, entropy, MaskStats};
pub use substitute::substitute;
