//! Token pools and the streaming mutation engine.
//!
//! A mutation run chunks every input line, adds the full-length chunks to a pool, and replays the
//! whole pool against the line.  The pool only ever grows:  memory use is proportional to the
//! number of distinct chunks in the input, and nothing bounds it.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::NonZeroUsize;

use utf8path::Path;

use crate::{chunk, substitute, Error, ReplacementTable};

///////////////////////////////////////////// TokenPool ////////////////////////////////////////////

/// A set of literal tokens, unique by value.
///
/// Iteration order is sorted, which keeps output reproducible; nothing depends on it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TokenPool {
    tokens: BTreeSet<String>,
}

impl TokenPool {
    /// An empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the tokens in the file at `path`.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let file = File::open(path.as_str()).map_err(|err| Error::file(path.as_str(), err))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load newline-delimited tokens from `reader`.  Blank lines are skipped and duplicates
    /// collapse.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut pool = Self::new();
        for line in reader.lines() {
            let line = line?;
            if !line.is_empty() {
                pool.insert(line);
            }
        }
        log::debug!("loaded {} tokens", pool.len());
        Ok(pool)
    }

    /// Add `token`.  Returns false if it was already present.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        self.tokens.insert(token.into())
    }

    /// True iff `token` is in the pool.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// The number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True iff the pool holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The tokens in the pool.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl<S: Into<String>> Extend<S> for TokenPool {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for token in iter {
            self.insert(token);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for TokenPool {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut pool = Self::new();
        pool.extend(iter);
        pool
    }
}

///////////////////////////////////////////// ChunkSize ////////////////////////////////////////////

/// The length, in code points, of the chunks a mutation run extracts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChunkSize(NonZeroUsize);

impl ChunkSize {
    /// A chunk size of `size`, if `size` is positive.
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    /// Parse a chunk size from the command line.
    ///
    /// ```
    /// use maskcat::ChunkSize;
    ///
    /// assert_eq!(4, ChunkSize::parse("4").unwrap().get());
    /// assert!(ChunkSize::parse("0").is_err());
    /// assert!(ChunkSize::parse("four").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, Error> {
        value
            .parse::<usize>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| Error::InvalidChunkSize {
                value: value.to_string(),
            })
    }

    /// The size as a plain integer.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

//////////////////////////////////////////// operations ////////////////////////////////////////////

/// Substitute every token in `pool` into `line`, returning each result.
pub fn substitute_line(
    pool: &TokenPool,
    table: &ReplacementTable,
    line: &str,
    max_replacements: usize,
) -> Vec<String> {
    let mask = table.canonicalize(line);
    pool.iter()
        .filter_map(|token| substitute(line, &mask, token, table, max_replacements))
        .collect()
}

/// One step of a mutation run:  add `line`'s full-length chunks to `pool`, then substitute every
/// token in the pool, including the ones just added, into `line`.
///
/// ```
/// use maskcat::{mutate_line, ChunkSize, ReplacementTable, TokenPool};
///
/// let mut pool = TokenPool::new();
/// let table = ReplacementTable::all();
/// let size = ChunkSize::new(3).unwrap();
/// // A line's own chunks reproduce the line.
/// let first = mutate_line(&mut pool, &table, size, "abc123", 1);
/// assert_eq!(vec!["abc123", "abc123"], first);
/// // Later lines see every chunk extracted so far.
/// let second = mutate_line(&mut pool, &table, size, "def456", 1);
/// assert!(second.contains(&"abc456".to_string()));
/// assert!(second.contains(&"def123".to_string()));
/// ```
pub fn mutate_line(
    pool: &mut TokenPool,
    table: &ReplacementTable,
    chunk_size: ChunkSize,
    line: &str,
    max_replacements: usize,
) -> Vec<String> {
    let before = pool.len();
    pool.extend(
        chunk(line, chunk_size.get())
            .into_iter()
            .filter(|c| c.chars().count() == chunk_size.get()),
    );
    if pool.len() > before {
        log::debug!("token pool grew to {} tokens", pool.len());
    }
    substitute_line(pool, table, line, max_replacements)
}

////////////////////////////////////////////// Mutator /////////////////////////////////////////////

/// The state of one mutation run.
#[derive(Clone, Debug)]
pub struct Mutator {
    pool: TokenPool,
    table: ReplacementTable,
    chunk_size: ChunkSize,
    max_replacements: usize,
}

impl Mutator {
    /// Start a run with an empty pool.
    pub fn new(table: ReplacementTable, chunk_size: ChunkSize, max_replacements: usize) -> Self {
        Self {
            pool: TokenPool::new(),
            table,
            chunk_size,
            max_replacements,
        }
    }

    /// Process the next input line, returning the candidates it produces.
    pub fn process(&mut self, line: &str) -> Vec<String> {
        mutate_line(
            &mut self.pool,
            &self.table,
            self.chunk_size,
            line,
            self.max_replacements,
        )
    }

    /// The tokens seen so far.
    pub fn pool(&self) -> &TokenPool {
        &self.pool
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
