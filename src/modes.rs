//! Line drivers for each mode of the `maskcat` command.
//!
//! Every driver reads its input one line at a time and writes everything a line produces before
//! it reads the next one.  `sub` and `mutate` also flush after every line, so candidates reach a
//! downstream consumer while input is still arriving.

use std::io::{BufRead, Write};

use crate::{
    encode_multibyte, make_token, partial_canonicalize, strip_tokens, ChunkSize, ClassSpec, Error,
    MaskSet, MaskStats, Mutator, ReplacementTable, TokenPool,
};

////////////////////////////////////////////// Format //////////////////////////////////////////////

/// How mask records are written.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Format {
    /// `mask` or, when verbose, `mask:length:complexity:entropy`.
    #[default]
    Text,
    /// One JSON object per line carrying the mask and its scores.
    Json,
}

impl Format {
    /// Parse a format name from the command line.
    pub fn parse(format: &str) -> Result<Self, Error> {
        match format {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            _ => Err(Error::InvalidFormat {
                format: format.to_string(),
            }),
        }
    }
}

//////////////////////////////////////////// MaskOptions ///////////////////////////////////////////

/// Options for [masks].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct MaskOptions {
    /// Append the length and scores to every mask.
    pub verbose: bool,
    /// Run the multi-byte pass over every mask.
    pub multibyte: bool,
    /// The output format.
    pub format: Format,
}

//////////////////////////////////////////// TokenLength ///////////////////////////////////////////

/// The token length `tokens` filters on.  Lengths of [TokenLength::ANY] or more let every token
/// through.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TokenLength(usize);

impl TokenLength {
    /// The smallest length that disables the filter.
    pub const ANY: usize = 98;

    /// A filter for tokens of exactly `length` characters.
    pub const fn new(length: usize) -> Self {
        Self(length)
    }

    /// Parse a token length from the command line.
    pub fn parse(value: &str) -> Result<Self, Error> {
        value
            .parse::<usize>()
            .map(Self)
            .map_err(|_| Error::InvalidTokenLength {
                value: value.to_string(),
            })
    }

    /// True iff a token of `length` characters passes the filter.
    pub fn accepts(self, length: usize) -> bool {
        self.0 >= Self::ANY || self.0 == length
    }
}

////////////////////////////////////////////// drivers /////////////////////////////////////////////

/// Write the full mask of every input line.
pub fn masks<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    options: &MaskOptions,
) -> Result<(), Error> {
    let table = ReplacementTable::all();
    for line in input.lines() {
        let line = line?;
        let mut mask = table.canonicalize(&line);
        if options.multibyte {
            mask = encode_multibyte(&mask);
        }
        match options.format {
            Format::Text if options.verbose => {
                writeln!(output, "{}", MaskStats::new(&line, mask))?;
            }
            Format::Text => writeln!(output, "{mask}")?,
            Format::Json => {
                let stats = MaskStats::new(&line, mask);
                writeln!(output, "{}", serde_json::to_string(&stats)?)?;
            }
        }
    }
    output.flush()?;
    Ok(())
}

/// Write every input line whose full mask is one of `masks`.
pub fn matches<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    masks: &MaskSet,
    multibyte: bool,
) -> Result<(), Error> {
    let table = ReplacementTable::all();
    let mut matched = 0usize;
    for line in input.lines() {
        let line = line?;
        let mut mask = table.canonicalize(&line);
        if multibyte {
            mask = encode_multibyte(&mask);
        }
        if masks.contains(&mask) {
            matched += 1;
            writeln!(output, "{line}")?;
        }
    }
    log::debug!("{matched} lines matched {} masks", masks.len());
    output.flush()?;
    Ok(())
}

/// Substitute every token in `tokens` into every input line.
pub fn substitutions<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    tokens: &TokenPool,
    max_replacements: usize,
) -> Result<(), Error> {
    let table = ReplacementTable::all();
    for line in input.lines() {
        let line = line?;
        for candidate in crate::substitute_line(tokens, &table, &line, max_replacements) {
            writeln!(output, "{candidate}")?;
        }
        output.flush()?;
    }
    Ok(())
}

/// Run a streaming mutation over the input.
pub fn mutations<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    chunk_size: ChunkSize,
    max_replacements: usize,
) -> Result<(), Error> {
    let mut mutator = Mutator::new(ReplacementTable::all(), chunk_size, max_replacements);
    for line in input.lines() {
        let line = line?;
        for candidate in mutator.process(&line) {
            writeln!(output, "{candidate}")?;
        }
        output.flush()?;
    }
    log::debug!("mutation pool ended with {} tokens", mutator.pool().len());
    Ok(())
}

/// Write the alpha-only token of every input line that passes the length filter.
pub fn tokens<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    length: TokenLength,
) -> Result<(), Error> {
    for line in input.lines() {
        let token = make_token(&line?);
        if token.is_empty() || !length.accepts(token.len()) {
            continue;
        }
        writeln!(output, "{token}")?;
    }
    output.flush()?;
    Ok(())
}

/// Write the partial mask of every input line.
pub fn partials<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    spec: &ClassSpec,
) -> Result<(), Error> {
    for line in input.lines() {
        let mut partial = partial_canonicalize(&line?, spec);
        if spec.multibyte() {
            partial = encode_multibyte(&partial);
        }
        writeln!(output, "{partial}")?;
    }
    output.flush()?;
    Ok(())
}

/// Write every input line with the characters of the requested classes removed.
pub fn removals<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    spec: &ClassSpec,
) -> Result<(), Error> {
    let table = ReplacementTable::new(*spec);
    for line in input.lines() {
        let mut partial = table.canonicalize(&line?);
        if spec.multibyte() {
            partial = encode_multibyte(&partial);
        }
        writeln!(output, "{}", strip_tokens(&partial))?;
    }
    output.flush()?;
    Ok(())
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io::{BufReader, Read};
    use std::rc::Rc;

    use super::*;

    fn run<F>(input: &str, f: F) -> String
    where
        F: FnOnce(&[u8], &mut Vec<u8>) -> Result<(), Error>,
    {
        let mut output = vec![];
        f(input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn masks_plain() {
        let out = run("Hello, World1!\npass\n", |i, o| {
            masks(i, o, &MaskOptions::default())
        });
        assert_eq!("?u?l?l?l?l?s?s?u?l?l?l?l?d?s\n?l?l?l?l\n", out);
    }

    #[test]
    fn masks_verbose() {
        let options = MaskOptions {
            verbose: true,
            ..MaskOptions::default()
        };
        let out = run("Hello1\n\n", |i, o| masks(i, o, &options));
        assert_eq!("?u?l?l?l?l?d:6:3:140\n:0:0:0\n", out);
    }

    #[test]
    fn masks_multibyte() {
        let options = MaskOptions {
            multibyte: true,
            ..MaskOptions::default()
        };
        let out = run("Ré1\n", |i, o| masks(i, o, &options));
        assert_eq!("?u?b?b?d\n", out);
    }

    #[test]
    fn masks_json() {
        let options = MaskOptions {
            format: Format::Json,
            ..MaskOptions::default()
        };
        let out = run("ab1\n", |i, o| masks(i, o, &options));
        assert_eq!(
            "{\"mask\":\"?l?l?d\",\"length\":3,\"complexity\":2,\"entropy\":62}\n",
            out
        );
    }

    #[test]
    fn format_parse() {
        assert_eq!(Format::Text, Format::parse("text").unwrap());
        assert_eq!(Format::Json, Format::parse("json").unwrap());
        assert!(Format::parse("csv").is_err());
    }

    #[test]
    fn matches_full_masks_only() {
        let set = MaskSet::from_reader("?l?l?l?l?d\n?u?x\n?d?d?d\n".as_bytes(), false).unwrap();
        let out = run("pass1\nPass1\n123\n1234\nword9\n", |i, o| {
            matches(i, o, &set, false)
        });
        assert_eq!("pass1\n123\nword9\n", out);
    }

    #[test]
    fn matches_multibyte_lines() {
        let set = MaskSet::from_reader("?u?b?b?d\n?l?l\n".as_bytes(), true).unwrap();
        let input = "Ré1\nab\nRe1\n";
        let out = run(input, |i, o| matches(i, o, &set, true));
        assert_eq!("Ré1\nab\n", out);
        let out = run(input, |i, o| matches(i, o, &set, false));
        assert_eq!("ab\n", out);
    }

    /// Hands out one line per read and notes what the sink had flushed at each request.
    struct Feed {
        lines: VecDeque<String>,
        flushed: Rc<RefCell<Vec<u8>>>,
        observed: Rc<RefCell<Vec<String>>>,
    }

    impl Read for Feed {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let flushed = String::from_utf8_lossy(&self.flushed.borrow()).into_owned();
            self.observed.borrow_mut().push(flushed);
            match self.lines.pop_front() {
                Some(line) => {
                    buf[..line.len()].copy_from_slice(line.as_bytes());
                    Ok(line.len())
                }
                None => Ok(0),
            }
        }
    }

    struct Sink {
        pending: Vec<u8>,
        flushed: Rc<RefCell<Vec<u8>>>,
    }

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.pending.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed.borrow_mut().append(&mut self.pending);
            Ok(())
        }
    }

    /// What had been flushed each time the driver asked for more input.
    fn flushed_at_each_read<F>(input: &[&str], f: F) -> Vec<String>
    where
        F: FnOnce(BufReader<Feed>, Sink) -> Result<(), Error>,
    {
        let flushed = Rc::new(RefCell::new(vec![]));
        let observed = Rc::new(RefCell::new(vec![]));
        let feed = Feed {
            lines: input.iter().map(|line| line.to_string()).collect(),
            flushed: Rc::clone(&flushed),
            observed: Rc::clone(&observed),
        };
        let sink = Sink {
            pending: vec![],
            flushed,
        };
        f(BufReader::new(feed), sink).unwrap();
        let observed = observed.borrow().clone();
        observed
    }

    #[test]
    fn substitutions_flush_every_line() {
        let tokens = TokenPool::from_reader("dog\nfish\n".as_bytes()).unwrap();
        let observed = flushed_at_each_read(&["cat123\n", "bird!\n"], |i, o| {
            substitutions(i, o, &tokens, 1)
        });
        assert_eq!(
            vec!["", "dog123\n", "dog123\ndogd!\nfish!\n"],
            observed
        );
    }

    #[test]
    fn mutations_flush_every_line() {
        let observed = flushed_at_each_read(&["abc123\n", "xyz!\n"], |i, o| {
            mutations(i, o, ChunkSize::new(3).unwrap(), 1)
        });
        assert_eq!(
            vec![
                "",
                "abc123\nabc123\n",
                "abc123\nabc123\nabc!\nxyz!\n"
            ],
            observed
        );
    }

    #[test]
    fn substitutions_from_token_file() {
        let tokens = TokenPool::from_reader("dog\nfish\n\ndog\n".as_bytes()).unwrap();
        let out = run("cat123\nbird!\n", |i, o| substitutions(i, o, &tokens, 1));
        // "dog" fits the first three letters of "bird!" as well.
        assert_eq!("dog123\ndogd!\nfish!\n", out);
    }

    #[test]
    fn mutations_keep_line_order() {
        let out = run("abc123\nxyz!\n", |i, o| {
            mutations(i, o, ChunkSize::new(3).unwrap(), 1)
        });
        assert_eq!("abc123\nabc123\nabc!\nxyz!\n", out);
    }

    #[test]
    fn tokens_filter_on_length() {
        let input = "Hello, World1!\nabc123\n1234\nxyz\n";
        let out = run(input, |i, o| tokens(i, o, TokenLength::new(3)));
        assert_eq!("abc\nxyz\n", out);
        let out = run(input, |i, o| tokens(i, o, TokenLength::new(99)));
        assert_eq!("HelloWorld\nabc\nxyz\n", out);
        let out = run(input, |i, o| tokens(i, o, TokenLength::new(0)));
        assert_eq!("", out);
    }

    #[test]
    fn token_length_parse() {
        assert_eq!(TokenLength::new(8), TokenLength::parse("8").unwrap());
        assert!(TokenLength::parse("eight").is_err());
        assert!(TokenLength::new(98).accepts(3));
        assert!(!TokenLength::new(97).accepts(3));
    }

    #[test]
    fn partials_by_spec() {
        let input = "Hello, World1!\n";
        let out = run(input, |i, o| partials(i, o, &ClassSpec::parse("ud").unwrap()));
        assert_eq!("?uello, ?uorld?d!\n", out);
        let out = run(input, |i, o| partials(i, o, &ClassSpec::parse("s").unwrap()));
        assert_eq!("Hello?s?sWorld1?s\n", out);
        let out = run(input, |i, o| partials(i, o, &ClassSpec::parse("us").unwrap()));
        assert_eq!("\n", out);
        let out = run("Hé\n", |i, o| partials(i, o, &ClassSpec::parse("ub").unwrap()));
        assert_eq!("?u?b?b\n", out);
    }

    #[test]
    fn removals_by_spec() {
        let input = "Hello, World1!\n";
        let out = run(input, |i, o| removals(i, o, &ClassSpec::parse("d").unwrap()));
        assert_eq!("Hello, World!\n", out);
        let out = run(input, |i, o| removals(i, o, &ClassSpec::parse("ds").unwrap()));
        assert_eq!("HelloWorld\n", out);
        let out = run(input, |i, o| removals(i, o, &ClassSpec::parse("ulds").unwrap()));
        assert_eq!("\n", out);
        let out = run("aé1\n", |i, o| removals(i, o, &ClassSpec::parse("lb").unwrap()));
        assert_eq!("1\n", out);
    }
}
