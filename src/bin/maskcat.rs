//! Create, match, and recombine character-class masks.
//!
//! Reads text on stdin and writes results on stdout, one mode per invocation.

use std::io::{self, BufWriter};

use arrrg::CommandLine;
use utf8path::Path;

use maskcat::modes::{self, Format, MaskOptions, TokenLength};
use maskcat::{ChunkSize, ClassSpec, Error, MaskSet, TokenPool};

const USAGE: &str = "USAGE: maskcat MODE [ARG] [OPTIONS]

Modes:
  mask                 Creates masks from text
  match MASK-FILE      Matches text to masks
  sub TOKEN-FILE       Replaces text with tokens from a file that share its mask
  mutate CHUNK-SIZE    Mutates text by chunking it and swapping the chunks between lines
  tokens TOKEN-LEN     Extracts alpha-only tokens by length (98 and up allow all)
  partial MASK-CHARS   Partially replaces characters with mask characters
  remove MASK-CHARS    Removes characters that match the given mask characters

--multibyte applies to mask and match only; partial and remove take the b mask character.";

#[derive(Clone, Default, Debug, Eq, PartialEq, arrrg_derive::CommandLine)]
struct Args {
    #[arrrg(flag, "Show length, complexity, and entropy of each mask")]
    verbose: bool,
    #[arrrg(flag, "Encode multi-byte characters as ?b in masks")]
    multibyte: bool,
    #[arrrg(optional, "Maximum number of replacements per candidate (default: 1)")]
    replacements: Option<usize>,
    #[arrrg(optional, "Output format for masks (text, json)")]
    format: Option<String>,
}

fn main() {
    let (args, free) = Args::from_command_line_relaxed(USAGE);
    init_logging();
    if let Err(err) = run(&args, &free) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    builder.format_timestamp(None);
    let _ = builder.try_init();
}

/// The mode's positional argument.
fn argument<'a>(free: &'a [String], name: &str, usage: &str) -> Result<&'a str, Error> {
    free.get(1)
        .map(String::as_str)
        .ok_or_else(|| Error::missing_argument(name, usage))
}

fn run(args: &Args, free: &[String]) -> Result<(), Error> {
    let Some(mode) = free.first() else {
        return Err(Error::missing_argument("MODE", "maskcat MODE [ARG] [OPTIONS]"));
    };
    let max_replacements = match args.replacements {
        Some(0) => return Err(Error::InvalidReplacementCount { value: 0 }),
        Some(n) => n,
        None => 1,
    };
    let format = args
        .format
        .as_deref()
        .map(Format::parse)
        .transpose()?
        .unwrap_or_default();
    if args.multibyte && !matches!(mode.as_str(), "mask" | "match") {
        log::warn!("--multibyte only applies to mask and match; use the b mask character for partial and remove");
    }
    let input = io::stdin().lock();
    let output = BufWriter::new(io::stdout().lock());
    match mode.as_str() {
        "mask" => {
            let options = MaskOptions {
                verbose: args.verbose,
                multibyte: args.multibyte,
                format,
            };
            modes::masks(input, output, &options)
        }
        "match" => {
            let path = Path::new(argument(free, "MASK-FILE", "maskcat match MASK-FILE")?);
            let masks = MaskSet::open(&path, args.multibyte)?;
            if masks.skipped() > 0 {
                log::warn!("skipped {} malformed masks in {}", masks.skipped(), path.as_str());
            }
            modes::matches(input, output, &masks, args.multibyte)
        }
        "sub" => {
            let path = Path::new(argument(free, "TOKEN-FILE", "maskcat sub TOKEN-FILE")?);
            let tokens = TokenPool::open(&path)?;
            modes::substitutions(input, output, &tokens, max_replacements)
        }
        "mutate" => {
            let chunk_size =
                ChunkSize::parse(argument(free, "CHUNK-SIZE", "maskcat mutate CHUNK-SIZE")?)?;
            modes::mutations(input, output, chunk_size, max_replacements)
        }
        "tokens" => {
            let length =
                TokenLength::parse(argument(free, "TOKEN-LEN", "maskcat tokens TOKEN-LEN")?)?;
            modes::tokens(input, output, length)
        }
        "partial" => {
            let spec =
                ClassSpec::parse(argument(free, "MASK-CHARS", "maskcat partial MASK-CHARS")?)?;
            modes::partials(input, output, &spec)
        }
        "remove" => {
            let spec =
                ClassSpec::parse(argument(free, "MASK-CHARS", "maskcat remove MASK-CHARS")?)?;
            modes::removals(input, output, &spec)
        }
        _ => Err(Error::UnknownMode { mode: mode.clone() }),
    }
}
