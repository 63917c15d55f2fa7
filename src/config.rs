use std::num::NonZeroU32;

use crate::cli::Args;
use crate::error::{IpeError, Result};

/// How generated nodes are written out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One tab-separated line per entry with resolved strings
    Text,
    /// Raw string-table bytes of each node in chain order
    Raw,
}

/// Runtime configuration derived from CLI arguments
#[derive(Clone, Debug)]
pub struct Config {
    pub start: u32,
    pub end: u32,
    pub capacity: usize,
    pub value: i64,
    pub chunk: Option<NonZeroU32>,
    pub format: OutputFormat,
    pub debug: bool,
    pub output_file: Option<String>,
}

impl Config {
    /// Build configuration from parsed CLI arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        if args.start > args.end {
            return Err(IpeError::InvalidRange {
                start: args.start,
                end: args.end,
            });
        }

        Ok(Config {
            start: args.start,
            end: args.end,
            capacity: args.capacity,
            value: args.value,
            chunk: args.chain,
            format: args.output_format()?,
            debug: args.debug,
            output_file: args.output.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_args() {
        let args = Args::try_parse_from(["ipegen", "-s", "2", "-e", "9", "-f", "raw"]).unwrap();
        let config = Config::from_args(&args).unwrap();
        assert_eq!((config.start, config.end), (2, 9));
        assert_eq!(config.format, OutputFormat::Raw);
    }

    #[test]
    fn test_inverted_range() {
        let args = Args::try_parse_from(["ipegen", "-s", "5", "-e", "1"]).unwrap();
        assert!(matches!(
            Config::from_args(&args),
            Err(IpeError::InvalidRange { start: 5, end: 1 })
        ));
    }
}
