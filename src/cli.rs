use std::num::NonZeroU32;

use clap::Parser;

use crate::config::OutputFormat;
use crate::error::{IpeError, Result};
use crate::string_table::DEFAULT_CAPACITY;

#[derive(Parser, Debug, Clone)]
#[command(name = "ipegen", about = "Generate synthetic info provenance entries")]
pub struct Args {
    /// First entry index (inclusive)
    #[arg(short = 's', long, default_value_t = 0)]
    pub start: u32,

    /// End of the entry index range (exclusive)
    #[arg(short = 'e', long)]
    pub end: u32,

    /// Starting capacity of each string table, in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Payload stored in every synthetic object
    #[arg(long, default_value_t = crate::provenance::DEFAULT_VALUE, allow_hyphen_values = true)]
    pub value: i64,

    /// Split the entries into linked nodes of at most N entries
    #[arg(long, value_name = "N")]
    pub chain: Option<NonZeroU32>,

    /// Write result to FILE instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<String>,

    /// Output format: text or raw
    #[arg(short = 'f', long, default_value = "text")]
    pub format: String,

    /// Annotate every entry's string offsets on stderr
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Parse the --format argument
    pub fn output_format(&self) -> Result<OutputFormat> {
        match self.format.as_str() {
            "text" => Ok(OutputFormat::Text),
            "raw" => Ok(OutputFormat::Raw),
            other => Err(IpeError::InvalidFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["ipegen", "--end", "3"]).unwrap();
        assert_eq!(args.start, 0);
        assert_eq!(args.end, 3);
        assert_eq!(args.capacity, 128);
        assert_eq!(args.value, 42);
        assert!(args.chain.is_none());
        assert_eq!(args.output_format().unwrap(), OutputFormat::Text);
    }

    #[test]
    fn test_negative_value() {
        let args = Args::try_parse_from(["ipegen", "-e", "1", "--value", "-7"]).unwrap();
        assert_eq!(args.value, -7);
    }

    #[test]
    fn test_zero_chain_rejected() {
        assert!(Args::try_parse_from(["ipegen", "-e", "1", "--chain", "0"]).is_err());
    }

    #[test]
    fn test_unknown_format() {
        let args = Args::try_parse_from(["ipegen", "-e", "1", "-f", "json"]).unwrap();
        assert!(matches!(args.output_format(), Err(IpeError::InvalidFormat(f)) if f == "json"));
    }
}
