//! Output format versions.

use std::fmt;
use std::str::FromStr;

use crate::error::OutputError;

/// Column layout of the particle file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `pid tau x y etas pT phi eta M weight`.
    #[default]
    Compact,
    /// Compact columns followed by `Q0 col acol E px py pz`.
    Extended,
}

impl OutputFormat {
    /// Version tag written in the file header.
    pub fn tag(self) -> u8 {
        match self {
            Self::Compact => 1,
            Self::Extended => 2,
        }
    }

    /// Column names, in order.
    pub fn columns(self) -> &'static [&'static str] {
        const COMPACT: &[&str] = &["pid", "tau", "x", "y", "etas", "pT", "phi", "eta", "M", "weight"];
        const EXTENDED: &[&str] = &[
            "pid", "tau", "x", "y", "etas", "pT", "phi", "eta", "M", "weight", "Q0", "col", "acol",
            "E", "px", "py", "pz",
        ];
        match self {
            Self::Compact => COMPACT,
            Self::Extended => EXTENDED,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compact => f.write_str("compact"),
            Self::Extended => f.write_str("extended"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" | "1" => Ok(Self::Compact),
            "extended" | "2" => Ok(Self::Extended),
            _ => Err(OutputError::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_extends_compact() {
        let compact = OutputFormat::Compact.columns();
        let extended = OutputFormat::Extended.columns();
        assert_eq!(&extended[..compact.len()], compact);
        assert_eq!(extended.len(), compact.len() + 7);
    }

    #[test]
    fn parses_names_and_tags() {
        assert_eq!("Extended".parse::<OutputFormat>().unwrap(), OutputFormat::Extended);
        assert_eq!("1".parse::<OutputFormat>().unwrap(), OutputFormat::Compact);
        match "binary".parse::<OutputFormat>() {
            Err(OutputError::UnknownFormat { name }) => assert_eq!(name, "binary"),
            other => panic!("expected UnknownFormat, got {other:?}"),
        }
    }
}
