//! A line within a delta file.

use std::str::FromStr;

use crate::delta::block;
use crate::delta::block::Block;
use crate::delta::header;
use crate::delta::header::HEADER_PREFIX;
use crate::delta::header::Header;

/// An error associated with parsing a line of a delta file.
#[derive(Debug)]
pub enum ParseError {
    /// An invalid header record.
    InvalidHeader(header::ParseError, String),

    /// An invalid alignment-block record.
    InvalidBlock(block::ParseError, String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidHeader(err, line) => {
                write!(f, "invalid header record: {}\n\nline: {}", err, line)
            }
            ParseError::InvalidBlock(err, line) => {
                write!(f, "invalid alignment block: {}\n\nline: {}", err, line)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A line within a delta file.
///
/// Lines are classified by shape. Lines that match none of the recognized
/// shapes (such as the aligner preamble) are classified as [`Line::Other`]
/// and are ignored by the converter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Line {
    /// An empty line.
    Empty,

    /// A header record introducing a `(reference, query)` sequence pair.
    Header(Header),

    /// A record opening a new alignment block.
    Block(Block),

    /// A signed gap indicator within an alignment block.
    Gap(i64),

    /// Any other line.
    Other,
}

impl FromStr for Line {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::Empty);
        }

        if s.starts_with(HEADER_PREFIX) {
            return s
                .parse::<Header>()
                .map(Line::Header)
                .map_err(|e| ParseError::InvalidHeader(e, s.into()));
        }

        let tokens = s.split_whitespace().collect::<Vec<_>>();

        match tokens.len() {
            block::NUM_BLOCK_FIELDS => s
                .parse::<Block>()
                .map(Line::Block)
                .map_err(|e| ParseError::InvalidBlock(e, s.into())),
            1 => match tokens[0].parse::<i64>() {
                Ok(d) => Ok(Self::Gap(d)),
                Err(_) => Ok(Self::Other),
            },
            _ => Ok(Self::Other),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn test_header_line() -> Result<(), Box<dyn std::error::Error>> {
        let line = ">r1 q1 100 80".parse::<Line>()?;
        assert!(matches!(line, Line::Header(_)));
        Ok(())
    }

    #[test]
    pub fn test_block_line() -> Result<(), Box<dyn std::error::Error>> {
        let line = "1 10 1 9 2 2 0".parse::<Line>()?;
        assert!(matches!(line, Line::Block(_)));
        Ok(())
    }

    #[test]
    pub fn test_gap_lines() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("3".parse::<Line>()?, Line::Gap(3));
        assert_eq!("-2".parse::<Line>()?, Line::Gap(-2));
        assert_eq!("0".parse::<Line>()?, Line::Gap(0));
        Ok(())
    }

    #[test]
    pub fn test_preamble_lines_are_other() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("NUCMER".parse::<Line>()?, Line::Other);
        assert_eq!("/data/ref.fa /data/qry.fa".parse::<Line>()?, Line::Other);
        Ok(())
    }

    #[test]
    pub fn test_invalid_header_line() {
        let err = ">r1 q1".parse::<Line>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidHeader(..)));
    }

    #[test]
    pub fn test_invalid_block_line() {
        let err = "1 ? 1 9 2 2 0".parse::<Line>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidBlock(..)));
    }
}
