//! A line within a PAF file.

use std::str::FromStr;

use crate::record;
use crate::record::Record;

/// An error associated with parsing a line of a PAF file.
#[derive(Debug)]
pub enum ParseError {
    /// An invalid record.
    InvalidRecord(record::ParseError, String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidRecord(err, line) => {
                write!(f, "invalid record: {}\n\nline: {}", err, line)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A line within a PAF file.
///
/// PAF files carry no header line: every non-empty line is a record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Line {
    /// An empty line.
    Empty,

    /// A record line.
    Record(Record),
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::Empty => write!(f, ""),
            Line::Record(record) => write!(f, "{}", record),
        }
    }
}

impl FromStr for Line {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            Ok(Self::Empty)
        } else {
            s.parse::<Record>()
                .map(Line::Record)
                .map_err(|e| ParseError::InvalidRecord(e, s.into()))
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn test_valid_record_line() -> Result<(), Box<dyn std::error::Error>> {
        let line = "q1\t100\t10\t50\t+\tr1\t200\t0\t40\t35\t40\t60".parse::<Line>()?;
        assert!(matches!(line, Line::Record(_)));
        Ok(())
    }

    #[test]
    pub fn test_empty_line() -> Result<(), Box<dyn std::error::Error>> {
        let line = "".parse::<Line>()?;
        assert_eq!(line, Line::Empty);
        Ok(())
    }

    #[test]
    pub fn test_invalid_record_line() {
        let err = "q1\t100\t10".parse::<Line>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid record: invalid number of fields in record: expected at least 12 fields, \
             found 3 fields\n\nline: q1\t100\t10"
        );
    }
}
