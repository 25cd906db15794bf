//! A header record within a delta file.

use std::num::ParseIntError;
use std::str::FromStr;
use std::sync::OnceLock;

use omics::coordinate::position::Number;
use regex::Regex;

/// The prefix for a header record.
pub const HEADER_PREFIX: char = '>';

/// The pattern for a header record.
const HEADER_PATTERN: &str = r"^>(\S+)\s+(\S+)\s+(\d+)\s+(\d+)";

/// Returns the compiled header pattern.
fn header_regex() -> &'static Regex {
    /// The compiled header pattern.
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // SAFETY: the pattern is a constant known to compile.
    REGEX.get_or_init(|| Regex::new(HEADER_PATTERN).unwrap())
}

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to the parsing of a header record.
#[derive(Debug)]
pub enum ParseError {
    /// The line does not match the header quadruple.
    InvalidFormat(String),

    /// An invalid reference length.
    InvalidReferenceLength(ParseIntError),

    /// An invalid query length.
    InvalidQueryLength(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidFormat(line) => write!(
                f,
                "expected `{}reference query referenceLength queryLength`, found `{}`",
                HEADER_PREFIX, line
            ),
            ParseError::InvalidReferenceLength(err) => {
                write!(f, "invalid reference length: {}", err)
            }
            ParseError::InvalidQueryLength(err) => write!(f, "invalid query length: {}", err),
        }
    }
}

impl std::error::Error for ParseError {}

////////////////////////////////////////////////////////////////////////////////////////
// Header
////////////////////////////////////////////////////////////////////////////////////////

/// A header record within a delta file.
///
/// Introduces the `(reference, query)` sequence pair to which all subsequent
/// alignment blocks belong, up until the next header.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Header {
    /// The reference sequence name.
    reference_name: String,

    /// The query sequence name.
    query_name: String,

    /// The total length of the reference sequence.
    reference_length: Number,

    /// The total length of the query sequence.
    query_length: Number,
}

impl Header {
    /// Returns the reference sequence name.
    ///
    /// # Examples
    ///
    /// ```
    /// use paffile::delta::header::Header;
    ///
    /// let header = ">r1 q1 100 80".parse::<Header>()?;
    /// assert_eq!(header.reference_name(), "r1");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn reference_name(&self) -> &str {
        &self.reference_name
    }

    /// Returns the query sequence name.
    pub fn query_name(&self) -> &str {
        &self.query_name
    }

    /// Returns the total length of the reference sequence.
    pub fn reference_length(&self) -> Number {
        self.reference_length
    }

    /// Returns the total length of the query sequence.
    pub fn query_length(&self) -> Number {
        self.query_length
    }
}

impl FromStr for Header {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = header_regex()
            .captures(s)
            .ok_or_else(|| ParseError::InvalidFormat(s.into()))?;

        Ok(Self {
            reference_name: captures[1].into(),
            query_name: captures[2].into(),
            reference_length: captures[3]
                .parse()
                .map_err(ParseError::InvalidReferenceLength)?,
            query_length: captures[4].parse().map_err(ParseError::InvalidQueryLength)?,
        })
    }
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} {} {} {}",
            HEADER_PREFIX,
            self.reference_name,
            self.query_name,
            self.reference_length,
            self.query_length
        )
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_valid_header() -> Result<(), Box<dyn std::error::Error>> {
        let header = ">r1 q1 100 80".parse::<Header>()?;

        assert_eq!(header.reference_name(), "r1");
        assert_eq!(header.query_name(), "q1");
        assert_eq!(header.reference_length(), 100);
        assert_eq!(header.query_length(), 80);

        Ok(())
    }

    #[test]
    fn test_invalid_header() {
        let err = ">r1 q1".parse::<Header>().unwrap_err();

        assert_eq!(
            err.to_string(),
            "expected `>reference query referenceLength queryLength`, found `>r1 q1`"
        );
    }

    #[test]
    fn test_header_display() -> Result<(), Box<dyn std::error::Error>> {
        let header = ">r1 q1 100 80".parse::<Header>()?;
        assert_eq!(header.to_string(), ">r1 q1 100 80");
        Ok(())
    }
}
