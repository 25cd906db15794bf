//! An alignment-block record within a delta file.

use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::Strand;
use omics::coordinate::position::Number;

/// The number of expected fields in an alignment-block record.
///
/// Only the first five (the coordinate quadruple and the edit count) are
/// consumed; the similarity-error and stop-codon counts are ignored.
pub const NUM_BLOCK_FIELDS: usize = 7;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to the parsing of an alignment-block record.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields in the record.
    IncorrectNumberOfFields(usize),

    /// An invalid reference start.
    InvalidReferenceStart(ParseIntError),

    /// An invalid reference end.
    InvalidReferenceEnd(ParseIntError),

    /// An invalid query start.
    InvalidQueryStart(ParseIntError),

    /// An invalid query end.
    InvalidQueryEnd(ParseIntError),

    /// An invalid edit count.
    InvalidEdits(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in alignment block: expected {} fields, found {} fields",
                NUM_BLOCK_FIELDS, n
            ),
            ParseError::InvalidReferenceStart(err) => {
                write!(f, "invalid reference start: {}", err)
            }
            ParseError::InvalidReferenceEnd(err) => write!(f, "invalid reference end: {}", err),
            ParseError::InvalidQueryStart(err) => write!(f, "invalid query start: {}", err),
            ParseError::InvalidQueryEnd(err) => write!(f, "invalid query end: {}", err),
            ParseError::InvalidEdits(err) => write!(f, "invalid edit count: {}", err),
        }
    }
}

impl std::error::Error for ParseError {}

////////////////////////////////////////////////////////////////////////////////////////
// Block
////////////////////////////////////////////////////////////////////////////////////////

/// An alignment-block record within a delta file.
///
/// Coordinates are stored exactly as they appear in the file: 1-based,
/// inclusive, and inverted (start greater than end) when the aligned segment
/// runs against the sequence's orientation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Block {
    /// The start of the block on the reference.
    reference_start: Number,

    /// The end of the block on the reference.
    reference_end: Number,

    /// The start of the block on the query.
    query_start: Number,

    /// The end of the block on the query.
    query_end: Number,

    /// The number of edits (mismatches) in the block.
    edits: Number,
}

impl Block {
    /// Returns the start of the block on the reference, as written.
    pub fn reference_start(&self) -> Number {
        self.reference_start
    }

    /// Returns the end of the block on the reference, as written.
    pub fn reference_end(&self) -> Number {
        self.reference_end
    }

    /// Returns the start of the block on the query, as written.
    pub fn query_start(&self) -> Number {
        self.query_start
    }

    /// Returns the end of the block on the query, as written.
    pub fn query_end(&self) -> Number {
        self.query_end
    }

    /// Returns the number of edits in the block.
    pub fn edits(&self) -> Number {
        self.edits
    }

    /// Returns the strand of the block.
    ///
    /// The strand is forward iff the reference and query coordinate pairs
    /// both increase or both decrease.
    ///
    /// # Examples
    ///
    /// ```
    /// use omics::coordinate::Strand;
    /// use paffile::delta::block::Block;
    ///
    /// let block = "1 10 1 10 0 0 0".parse::<Block>()?;
    /// assert_eq!(block.strand(), Strand::Positive);
    ///
    /// let block = "10 1 1 10 0 0 0".parse::<Block>()?;
    /// assert_eq!(block.strand(), Strand::Negative);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strand(&self) -> Strand {
        let reference_forward = self.reference_start < self.reference_end;
        let query_forward = self.query_start < self.query_end;

        if (reference_forward && query_forward)
            || (self.reference_start > self.reference_end && self.query_start > self.query_end)
        {
            Strand::Positive
        } else {
            Strand::Negative
        }
    }

    /// Returns the block's reference coordinates normalized to a 0-based
    /// half-open `(start, end)` range with `start < end`.
    pub fn reference_range(&self) -> (Number, Number) {
        let start = self.reference_start.min(self.reference_end);
        let end = self.reference_start.max(self.reference_end);
        (start.saturating_sub(1), end)
    }

    /// Returns the block's query coordinates normalized to a 0-based
    /// half-open `(start, end)` range with `start < end`.
    pub fn query_range(&self) -> (Number, Number) {
        let start = self.query_start.min(self.query_end);
        let end = self.query_start.max(self.query_end);
        (start.saturating_sub(1), end)
    }
}

impl FromStr for Block {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split_whitespace().collect::<Vec<_>>();

        if parts.len() != NUM_BLOCK_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(parts.len()));
        }

        Ok(Self {
            reference_start: parts[0].parse().map_err(ParseError::InvalidReferenceStart)?,
            reference_end: parts[1].parse().map_err(ParseError::InvalidReferenceEnd)?,
            query_start: parts[2].parse().map_err(ParseError::InvalidQueryStart)?,
            query_end: parts[3].parse().map_err(ParseError::InvalidQueryEnd)?,
            edits: parts[4].parse().map_err(ParseError::InvalidEdits)?,
        })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_valid_block() -> Result<(), Box<dyn std::error::Error>> {
        let block = "1 10 1 9 2 2 0".parse::<Block>()?;

        assert_eq!(block.reference_start(), 1);
        assert_eq!(block.reference_end(), 10);
        assert_eq!(block.query_start(), 1);
        assert_eq!(block.query_end(), 9);
        assert_eq!(block.edits(), 2);

        Ok(())
    }

    #[test]
    fn test_normalized_ranges() -> Result<(), Box<dyn std::error::Error>> {
        let block = "10 1 1 10 0 0 0".parse::<Block>()?;

        assert_eq!(block.reference_range(), (0, 10));
        assert_eq!(block.query_range(), (0, 10));
        assert_eq!(block.strand(), Strand::Negative);

        Ok(())
    }

    #[test]
    fn test_both_decreasing_is_forward() -> Result<(), Box<dyn std::error::Error>> {
        let block = "10 1 10 1 0 0 0".parse::<Block>()?;
        assert_eq!(block.strand(), Strand::Positive);
        Ok(())
    }

    #[test]
    fn test_invalid_number_of_fields() {
        let err = "1 10 1 9 2".parse::<Block>().unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid number of fields in alignment block: expected 7 fields, found 5 fields"
        );
    }

    #[test]
    fn test_invalid_coordinate() {
        let err = "1 ? 1 9 2 2 0".parse::<Block>().unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid reference end: invalid digit found in string"
        );
    }
}
