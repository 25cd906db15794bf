//! A PAF alignment record.

use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::Strand;
use omics::coordinate::position::Number;
use omics::coordinate::strand;

/// The delimiter between fields of a PAF record.
pub const DELIMITER: char = '\t';

/// The number of required fields in a PAF record.
///
/// Any fields beyond these are optional tag fields and are retained verbatim.
pub const NUM_RECORD_FIELDS: usize = 12;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to the parsing of a PAF record.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields in the record.
    IncorrectNumberOfFields(usize),

    /// An invalid query length.
    InvalidQueryLength(ParseIntError),

    /// An invalid query start.
    InvalidQueryStart(ParseIntError),

    /// An invalid query end.
    InvalidQueryEnd(ParseIntError),

    /// An invalid strand.
    InvalidStrand(strand::Error),

    /// An invalid reference length.
    InvalidReferenceLength(ParseIntError),

    /// An invalid reference start.
    InvalidReferenceStart(ParseIntError),

    /// An invalid reference end.
    InvalidReferenceEnd(ParseIntError),

    /// An invalid number of residue matches.
    InvalidResidueMatches(ParseIntError),

    /// An invalid alignment length.
    InvalidAlignmentLength(ParseIntError),

    /// An invalid mapping quality.
    InvalidMappingQuality(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in record: expected at least {} fields, found {} fields",
                NUM_RECORD_FIELDS, n
            ),
            ParseError::InvalidQueryLength(err) => write!(f, "invalid query length: {}", err),
            ParseError::InvalidQueryStart(err) => write!(f, "invalid query start: {}", err),
            ParseError::InvalidQueryEnd(err) => write!(f, "invalid query end: {}", err),
            ParseError::InvalidStrand(err) => write!(f, "invalid strand: {}", err),
            ParseError::InvalidReferenceLength(err) => {
                write!(f, "invalid reference length: {}", err)
            }
            ParseError::InvalidReferenceStart(err) => write!(f, "invalid reference start: {}", err),
            ParseError::InvalidReferenceEnd(err) => write!(f, "invalid reference end: {}", err),
            ParseError::InvalidResidueMatches(err) => {
                write!(f, "invalid residue matches: {}", err)
            }
            ParseError::InvalidAlignmentLength(err) => {
                write!(f, "invalid alignment length: {}", err)
            }
            ParseError::InvalidMappingQuality(err) => {
                write!(f, "invalid mapping quality: {}", err)
            }
        }
    }
}

impl std::error::Error for ParseError {}

////////////////////////////////////////////////////////////////////////////////////////
// Record
////////////////////////////////////////////////////////////////////////////////////////

/// A PAF alignment record.
///
/// The twelve required fields describe one pairwise alignment between a query
/// sequence and a reference sequence. Optional trailing tag fields (e.g.
/// `NM:i:<n>` or `cg:Z:<cigar>`) are retained verbatim but otherwise ignored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The query sequence identifier.
    query_id: String,

    /// The total length of the query sequence.
    query_length: Number,

    /// The start of the alignment on the query (0-based).
    query_start: Number,

    /// The end of the alignment on the query (exclusive).
    query_end: Number,

    /// The orientation of the alignment.
    strand: Strand,

    /// The reference sequence identifier.
    reference_id: String,

    /// The total length of the reference sequence.
    reference_length: Number,

    /// The start of the alignment on the reference (0-based).
    reference_start: Number,

    /// The end of the alignment on the reference (exclusive).
    reference_end: Number,

    /// The number of matching residues in the alignment.
    residue_matches: Number,

    /// The alignment block length.
    alignment_length: Number,

    /// The mapping quality.
    mapping_quality: Number,

    /// Any trailing tag fields.
    tags: Vec<String>,
}

impl Record {
    /// Creates a new [`Record`].
    ///
    /// # Examples
    ///
    /// ```
    /// use omics::coordinate::Strand;
    /// use paffile::record::Record;
    ///
    /// let record = Record::new(
    ///     "q1", 100, 10, 50, Strand::Positive, "r1", 200, 0, 40, 35, 40, 60,
    ///     Vec::new(),
    /// );
    ///
    /// assert_eq!(record.query_id(), "q1");
    /// assert_eq!(record.alignment_length(), 40);
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        query_id: impl Into<String>,
        query_length: Number,
        query_start: Number,
        query_end: Number,
        strand: Strand,
        reference_id: impl Into<String>,
        reference_length: Number,
        reference_start: Number,
        reference_end: Number,
        residue_matches: Number,
        alignment_length: Number,
        mapping_quality: Number,
        tags: Vec<String>,
    ) -> Self {
        Self {
            query_id: query_id.into(),
            query_length,
            query_start,
            query_end,
            strand,
            reference_id: reference_id.into(),
            reference_length,
            reference_start,
            reference_end,
            residue_matches,
            alignment_length,
            mapping_quality,
            tags,
        }
    }

    /// Returns the query sequence identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use paffile::record::Record;
    ///
    /// let record = "q1\t100\t10\t50\t+\tr1\t200\t0\t40\t35\t40\t60".parse::<Record>()?;
    /// assert_eq!(record.query_id(), "q1");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn query_id(&self) -> &str {
        &self.query_id
    }

    /// Returns the total length of the query sequence.
    pub fn query_length(&self) -> Number {
        self.query_length
    }

    /// Returns the start of the alignment on the query.
    pub fn query_start(&self) -> Number {
        self.query_start
    }

    /// Returns the end of the alignment on the query.
    pub fn query_end(&self) -> Number {
        self.query_end
    }

    /// Returns the strand.
    ///
    /// # Examples
    ///
    /// ```
    /// use omics::coordinate::Strand;
    /// use paffile::record::Record;
    ///
    /// let record = "q1\t100\t10\t50\t-\tr1\t200\t0\t40\t35\t40\t60".parse::<Record>()?;
    /// assert_eq!(record.strand(), &Strand::Negative);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strand(&self) -> &Strand {
        &self.strand
    }

    /// Returns the reference sequence identifier.
    pub fn reference_id(&self) -> &str {
        &self.reference_id
    }

    /// Returns the total length of the reference sequence.
    pub fn reference_length(&self) -> Number {
        self.reference_length
    }

    /// Returns the start of the alignment on the reference.
    pub fn reference_start(&self) -> Number {
        self.reference_start
    }

    /// Returns the end of the alignment on the reference.
    pub fn reference_end(&self) -> Number {
        self.reference_end
    }

    /// Returns the number of matching residues in the alignment.
    pub fn residue_matches(&self) -> Number {
        self.residue_matches
    }

    /// Returns the alignment block length.
    pub fn alignment_length(&self) -> Number {
        self.alignment_length
    }

    /// Returns the mapping quality.
    pub fn mapping_quality(&self) -> Number {
        self.mapping_quality
    }

    /// Returns the trailing tag fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use paffile::record::Record;
    ///
    /// let record = "q1\t100\t10\t50\t+\tr1\t200\t0\t40\t35\t40\t60\tNM:i:5".parse::<Record>()?;
    /// assert_eq!(record.tags(), &["NM:i:5"]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split(DELIMITER).collect::<Vec<_>>();

        if parts.len() < NUM_RECORD_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(parts.len()));
        }

        Ok(Self {
            query_id: parts[0].into(),
            query_length: parts[1].parse().map_err(ParseError::InvalidQueryLength)?,
            query_start: parts[2].parse().map_err(ParseError::InvalidQueryStart)?,
            query_end: parts[3].parse().map_err(ParseError::InvalidQueryEnd)?,
            strand: parts[4].parse().map_err(ParseError::InvalidStrand)?,
            reference_id: parts[5].into(),
            reference_length: parts[6]
                .parse()
                .map_err(ParseError::InvalidReferenceLength)?,
            reference_start: parts[7]
                .parse()
                .map_err(ParseError::InvalidReferenceStart)?,
            reference_end: parts[8].parse().map_err(ParseError::InvalidReferenceEnd)?,
            residue_matches: parts[9]
                .parse()
                .map_err(ParseError::InvalidResidueMatches)?,
            alignment_length: parts[10]
                .parse()
                .map_err(ParseError::InvalidAlignmentLength)?,
            mapping_quality: parts[11]
                .parse()
                .map_err(ParseError::InvalidMappingQuality)?,
            tags: parts[NUM_RECORD_FIELDS..]
                .iter()
                .map(|part| part.to_string())
                .collect(),
        })
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.query_id,
            self.query_length,
            self.query_start,
            self.query_end,
            self.strand,
            self.reference_id,
            self.reference_length,
            self.reference_start,
            self.reference_end,
            self.residue_matches,
            self.alignment_length,
            self.mapping_quality
        )?;

        for tag in &self.tags {
            write!(f, "{}{}", DELIMITER, tag)?;
        }

        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_valid_record() -> Result<(), Box<dyn std::error::Error>> {
        let record = "q1\t100\t10\t50\t+\tr1\t200\t0\t40\t35\t40\t60".parse::<Record>()?;

        assert_eq!(record.query_id(), "q1");
        assert_eq!(record.query_length(), 100);
        assert_eq!(record.query_start(), 10);
        assert_eq!(record.query_end(), 50);
        assert_eq!(record.strand(), &Strand::Positive);
        assert_eq!(record.reference_id(), "r1");
        assert_eq!(record.reference_length(), 200);
        assert_eq!(record.reference_start(), 0);
        assert_eq!(record.reference_end(), 40);
        assert_eq!(record.residue_matches(), 35);
        assert_eq!(record.alignment_length(), 40);
        assert_eq!(record.mapping_quality(), 60);
        assert!(record.tags().is_empty());

        Ok(())
    }

    #[test]
    fn test_record_with_tags() -> Result<(), Box<dyn std::error::Error>> {
        let record = "q1\t100\t10\t50\t-\tr1\t200\t0\t40\t35\t40\t0\tNM:i:5\tcg:Z:40M"
            .parse::<Record>()?;

        assert_eq!(record.strand(), &Strand::Negative);
        assert_eq!(record.tags(), &["NM:i:5", "cg:Z:40M"]);

        Ok(())
    }

    #[test]
    fn test_invalid_number_of_fields() {
        let err = "q1\t100\t10\t50\t+\tr1\t200\t0\t40\t35"
            .parse::<Record>()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid number of fields in record: expected at least 12 fields, found 10 fields"
        );
    }

    #[test]
    fn test_invalid_numeric_field() {
        let err = "q1\t?\t10\t50\t+\tr1\t200\t0\t40\t35\t40\t60"
            .parse::<Record>()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid query length: invalid digit found in string"
        );
    }

    #[test]
    fn test_invalid_strand() {
        let err = "q1\t100\t10\t50\t?\tr1\t200\t0\t40\t35\t40\t60"
            .parse::<Record>()
            .unwrap_err();

        assert!(matches!(err, ParseError::InvalidStrand(_)));
    }

    #[test]
    fn test_display_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let line = "q1\t100\t10\t50\t+\tr1\t200\t0\t40\t35\t40\t60\tNM:i:5";
        let record = line.parse::<Record>()?;

        assert_eq!(record.to_string(), line);

        Ok(())
    }
}
