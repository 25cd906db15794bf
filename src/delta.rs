//! Conversion of delta-format alignments to PAF.
//!
//! The delta format (as emitted by nucmer) encodes alignment blocks as
//! signed gap-indicator run lengths instead of explicit per-base alignment
//! strings. [`convert`] walks the file line by line, accumulates each
//! block's alignment operations, and emits one PAF record per closed block
//! with `NM:i:<edits>` and `cg:Z:<cigar>` tags.
//!
//! Structural problems (a malformed header or block line, a gap indicator
//! outside a block, a block left open) abort the whole conversion. A block
//! whose reference-consumed and query-consumed run lengths disagree at close
//! is recorded as an [`Inconsistency`] on the returned [`Conversion`] and
//! skipped, so one bad block does not discard the rest of the file.
//!
//! # Examples
//!
//! ```
//! let delta = "NUCMER\n>r1 q1 100 80\n1 10 1 10 1 0 0\n3\n-2\n0\n";
//! let conversion = paffile::delta::convert(delta)?;
//!
//! assert!(conversion.is_consistent());
//! assert_eq!(
//!     conversion.to_paf(),
//!     "q1\t80\t0\t10\t+\tr1\t100\t0\t10\t10\t11\t0\tNM:i:1\tcg:Z:2M1D1M1I6M\n"
//! );
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use omics::coordinate::position::Number;
use tracing::debug;

use crate::record;

pub mod block;
pub mod cigar;
pub mod header;
pub mod line;

pub use block::Block;
pub use header::HEADER_PREFIX;
pub use header::Header;
pub use line::Line;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to the conversion of a delta file.
#[derive(Debug)]
pub enum Error {
    /// A line error.
    Line(line::ParseError),

    /// A gap indicator was found outside of an open alignment block.
    GapOutsideBlock(i64),

    /// A header or block record was found while a block was still open.
    UnterminatedBlock,

    /// The input ended while a block was still open.
    AbruptEndInBlock,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Line(err) => write!(f, "line error: {err}"),
            Error::GapOutsideBlock(d) => {
                write!(f, "found gap indicator `{d}` outside of an alignment block")
            }
            Error::UnterminatedBlock => {
                write!(f, "found a new record while an alignment block was open")
            }
            Error::AbruptEndInBlock => {
                write!(f, "the input ended in the middle of an alignment block")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// An alignment block whose reference-consumed and query-consumed run
/// lengths disagreed when the block was closed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Inconsistency {
    /// The reference sequence name.
    reference_name: String,

    /// The query sequence name.
    query_name: String,

    /// The reference bases remaining at block close.
    reference_remaining: i64,

    /// The query bases remaining at block close.
    query_remaining: i64,
}

impl Inconsistency {
    /// Returns the reference sequence name.
    pub fn reference_name(&self) -> &str {
        &self.reference_name
    }

    /// Returns the query sequence name.
    pub fn query_name(&self) -> &str {
        &self.query_name
    }

    /// Returns the reference bases remaining at block close.
    pub fn reference_remaining(&self) -> i64 {
        self.reference_remaining
    }

    /// Returns the query bases remaining at block close.
    pub fn query_remaining(&self) -> i64 {
        self.query_remaining
    }
}

impl std::fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "inconsistent alignment block between reference `{}` and query `{}`: {} reference \
             bases and {} query bases remain at block close",
            self.reference_name, self.query_name, self.reference_remaining, self.query_remaining
        )
    }
}

impl std::error::Error for Inconsistency {}

////////////////////////////////////////////////////////////////////////////////////////
// Conversion
////////////////////////////////////////////////////////////////////////////////////////

/// The outcome of converting a delta file.
///
/// Holds the PAF records of all cleanly closed blocks in file order,
/// alongside the inconsistencies of the blocks that were skipped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Conversion {
    /// The converted records, in file order.
    records: Vec<record::Record>,

    /// The inconsistent blocks that were skipped.
    inconsistencies: Vec<Inconsistency>,
}

impl Conversion {
    /// Returns the converted records.
    pub fn records(&self) -> &[record::Record] {
        &self.records
    }

    /// Returns the inconsistent blocks that were skipped.
    pub fn inconsistencies(&self) -> &[Inconsistency] {
        &self.inconsistencies
    }

    /// Returns whether every block converted cleanly.
    pub fn is_consistent(&self) -> bool {
        self.inconsistencies.is_empty()
    }

    /// Renders the converted records as PAF text, one line per record.
    pub fn to_paf(&self) -> String {
        self.records
            .iter()
            .map(|record| format!("{}\n", record))
            .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Conversion state
////////////////////////////////////////////////////////////////////////////////////////

/// An alignment block currently being accumulated.
#[derive(Debug)]
struct Open {
    /// The block record that opened the block.
    block: Block,

    /// The reference bases consumed by gap operations so far.
    reference_consumed: Number,

    /// The query bases consumed by gap operations so far.
    query_consumed: Number,

    /// The accumulated alignment operations.
    builder: cigar::Builder,
}

impl Open {
    /// Opens a new block.
    fn new(block: Block) -> Self {
        Self {
            block,
            reference_consumed: 0,
            query_consumed: 0,
            builder: cigar::Builder::default(),
        }
    }

    /// Applies one non-zero gap indicator.
    ///
    /// A positive indicator `d` encodes `d - 1` matching bases followed by
    /// one reference-only base; a negative indicator encodes `-d - 1`
    /// matching bases followed by one query-only base.
    fn gap(&mut self, d: i64) {
        // `d.unsigned_abs()` rather than negation, which overflows for
        // `i64::MIN`. An absurd indicator still closes as an inconsistency.
        let run = d.unsigned_abs() - 1;
        let kind = if d > 0 {
            cigar::Kind::Deletion
        } else {
            cigar::Kind::Insertion
        };

        self.reference_consumed = self.reference_consumed.saturating_add(match kind {
            cigar::Kind::Deletion => run + 1,
            _ => run,
        });
        self.query_consumed = self.query_consumed.saturating_add(match kind {
            cigar::Kind::Insertion => run + 1,
            _ => run,
        });

        if run > 0 {
            self.builder.push(cigar::Kind::Match, run);
        }

        self.builder.push(kind, 1);
    }

    /// Closes the block, emitting a PAF record or an [`Inconsistency`].
    ///
    /// The residue-match count is `blockLength - edits`, clamped at zero: a
    /// block header declaring more edits than the block spans would
    /// otherwise yield a negative count in an unsigned column.
    fn close(self, header: &Header) -> std::result::Result<record::Record, Inconsistency> {
        let (reference_start, reference_end) = self.block.reference_range();
        let (query_start, query_end) = self.block.query_range();

        // Consumed totals are clamped so that a pathological gap run
        // surfaces as an inconsistency instead of overflowing.
        let reference_remaining = ((reference_end - reference_start) as i64)
            .saturating_sub(self.reference_consumed.min(i64::MAX as u64) as i64);
        let query_remaining = ((query_end - query_start) as i64)
            .saturating_sub(self.query_consumed.min(i64::MAX as u64) as i64);

        if reference_remaining != query_remaining || reference_remaining < 0 {
            return Err(Inconsistency {
                reference_name: header.reference_name().to_string(),
                query_name: header.query_name().to_string(),
                reference_remaining,
                query_remaining,
            });
        }

        let mut builder = self.builder;
        builder.push(cigar::Kind::Match, reference_remaining as Number);

        // SAFETY: the final match run was just pushed.
        let cigar = builder
            .try_build()
            .expect("cigar holds at least the final match run");

        let block_length = cigar.block_length();
        let residue_matches = block_length.saturating_sub(self.block.edits());

        Ok(record::Record::new(
            header.query_name(),
            header.query_length(),
            query_start,
            query_end,
            self.block.strand(),
            header.reference_name(),
            header.reference_length(),
            reference_start,
            reference_end,
            residue_matches,
            block_length,
            0,
            vec![
                format!("NM:i:{}", self.block.edits()),
                format!("cg:Z:{}", cigar),
            ],
        ))
    }
}

/// Converts delta-format text into PAF records.
///
/// See the [module documentation](self) for the error policy.
///
/// # Examples
///
/// ```
/// let delta = ">r1 q1 100 80\n10 1 1 10 0 0 0\n0\n";
/// let conversion = paffile::delta::convert(delta)?;
///
/// assert_eq!(conversion.records().len(), 1);
/// assert_eq!(conversion.records()[0].strand().to_string(), "-");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn convert(s: &str) -> Result<Conversion> {
    let mut header: Option<Header> = None;
    let mut open: Option<Open> = None;

    let mut records = Vec::new();
    let mut inconsistencies = Vec::new();

    for raw in s.lines() {
        // Everything before the first header is aligner preamble and is
        // never parsed: a preamble line (e.g. the file-paths line) may
        // happen to share the shape of a block or gap record.
        if header.is_none() && !raw.starts_with(HEADER_PREFIX) {
            continue;
        }

        let line = raw.parse::<Line>().map_err(Error::Line)?;

        match line {
            Line::Header(record) => {
                if open.is_some() {
                    return Err(Error::UnterminatedBlock);
                }

                header = Some(record);
            }
            Line::Block(record) => {
                if open.is_some() {
                    return Err(Error::UnterminatedBlock);
                }

                open = Some(Open::new(record));
            }
            Line::Gap(0) => {
                let current = open.take().ok_or(Error::GapOutsideBlock(0))?;

                // SAFETY: lines are skipped until a header is seen, so a
                // header is present whenever a block is open.
                let current_header = header.as_ref().expect("header precedes any open block");

                match current.close(current_header) {
                    Ok(record) => records.push(record),
                    Err(inconsistency) => inconsistencies.push(inconsistency),
                }
            }
            Line::Gap(d) => {
                open.as_mut().ok_or(Error::GapOutsideBlock(d))?.gap(d);
            }
            Line::Empty | Line::Other => {}
        }
    }

    if open.is_some() {
        return Err(Error::AbruptEndInBlock);
    }

    debug!(
        records = records.len(),
        inconsistencies = inconsistencies.len(),
        "converted delta to PAF"
    );

    Ok(Conversion {
        records,
        inconsistencies,
    })
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_block_with_gaps_closes_cleanly() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let delta = "NUCMER\n>r1 q1 100 80\n1 10 1 10 1 0 0\n3\n-2\n0\n";
        let conversion = convert(delta)?;

        assert!(conversion.is_consistent());
        assert_eq!(conversion.records().len(), 1);

        // Gap list [3, -2, 0]: two matches and a deletion, one match and an
        // insertion, then a final run of six matches. The alignment length
        // equals the sum of the derived run lengths.
        let record = &conversion.records()[0];
        assert_eq!(record.alignment_length(), 11);
        assert_eq!(record.residue_matches(), 10);
        assert_eq!(record.tags(), &["NM:i:1", "cg:Z:2M1D1M1I6M"]);

        assert_eq!(
            conversion.to_paf(),
            "q1\t80\t0\t10\t+\tr1\t100\t0\t10\t10\t11\t0\tNM:i:1\tcg:Z:2M1D1M1I6M\n"
        );

        Ok(())
    }

    #[test]
    fn test_reverse_strand_block() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let delta = ">r1 q1 100 80\n10 1 1 10 0 0 0\n0\n";
        let conversion = convert(delta)?;

        assert_eq!(
            conversion.to_paf(),
            "q1\t80\t0\t10\t-\tr1\t100\t0\t10\t10\t10\t0\tNM:i:0\tcg:Z:10M\n"
        );

        Ok(())
    }

    #[test]
    fn test_adjacent_gaps_merge() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let delta = ">r1 q1 100 80\n1 12 1 10 0 0 0\n1\n1\n0\n";
        let conversion = convert(delta)?;

        let record = &conversion.records()[0];
        assert_eq!(record.tags()[1], "cg:Z:2D10M");
        assert_eq!(record.alignment_length(), 12);

        Ok(())
    }

    #[test]
    fn test_inconsistent_block_is_collected() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        // The first block's run lengths do not reconcile; the second is fine.
        let delta = ">r1 q1 100 80\n1 10 1 9 0 0 0\n0\n11 20 11 20 0 0 0\n0\n";
        let conversion = convert(delta)?;

        assert_eq!(conversion.records().len(), 1);
        assert_eq!(conversion.inconsistencies().len(), 1);
        assert!(!conversion.is_consistent());

        let inconsistency = &conversion.inconsistencies()[0];
        assert_eq!(inconsistency.reference_name(), "r1");
        assert_eq!(inconsistency.query_name(), "q1");
        assert_eq!(inconsistency.reference_remaining(), 10);
        assert_eq!(inconsistency.query_remaining(), 9);
        assert_eq!(
            inconsistency.to_string(),
            "inconsistent alignment block between reference `r1` and query `q1`: 10 reference \
             bases and 9 query bases remain at block close"
        );

        Ok(())
    }

    #[test]
    fn test_multiple_headers() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let delta = ">r1 q1 100 80\n1 10 1 10 0 0 0\n0\n>r2 q2 50 40\n1 20 1 20 0 0 0\n0\n";
        let conversion = convert(delta)?;

        assert_eq!(conversion.records().len(), 2);
        assert_eq!(conversion.records()[0].reference_id(), "r1");
        assert_eq!(conversion.records()[1].reference_id(), "r2");
        assert_eq!(conversion.records()[1].query_id(), "q2");

        Ok(())
    }

    #[test]
    fn test_preamble_is_never_parsed() -> std::result::Result<(), Box<dyn std::error::Error>> {
        // The file-paths line has seven whitespace tokens when the paths
        // contain spaces, the same shape as a block record.
        let delta = "a b c d/ref.fna e f g/qry.fna\nNUCMER\n>r1 q1 100 80\n1 10 1 10 0 0 0\n0\n";
        let conversion = convert(delta)?;

        assert!(conversion.is_consistent());
        assert_eq!(conversion.records().len(), 1);
        assert_eq!(conversion.records()[0].query_id(), "q1");

        Ok(())
    }

    #[test]
    fn test_extreme_gap_indicator_is_inconsistent_not_fatal()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let delta = format!(">r1 q1 100 80\n1 10 1 10 0 0 0\n{}\n0\n", i64::MIN);
        let conversion = convert(&delta)?;

        assert!(conversion.records().is_empty());
        assert_eq!(conversion.inconsistencies().len(), 1);

        Ok(())
    }

    #[test]
    fn test_residue_matches_clamp_at_zero() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        // More declared edits than the block spans.
        let delta = ">r1 q1 100 80\n1 5 1 5 9 0 0\n0\n";
        let conversion = convert(delta)?;

        let record = &conversion.records()[0];
        assert_eq!(record.residue_matches(), 0);
        assert_eq!(record.alignment_length(), 5);
        assert_eq!(record.tags()[0], "NM:i:9");

        Ok(())
    }

    #[test]
    fn test_gap_outside_block() {
        let delta = ">r1 q1 100 80\n3\n";
        let err = convert(delta).unwrap_err();
        assert!(matches!(err, Error::GapOutsideBlock(3)));
    }

    #[test]
    fn test_abrupt_end_in_block() {
        let delta = ">r1 q1 100 80\n1 10 1 10 0 0 0\n3\n";
        let err = convert(delta).unwrap_err();
        assert!(matches!(err, Error::AbruptEndInBlock));
    }

    #[test]
    fn test_malformed_header_aborts() {
        let delta = ">r1 q1\n";
        let err = convert(delta).unwrap_err();
        assert!(matches!(err, Error::Line(_)));
    }

    #[test]
    fn test_converted_output_feeds_the_loader()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        use crate::dotplot::Table;

        let delta = ">r1 q1 100 80\n1 10 1 10 1 0 0\n3\n-2\n0\n";
        let table = convert(delta)?.to_paf().parse::<Table>()?;

        assert_eq!(table.records().len(), 1);
        assert_eq!(table.reference().total(), 100);
        assert_eq!(table.query().total(), 80);

        Ok(())
    }
}
