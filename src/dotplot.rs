//! Dotplot tables built from PAF alignment records.
//!
//! A [`Table`] lays out the reference and query sequences of a set of PAF
//! records as two concatenated plot axes and annotates every record with the
//! global coordinates needed for scatter-plot rendering:
//!
//! - the reference axis orders sequences by descending length;
//! - the query axis orders sequences by the reference start of each query's
//!   best (longest) alignment;
//! - queries whose best alignment lies on the reverse strand are flipped,
//!   and the flip is broadcast to every record of that query.
//!
//! Records are never reordered, only annotated. The table and its layouts
//! are built fresh on each call and are immutable thereafter.

use std::collections::HashMap;
use std::collections::HashSet;
use std::str::FromStr;

use nonempty::NonEmpty;
use omics::coordinate::Strand;
use omics::coordinate::position::Number;
use tracing::debug;

use crate::Reader;
use crate::reader;

pub mod layout;
pub mod record;

pub use layout::END_KEY;
pub use layout::Layout;
pub use record::Record;

/// A signed plot-axis coordinate.
///
/// Derived coordinates are signed because the per-query flip broadcast can
/// push non-best alignments of a flipped query out of range.
pub type PlotPosition = i64;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to a [`Table`].
#[derive(Debug)]
pub enum Error {
    /// No records were provided.
    Empty,

    /// A reader error.
    Reader(reader::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Empty => write!(f, "no alignment records were provided"),
            Error::Reader(err) => write!(f, "reader error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Table
////////////////////////////////////////////////////////////////////////////////////////

/// A dotplot table.
///
/// Holds the annotated records in input order alongside the layouts of the
/// two plot axes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Table {
    /// The annotated records, in input order.
    records: NonEmpty<Record>,

    /// The reference axis layout.
    reference: Layout,

    /// The query axis layout.
    query: Layout,
}

impl Table {
    /// Attempts to build a [`Table`] from parsed PAF records.
    ///
    /// The build runs in two passes: the first groups records by query and
    /// selects each query's best alignment (maximum alignment length, with
    /// the first-seen record winning ties); the second reads that map to
    /// annotate every record. Both axis layouts are derived in between.
    ///
    /// # Examples
    ///
    /// ```
    /// use paffile::dotplot::Table;
    /// use paffile::record::Record;
    ///
    /// let record = "q1\t100\t10\t50\t+\tr1\t200\t0\t40\t35\t40\t60".parse::<Record>()?;
    /// let table = Table::try_new(vec![record])?;
    ///
    /// assert_eq!(table.records().len(), 1);
    /// assert_eq!(table.reference().total(), 200);
    /// assert_eq!(table.query().total(), 100);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(records: Vec<crate::record::Record>) -> Result<Self> {
        let records = NonEmpty::from_vec(records).ok_or(Error::Empty)?;

        // Pass one: the index of each query's best record, one slot per
        // query in first-appearance order. The strict comparison keeps the
        // first-seen record on ties.
        let mut order: Vec<usize> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();

        for (i, record) in records.iter().enumerate() {
            match slots.get(record.query_id()) {
                Some(&slot) => {
                    if record.alignment_length() > records[order[slot]].alignment_length() {
                        order[slot] = i;
                    }
                }
                None => {
                    slots.insert(record.query_id().to_string(), order.len());
                    order.push(i);
                }
            }
        }

        let best_of: HashMap<String, usize> = slots
            .iter()
            .map(|(query_id, &slot)| (query_id.clone(), order[slot]))
            .collect();

        // Queries take the axis in ascending order of their best alignment's
        // reference start; the sort is stable, so ties keep input order.
        order.sort_by_key(|&i| records[i].reference_start());

        let reference = Self::reference_layout(&records);
        let query = Layout::new(order.iter().map(|&i| {
            let best = &records[i];
            (best.query_id().to_string(), best.query_length())
        }));

        // Pass two: annotate every record against the immutable best map and
        // the two layouts.
        let mut annotated = Vec::with_capacity(records.len());

        for record in records.iter() {
            // SAFETY: every query was registered during pass one.
            let best = &records[*best_of
                .get(record.query_id())
                .expect("query was grouped in pass one")];

            let (mut query_start_flip, mut query_end_flip) = match record.strand() {
                Strand::Positive => (
                    record.query_start() as PlotPosition,
                    record.query_end() as PlotPosition,
                ),
                Strand::Negative => (
                    record.query_end() as PlotPosition,
                    record.query_start() as PlotPosition,
                ),
            };

            let is_longest_alignment = record.alignment_length() == best.alignment_length();
            let is_flipped = best.strand() == &Strand::Negative;

            if is_flipped {
                query_start_flip = record.query_length() as PlotPosition - query_start_flip;
                query_end_flip = record.query_length() as PlotPosition - query_end_flip;
            }

            // SAFETY: both axes were laid out from these same records above.
            let query_offset = query
                .offset(record.query_id())
                .expect("query is laid out on the query axis")
                as PlotPosition;
            let reference_offset = reference
                .offset(record.reference_id())
                .expect("reference is laid out on the reference axis")
                as PlotPosition;

            annotated.push(Record::new(
                record.clone(),
                query_start_flip,
                query_end_flip,
                is_longest_alignment,
                is_flipped,
                query_offset + query_start_flip,
                query_offset + query_end_flip,
                reference_offset + record.reference_start() as PlotPosition,
                reference_offset + record.reference_end() as PlotPosition,
            ));
        }

        debug!(
            records = annotated.len(),
            references = reference.len(),
            queries = query.len(),
            "built dotplot table"
        );

        // SAFETY: `annotated` holds one record per input record, and the
        // input was non-empty.
        let records = NonEmpty::from_vec(annotated).expect("one annotated record per input");

        Ok(Self {
            records,
            reference,
            query,
        })
    }

    /// Builds the reference axis layout: distinct reference sequences (first
    /// occurrence wins), stable-sorted by descending length.
    fn reference_layout(records: &NonEmpty<crate::record::Record>) -> Layout {
        let mut pairs: Vec<(String, Number)> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for record in records.iter() {
            if seen.insert(record.reference_id()) {
                pairs.push((
                    record.reference_id().to_string(),
                    record.reference_length(),
                ));
            }
        }

        pairs.sort_by(|a, b| b.1.cmp(&a.1));

        Layout::new(pairs)
    }

    /// Returns the annotated records, in input order.
    ///
    /// # Examples
    ///
    /// ```
    /// use paffile::dotplot::Table;
    ///
    /// let table = "q1\t100\t10\t50\t+\tr1\t200\t0\t40\t35\t40\t60".parse::<Table>()?;
    ///
    /// let record = table.records().first();
    /// assert_eq!(record.query_start_flip(), 10);
    /// assert_eq!(record.ref_start_offset(), 0);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn records(&self) -> &NonEmpty<Record> {
        &self.records
    }

    /// Returns the reference axis layout.
    pub fn reference(&self) -> &Layout {
        &self.reference
    }

    /// Returns the query axis layout.
    pub fn query(&self) -> &Layout {
        &self.query
    }
}

impl FromStr for Table {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut reader = Reader::new(s.as_bytes());
        let records = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Reader)?;

        Table::try_new(records)
    }
}
