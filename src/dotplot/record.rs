//! A PAF record annotated with derived dotplot fields.

use crate::dotplot::PlotPosition;
use crate::record;

/// A PAF record annotated for dotplot rendering.
///
/// Wraps the parsed [`record::Record`] and carries the derived fields
/// computed by the table build: the strand-ordered (and possibly flipped)
/// query coordinates, the per-query best-alignment markers, and the four
/// global plot-axis coordinates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The parsed PAF record.
    inner: record::Record,

    /// The query start, strand-ordered and flip-adjusted.
    query_start_flip: PlotPosition,

    /// The query end, strand-ordered and flip-adjusted.
    query_end_flip: PlotPosition,

    /// Whether this record has the maximum alignment length among records
    /// sharing its query.
    is_longest_alignment: bool,

    /// Whether the query's best alignment is on the reverse strand.
    ///
    /// This is a per-query property broadcast to every record of the query.
    is_flipped: bool,

    /// The global plot-axis coordinate of the query start.
    query_start_offset: PlotPosition,

    /// The global plot-axis coordinate of the query end.
    query_end_offset: PlotPosition,

    /// The global plot-axis coordinate of the reference start.
    ref_start_offset: PlotPosition,

    /// The global plot-axis coordinate of the reference end.
    ref_end_offset: PlotPosition,
}

impl Record {
    /// Creates a new annotated [`Record`].
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        inner: record::Record,
        query_start_flip: PlotPosition,
        query_end_flip: PlotPosition,
        is_longest_alignment: bool,
        is_flipped: bool,
        query_start_offset: PlotPosition,
        query_end_offset: PlotPosition,
        ref_start_offset: PlotPosition,
        ref_end_offset: PlotPosition,
    ) -> Self {
        Self {
            inner,
            query_start_flip,
            query_end_flip,
            is_longest_alignment,
            is_flipped,
            query_start_offset,
            query_end_offset,
            ref_start_offset,
            ref_end_offset,
        }
    }

    /// Returns the parsed PAF record.
    pub fn record(&self) -> &record::Record {
        &self.inner
    }

    /// Returns the strand-ordered, flip-adjusted query start.
    ///
    /// For a flipped query, non-best alignments may yield values outside the
    /// query's coordinate range; this mirrors the per-query flip broadcast
    /// and is accepted behavior.
    pub fn query_start_flip(&self) -> PlotPosition {
        self.query_start_flip
    }

    /// Returns the strand-ordered, flip-adjusted query end.
    pub fn query_end_flip(&self) -> PlotPosition {
        self.query_end_flip
    }

    /// Returns whether this record's alignment length equals the maximum
    /// among records sharing its query.
    pub fn is_longest_alignment(&self) -> bool {
        self.is_longest_alignment
    }

    /// Returns whether the query's best alignment is on the reverse strand.
    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    /// Returns the global plot-axis coordinate of the query start.
    pub fn query_start_offset(&self) -> PlotPosition {
        self.query_start_offset
    }

    /// Returns the global plot-axis coordinate of the query end.
    pub fn query_end_offset(&self) -> PlotPosition {
        self.query_end_offset
    }

    /// Returns the global plot-axis coordinate of the reference start.
    pub fn ref_start_offset(&self) -> PlotPosition {
        self.ref_start_offset
    }

    /// Returns the global plot-axis coordinate of the reference end.
    pub fn ref_end_offset(&self) -> PlotPosition {
        self.ref_end_offset
    }
}
