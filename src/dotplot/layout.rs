//! The layout of sequences along one axis of a dotplot.

use std::collections::HashMap;

use omics::coordinate::position::Number;

/// The reserved key under which an axis's sentinel total offset is recorded.
///
/// The sentinel equals the sum of all sequence lengths on the axis and marks
/// the end of the plotted coordinate range.
pub const END_KEY: &str = "__end__";

/// A sequence laid out along a dotplot axis.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    /// The sequence identifier.
    id: String,

    /// The length of the sequence.
    length: Number,

    /// The cumulative length of all sequences preceding this one on the axis.
    offset: Number,
}

impl Entry {
    /// Returns the sequence identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the length of the sequence.
    pub fn length(&self) -> Number {
        self.length
    }

    /// Returns the offset of the sequence on the axis.
    pub fn offset(&self) -> Number {
        self.offset
    }

    /// Returns the midpoint of the sequence on the axis.
    ///
    /// Presentation layers place axis tick labels at this position.
    pub fn midpoint(&self) -> f64 {
        self.offset as f64 + self.length as f64 / 2.0
    }
}

/// The layout of one dotplot axis.
///
/// A layout is an explicitly ordered sequence of [`Entry`]s with cumulative
/// offsets assigned in that order. Iteration order is the axis order; lookup
/// order is never relied upon.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layout {
    /// The entries, in axis order.
    entries: Vec<Entry>,

    /// A lookup from sequence identifier to position within `entries`.
    index: HashMap<String, usize>,

    /// The sum of all sequence lengths on the axis.
    total: Number,
}

impl Layout {
    /// Creates a new [`Layout`] from `(id, length)` pairs in axis order,
    /// assigning cumulative offsets.
    pub(crate) fn new(pairs: impl IntoIterator<Item = (String, Number)>) -> Self {
        let mut entries = Vec::new();
        let mut index = HashMap::new();
        let mut offset = 0;

        for (id, length) in pairs {
            index.insert(id.clone(), entries.len());
            entries.push(Entry { id, length, offset });
            offset += length;
        }

        Self {
            entries,
            index,
            total: offset,
        }
    }

    /// Returns the entries in axis order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the length of the sequence with the given identifier.
    pub fn length(&self, id: &str) -> Option<Number> {
        self.index.get(id).map(|i| self.entries[*i].length)
    }

    /// Returns the offset of the sequence with the given identifier.
    ///
    /// The reserved key [`END_KEY`] maps to the sentinel total.
    pub fn offset(&self, id: &str) -> Option<Number> {
        if id == END_KEY {
            return Some(self.total);
        }

        self.index.get(id).map(|i| self.entries[*i].offset)
    }

    /// Returns the sum of all sequence lengths on the axis.
    pub fn total(&self) -> Number {
        self.total
    }

    /// Returns the number of sequences laid out on the axis.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the axis holds no sequences.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_cumulative_offsets() {
        let layout = Layout::new(vec![
            (String::from("r1"), 200),
            (String::from("r2"), 150),
            (String::from("r3"), 150),
        ]);

        assert_eq!(layout.len(), 3);
        assert_eq!(layout.offset("r1"), Some(0));
        assert_eq!(layout.offset("r2"), Some(200));
        assert_eq!(layout.offset("r3"), Some(350));
        assert_eq!(layout.length("r2"), Some(150));
        assert_eq!(layout.offset(END_KEY), Some(500));
        assert_eq!(layout.total(), 500);
    }

    #[test]
    fn test_missing_id() {
        let layout = Layout::new(vec![(String::from("r1"), 200)]);

        assert_eq!(layout.offset("r2"), None);
        assert_eq!(layout.length("r2"), None);
    }

    #[test]
    fn test_midpoint() {
        let layout = Layout::new(vec![(String::from("r1"), 200), (String::from("r2"), 100)]);

        assert_eq!(layout.entries()[0].midpoint(), 100.0);
        assert_eq!(layout.entries()[1].midpoint(), 250.0);
    }

    #[test]
    fn test_empty_layout() {
        let layout = Layout::new(Vec::new());

        assert!(layout.is_empty());
        assert_eq!(layout.total(), 0);
        assert_eq!(layout.offset(END_KEY), Some(0));
    }
}
