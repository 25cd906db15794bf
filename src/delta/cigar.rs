//! A compact alignment operation string.

use nonempty::NonEmpty;
use omics::coordinate::position::Number;

/// A kind of alignment operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// A run of aligned bases.
    Match,

    /// A base present only in the query.
    Insertion,

    /// A base present only in the reference.
    Deletion,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Match => write!(f, "M"),
            Kind::Insertion => write!(f, "I"),
            Kind::Deletion => write!(f, "D"),
        }
    }
}

/// A single alignment operation: a kind and a run length.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Op {
    /// The kind of operation.
    kind: Kind,

    /// The run length.
    length: Number,
}

impl Op {
    /// Creates a new [`Op`].
    pub fn new(kind: Kind, length: Number) -> Self {
        Self { kind, length }
    }

    /// Returns the kind of operation.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the run length.
    pub fn length(&self) -> Number {
        self.length
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.length, self.kind)
    }
}

/// A compact run-length alignment operation string.
///
/// # Examples
///
/// ```
/// use paffile::delta::cigar::Builder;
/// use paffile::delta::cigar::Kind;
///
/// let mut builder = Builder::default();
/// builder.push(Kind::Match, 2);
/// builder.push(Kind::Deletion, 1);
/// builder.push(Kind::Match, 7);
///
/// let cigar = builder.try_build().unwrap();
/// assert_eq!(cigar.to_string(), "2M1D7M");
/// assert_eq!(cigar.block_length(), 10);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cigar(NonEmpty<Op>);

impl Cigar {
    /// Returns the operations.
    pub fn ops(&self) -> &NonEmpty<Op> {
        &self.0
    }

    /// Returns the alignment block length: the sum of all run lengths.
    pub fn block_length(&self) -> Number {
        self.0.iter().map(|op| op.length()).sum()
    }
}

impl std::fmt::Display for Cigar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for op in self.0.iter() {
            write!(f, "{}", op)?;
        }

        Ok(())
    }
}

/// An accumulator for building a [`Cigar`] one operation at a time.
///
/// Pushing an operation of the same kind as the last extends its run rather
/// than appending a new one.
#[derive(Debug, Default)]
pub struct Builder {
    /// The accumulated operations.
    ops: Vec<Op>,
}

impl Builder {
    /// Pushes an operation, extending the last run if the kinds match.
    pub fn push(&mut self, kind: Kind, length: Number) {
        match self.ops.last_mut() {
            Some(last) if last.kind == kind => last.length += length,
            _ => self.ops.push(Op::new(kind, length)),
        }
    }

    /// Consumes the builder and returns the [`Cigar`], if any operation was
    /// pushed.
    pub fn try_build(self) -> Option<Cigar> {
        NonEmpty::from_vec(self.ops).map(Cigar)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_merges_adjacent_runs_of_same_kind() {
        let mut builder = Builder::default();
        builder.push(Kind::Deletion, 1);
        builder.push(Kind::Deletion, 1);
        builder.push(Kind::Match, 3);
        builder.push(Kind::Insertion, 1);

        let cigar = builder.try_build().unwrap();
        assert_eq!(cigar.to_string(), "2D3M1I");
        assert_eq!(cigar.ops().len(), 3);
        assert_eq!(cigar.block_length(), 6);
    }

    #[test]
    fn test_empty_builder_yields_no_cigar() {
        assert!(Builder::default().try_build().is_none());
    }

    #[test]
    fn test_zero_length_final_run_is_kept() {
        let mut builder = Builder::default();
        builder.push(Kind::Deletion, 1);
        builder.push(Kind::Match, 0);

        let cigar = builder.try_build().unwrap();
        assert_eq!(cigar.to_string(), "1D0M");
        assert_eq!(cigar.block_length(), 1);
    }
}
