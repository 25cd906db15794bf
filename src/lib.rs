//! `paffile` is a crate for reading PAF (Pairwise mApping Format) alignments
//! and laying them out for dotplot rendering.
//!
//! The crate provides two main points of entry:
//!
//! - Parsing and reading PAF records directly.
//! - Building a dotplot table from a set of PAF records.
//!
//! Since the main purpose of parsing PAF in an assembly-curation setting is
//! to visualize the alignments between a reference and a query sequence set,
//! we expect that most users will be interested in the latter functionality.
//! However, we have exposed the former functionality in the event that it is
//! needed for some other purpose.
//!
//! ## Parsing and reading PAF records
//!
//! If you're interested in parsing and reading PAF records directly, you can
//! use the [`Reader`] facility to accomplish that: [`Reader::records()`]
//! iterates the parsed [records](crate::record::Record) in a PAF file. PAF
//! files carry no header line, and the twelve required columns may be
//! followed by tag fields, which are retained but otherwise ignored.
//!
//! ```
//! let data = b"q1\t100\t10\t50\t+\tr1\t200\t0\t40\t35\t40\t60";
//! let mut reader = paffile::Reader::new(&data[..]);
//!
//! for result in reader.records() {
//!     let record = result?;
//!     println!("{} -> {}", record.query_id(), record.reference_id());
//! }
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Building a dotplot table
//!
//! Generally, what one _actually_ wants is the records annotated with global
//! plot coordinates: both sequence sets laid out as concatenated axes, each
//! query oriented by its best (longest) alignment, and every coordinate
//! shifted by its sequence's axis offset. The translation can be tricky,
//! especially considering gotchas such as reverse-strand queries being
//! flipped as whole sequences rather than per record. Instead of computing
//! these yourself, you should use the [`dotplot::Table`] facility.
//!
//! ```
//! use paffile::dotplot::Table;
//!
//! let paf = "q1\t100\t10\t50\t+\tr1\t200\t0\t40\t35\t40\t60\n\
//!            q2\t80\t0\t30\t-\tr1\t200\t100\t130\t28\t30\t60";
//! let table = paf.parse::<Table>()?;
//!
//! for record in table.records() {
//!     println!(
//!         "({}, {}) -> ({}, {})",
//!         record.ref_start_offset(),
//!         record.query_start_offset(),
//!         record.ref_end_offset(),
//!         record.query_end_offset()
//!     );
//! }
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The table's [`reference()`](dotplot::Table::reference) and
//! [`query()`](dotplot::Table::query) layouts expose each axis's sequence
//! order, lengths, offsets, and sentinel total for placing tick labels.
//!
//! ## Converting delta files
//!
//! Alignments produced in the nucmer delta format can be converted to PAF
//! text with [`delta::convert`] before loading:
//!
//! ```
//! use paffile::dotplot::Table;
//!
//! let delta = ">r1 q1 100 80\n1 10 1 10 1 0 0\n3\n-2\n0\n";
//! let table = paffile::delta::convert(delta)?.to_paf().parse::<Table>()?;
//!
//! assert_eq!(table.records().len(), 1);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod delta;
pub mod dotplot;
pub mod line;
pub mod reader;
pub mod record;

pub use line::Line;

pub use self::reader::Reader;
