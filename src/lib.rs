//! Synthetic info provenance entries for runtime test fixtures
//!
//! [`StringTable`] is an append-only arena of NUL-terminated strings handing
//! out byte offsets. [`ProvenanceBufferBuilder`] fills a
//! [`ProvenanceBufferNode`] with entries whose textual fields are offsets into
//! a table the node owns.

pub mod cli;
pub mod config;
pub mod debug;
pub mod error;
pub mod object;
pub mod output;
pub mod provenance;
pub mod string_table;

pub use error::{IpeError, Result};
pub use object::{InfoPtr, ObjectSource, SyntheticHeap};
pub use provenance::{
    Field, ProvenanceBufferBuilder, ProvenanceBufferNode, ProvenanceEntry, ResolvedEntry,
};
pub use string_table::{StrOffset, StringTable};
