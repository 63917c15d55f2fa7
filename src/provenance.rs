//! Provenance entries and the buffer nodes that hold them
//!
//! A [`ProvenanceBufferNode`] owns a fixed-length array of entries together
//! with the string table their fields point into. Nodes link into a singly
//! linked list through `next`.

use std::fmt;
use std::num::NonZeroU32;

use bstr::BStr;

use crate::error::{IpeError, Result};
use crate::object::{InfoPtr, ObjectSource};
use crate::string_table::{read_cstr, StrOffset, StringTable, DEFAULT_CAPACITY};

/// Payload given to every synthetic object unless overridden
pub const DEFAULT_VALUE: i64 = 42;

/// The six textual fields of an entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    TableName,
    ClosureDesc,
    TyDesc,
    Label,
    ModuleName,
    SrcLoc,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::TableName,
        Field::ClosureDesc,
        Field::TyDesc,
        Field::Label,
        Field::ModuleName,
        Field::SrcLoc,
    ];

    /// Prefix of the synthesized label for this field
    pub fn prefix(self) -> &'static str {
        match self {
            Field::TableName => "table_name",
            Field::ClosureDesc => "closure_desc",
            Field::TyDesc => "ty_desc",
            Field::Label => "label",
            Field::ModuleName => "module",
            Field::SrcLoc => "srcloc",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::TableName => "table_name",
            Field::ClosureDesc => "closure_desc",
            Field::TyDesc => "ty_desc",
            Field::Label => "label",
            Field::ModuleName => "module_name",
            Field::SrcLoc => "src_loc",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Synthesized label for `field` of entry `index`
///
/// The index is zero-padded to at least three digits; larger indices simply
/// take more digits (`label_1234`).
pub fn field_label(field: Field, index: u32) -> String {
    format!("{}_{:03}", field.prefix(), index)
}

/// One info-table pointer plus six offsets into the owning node's string table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProvenanceEntry {
    pub info: InfoPtr,
    pub table_name: StrOffset,
    pub closure_desc: StrOffset,
    pub ty_desc: StrOffset,
    pub label: StrOffset,
    pub module_name: StrOffset,
    pub src_loc: StrOffset,
}

impl ProvenanceEntry {
    pub fn field(&self, field: Field) -> StrOffset {
        match field {
            Field::TableName => self.table_name,
            Field::ClosureDesc => self.closure_desc,
            Field::TyDesc => self.ty_desc,
            Field::Label => self.label,
            Field::ModuleName => self.module_name,
            Field::SrcLoc => self.src_loc,
        }
    }
}

/// An entry with every field read out of its string table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedEntry<'a> {
    pub info: InfoPtr,
    pub table_name: &'a BStr,
    pub closure_desc: &'a BStr,
    pub ty_desc: &'a BStr,
    pub label: &'a BStr,
    pub module_name: &'a BStr,
    pub src_loc: &'a BStr,
}

impl<'a> ResolvedEntry<'a> {
    pub fn field(&self, field: Field) -> &'a BStr {
        match field {
            Field::TableName => self.table_name,
            Field::ClosureDesc => self.closure_desc,
            Field::TyDesc => self.ty_desc,
            Field::Label => self.label,
            Field::ModuleName => self.module_name,
            Field::SrcLoc => self.src_loc,
        }
    }
}

/// Fixed-size batch of entries and the string table they reference
#[derive(Debug)]
pub struct ProvenanceBufferNode {
    entries: Box<[ProvenanceEntry]>,
    string_table: Vec<u8>,
    next: Option<Box<ProvenanceBufferNode>>,
}

impl ProvenanceBufferNode {
    fn new(entries: Vec<ProvenanceEntry>, table: StringTable) -> Self {
        Self {
            entries: entries.into_boxed_slice(),
            string_table: table.into_bytes(),
            next: None,
        }
    }

    pub fn entries(&self) -> &[ProvenanceEntry] {
        &self.entries
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Raw bytes of this node's string table
    pub fn string_table(&self) -> &[u8] {
        &self.string_table
    }

    pub fn next(&self) -> Option<&ProvenanceBufferNode> {
        self.next.as_deref()
    }

    /// Link `next` after this node, replacing any existing tail
    pub fn with_next(mut self, next: Option<ProvenanceBufferNode>) -> Self {
        self.next = next.map(Box::new);
        self
    }

    /// Read the string at `offset` in this node's table
    pub fn string(&self, offset: StrOffset) -> Result<&BStr> {
        read_cstr(&self.string_table, offset)
    }

    /// Resolve all six fields of an entry against this node's table
    pub fn resolve(&self, entry: &ProvenanceEntry) -> Result<ResolvedEntry<'_>> {
        Ok(ResolvedEntry {
            info: entry.info,
            table_name: self.string(entry.table_name)?,
            closure_desc: self.string(entry.closure_desc)?,
            ty_desc: self.string(entry.ty_desc)?,
            label: self.string(entry.label)?,
            module_name: self.string(entry.module_name)?,
            src_loc: self.string(entry.src_loc)?,
        })
    }

    /// Iterate over this node and every node linked after it
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { cur: Some(self) }
    }

    /// Total entries across the whole chain
    pub fn total_count(&self) -> usize {
        self.iter().map(|node| node.count()).sum()
    }
}

impl Drop for ProvenanceBufferNode {
    fn drop(&mut self) {
        // Unlink iteratively so long chains don't recurse.
        let mut next = self.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl<'a> IntoIterator for &'a ProvenanceBufferNode {
    type Item = &'a ProvenanceBufferNode;
    type IntoIter = NodeIter<'a>;

    fn into_iter(self) -> NodeIter<'a> {
        self.iter()
    }
}

/// Iterator over a chain of nodes
pub struct NodeIter<'a> {
    cur: Option<&'a ProvenanceBufferNode>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a ProvenanceBufferNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cur?;
        self.cur = node.next();
        Some(node)
    }
}

/// Builds buffer nodes of synthetic provenance entries
pub struct ProvenanceBufferBuilder<S> {
    source: S,
    initial_capacity: usize,
    value: i64,
}

impl<S: ObjectSource> ProvenanceBufferBuilder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            initial_capacity: DEFAULT_CAPACITY,
            value: DEFAULT_VALUE,
        }
    }

    /// Starting capacity of each node's string table
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Payload given to each synthetic object
    pub fn value(mut self, value: i64) -> Self {
        self.value = value;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Build one node holding entries for indices `start..end`
    ///
    /// Every entry's strings go into a single table created for this call,
    /// which the returned node then owns.
    pub fn build_entries(&mut self, start: u32, end: u32) -> Result<ProvenanceBufferNode> {
        if start > end {
            return Err(IpeError::InvalidRange { start, end });
        }

        let count = (end - start) as usize;
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(count)
            .map_err(|_| IpeError::Alloc {
                requested: count.saturating_mul(size_of::<ProvenanceEntry>()),
            })?;

        let mut table = StringTable::with_capacity(self.initial_capacity)?;
        for i in start..end {
            entries.push(self.make_entry(&mut table, i)?);
        }

        Ok(ProvenanceBufferNode::new(entries, table))
    }

    /// Build a chain of nodes covering `start..end`, at most `chunk` entries each
    ///
    /// Nodes are linked in index order and each owns its own string table. An
    /// empty range yields a single empty node.
    pub fn build_chain(
        &mut self,
        start: u32,
        end: u32,
        chunk: NonZeroU32,
    ) -> Result<ProvenanceBufferNode> {
        if start > end {
            return Err(IpeError::InvalidRange { start, end });
        }

        let mut lo = start.saturating_add(chunk.get()).min(end);
        let head = self.build_entries(start, lo)?;

        let mut rest = Vec::new();
        while lo < end {
            let hi = lo.saturating_add(chunk.get()).min(end);
            rest.push(self.build_entries(lo, hi)?);
            lo = hi;
        }

        let tail = rest
            .into_iter()
            .rev()
            .fold(None, |next, node: ProvenanceBufferNode| Some(node.with_next(next)));
        Ok(head.with_next(tail))
    }

    fn make_entry(&mut self, table: &mut StringTable, index: u32) -> Result<ProvenanceEntry> {
        let object = self.source.create_synthetic_object(self.value);
        let info = self.source.type_metadata(&object);

        Ok(ProvenanceEntry {
            info,
            table_name: table.insert(&field_label(Field::TableName, index))?,
            closure_desc: table.insert(&field_label(Field::ClosureDesc, index))?,
            ty_desc: table.insert(&field_label(Field::TyDesc, index))?,
            label: table.insert(&field_label(Field::Label, index))?,
            module_name: table.insert(&field_label(Field::ModuleName, index))?,
            src_loc: table.insert(&field_label(Field::SrcLoc, index))?,
        })
    }
}
