//! Runtime objects whose info tables the provenance entries point at
//!
//! The builder only needs two things from the surrounding runtime: a way to
//! make a fresh object, and a way to get that object's info-table pointer.
//! [`SyntheticHeap`] is a small in-process stand-in used by the binary and
//! the tests.

use std::fmt;

/// Opaque identifier of an object's info table
///
/// Carried through to the entries as-is and never dereferenced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InfoPtr(usize);

impl InfoPtr {
    pub fn from_addr(addr: usize) -> Self {
        Self(addr)
    }

    /// Pointer identity of a static info table
    pub fn of(table: &'static InfoTable) -> Self {
        Self(table as *const InfoTable as usize)
    }

    pub fn addr(self) -> usize {
        self.0
    }
}

impl fmt::Display for InfoPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Source of synthetic runtime objects
pub trait ObjectSource {
    type Object;

    /// Allocate a fresh object carrying `value`
    fn create_synthetic_object(&mut self, value: i64) -> Self::Object;

    /// Info-table pointer of an object made by this source
    fn type_metadata(&self, object: &Self::Object) -> InfoPtr;
}

/// Per-type descriptor shared by all objects of one constructor
#[derive(Debug)]
pub struct InfoTable {
    pub name: &'static str,
}

/// Info table of boxed machine integers
pub static INT_INFO: InfoTable = InfoTable { name: "I#" };

/// Handle to an object living in a [`SyntheticHeap`]
#[derive(Clone, Copy, Debug)]
pub struct ObjectRef {
    index: usize,
    info: &'static InfoTable,
}

impl ObjectRef {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn info(&self) -> &'static InfoTable {
        self.info
    }
}

/// Keeps every integer object it creates alive for its own lifetime
#[derive(Debug, Default)]
pub struct SyntheticHeap {
    payloads: Vec<i64>,
}

impl SyntheticHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, object: &ObjectRef) -> Option<i64> {
        self.payloads.get(object.index).copied()
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

impl ObjectSource for SyntheticHeap {
    type Object = ObjectRef;

    fn create_synthetic_object(&mut self, value: i64) -> ObjectRef {
        let index = self.payloads.len();
        self.payloads.push(value);
        ObjectRef {
            index,
            info: &INT_INFO,
        }
    }

    fn type_metadata(&self, object: &ObjectRef) -> InfoPtr {
        InfoPtr::of(object.info)
    }
}
