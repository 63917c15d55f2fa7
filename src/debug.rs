use std::io::{self, Write};

use crate::provenance::{Field, ProvenanceBufferNode, ProvenanceEntry};

/// Annotate one entry with its info pointer and field offsets
///
/// Format: `[<index>] info=<ptr> table_name=<off> ... src_loc=<off>`
pub fn debug_entry<W: Write>(writer: &mut W, index: u32, entry: &ProvenanceEntry) -> io::Result<()> {
    write!(writer, "[{}] info={}", index, entry.info)?;
    for field in Field::ALL {
        write!(writer, " {}={}", field, entry.field(field))?;
    }
    writeln!(writer)
}

/// Emit debug output for every node in a chain
///
/// `first_index` is the index of the first entry of the head node.
pub fn debug_nodes<W: Write>(
    writer: &mut W,
    head: &ProvenanceBufferNode,
    first_index: u32,
) -> io::Result<()> {
    let mut index = first_index;
    for (n, node) in head.iter().enumerate() {
        writeln!(
            writer,
            "node {}: {} entries, {} string bytes",
            n,
            node.count(),
            node.string_table().len()
        )?;
        for entry in node.entries() {
            debug_entry(writer, index, entry)?;
            index += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::SyntheticHeap;
    use crate::provenance::ProvenanceBufferBuilder;

    #[test]
    fn test_debug_entry_offsets() {
        let node = ProvenanceBufferBuilder::new(SyntheticHeap::new())
            .build_entries(1, 2)
            .unwrap();
        let mut output = Vec::new();
        debug_entry(&mut output, 1, &node.entries()[0]).unwrap();
        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.starts_with("[1] info=0x"));
        assert!(output_str.ends_with(
            " table_name=0 closure_desc=15 ty_desc=32 label=44 module_name=54 src_loc=65\n"
        ));
    }

    #[test]
    fn test_debug_nodes_header() {
        let node = ProvenanceBufferBuilder::new(SyntheticHeap::new())
            .build_entries(0, 2)
            .unwrap();
        let mut output = Vec::new();
        debug_nodes(&mut output, &node, 0).unwrap();
        let output_str = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output_str.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "node 0: 2 entries, 152 string bytes");
        assert!(lines[2].starts_with("[1] "));
    }
}
