use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::provenance::{Field, ProvenanceBufferNode};

/// Write a chain of nodes in the requested format
pub fn write_nodes<W: Write>(
    writer: W,
    head: &ProvenanceBufferNode,
    first_index: u32,
    format: OutputFormat,
) -> Result<()> {
    let mut writer = BufWriter::new(writer);

    match format {
        OutputFormat::Text => write_text(&mut writer, head, first_index)?,
        OutputFormat::Raw => write_raw(&mut writer, head)?,
    }

    writer.flush()?;
    Ok(())
}

/// One tab-separated line per entry: index, info pointer, then the six strings
pub fn write_text<W: Write>(
    writer: &mut W,
    head: &ProvenanceBufferNode,
    first_index: u32,
) -> Result<()> {
    let mut index = first_index;
    for node in head {
        for entry in node.entries() {
            let resolved = node.resolve(entry)?;
            write!(writer, "{}\t{}", index, resolved.info)?;
            for field in Field::ALL {
                writer.write_all(b"\t")?;
                writer.write_all(resolved.field(field))?;
            }
            writer.write_all(b"\n")?;
            index += 1;
        }
    }
    Ok(())
}

/// String-table bytes of every node, back to back
pub fn write_raw<W: Write>(writer: &mut W, head: &ProvenanceBufferNode) -> io::Result<()> {
    for node in head {
        writer.write_all(node.string_table())?;
    }
    Ok(())
}

/// Open output file or return stdout
pub fn open_output(config: &Config) -> io::Result<Box<dyn Write>> {
    match &config.output_file {
        Some(path) => {
            let file = File::create(path)?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout())),
    }
}
