//! JSON output

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::tree::{Inventory, Tree};

use super::format::ReportWriter;

/// Writes the tree mapping as pretty-printed JSON (two-space indent, UTF-8).
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonWriter;

impl JsonWriter {
    pub fn write_to<W: Write>(&self, tree: &Tree, mut out: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut out, tree)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}

impl ReportWriter for JsonWriter {
    fn save(&self, inventory: &Inventory, target: &Path) -> Result<()> {
        let file = File::create(target)?;
        self.write_to(&inventory.tree, BufWriter::new(file))
    }
}
