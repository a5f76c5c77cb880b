use anyhow::Result;
use std::io::Write;

use crate::model::ResultItem;

/// Receives the listing produced for one query.
pub trait EntryConsumer {
    fn render(&mut self, items: &[ResultItem]) -> Result<()>;
}

/// Writes a JSON array for a host process to pick up.
pub struct JsonConsumer<W: Write> {
    out: W,
}

impl<W: Write> JsonConsumer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> EntryConsumer for JsonConsumer<W> {
    fn render(&mut self, items: &[ResultItem]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, items)?;
        writeln!(self.out)?;
        Ok(())
    }
}

/// One tab separated line per item: name, description, icon, command.
pub struct PlainConsumer<W: Write> {
    out: W,
}

impl<W: Write> PlainConsumer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> EntryConsumer for PlainConsumer<W> {
    fn render(&mut self, items: &[ResultItem]) -> Result<()> {
        for item in items {
            writeln!(
                self.out,
                "{}\t{}\t{}\t{}",
                item.name, item.description, item.icon, item.on_activate
            )?;
        }
        Ok(())
    }
}
