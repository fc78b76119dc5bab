//! Energy-loss current writer.

use std::io::Write;

use quench_core::Ensemble;

use crate::error::OutputError;

/// Streams loss currents as `event etas E px py pz` lines.
pub struct CurrentWriter<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> CurrentWriter<W> {
    /// Create a writer, immediately writing the header.
    pub fn new(mut writer: W) -> Result<Self, OutputError> {
        writeln!(writer, "# quench currents")?;
        writeln!(writer, "# event etas E px py pz")?;
        Ok(Self { writer, written: 0 })
    }

    /// Write every current of every event, tagged with the event index.
    /// Returns the number of lines written.
    pub fn write_ensemble(&mut self, ensemble: &Ensemble) -> Result<usize, OutputError> {
        let mut n = 0;
        for (index, event) in ensemble.iter().enumerate() {
            for c in &event.clist {
                writeln!(
                    self.writer,
                    "{} {} {} {} {} {}",
                    index, c.etas, c.p.t, c.p.x, c.p.y, c.p.z
                )?;
                n += 1;
            }
        }
        self.written += n as u64;
        Ok(n)
    }

    /// Number of current lines written.
    pub fn currents_written(&self) -> u64 {
        self.written
    }

    /// Flush and return the sink.
    pub fn finish(mut self) -> Result<W, OutputError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
