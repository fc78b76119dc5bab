//! Weighted particle list and its ASCII writer.

use std::io::Write;

use quench_core::{Ensemble, Particle};

use crate::error::OutputError;
use crate::format::OutputFormat;

/// All particles of `ensemble`, event by event in creation order, each
/// stamped with its event's cross-section weight.
pub fn flatten(ensemble: &Ensemble) -> Vec<Particle> {
    ensemble
        .iter()
        .flat_map(|event| {
            event.plist.iter().map(move |p| {
                let mut p = p.clone();
                p.weight = event.sigma;
                p
            })
        })
        .collect()
}

/// Streams particles as ASCII lines to any `Write` sink.
///
/// The header is written on construction. Generic over `W: Write` so
/// tests can use `Vec<u8>` and runs can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use quench_core::{FourVector, Particle, SpaceTime};
/// use quench_output::{OscarWriter, OutputFormat};
///
/// let mut writer = OscarWriter::new(Vec::new(), OutputFormat::Compact).unwrap();
/// let mut p = Particle::new(21, FourVector::new(3.0, 3.0, 0.0, 0.0), SpaceTime::default());
/// p.weight = 0.5;
/// writer.write_particle(&p).unwrap();
/// assert_eq!(writer.particles_written(), 1);
///
/// let text = String::from_utf8(writer.finish().unwrap()).unwrap();
/// assert!(text.starts_with("# quench partons format 1"));
/// assert_eq!(text.lines().count(), 3);
/// ```
pub struct OscarWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    written: u64,
}

impl<W: Write> OscarWriter<W> {
    /// Create a writer, immediately writing the header.
    pub fn new(mut writer: W, format: OutputFormat) -> Result<Self, OutputError> {
        writeln!(writer, "# quench partons format {}", format.tag())?;
        writeln!(writer, "# {}", format.columns().join(" "))?;
        Ok(Self {
            writer,
            format,
            written: 0,
        })
    }

    /// Write one particle line. The weight column is the particle's own
    /// `weight` field.
    pub fn write_particle(&mut self, p: &Particle) -> Result<(), OutputError> {
        write!(
            self.writer,
            "{} {} {} {} {} {} {} {} {} {}",
            p.pid,
            p.x.tau,
            p.x.x,
            p.x.y,
            p.x.etas,
            p.p.xt(),
            p.p.phi(),
            p.p.pseudorapidity(),
            p.mass,
            p.weight,
        )?;
        if self.format == OutputFormat::Extended {
            write!(
                self.writer,
                " {} {} {} {} {} {} {}",
                p.q0, p.col, p.acol, p.p.t, p.p.x, p.p.y, p.p.z,
            )?;
        }
        writeln!(self.writer)?;
        self.written += 1;
        Ok(())
    }

    /// Flatten `ensemble` and write every particle. Returns the number of
    /// lines written.
    pub fn write_ensemble(&mut self, ensemble: &Ensemble) -> Result<usize, OutputError> {
        let particles = flatten(ensemble);
        for p in &particles {
            self.write_particle(p)?;
        }
        Ok(particles.len())
    }

    /// Number of particle lines written.
    pub fn particles_written(&self) -> u64 {
        self.written
    }

    /// Flush and return the sink.
    pub fn finish(mut self) -> Result<W, OutputError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
