//! Quench command-line driver.
//!
//! Builds a hard-parton ensemble, evolves it through a Bjorken medium, and
//! writes the surviving partons (and optionally energy-loss currents) as
//! ASCII run files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use quench::engine::{
    boost_to_lab, build_ensemble, free_stream, BuildReport, BuilderConfig, EvolutionConfig,
    EvolutionDriver,
};
use quench::kernels::{FreeStreaming, ThermalDrag};
use quench::output::{write_run, OutputFormat};
use quench::sources::{BjorkenMedium, HeavyQuarkSource, PowerLawGenerator};
use quench::transport::{CoefficientTable, Coupling, Transport, TransportParams};
use quench::types::{Ensemble, Medium, TriggerBins, GEV_INV_PER_FM};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE_HINT: &str = "invalid configuration (see `quench --help`)";

#[derive(Parser)]
#[command(name = "quench")]
#[command(about = "Time-stepped transport of hard partons through a heavy-ion medium")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate hard events, evolve them through the medium, and write them out
    Evolve {
        #[command(flatten)]
        run: RunArgs,
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        medium: MediumArgs,
    },

    /// Generate hard events and write them out without any medium
    Vacuum {
        #[command(flatten)]
        run: RunArgs,
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Evolve charm quarks initially at rest
    HeavyQuark {
        #[command(flatten)]
        run: RunArgs,
        #[command(flatten)]
        medium: MediumArgs,

        /// Number of charm quarks
        #[arg(long, default_value = "1000")]
        count: usize,

        /// Radius of the initial transverse disc, fm
        #[arg(long, default_value = "6.0")]
        disc_radius: f64,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Generated events per trigger bin
    #[arg(long, default_value = "100")]
    events: usize,

    /// Hard scale handed to generated particles, GeV
    #[arg(long, default_value = "0.4")]
    q0: f64,

    /// Medium-scale multiplier mu/T
    #[arg(long, default_value = "1.5")]
    mu_t: f64,

    /// Thermalization threshold in units of T
    #[arg(long, default_value = "4.0")]
    theta: f64,

    /// Fixed coupling; negative selects the running coupling
    #[arg(long, default_value = "-1.0", allow_hyphen_values = true)]
    afix: f64,

    /// Soft cutoff in units of the medium scale
    #[arg(long, default_value = "4.0")]
    cut: f64,

    /// Transport stopping temperature, GeV
    #[arg(long, default_value = "0.17")]
    tf: f64,

    /// Base random seed
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Directory for run files
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Run id used in file names (defaults to the process id)
    #[arg(long)]
    run_id: Option<u32>,

    /// Particle file layout (compact, extended)
    #[arg(long, default_value = "compact")]
    format: OutputFormat,

    /// Use jet trigger bins and record energy-loss currents
    #[arg(long)]
    jet: bool,
}

#[derive(Args)]
struct SourceArgs {
    /// Power-law scale p0, GeV
    #[arg(long, default_value = "2.0")]
    p0: f64,

    /// Power-law exponent
    #[arg(long, default_value = "6.0")]
    power: f64,

    /// Half-width of the rapidity acceptance
    #[arg(long, default_value = "1.0")]
    y_max: f64,

    /// Radius of the production-vertex disc, fm
    #[arg(long, default_value = "5.0")]
    vertex_radius: f64,
}

#[derive(Args)]
struct MediumArgs {
    /// Initial medium temperature, GeV
    #[arg(long, default_value = "0.45")]
    t0: f64,

    /// Medium start time, fm/c
    #[arg(long, default_value = "0.6")]
    tau0: f64,

    /// Snapshot spacing, fm/c
    #[arg(long, default_value = "0.1")]
    dtau: f64,

    /// Medium end time, fm/c
    #[arg(long, default_value = "10.0")]
    tau_end: f64,

    /// Transverse radius of the medium, fm (unbounded if omitted)
    #[arg(long)]
    radius: Option<f64>,

    /// Transport kernel
    #[arg(long, value_enum, default_value = "free")]
    kernel: KernelKind,

    /// Drag coefficient table A(T), required by the drag kernel
    #[arg(long)]
    coefficient_table: Option<PathBuf>,

    /// Evolve events in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum KernelKind {
    Free,
    Drag,
}

impl RunArgs {
    fn params(&self) -> TransportParams {
        TransportParams {
            q0: self.q0,
            mu_t: self.mu_t,
            coupling: Coupling::from_afix(self.afix),
            cut: self.cut,
            theta: self.theta,
            tf: self.tf,
        }
    }

    fn builder_config(&self) -> BuilderConfig {
        BuilderConfig {
            events_per_bin: self.events,
            q0: self.q0,
            tf: self.tf,
            seed: self.seed,
        }
    }

    fn run_id(&self) -> u32 {
        self.run_id.unwrap_or_else(std::process::id)
    }

    fn check_output(&self) -> Result<()> {
        if !self.output.is_dir() {
            bail!(
                "{USAGE_HINT}: output directory {} does not exist",
                self.output.display()
            );
        }
        Ok(())
    }

    fn write(&self, ensemble: &Ensemble) -> Result<()> {
        let written = write_run(&self.output, self.run_id(), ensemble, self.format, self.jet)
            .context("failed to write run files")?;
        for path in written {
            println!("{}", path.display());
        }
        Ok(())
    }
}

impl SourceArgs {
    fn generator(&self) -> Result<PowerLawGenerator> {
        let generator = PowerLawGenerator::new(self.p0, self.power)
            .context(USAGE_HINT)?
            .with_rapidity_range(self.y_max)
            .with_vertex_radius(self.vertex_radius * GEV_INV_PER_FM);
        Ok(generator)
    }

    fn build(&self, run: &RunArgs) -> Result<(Ensemble, BuildReport)> {
        let bins = TriggerBins::for_jets(run.jet);
        let prototype = self.generator()?;
        build_ensemble(&bins, &run.builder_config(), |_| Ok(prototype.clone()))
            .context("failed to build ensemble")
    }
}

impl MediumArgs {
    fn medium(&self) -> Result<BjorkenMedium> {
        let medium = BjorkenMedium::new(
            self.t0,
            self.tau0 * GEV_INV_PER_FM,
            self.dtau * GEV_INV_PER_FM,
            self.tau_end * GEV_INV_PER_FM,
        )
        .context(USAGE_HINT)?;
        Ok(match self.radius {
            Some(r) => medium.with_radius(r * GEV_INV_PER_FM),
            None => medium,
        })
    }

    fn kernel(&self) -> Result<Box<dyn Transport>> {
        match (self.kernel, &self.coefficient_table) {
            (KernelKind::Free, None) => Ok(Box::new(FreeStreaming)),
            (KernelKind::Free, Some(path)) => {
                warn!(path = %path.display(), "Coefficient table ignored by free streaming");
                Ok(Box::new(FreeStreaming))
            }
            (KernelKind::Drag, None) => {
                bail!("{USAGE_HINT}: --kernel drag requires --coefficient-table")
            }
            (KernelKind::Drag, Some(path)) => Ok(Box::new(drag_kernel(path)?)),
        }
    }

    fn config(&self, run: &RunArgs) -> EvolutionConfig {
        EvolutionConfig {
            tf: run.tf,
            record_currents: run.jet,
            seed: run.seed,
            parallel: self.parallel,
            ..EvolutionConfig::default()
        }
    }
}

fn drag_kernel(path: &Path) -> Result<ThermalDrag> {
    let table = CoefficientTable::load(path).context(USAGE_HINT)?;
    info!(path = %path.display(), points = table.len(), "Loaded coefficient table");
    ThermalDrag::builder()
        .table(table)
        .build()
        .map_err(anyhow::Error::msg)
        .context(USAGE_HINT)
}

fn evolve<M: Medium>(
    medium: M,
    kernel: Box<dyn Transport>,
    params: TransportParams,
    config: EvolutionConfig,
    ensemble: Ensemble,
) -> Result<Ensemble> {
    let mut driver =
        EvolutionDriver::new(medium, kernel, params, config, ensemble).context(USAGE_HINT)?;
    let report = driver.evolve().context("evolution failed")?;
    info!(
        passes = report.pass_count(),
        updates = report.total_active(),
        absorbed = report.total_absorbed(),
        elapsed_ms = report.elapsed_us() / 1000,
        "Run summary"
    );
    let mut ensemble = driver.into_ensemble();
    boost_to_lab(&mut ensemble);
    Ok(ensemble)
}

fn log_params(params: &TransportParams) {
    info!(params = ?params.named(), "Transport parameters");
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Evolve {
            run,
            source,
            medium,
        } => {
            run.check_output()?;
            let params = run.params();
            params.validate().context(USAGE_HINT)?;
            log_params(&params);
            let kernel = medium.kernel()?;
            let config = medium.config(&run);
            let bjorken = medium.medium()?;

            let (mut ensemble, report) = source.build(&run)?;
            info!(
                events = ensemble.len(),
                failed = report.failed(),
                "Ensemble built"
            );
            free_stream(&mut ensemble, bjorken.initial_time());
            let ensemble = evolve(bjorken, kernel, params, config, ensemble)?;
            run.write(&ensemble)
        }

        Commands::Vacuum { run, source } => {
            run.check_output()?;
            let (mut ensemble, report) = source.build(&run)?;
            info!(
                events = ensemble.len(),
                failed = report.failed(),
                "Ensemble built"
            );
            boost_to_lab(&mut ensemble);
            run.write(&ensemble)
        }

        Commands::HeavyQuark {
            run,
            medium,
            count,
            disc_radius,
        } => {
            run.check_output()?;
            let params = run.params();
            params.validate().context(USAGE_HINT)?;
            log_params(&params);
            let kernel = medium.kernel()?;
            let config = medium.config(&run);
            let bjorken = medium.medium()?;

            let ensemble = HeavyQuarkSource::new(count, disc_radius * GEV_INV_PER_FM)
                .context(USAGE_HINT)?
                .ensemble(bjorken.initial_time(), run.tf, run.seed);
            let ensemble = evolve(bjorken, kernel, params, config, ensemble)?;
            run.write(&ensemble)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
