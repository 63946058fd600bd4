use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use dm_app::{
    execute, report_summary, AppError, AppResult, MatchOutcome, MatchRequest, ReportCache,
};
use dm_report::DesignReport;

/// Speed of light in vacuum, m/s.
const C0_M_PER_S: f64 = 299_792_458.0;

#[derive(Parser)]
#[command(name = "dm-cli")]
#[command(about = "dualmatch CLI - two-frequency matching network synthesis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a request file without running the synthesis
    Validate {
        /// Path to the request YAML file
        request_path: PathBuf,
    },
    /// Run a synthesis request and print the ranked designs
    Run {
        /// Path to the request YAML file
        request_path: PathBuf,
        /// Emit the full response as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Skip the cache and force a fresh run
        #[arg(long)]
        no_cache: bool,
        /// Cache directory (defaults to .dualmatch/cache next to the request)
        #[arg(long)]
        cache_dir: Option<PathBuf>,
        /// Velocity factor for physical-length annotation (e.g. 0.66 for
        /// typical coax); omitted = electrical lengths only
        #[arg(long)]
        velocity_factor: Option<f64>,
    },
    /// Drop every cached response
    ClearCache {
        /// Cache directory
        cache_dir: PathBuf,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { request_path } => cmd_validate(&request_path),
        Commands::Run {
            request_path,
            json,
            no_cache,
            cache_dir,
            velocity_factor,
        } => cmd_run(&request_path, json, !no_cache, cache_dir, velocity_factor),
        Commands::ClearCache { cache_dir } => {
            ReportCache::new(cache_dir)?.clear()?;
            println!("cache cleared");
            Ok(())
        }
    }
}

fn load_request(path: &Path) -> AppResult<MatchRequest> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::RequestFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_yaml::from_str(&content)?)
}

fn cmd_validate(request_path: &Path) -> AppResult<()> {
    let request = load_request(request_path)?;
    request.compile()?;
    println!("request is valid");
    Ok(())
}

fn cmd_run(
    request_path: &Path,
    json: bool,
    use_cache: bool,
    cache_dir: Option<PathBuf>,
    velocity_factor: Option<f64>,
) -> AppResult<()> {
    let request = load_request(request_path)?;

    let cache = if use_cache {
        let store = match cache_dir {
            Some(dir) => ReportCache::new(dir)?,
            None => {
                let base = request_path.parent().unwrap_or_else(|| Path::new("."));
                ReportCache::for_dir(base)?
            }
        };
        Some(store)
    } else {
        None
    };

    let mut cached = None;
    if let Some(store) = cache.as_ref() {
        if store.has(&request)? {
            cached = Some(store.load(&request)?);
        }
    }
    let from_cache = cached.is_some();
    let response = match cached {
        Some(response) => response,
        None => {
            let response = execute(&request)?;
            if let Some(store) = cache.as_ref() {
                store.save(&request, &response)?;
            }
            response
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if from_cache {
        println!("(cached)");
    }
    if let Some(warning) = &response.warning {
        println!("warning: {warning}");
    }

    match &response.outcome {
        MatchOutcome::ConstraintViolation { raw_candidates } => {
            println!(
                "no feasible design under these constraints \
                 ({raw_candidates} candidates found before filtering)"
            );
        }
        MatchOutcome::Feasible { designs } if designs.is_empty() => {
            println!("no design converged in the scanned window");
        }
        MatchOutcome::Feasible { designs } => {
            print_designs(&request, designs, velocity_factor);
            let summary = report_summary(designs)?;
            println!(
                "{} designs; best VSWR {:.4}; max segment impedance {:.1}..{:.1} ohm",
                summary.design_count,
                summary.best_worst_vswr,
                summary.lowest_max_z0_ohm,
                summary.highest_max_z0_ohm,
            );
        }
    }

    let d = &response.diagnostics;
    println!(
        "scan: {} samples, {} solved, {} without root, {} diverged, {} degenerate",
        d.samples, d.solved, d.no_solution, d.diverged, d.skipped_degenerate
    );

    Ok(())
}

fn print_designs(request: &MatchRequest, designs: &[DesignReport], velocity_factor: Option<f64>) {
    for (rank, design) in designs.iter().enumerate() {
        println!(
            "#{:<3} scanned {:6.2} deg  branch {}  region {:<16} VSWR {:.4}/{:.4}",
            rank + 1,
            design.scanned_theta_deg,
            design.branch,
            design.region,
            design.vswr_f1,
            design.vswr_f2,
        );
        for segment in &design.segments {
            let physical = velocity_factor
                .map(|vf| {
                    format!(
                        "  ({:.2} mm)",
                        physical_length_m(segment.theta_f1_deg, request.f1_hz, vf) * 1e3
                    )
                })
                .unwrap_or_default();
            println!(
                "     {:<12} {:<12} {:8.3} ohm  {:7.3} deg @ f1{physical}",
                segment.name, segment.kind, segment.z0_ohm, segment.theta_f1_deg,
            );
        }
    }
}

/// Electrical length (degrees at `f_hz`) to physical length in meters for a
/// line with the given velocity factor. This is the caller-side conversion
/// the engine deliberately does not perform.
fn physical_length_m(theta_deg: f64, f_hz: f64, velocity_factor: f64) -> f64 {
    let wavelength_m = C0_M_PER_S * velocity_factor / f_hz;
    theta_deg / 360.0 * wavelength_m
}
