//! # Bolt Capacity CLI
//!
//! Command-line front end for `bolt_core`: evaluates a bolt, keeps a history
//! of saved calculations and exports it as CSV.
//!
//! ```bash
//! boltcalc calc --grade 8.8 --diameter 20 --threaded-planes 1 --save
//! boltcalc history
//! boltcalc export --output bolts.csv
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bolt_core::calculations::bolt::STANDARD_DIAMETERS_MM;
use bolt_core::equations::generate_equations_markdown;
use bolt_core::{
    calculate, export_history_csv, load_or_create, save_project, BoltGrade, BoltInput, BoltResult, CalcResult,
    FileLock, GlobalSettings, Project,
};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "boltcalc", version, about = "Bolt shear, tension and detailing calculator")]
struct Cli {
    /// History file for saved calculations
    #[arg(long, global = true, env = "BOLT_HISTORY", default_value = "bolt_history.bolt")]
    history: PathBuf,

    /// User identifier recorded in the history lock
    #[arg(long, global = true, env = "BOLT_USER", default_value = "boltcalc")]
    user: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one bolt configuration
    Calc {
        /// Bolt grade (4.6 or 8.8)
        #[arg(long, short)]
        grade: Option<String>,

        /// Nominal diameter (mm)
        #[arg(long, short)]
        diameter: f64,

        /// Connection length used for kr (mm)
        #[arg(long, default_value_t = 0.0)]
        threaded_length: f64,

        /// Shear planes through the threads
        #[arg(long, default_value_t = 1)]
        threaded_planes: u32,

        /// Shear planes through the plain shank
        #[arg(long, default_value_t = 0)]
        unthreaded_planes: u32,

        /// Label stored with the calculation
        #[arg(long, default_value = "")]
        label: String,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Append the calculation to the history file
        #[arg(long)]
        save: bool,
    },
    /// List supported grades and common diameters
    Grades,
    /// List saved calculations, newest first
    History,
    /// Export the history as CSV
    Export {
        /// Output CSV path
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Remove every saved calculation
    Clear,
    /// Print the equation reference
    Equations,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CalcResult<()> {
    match &cli.command {
        Command::Calc {
            grade,
            diameter,
            threaded_length,
            threaded_planes,
            unthreaded_planes,
            label,
            json,
            save,
        } => {
            let settings = history_settings(&cli.history);
            let grade = grade
                .clone()
                .unwrap_or_else(|| settings.default_grade.code().to_string());
            let input = BoltInput {
                label: label.clone(),
                grade,
                diameter_mm: *diameter,
                threaded_length_mm: *threaded_length,
                threaded_planes: *threaded_planes,
                unthreaded_planes: *unthreaded_planes,
            };
            let result = calculate(&input)?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_report(&input, &result, &settings);
            }

            if *save {
                let id = with_history(cli, |project| Ok(project.add_calculation(input, result)))?;
                if !*json {
                    println!();
                    println!("Saved as {} in {}", id, cli.history.display());
                }
            }
            Ok(())
        }
        Command::Grades => {
            println!("{:<10} {:>9}", "Grade", "fuf (MPa)");
            for grade in BoltGrade::ALL {
                println!("{:<10} {:>9.0}", grade.display_name(), grade.properties().fuf_mpa);
            }
            let sizes: Vec<String> = STANDARD_DIAMETERS_MM.iter().map(|d| format!("M{}", d)).collect();
            println!();
            println!("Common sizes: {}", sizes.join(", "));
            Ok(())
        }
        Command::History => {
            let project = load_or_create(&cli.history)?;
            print_history(&project);
            Ok(())
        }
        Command::Export { output } => {
            let project = load_or_create(&cli.history)?;
            let rows = export_history_csv(&project, output)?;
            println!("Exported {} calculation(s) to {}", rows, output.display());
            Ok(())
        }
        Command::Clear => {
            let removed = with_history(cli, |project| {
                let count = project.item_count();
                project.clear();
                Ok(count)
            })?;
            println!("Removed {} calculation(s)", removed);
            Ok(())
        }
        Command::Equations => {
            print!("{}", generate_equations_markdown());
            Ok(())
        }
    }
}

/// Presentation settings from the history file, or defaults if it cannot be read.
fn history_settings(path: &Path) -> GlobalSettings {
    match load_or_create(path) {
        Ok(project) => project.settings,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "using default settings");
            GlobalSettings::default()
        }
    }
}

/// Load the history under a lock, apply `f`, and save it back.
fn with_history<T>(cli: &Cli, f: impl FnOnce(&mut Project) -> CalcResult<T>) -> CalcResult<T> {
    let path: &Path = &cli.history;
    let _lock = FileLock::acquire(path, cli.user.as_str())?;
    let mut project = load_or_create(path)?;
    let value = f(&mut project)?;
    save_project(&project, path)?;
    debug!(path = %path.display(), "history updated");
    Ok(value)
}

fn print_report(input: &BoltInput, result: &BoltResult, settings: &GlobalSettings) {
    let r = |v: f64| settings.round_for_display(v);
    let limits = &result.detailing;

    println!("═══════════════════════════════════════");
    println!("  BOLT CAPACITY ({})", settings.standard);
    println!("═══════════════════════════════════════");
    if !input.label.is_empty() {
        println!("  Label:    {}", input.label);
    }
    println!();
    println!("Input:");
    println!("  Bolt:     M{} grade {}", input.diameter_mm, result.grade);
    println!("  Length:   {} mm", input.threaded_length_mm);
    println!(
        "  Planes:   {} threaded, {} plain shank",
        input.threaded_planes, input.unthreaded_planes
    );
    println!();
    println!("Properties:");
    println!("  fuf = {} MPa", result.fuf_mpa);
    println!("  Ac  = {} mm²", r(result.geometry.ac_mm2));
    println!("  Ao  = {} mm²", r(result.geometry.ao_mm2));
    println!("  kr  = {}", r(result.kr));
    println!();
    println!("Design Capacities (φ = 0.8):");
    println!("  Shear:    {} kN", r(result.shear_capacity_kn));
    println!("  Tension:  {} kN", r(result.tensile_capacity_kn));
    println!();
    println!("Detailing Limits:");
    println!("  Pitch:            {} to {} mm", r(limits.min_pitch_mm), r(limits.max_pitch_mm));
    println!("  Edge (sheared):   {} mm", r(limits.min_edge_sheared_mm));
    println!("  Edge (rolled):    {} mm", r(limits.min_edge_rolled_mm));
    println!("  Edge (section):   {} mm", r(limits.min_edge_rolled_section_mm));
    println!("═══════════════════════════════════════");
}

fn print_history(project: &Project) {
    let history = project.history();
    if history.is_empty() {
        println!("No saved calculations.");
        return;
    }

    let r = |v: f64| project.settings.round_for_display(v);
    for (id, saved) in history {
        let input = saved.bolt_input();
        println!(
            "{}  {}  {:<16} M{} {}  V* {} kN  N* {} kN",
            saved.saved_at.format("%Y-%m-%d %H:%M"),
            id,
            input.label,
            input.diameter_mm,
            saved.result.grade,
            r(saved.result.shear_capacity_kn),
            r(saved.result.tensile_capacity_kn),
        );
    }
}
