//! # Spring CLI
//!
//! Command-line front end for spring_core: print a spring's properties,
//! size wire for a target rate, or save a design file.
//!
//! Lengths and rates on the command line are read in the selected unit
//! system (`--units imperial`: inches and lbf/in, `--units si`: meters and
//! N/m). Design files are always SI.
//!
//! ```text
//! spring_cli properties --mean-diameter 0.465 --wire-diameter 0.035 --free-length 1 --coils 8
//! spring_cli solve-wire --mean-diameter 0.465 --coils 12 --rate 2.6
//! spring_cli properties --input latch.json --units si --json
//! spring_cli units
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use spring_core::calculations::spring::{self, Spring, SpringInput, WireSizingInput};
use spring_core::file_io::{load_spring_input, save_design, DesignFile};
use spring_core::report::{Dimension, SpringReport, UnitSystem};
use spring_core::units::Unit;
use spring_core::{CalcError, Material};

#[derive(Parser, Debug)]
#[command(name = "spring_cli", version, about = "Helical compression spring calculator")]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every derived property of a spring
    Properties {
        /// Read the design from a JSON file instead of geometry flags
        #[arg(long, conflicts_with_all = ["mean_diameter", "wire_diameter", "free_length", "coils"])]
        input: Option<PathBuf>,

        #[command(flatten)]
        geometry: GeometryArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Solve for the wire diameter giving a target spring rate
    SolveWire {
        /// Mean coil diameter
        #[arg(long)]
        mean_diameter: f64,

        /// Active coil count
        #[arg(long)]
        coils: f64,

        /// Target spring rate (lbf/in or N/m)
        #[arg(long)]
        rate: f64,

        #[arg(long, default_value = "steel")]
        material: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the unit conversion table
    Units,

    /// Validate a design and write it to a JSON design file
    Save {
        /// Destination file
        path: PathBuf,

        #[command(flatten)]
        geometry: GeometryArgs,

        #[arg(long, default_value = "imperial")]
        units: UnitSystem,
    },
}

#[derive(Args, Debug)]
struct GeometryArgs {
    /// Mean coil diameter
    #[arg(long)]
    mean_diameter: Option<f64>,

    /// Wire diameter
    #[arg(long)]
    wire_diameter: Option<f64>,

    /// Free length
    #[arg(long)]
    free_length: Option<f64>,

    /// Active coil count
    #[arg(long)]
    coils: Option<f64>,

    #[arg(long, default_value = "steel")]
    material: String,

    /// Label printed in the report header
    #[arg(long, default_value = "")]
    name: String,
}

impl GeometryArgs {
    /// Convert flags given in `units` into an SI spring input
    fn to_input(&self, units: UnitSystem) -> Result<SpringInput> {
        let length = units.unit_for(Dimension::Length);
        Ok(SpringInput {
            label: self.name.clone(),
            material: self.material.clone(),
            mean_diameter_m: required(self.mean_diameter, "--mean-diameter")? * length.factor,
            wire_diameter_m: required(self.wire_diameter, "--wire-diameter")? * length.factor,
            free_length_m: required(self.free_length, "--free-length")? * length.factor,
            num_coils: required(self.coils, "--coils")?,
        })
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Unit system for inputs and report (si or imperial)
    #[arg(long, default_value = "imperial")]
    units: UnitSystem,

    /// Print JSON instead of a text report
    #[arg(long)]
    json: bool,
}

fn required(value: Option<f64>, flag: &str) -> Result<f64> {
    value.with_context(|| format!("missing required flag {flag} (or pass --input)"))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli.command) {
        eprintln!("Error: {err:#}");
        if let Some(calc_err) = err.downcast_ref::<CalcError>() {
            if let Ok(json) = serde_json::to_string_pretty(calc_err) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{json}");
            }
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Properties {
            input,
            geometry,
            output,
        } => {
            let spring_input = match input {
                Some(path) => load_spring_input(&path)
                    .with_context(|| format!("loading design from {}", path.display()))?,
                None => geometry.to_input(output.units)?,
            };
            print_properties(&spring_input, &output)
        }
        Command::SolveWire {
            mean_diameter,
            coils,
            rate,
            material,
            output,
        } => {
            let length = output.units.unit_for(Dimension::Length);
            let stiffness = output.units.unit_for(Dimension::Stiffness);
            let sizing = WireSizingInput {
                label: String::new(),
                material,
                mean_diameter_m: mean_diameter * length.factor,
                num_coils: coils,
                target_rate_n_per_m: rate * stiffness.factor,
            };
            let result = spring::solve_wire(&sizing)?;
            if output.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "The recommended wire diameter is: {:.3} {} (spring index {:.1}, {})",
                    length.from_si(result.wire_diameter_m),
                    length.label,
                    result.spring_index,
                    result.index_rating
                );
            }
            Ok(())
        }
        Command::Units => {
            for unit in Unit::ALL {
                println!(
                    "{:<18} {:<4} = {:e} {}",
                    unit.name(),
                    unit.symbol(),
                    unit.factor(),
                    unit.si_symbol()
                );
            }
            Ok(())
        }
        Command::Save {
            path,
            geometry,
            units,
        } => {
            let design = geometry.to_input(units)?;
            save_design(&DesignFile::new(design), &path)
                .with_context(|| format!("saving design to {}", path.display()))?;
            println!("Saved design to {}", path.display());
            Ok(())
        }
    }
}

fn print_properties(input: &SpringInput, output: &OutputArgs) -> Result<()> {
    let material = Material::from_name(&input.material)?;
    let spring: Spring<'_> = input.build(&material)?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&spring.evaluate()?)?);
    } else {
        let report = SpringReport::from_spring(input.label.clone(), &spring)?;
        print!("{}", report.render(output.units));
    }
    Ok(())
}
