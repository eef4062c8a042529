use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use openslo_sdk::codec::{self, ObjectFormat};
use openslo_sdk::config::{load_config, ReferenceConfig, Relation};
use openslo_sdk::errors::{OpenSloError, Result};
use openslo_sdk::logging;
use openslo_sdk::resolution::{ReferenceExporter, ReferenceInliner};
use openslo_sdk::source::{self, STDIN};
use openslo_sdk::validation;

/// Inline and export references between OpenSLO objects.
#[derive(Parser)]
#[command(name = "openslo", about = "Inline and export references between OpenSLO objects")]
struct Cli {
    /// Log resolution steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace references with inline copies of the referenced objects
    Inline {
        /// Files or directories to read, '-' for stdin (default: stdin)
        paths: Vec<PathBuf>,
        /// Input format (yaml or json), inferred from the extension by default
        #[arg(short, long)]
        format: Option<String>,
        /// Output format (yaml or json), defaults to the input format
        #[arg(short, long)]
        output_format: Option<String>,
        /// Drop objects that were inlined somewhere from the output
        #[arg(short, long)]
        remove_referenced: bool,
        /// Extra files or directories to resolve references against
        #[arg(long)]
        references: Vec<PathBuf>,
        /// Reference config file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Relation to leave untouched, may be repeated
        #[arg(long, value_name = "RELATION")]
        skip: Vec<String>,
        /// Do not validate objects before inlining
        #[arg(long)]
        no_validate: bool,
    },
    /// Replace inline definitions with references and emit them as objects
    Export {
        /// Files or directories to read, '-' for stdin (default: stdin)
        paths: Vec<PathBuf>,
        /// Input format (yaml or json), inferred from the extension by default
        #[arg(short, long)]
        format: Option<String>,
        /// Output format (yaml or json), defaults to the input format
        #[arg(short, long)]
        output_format: Option<String>,
        /// Reference config file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Relation to leave untouched, may be repeated
        #[arg(long, value_name = "RELATION")]
        skip: Vec<String>,
    },
    /// Check objects for structural errors
    Validate {
        /// Files or directories to read, '-' for stdin (default: stdin)
        paths: Vec<PathBuf>,
        /// Input format (yaml or json), inferred from the extension by default
        #[arg(short, long)]
        format: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Inline {
            paths,
            format,
            output_format,
            remove_referenced,
            references,
            config,
            skip,
            no_validate,
        } => {
            let format = parse_format(format)?;
            let objects = source::read_objects(&input_paths(paths), format)?;
            if !no_validate {
                validation::validate(&objects)?;
            }

            let mut universe = objects.clone();
            if !references.is_empty() {
                universe.extend(source::read_objects(&references, format)?);
            }

            let mut inliner = ReferenceInliner::new(&objects)
                .with_config(build_config(config, &skip)?)
                .with_universe(&universe);
            if remove_referenced {
                inliner = inliner.remove_referenced_objects();
            }
            let inlined = inliner.inline()?;

            write_objects(&inlined, output_format, format)?;
        }
        Commands::Export {
            paths,
            format,
            output_format,
            config,
            skip,
        } => {
            let format = parse_format(format)?;
            let objects = source::read_objects(&input_paths(paths), format)?;
            let exported = ReferenceExporter::new(&objects)
                .with_config(build_config(config, &skip)?)
                .export();
            write_objects(&exported, output_format, format)?;
        }
        Commands::Validate { paths, format } => {
            let format = parse_format(format)?;
            let objects = source::read_objects(&input_paths(paths), format)?;
            validation::validate(&objects)?;
            println!("{} objects are valid", objects.len());
        }
    }
    Ok(())
}

fn input_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![PathBuf::from(STDIN)]
    } else {
        paths
    }
}

fn parse_format(format: Option<String>) -> Result<Option<ObjectFormat>> {
    let Some(format) = format else {
        return Ok(None);
    };
    ObjectFormat::from_str(&format)
        .map(Some)
        .ok_or_else(|| OpenSloError::Config {
            message: format!("unknown format '{}', expected yaml or json", format),
        })
}

/// Loads the config file, if any, then disables every skipped relation.
fn build_config(path: Option<PathBuf>, skip: &[String]) -> Result<ReferenceConfig> {
    let mut config = match path {
        Some(path) => load_config(&path)?,
        None => ReferenceConfig::default(),
    };
    for name in skip {
        let relation = Relation::from_str(name).ok_or_else(|| {
            let known: Vec<&str> = Relation::ALL.iter().map(|r| r.as_str()).collect();
            OpenSloError::Config {
                message: format!(
                    "unknown relation '{}', expected one of: {}",
                    name,
                    known.join(", ")
                ),
            }
        })?;
        config.set(relation, false);
    }
    Ok(config)
}

fn write_objects(
    objects: &[openslo_sdk::types::Object],
    output_format: Option<String>,
    input_format: Option<ObjectFormat>,
) -> Result<()> {
    let format = parse_format(output_format)?
        .or(input_format)
        .unwrap_or_default();
    print!("{}", codec::encode(objects, format)?);
    Ok(())
}
