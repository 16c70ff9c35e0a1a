//! Presentation Templates CLI
//!
//! Usage:
//!   presentation-templates [OPTIONS] <COMMAND>
//!
//! Commands:
//!   list             List built-in templates in display order
//!   show <ID>        Print a template's presentation style as JSON
//!   prompt <ID>      Print the combined generation prompt for a template
//!   lint             Run the consistency lint over the registry
//!
//! Options:
//!   -c, --config <FILE>  Registry configuration (TOML format)
//!   -v, --verbose        Increase log verbosity (repeatable)
//!   -h, --help           Print help

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;

use presentation_templates::builtin::register_builtins;
use presentation_templates::{RegistryBuilder, RegistryConfig, TemplateRegistry};

#[derive(Parser)]
#[command(name = "presentation-templates")]
#[command(about = "Inspect and lint the presentation template registry")]
struct Cli {
    /// Registry configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v warn, -vv info, -vvv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List templates in display order
    List,
    /// Print a template's presentation style as JSON
    Show {
        /// Template identifier
        id: String,
    },
    /// Print the generation prompt for a template
    Prompt {
        /// Template identifier
        id: String,
    },
    /// Run the consistency lint; exits non-zero in strict mode when warnings exist
    Lint,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => match RegistryConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => RegistryConfig::default(),
    };

    let registry = match load_registry(&config, matches!(cli.command, Command::Lint)) {
        Ok(r) => r,
        Err(message) => {
            eprintln!("Error: {}", message);
            process::exit(1);
        }
    };

    match cli.command {
        Command::List => {
            for entry in registry.list() {
                let preview = if registry.get_thumbnail(entry.filename.as_str()).is_some() {
                    "thumbnail"
                } else {
                    "placeholder"
                };
                println!("{:<24} {:<32} [{}]", entry.filename, entry.title, preview);
            }
        }
        Command::Show { id } => {
            let entry = registry.get(&id).unwrap_or_else(|e| exit_with(e));
            match entry.presentation_style.to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => exit_with(e),
            }
        }
        Command::Prompt { id } => {
            let prompt = registry.generation_prompt(&id).unwrap_or_else(|e| exit_with(e));
            println!("{}", prompt);
        }
        Command::Lint => {
            let warnings = registry.validate_consistency();
            for warning in &warnings {
                println!("{}", warning);
            }
            if warnings.is_empty() {
                println!("{} templates, no integrity warnings", registry.len());
            } else if config.strict {
                process::exit(1);
            }
        }
    }
}

/// Build the built-in registry under `config`
fn load_registry(config: &RegistryConfig, lint: bool) -> Result<TemplateRegistry, String> {
    // Lint prints every warning itself and applies strict mode to its exit code
    let config = config.clone().with_strict(config.strict && !lint);
    let mut builder = RegistryBuilder::with_config(config);
    register_builtins(&mut builder).map_err(|e| e.to_string())?;
    builder.build().map_err(|e| e.to_string())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn exit_with(err: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", err);
    process::exit(1);
}
