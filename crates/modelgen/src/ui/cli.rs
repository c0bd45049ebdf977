use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "modelgen")]
#[command(author, version, about = "Schema graph to model descriptor compiler")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from the schema graph
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Compile the schema graph into model descriptors
  Compile(CompileCommand),
}

#[derive(Args, Debug)]
pub struct CompileCommand {
  /// Path to the schema graph JSON file
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Path where the compiled descriptors are written (stdout when omitted)
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Disable project-wide JSON serialization support
  #[arg(long, default_value_t = false)]
  pub no_json: bool,

  /// Enable project-wide XML serialization support
  #[arg(long, default_value_t = false)]
  pub xml: bool,

  /// Route validation through the storage pipeline instead of generated
  /// validation routines
  #[arg(long, default_value_t = false)]
  pub storage_pipeline: bool,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List schemas with their parents and discriminator declarations
  Models {
    /// Path to the schema graph JSON file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
