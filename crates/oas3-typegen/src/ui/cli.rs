use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-typegen")]
#[command(author, version, about = "OpenAPI to TypeScript declaration generator")]
#[command(styles = Colors::clap_styles())]
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
  /// List information from an OpenAPI document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate TypeScript declarations from an OpenAPI document
  Generate(GenerateCommand),
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  /// Path to the OpenAPI document (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Path where the generated declarations will be written
  #[arg(short, long, value_name = "FILE")]
  pub output: PathBuf,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations declared under `paths`
  Operations {
    /// Path to the OpenAPI document (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_generate() -> anyhow::Result<()> {
    let cli = Cli::try_parse_from(["oas3-typegen", "generate", "-i", "api.yaml", "-o", "out/api.d.ts", "-v"])?;
    let Commands::Generate(command) = cli.command else {
      panic!("expected the generate command");
    };
    assert_eq!(command.input, PathBuf::from("api.yaml"));
    assert_eq!(command.output, PathBuf::from("out/api.d.ts"));
    assert!(command.verbose);
    assert!(!command.quiet);
    Ok(())
  }

  #[test]
  fn test_verbose_and_quiet_conflict() {
    let result = Cli::try_parse_from(["oas3-typegen", "generate", "-i", "a.json", "-o", "a.ts", "-v", "-q"]);
    assert!(result.is_err());
  }

  #[test]
  fn test_parse_list_operations() -> anyhow::Result<()> {
    let cli = Cli::try_parse_from(["oas3-typegen", "--color", "never", "list", "operations", "-i", "api.json"])?;
    assert!(matches!(
      cli.command,
      Commands::List {
        list_command: ListCommands::Operations { .. }
      }
    ));
    Ok(())
  }
}
