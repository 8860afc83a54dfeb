use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::{
    errors::GenerateError,
    metrics::GenerationStats,
    orchestrator::Orchestrator,
  },
  ui::{Colors, GenerateCommand},
  utils::spec::load_documents,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone, bon::Builder)]
pub struct GenerateConfig {
  #[builder(into)]
  pub input: PathBuf,
  #[builder(into)]
  pub output: PathBuf,
  #[builder(default)]
  pub verbose: bool,
  #[builder(default)]
  pub quiet: bool,
}

impl GenerateConfig {
  #[must_use]
  pub fn from_command(command: GenerateCommand) -> Self {
    let GenerateCommand {
      input,
      output,
      verbose,
      quiet,
    } = command;

    Self::builder()
      .input(input)
      .output(output)
      .verbose(verbose)
      .quiet(quiet)
      .build()
  }

  async fn write_output(&self, code: String) -> anyhow::Result<()> {
    if let Some(parent) = self.output.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&self.output, code)
      .await
      .with_context(|| format!("failed to write {}", self.output.display()))
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI document from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_generating(&self) {
    self.info(&"Generating TypeScript declarations...".with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Declarations generated:", stats.declarations_generated.to_string());
    self.stat("", format!("{} namespaces", stats.namespaces_generated));
    self.stat("", format!("{} interfaces", stats.interfaces_generated));
    self.stat("", format!("{} type aliases", stats.type_aliases_generated));
    if stats.index_signatures_generated > 0 {
      self.stat("", format!("{} index signatures", stats.index_signatures_generated));
    }
    self.stat("Operations converted:", stats.operations_converted.to_string());
    if stats.additional_statements > 0 {
      self.stat("", format!("{} operation declarations", stats.additional_statements));
    }
    self.stat("References resolved:", stats.references_resolved.to_string());
    if self.config.verbose || stats.documents_loaded > 1 {
      self.stat("Documents loaded:", stats.documents_loaded.to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_cycles(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    let mut printed_header = false;
    for warning in &stats.warnings {
      if !warning.is_skipped_item() && !self.config.verbose {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let label = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  /// Errors are printed even in quiet mode.
  fn report_error(&self, error: &GenerateError) {
    eprintln!(
      "{} {}",
      "Error:".with(self.colors.error()),
      error.to_string().with(self.colors.primary())
    );

    if self.config.verbose
      && let Some(parent) = error.parent()
      && let Ok(pretty) = serde_json::to_string_pretty(parent)
    {
      eprintln!("{}", "Parent schema:".with(self.colors.label()));
      eprintln!("{}", pretty.with(self.colors.info()));
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated TypeScript declarations".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let documents = load_documents(&config.input).await?;

  logger.log_generating();
  let orchestrator = Orchestrator::new(documents);
  let source_path = config.input.display().to_string();

  let (code, stats) = match orchestrator.generate_with_header(&source_path) {
    Ok(generated) => generated,
    Err(error) => {
      logger.report_error(&error);
      return Err(anyhow::Error::new(error).context(format!("failed to generate declarations for {source_path}")));
    }
  };
  logger.print_statistics(&stats);

  logger.log_writing();
  config.write_output(code).await?;

  logger.log_success();
  Ok(())
}
