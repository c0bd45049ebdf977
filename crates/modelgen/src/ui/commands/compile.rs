use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  compiler::{CodegenConfig, CompilationStats, CompiledModels, ModelCompiler, descriptor::AccessorKind},
  ui::{Colors, CompileCommand},
  utils::GraphLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct CompileConfig {
  pub input: PathBuf,
  pub output: Option<PathBuf>,
  pub codegen: CodegenConfig,
  pub verbose: bool,
  pub quiet: bool,
}

impl CompileConfig {
  pub fn from_command(command: CompileCommand) -> Self {
    let CompileCommand {
      input,
      output,
      no_json,
      xml,
      storage_pipeline,
      verbose,
      quiet,
    } = command;

    Self {
      input,
      output,
      codegen: CodegenConfig {
        json_serialization: !no_json,
        xml_serialization: xml,
        storage_pipeline,
      },
      verbose,
      quiet,
    }
  }
}

struct CompileLogger<'a> {
  config: &'a CompileConfig,
  colors: &'a Colors,
}

impl<'a> CompileLogger<'a> {
  fn new(config: &'a CompileConfig, colors: &'a Colors) -> Self {
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
      &format!("Loading schema graph from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_compiling(&self) {
    self.info(&"Compiling model descriptors...".with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &CompilationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Models built:", stats.models_built.to_string());
    if stats.polymorphic_roots > 0 {
      self.stat("Polymorphic roots:", stats.polymorphic_roots.to_string());
      self.stat("Variants registered:", stats.variants_registered.to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_cycles(stats);
    self.print_warnings(stats);
  }

  fn print_models(&self, compiled: &CompiledModels) {
    if self.config.quiet || !self.config.verbose {
      return;
    }

    for (_, model) in compiled.arena.iter() {
      let breakdown = [AccessorKind::Own, AccessorKind::Proxy, AccessorKind::Inlined]
        .into_iter()
        .map(|kind| {
          let count = model.virtuals.iter().filter(|v| v.kind == kind).count();
          format!("{count} {kind}")
        })
        .collect::<Vec<_>>()
        .join(", ");
      println!(
        "              {}: {}",
        model.class_name.as_str().with(self.colors.accent()),
        breakdown.with(self.colors.info())
      );
    }
  }

  fn print_cycles(&self, stats: &CompilationStats) {
    if stats.reference_cycles.is_empty() {
      return;
    }

    self.stat("Reference cycles:", stats.reference_cycles.len().to_string());

    if self.config.verbose {
      for (i, cycle) in stats.reference_cycles.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  fn print_warnings(&self, stats: &CompilationStats) {
    if stats.warnings.is_empty() || !self.config.verbose {
      return;
    }

    println!();
    for warning in &stats.warnings {
      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.accent()),
        warning.as_str().with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self, output: &PathBuf) {
    self.info(
      &format!("Writing to: {}", output.display())
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
        "Successfully compiled model descriptors".with(self.colors.success())
      );
    }
  }
}

pub async fn compile_models(config: CompileConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = CompileLogger::new(&config, colors);

  logger.log_loading();
  let graph = GraphLoader::open(&config.input).await?.parse()?;

  logger.log_compiling();
  let compiler = ModelCompiler::new(graph, config.codegen);
  let compiled = compiler.compile()?;
  logger.print_statistics(&compiled.stats);
  logger.print_models(&compiled);

  let payload = serde_json::to_string_pretty(&compiled.arena)?;
  match &config.output {
    Some(path) => {
      logger.log_writing(path);
      if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
      }
      tokio::fs::write(path, payload).await?;
    }
    None => println!("{payload}"),
  }

  logger.log_success();
  Ok(())
}
