#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use clap::Parser;

use crate::ui::{Cli, Colors, Commands, ListCommands, colors};

mod compiler;
mod error;
mod naming;
mod schema;
mod ui;
mod utils;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::List { list_command } => match list_command {
      ListCommands::Models { input } => ui::commands::list_models(&input, &colors).await?,
    },
    Commands::Compile(command) => {
      let config = ui::commands::CompileConfig::from_command(command);
      ui::commands::compile_models(config, &colors).await?;
    }
  }

  Ok(())
}
