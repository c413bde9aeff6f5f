use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use groundwork::Stack;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Bootstrap new projects from a development environment template", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bootstrap a new project from the template
    New {
        /// Project name (kebab-case)
        name: String,

        /// Application stack preset
        #[arg(long, value_enum)]
        stack: Stack,

        /// One-line project description
        #[arg(long)]
        description: String,

        /// Template directory (defaults to the current directory)
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Check host tooling the bootstrapper relies on
    Doctor,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::New {
            name,
            stack,
            description,
            template,
        } => commands::new::execute(&name, stack, &description, template)?,
        Commands::Doctor => commands::doctor::execute()?,
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
