mod commands;

use clap::{Parser, Subcommand};
use commands::serve::ServeCommand;

#[derive(Debug, Parser)]
#[command(author, version, about = "preconfapi", long_about = None)]
pub struct Cli {
    /// The command to execute
    #[clap(subcommand)]
    command: Commands,
}

/// Commands to be executed
#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(name = "serve")]
    Serve(ServeCommand),
}

pub fn run() -> eyre::Result<()> {
    let cli = Cli::parse();
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    match cli.command {
        Commands::Serve(serve) => runtime.block_on(serve.execute()),
    }
}
