use anyhow::Result;
use clap::{Parser, Subcommand};
use coarbitrator::classify::{self, ClassifyArgs};

#[derive(Parser)]
#[command(name = "coarbitrator")]
#[command(version = "0.1.0")]
#[command(
    about = "Decides whether conserved-domain hits mark a query as a domain of interest",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every query in a tabular hit file
    Classify(ClassifyArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify(args) => {
            classify::run(args)?;
        }
    }
    Ok(())
}
