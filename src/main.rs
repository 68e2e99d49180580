use anyhow::Result;
use clap::Parser;
use sortstep::cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    cli::run(args).await
}
