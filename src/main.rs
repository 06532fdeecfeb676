use clap::Parser;
use miette::Result;
use retrotile::cli::{convert, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    convert::run(cli)?;
    Ok(())
}
