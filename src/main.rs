use anyhow::Result;
use clap::Parser;

use rowsieve::app;
use rowsieve::cli::Args;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    app::run(&args)
}
