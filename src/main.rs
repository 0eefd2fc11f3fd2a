use clap::Parser;
use salonbook::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    salonbook::logging::init_logging(cli.verbose());
    cli.run()
}
