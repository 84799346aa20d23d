mod bootstrap;
mod cli;
mod run;

use anyhow::Result;

fn main() -> Result<()> {
    let cli = cli::parse();
    match cli.command {
        Some(cli::Command::List(args)) => run::list(args),
        None => run::run(cli.run),
    }
}
