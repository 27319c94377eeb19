use clap::Parser;

use testcop::cli::{Cli, Commands};
use testcop::commands::{init_logging, run_check, run_model, run_rules};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Rules => run_rules(),
        Commands::Model(args) => run_model(args, &cli),
    };

    std::process::exit(exit_code);
}
