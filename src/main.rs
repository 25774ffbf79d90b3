mod categories;
mod cli;
mod convert;
mod error;
mod export;
mod models;
mod snapshot;
mod validate;

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands, RulesCommands};

fn rules_path(arg: Option<String>) -> PathBuf {
    arg.map(PathBuf::from).unwrap_or_else(cli::default_rules_path)
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export {
            input,
            output_dir,
            rules,
            from,
            to,
            all,
        } => cli::export::run(
            Path::new(&input),
            Path::new(&output_dir),
            &rules_path(rules),
            from.as_deref(),
            to.as_deref(),
            all,
        ),
        Commands::Validate { files, output_dir } => {
            cli::validate::run(&files, Path::new(&output_dir))
        }
        Commands::Rules { command } => match command {
            RulesCommands::List { rules } => cli::rules::list(&rules_path(rules)),
            RulesCommands::Test {
                tx_type,
                subtype,
                merchant,
                rules,
            } => cli::rules::test(&tx_type, subtype.as_deref(), &merchant, &rules_path(rules)),
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "morsimple", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
