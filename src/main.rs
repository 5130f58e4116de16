use clap::Parser;
use passvault::cli::commands::update::UpdateArgs;
use passvault::cli::{Cli, Commands};

fn main() {
    passvault::logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref website,
            ref username,
            ref notes,
            generate,
            length,
        } => passvault::cli::commands::add::execute(
            &cli, website, username, notes, generate, length,
        ),
        Commands::Get { ref id } => passvault::cli::commands::get::execute(&cli, id),
        Commands::List => passvault::cli::commands::list::execute(&cli),
        Commands::Update {
            ref id,
            ref website,
            ref username,
            ref notes,
            generate,
            length,
            keep_password,
        } => {
            let args = UpdateArgs {
                website: website.as_deref(),
                username: username.as_deref(),
                notes: notes.as_deref(),
                generate,
                length,
                keep_password,
            };
            passvault::cli::commands::update::execute(&cli, id, &args)
        }
        Commands::Delete { ref id, force } => {
            passvault::cli::commands::delete::execute(&cli, id, force)
        }
        Commands::Search { ref query, show } => {
            passvault::cli::commands::search::execute(&cli, query, show)
        }
        Commands::Generate { length } => passvault::cli::commands::generate::execute(&cli, length),
        Commands::Completions { ref shell } => {
            passvault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
