use clap::Parser;

mod cli;
mod command;
mod result;

use crate::result::Result;

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("release_publisher")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    match &cli_args.command {
        cli::Command::Release(release_args) => {
            command::release::execute(&cli_args, release_args).await
        }
        cli::Command::PullRequest(pr_args) => {
            command::pull_request::execute(&cli_args, pr_args).await
        }
        cli::Command::Releases(releases_args) => {
            command::release::list(&cli_args, releases_args).await
        }
        cli::Command::Repository => {
            command::pull_request::show_repository(&cli_args).await
        }
        cli::Command::Docs(docs_args) => {
            command::docs::execute(docs_args).await
        }
        cli::Command::Assets(host_args) => {
            command::docs::upload_assets(host_args).await
        }
        cli::Command::Changelog(changelog_args) => {
            command::changelog::execute(changelog_args)
        }
    }
}
