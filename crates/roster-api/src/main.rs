//! Roster CLI entry point.
//!
//! Binary name: `roster`
//!
//! Parses CLI arguments, opens the database, then dispatches to the
//! command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::player::{NewPlayer, PlayerChanges};
use cli::{Cli, Commands, CreateResource, DeleteResource, ListResource, ShowResource, UpdateResource};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,roster=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Shell completions don't need a database
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "roster", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.database_url.as_deref()).await?;
    let json = cli.json;

    match cli.command {
        Commands::Create { resource } => match resource {
            CreateResource::Race { name, description } => {
                cli::race::create_race(&state, name, description, json).await?;
            }
            CreateResource::Skill { name, bonus, race } => {
                cli::skill::create_skill(&state, name, bonus, &race, json).await?;
            }
            CreateResource::Guild { name, description } => {
                cli::guild::create_guild(&state, name, description, json).await?;
            }
            CreateResource::Player {
                nickname,
                email,
                bio,
                race,
                guild,
            } => {
                let new = NewPlayer {
                    nickname,
                    email,
                    bio,
                    race,
                    guild,
                };
                cli::player::create_player(&state, new, json).await?;
            }
        },

        Commands::List { resource } => match resource {
            ListResource::Races { page } => {
                cli::race::list_races(&state, page, json).await?;
            }
            ListResource::Skills { race, page } => {
                cli::skill::list_skills(&state, race, page, json).await?;
            }
            ListResource::Guilds { page } => {
                cli::guild::list_guilds(&state, page, json).await?;
            }
            ListResource::Players { race, guild, page } => {
                cli::player::list_players(&state, race, guild, page, json).await?;
            }
        },

        Commands::Show { resource } => match resource {
            ShowResource::Race { name } => cli::race::show_race(&state, &name, json).await?,
            ShowResource::Skill { name } => cli::skill::show_skill(&state, &name, json).await?,
            ShowResource::Guild { name } => cli::guild::show_guild(&state, &name, json).await?,
            ShowResource::Player { nickname } => {
                cli::player::show_player(&state, &nickname, json).await?;
            }
        },

        Commands::Update { resource } => match resource {
            UpdateResource::Race {
                name,
                rename,
                description,
            } => {
                cli::race::update_race(&state, &name, rename, description, json).await?;
            }
            UpdateResource::Skill {
                name,
                rename,
                bonus,
                race,
            } => {
                cli::skill::update_skill(&state, &name, rename, bonus, race, json).await?;
            }
            UpdateResource::Guild {
                name,
                rename,
                description,
                clear_description,
            } => {
                cli::guild::update_guild(&state, &name, rename, description, clear_description, json)
                    .await?;
            }
            UpdateResource::Player {
                nickname,
                rename,
                email,
                bio,
                race,
                guild,
                no_guild,
            } => {
                let changes = PlayerChanges {
                    rename,
                    email,
                    bio,
                    race,
                    guild,
                    no_guild,
                };
                cli::player::update_player(&state, &nickname, changes, json).await?;
            }
        },

        Commands::Delete { resource } => match resource {
            DeleteResource::Race { name, force } => {
                cli::race::delete_race(&state, &name, force, json).await?;
            }
            DeleteResource::Skill { name, force } => {
                cli::skill::delete_skill(&state, &name, force, json).await?;
            }
            DeleteResource::Guild { name, force } => {
                cli::guild::delete_guild(&state, &name, force, json).await?;
            }
            DeleteResource::Player { nickname, force } => {
                cli::player::delete_player(&state, &nickname, force, json).await?;
            }
        },

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
