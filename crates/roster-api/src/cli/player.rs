//! Player commands.

use anyhow::Result;
use comfy_table::{Cell, Color};
use console::style;

use roster_core::repository::player::PlayerFilter;
use roster_types::entity::{EntityKind, Labeled};
use roster_types::player::{CreatePlayerRequest, UpdatePlayerRequest};

use super::guild::guild_id;
use super::race::race_id;
use super::render;
use super::PageArgs;
use crate::state::AppState;

/// Field values for `create player`.
pub struct NewPlayer {
    pub nickname: String,
    pub email: String,
    pub bio: String,
    pub race: String,
    pub guild: Option<String>,
}

/// Field changes for `update player`. `None` leaves a field untouched.
pub struct PlayerChanges {
    pub rename: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub race: Option<String>,
    pub guild: Option<String>,
    pub no_guild: bool,
}

pub async fn create_player(state: &AppState, new: NewPlayer, json: bool) -> Result<()> {
    let race_id = race_id(state, &new.race).await?;
    let guild_id = match &new.guild {
        Some(name) => Some(guild_id(state, name).await?),
        None => None,
    };

    let player = state
        .roster
        .create_player(CreatePlayerRequest {
            nickname: new.nickname,
            email: new.email,
            bio: new.bio,
            race_id,
            guild_id,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&player)?);
        return Ok(());
    }

    render::print_created(EntityKind::Player, player.label(), &player.id.to_string());
    Ok(())
}

pub async fn list_players(
    state: &AppState,
    race: Option<String>,
    guild: Option<String>,
    page: PageArgs,
    json: bool,
) -> Result<()> {
    let race = match race {
        Some(name) => Some(race_id(state, &name).await?),
        None => None,
    };
    let guild = match guild {
        Some(name) => Some(guild_id(state, &name).await?),
        None => None,
    };

    let players = state
        .roster
        .list_players(Some(PlayerFilter {
            race,
            guild,
            options: render::list_options(page),
        }))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&players)?);
        return Ok(());
    }

    if players.is_empty() {
        render::print_empty(
            "player",
            "roster create player <NICKNAME> --email <EMAIL> --bio <BIO> --race <RACE>",
        );
        return Ok(());
    }

    let races = state.roster.list_races(None).await?;
    let guilds = state.roster.list_guilds(None).await?;

    let mut table = render::table(&["Nickname", "Email", "Race", "Guild", "Joined"]);
    for player in &players {
        let race_name = races
            .iter()
            .find(|r| r.id == player.race_id)
            .map(|r| r.name.as_str())
            .unwrap_or("?");
        let guild_cell = match player
            .guild_id
            .as_ref()
            .and_then(|id| guilds.iter().find(|g| &g.id == id))
        {
            Some(guild) => Cell::new(&guild.name),
            None => Cell::new("-").fg(Color::DarkGrey),
        };

        table.add_row(vec![
            Cell::new(&player.nickname).fg(Color::Cyan),
            Cell::new(&player.email),
            Cell::new(race_name),
            guild_cell,
            Cell::new(player.created_at.format("%Y-%m-%d").to_string()).fg(Color::DarkGrey),
        ]);
    }

    render::print_table(&table, players.len(), "player");
    Ok(())
}

pub async fn show_player(state: &AppState, nickname: &str, json: bool) -> Result<()> {
    let player = state.roster.get_player_by_nickname(nickname).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&player)?);
        return Ok(());
    }

    let race = state.roster.get_race(&player.race_id).await?;
    let guild = match &player.guild_id {
        Some(id) => Some(state.roster.get_guild(id).await?),
        None => None,
    };

    println!();
    println!("  {}", style(&player.nickname).cyan().bold());
    println!("  {}", style(&player.bio).dim());
    println!();

    render::section("Details");
    render::field("Email", &player.email);
    render::field("Race", &race.name);
    render::field(
        "Guild",
        guild.as_ref().map_or("(none)", |g| g.name.as_str()),
    );
    render::field("ID", style(player.id.to_string()).dim());
    println!();

    render::section("Timestamps");
    render::field("Created", player.created_at.format("%Y-%m-%d %H:%M UTC"));
    println!();
    Ok(())
}

pub async fn update_player(
    state: &AppState,
    nickname: &str,
    changes: PlayerChanges,
    json: bool,
) -> Result<()> {
    let player = state.roster.get_player_by_nickname(nickname).await?;

    let race_id = match &changes.race {
        Some(name) => Some(race_id(state, name).await?),
        None => None,
    };
    let guild_id = if changes.no_guild {
        Some(None)
    } else {
        match &changes.guild {
            Some(name) => Some(Some(guild_id(state, name).await?)),
            None => None,
        }
    };

    let player = state
        .roster
        .update_player(
            &player.id,
            UpdatePlayerRequest {
                nickname: changes.rename,
                email: changes.email,
                bio: changes.bio,
                race_id,
                guild_id,
            },
        )
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&player)?);
    } else {
        render::print_updated(EntityKind::Player, player.label());
    }
    Ok(())
}

pub async fn delete_player(state: &AppState, nickname: &str, force: bool, json: bool) -> Result<()> {
    let player = state.roster.get_player_by_nickname(nickname).await?;

    if !render::confirm_delete(EntityKind::Player, &player.nickname, "", force || json)? {
        return Ok(());
    }

    let report = state.roster.delete_player(&player.id).await?;
    render::print_deletion(&report, &player.nickname, json)
}
