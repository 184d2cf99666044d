//! Guild commands.

use anyhow::Result;
use comfy_table::{Cell, Color};
use console::style;

use roster_core::repository::player::PlayerFilter;
use roster_types::entity::{EntityKind, Labeled};
use roster_types::guild::{CreateGuildRequest, GuildId, UpdateGuildRequest};

use super::render;
use super::PageArgs;
use crate::state::AppState;

pub async fn guild_id(state: &AppState, name: &str) -> Result<GuildId> {
    Ok(state.roster.get_guild_by_name(name).await?.id)
}

pub async fn create_guild(
    state: &AppState,
    name: String,
    description: Option<String>,
    json: bool,
) -> Result<()> {
    let guild = state
        .roster
        .create_guild(CreateGuildRequest { name, description })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&guild)?);
        return Ok(());
    }

    render::print_created(EntityKind::Guild, guild.label(), &guild.id.to_string());
    Ok(())
}

pub async fn list_guilds(state: &AppState, page: PageArgs, json: bool) -> Result<()> {
    let guilds = state
        .roster
        .list_guilds(Some(render::list_options(page)))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&guilds)?);
        return Ok(());
    }

    if guilds.is_empty() {
        render::print_empty("guild", "roster create guild <NAME>");
        return Ok(());
    }

    let mut table = render::table(&["Name", "Description", "ID"]);
    for guild in &guilds {
        let description = match &guild.description {
            Some(text) => Cell::new(render::truncate(text, 50)),
            None => Cell::new("-").fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(&guild.name).fg(Color::Cyan),
            description,
            Cell::new(guild.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    render::print_table(&table, guilds.len(), "guild");
    Ok(())
}

/// Show a guild and its members.
pub async fn show_guild(state: &AppState, name: &str, json: bool) -> Result<()> {
    let guild = state.roster.get_guild_by_name(name).await?;
    let members = state
        .roster
        .list_players(Some(PlayerFilter {
            guild: Some(guild.id.clone()),
            ..Default::default()
        }))
        .await?;

    if json {
        let detail = serde_json::json!({
            "guild": guild,
            "players": members,
        });
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&guild.name).cyan().bold());
    if let Some(description) = &guild.description {
        println!("  {}", style(description).dim());
    }
    println!();
    render::field("ID", style(guild.id.to_string()).dim());
    println!();

    render::section("Members");
    if members.is_empty() {
        println!("  (none)");
    }
    for player in &members {
        println!("  {} {}", style("•").dim(), player.nickname);
    }
    println!();
    Ok(())
}

pub async fn update_guild(
    state: &AppState,
    name: &str,
    rename: Option<String>,
    description: Option<String>,
    clear_description: bool,
    json: bool,
) -> Result<()> {
    let id = guild_id(state, name).await?;

    let description = if clear_description {
        Some(None)
    } else {
        description.map(Some)
    };

    let guild = state
        .roster
        .update_guild(
            &id,
            UpdateGuildRequest {
                name: rename,
                description,
            },
        )
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&guild)?);
    } else {
        render::print_updated(EntityKind::Guild, guild.label());
    }
    Ok(())
}

pub async fn delete_guild(state: &AppState, name: &str, force: bool, json: bool) -> Result<()> {
    let guild = state.roster.get_guild_by_name(name).await?;

    if !render::confirm_delete(
        EntityKind::Guild,
        &guild.name,
        "Members stay, without a guild.",
        force || json,
    )? {
        return Ok(());
    }

    let report = state.roster.delete_guild(&guild.id).await?;
    render::print_deletion(&report, &guild.name, json)
}
