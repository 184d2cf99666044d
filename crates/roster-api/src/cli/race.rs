//! Race commands: create, list, show, update, delete.

use anyhow::Result;
use comfy_table::{Cell, Color};
use console::style;

use roster_core::repository::player::PlayerFilter;
use roster_core::repository::skill::SkillFilter;
use roster_types::entity::{EntityKind, Labeled};
use roster_types::race::{CreateRaceRequest, RaceId, UpdateRaceRequest};

use super::render;
use super::PageArgs;
use crate::state::AppState;

/// Resolve a race name to its id.
pub async fn race_id(state: &AppState, name: &str) -> Result<RaceId> {
    Ok(state.roster.get_race_by_name(name).await?.id)
}

/// ```bash
/// roster create race Elf --description "Long-lived forest folk"
/// ```
pub async fn create_race(
    state: &AppState,
    name: String,
    description: Option<String>,
    json: bool,
) -> Result<()> {
    let race = state
        .roster
        .create_race(CreateRaceRequest { name, description })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&race)?);
        return Ok(());
    }

    render::print_created(EntityKind::Race, race.label(), &race.id.to_string());
    Ok(())
}

pub async fn list_races(state: &AppState, page: PageArgs, json: bool) -> Result<()> {
    let races = state
        .roster
        .list_races(Some(render::list_options(page)))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&races)?);
        return Ok(());
    }

    if races.is_empty() {
        render::print_empty("race", "roster create race <NAME>");
        return Ok(());
    }

    let mut table = render::table(&["Name", "Description", "ID"]);
    for race in &races {
        table.add_row(vec![
            Cell::new(&race.name).fg(Color::Cyan),
            Cell::new(render::truncate(&race.description, 50)),
            Cell::new(race.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    render::print_table(&table, races.len(), "race");
    Ok(())
}

/// Show a race together with the skills and players that belong to it.
pub async fn show_race(state: &AppState, name: &str, json: bool) -> Result<()> {
    let race = state.roster.get_race_by_name(name).await?;
    let skills = state
        .roster
        .list_skills(Some(SkillFilter {
            race: Some(race.id.clone()),
            ..Default::default()
        }))
        .await?;
    let players = state
        .roster
        .list_players(Some(PlayerFilter {
            race: Some(race.id.clone()),
            ..Default::default()
        }))
        .await?;

    if json {
        let detail = serde_json::json!({
            "race": race,
            "skills": skills,
            "players": players,
        });
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&race.name).cyan().bold());
    if !race.description.is_empty() {
        println!("  {}", style(&race.description).dim());
    }
    println!();
    render::field("ID", style(race.id.to_string()).dim());
    println!();

    render::section("Skills");
    if skills.is_empty() {
        println!("  (none)");
    }
    for skill in &skills {
        println!("  {} {}: {}", style("•").dim(), skill.name, skill.bonus);
    }
    println!();

    render::section("Players");
    if players.is_empty() {
        println!("  (none)");
    }
    for player in &players {
        println!("  {} {}", style("•").dim(), player.nickname);
    }
    println!();

    Ok(())
}

pub async fn update_race(
    state: &AppState,
    name: &str,
    rename: Option<String>,
    description: Option<String>,
    json: bool,
) -> Result<()> {
    let id = race_id(state, name).await?;
    let race = state
        .roster
        .update_race(
            &id,
            UpdateRaceRequest {
                name: rename,
                description,
            },
        )
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&race)?);
    } else {
        render::print_updated(EntityKind::Race, race.label());
    }
    Ok(())
}

pub async fn delete_race(state: &AppState, name: &str, force: bool, json: bool) -> Result<()> {
    let race = state.roster.get_race_by_name(name).await?;

    if !render::confirm_delete(
        EntityKind::Race,
        &race.name,
        "Its skills and players are deleted too.",
        force || json,
    )? {
        return Ok(());
    }

    let report = state.roster.delete_race(&race.id).await?;
    render::print_deletion(&report, &race.name, json)
}
