//! Skill commands.

use anyhow::Result;
use comfy_table::{Cell, Color};
use console::style;

use roster_core::repository::skill::SkillFilter;
use roster_types::entity::{EntityKind, Labeled};
use roster_types::skill::{CreateSkillRequest, UpdateSkillRequest};

use super::race::race_id;
use super::render;
use super::PageArgs;
use crate::state::AppState;

pub async fn create_skill(
    state: &AppState,
    name: String,
    bonus: String,
    race: &str,
    json: bool,
) -> Result<()> {
    let race_id = race_id(state, race).await?;
    let skill = state
        .roster
        .create_skill(CreateSkillRequest {
            name,
            bonus,
            race_id,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&skill)?);
        return Ok(());
    }

    render::print_created(EntityKind::Skill, skill.label(), &skill.id.to_string());
    Ok(())
}

pub async fn list_skills(
    state: &AppState,
    race: Option<String>,
    page: PageArgs,
    json: bool,
) -> Result<()> {
    let race = match race {
        Some(name) => Some(race_id(state, &name).await?),
        None => None,
    };

    let skills = state
        .roster
        .list_skills(Some(SkillFilter {
            race,
            options: render::list_options(page),
        }))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&skills)?);
        return Ok(());
    }

    if skills.is_empty() {
        render::print_empty("skill", "roster create skill <NAME> --bonus <BONUS> --race <RACE>");
        return Ok(());
    }

    let races = state.roster.list_races(None).await?;

    let mut table = render::table(&["Name", "Bonus", "Race"]);
    for skill in &skills {
        let race_name = races
            .iter()
            .find(|r| r.id == skill.race_id)
            .map(|r| r.name.as_str())
            .unwrap_or("?");
        table.add_row(vec![
            Cell::new(&skill.name).fg(Color::Cyan),
            Cell::new(render::truncate(&skill.bonus, 50)),
            Cell::new(race_name),
        ]);
    }

    render::print_table(&table, skills.len(), "skill");
    Ok(())
}

pub async fn show_skill(state: &AppState, name: &str, json: bool) -> Result<()> {
    let skill = state.roster.get_skill_by_name(name).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&skill)?);
        return Ok(());
    }

    let race = state.roster.get_race(&skill.race_id).await?;

    println!();
    println!("  {}", style(&skill.name).cyan().bold());
    println!();
    render::field("Bonus", &skill.bonus);
    render::field("Race", &race.name);
    render::field("ID", style(skill.id.to_string()).dim());
    println!();
    Ok(())
}

pub async fn update_skill(
    state: &AppState,
    name: &str,
    rename: Option<String>,
    bonus: Option<String>,
    race: Option<String>,
    json: bool,
) -> Result<()> {
    let skill = state.roster.get_skill_by_name(name).await?;
    let race_id = match race {
        Some(race) => Some(race_id(state, &race).await?),
        None => None,
    };

    let skill = state
        .roster
        .update_skill(
            &skill.id,
            UpdateSkillRequest {
                name: rename,
                bonus,
                race_id,
            },
        )
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&skill)?);
    } else {
        render::print_updated(EntityKind::Skill, skill.label());
    }
    Ok(())
}

pub async fn delete_skill(state: &AppState, name: &str, force: bool, json: bool) -> Result<()> {
    let skill = state.roster.get_skill_by_name(name).await?;

    if !render::confirm_delete(EntityKind::Skill, &skill.name, "", force || json)? {
        return Ok(());
    }

    let report = state.roster.delete_skill(&skill.id).await?;
    render::print_deletion(&report, &skill.name, json)
}
