//! Shared terminal output helpers.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;

use roster_core::repository::{ListOptions, SortOrder};
use roster_types::entity::EntityKind;
use roster_types::reference::{DeletePolicy, DeletionReport};

use super::PageArgs;

pub fn list_options(page: PageArgs) -> ListOptions {
    ListOptions {
        sort_order: Some(if page.desc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }),
        limit: page.limit,
        offset: page.offset,
    }
}

pub fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::White))
            .collect::<Vec<_>>(),
    );
    table
}

/// Print a table followed by a row count, e.g. "3 races".
pub fn print_table(table: &Table, count: usize, noun: &str) {
    println!();
    println!("{table}");
    println!();
    println!(
        "  {} {}{}",
        style(count).bold(),
        noun,
        if count == 1 { "" } else { "s" }
    );
    println!();
}

pub fn print_empty(noun: &str, hint: &str) {
    println!();
    println!(
        "  {} No {noun}s found. Create one with: {}",
        style("i").blue().bold(),
        style(hint).yellow()
    );
    println!();
}

pub fn print_created(kind: EntityKind, label: &str, id: &str) {
    println!();
    println!(
        "  {} {} '{}' created.",
        style("✓").green().bold(),
        capitalize(kind),
        style(label).cyan()
    );
    println!("  {}  {}", style("ID:").bold(), style(id).dim());
    println!();
}

pub fn print_updated(kind: EntityKind, label: &str) {
    println!(
        "  {} {} '{}' updated.",
        style("✓").green().bold(),
        capitalize(kind),
        style(label).cyan()
    );
}

/// Print a labelled field in `show` output.
pub fn field(name: &str, value: impl std::fmt::Display) {
    println!("  {:<12} {}", style(format!("{name}:")).bold(), value);
}

pub fn section(title: &str) {
    println!("  {}", style(format!("── {title} ──")).dim());
}

/// Ask before deleting. Skipped with `--force` or `--json`.
pub fn confirm_delete(kind: EntityKind, label: &str, consequence: &str, skip: bool) -> Result<bool> {
    if skip {
        return Ok(true);
    }

    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Delete {kind} '{}'? {consequence}",
            style(label).red().bold()
        ))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("  Cancelled.");
    }
    Ok(confirmed)
}

pub fn print_deletion(report: &DeletionReport, label: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "  {} {} '{}' deleted.",
        style("✓").red().bold(),
        capitalize(report.entity),
        label
    );
    for rows in report.propagated.iter().filter(|p| p.rows > 0) {
        let action = match rows.policy {
            DeletePolicy::Cascade => "deleted",
            DeletePolicy::SetNull => "detached",
        };
        println!(
            "    {} {} {}{} {action}",
            style("•").dim(),
            rows.rows,
            rows.entity,
            if rows.rows == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

/// Shorten `text` to at most `max` characters, marking the cut with "...".
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn capitalize(kind: EntityKind) -> String {
    let name = kind.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Elvenkönigreich", 8), "Elven...");
        assert_eq!(truncate("ééééééééé", 5), "éé...");
    }

    #[test]
    fn test_capitalize_entity() {
        assert_eq!(capitalize(EntityKind::Guild), "Guild");
        assert_eq!(capitalize(EntityKind::Player), "Player");
    }

    #[test]
    fn test_list_options_from_page() {
        let options = list_options(PageArgs {
            desc: true,
            limit: Some(10),
            offset: None,
        });
        assert_eq!(options.sort_order, Some(SortOrder::Desc));
        assert_eq!(options.limit, Some(10));
        assert_eq!(options.offset, None);
    }
}
