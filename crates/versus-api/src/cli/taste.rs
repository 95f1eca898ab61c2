//! Taste view commands: top-choices, recommend, motivations, submotivations,
//! leaderboard.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use versus_core::service::catalog::DEFAULT_CANDIDATE_LIMIT;
use versus_types::taste::{AffinityReport, TagAffinity};

use crate::cli::{resolve_user, spinner};
use crate::state::AppState;

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        header
            .iter()
            .map(|h| Cell::new(h).fg(Color::White))
            .collect::<Vec<_>>(),
    );
    table
}

fn empty(message: &str) {
    println!();
    println!("  {} {message}", style("i").blue().bold());
    println!();
}

fn percentage_cell(percentage: u8) -> Cell {
    let color = match percentage {
        70..=100 => Color::Green,
        40..=69 => Color::Yellow,
        _ => Color::DarkGrey,
    };
    Cell::new(format!("{percentage}%")).fg(color)
}

/// Show a user's most chosen items.
pub async fn top_choices(
    state: &AppState,
    user: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let user_id = resolve_user(state, user).await?;
    let ranked = state.taste_service.top_choices(&user_id, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    if ranked.is_empty() {
        empty(&format!(
            "No votes yet. Record one with: {}",
            style("versus vote").yellow()
        ));
        return Ok(());
    }

    let mut table = table(&["#", "Item", "Chosen", "External Id"]);
    for (rank, choice) in ranked.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&choice.item.name).fg(Color::Cyan),
            Cell::new(choice.count),
            Cell::new(choice.item.external_id).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}

/// Recommend items related to a user's favorites.
pub async fn recommend(state: &AppState, user: &str, json: bool) -> Result<()> {
    let user_id = resolve_user(state, user).await?;
    let list = state.taste_service.recommend(&user_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if list.items.is_empty() {
        empty("Nothing to recommend yet. Vote on a few more pairs first.");
        return Ok(());
    }

    let mut table = table(&["#", "Item", "Tags", "External Id"]);
    for (rank, item) in list.items.iter().enumerate() {
        let tags = item
            .tags
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&item.name).fg(Color::Cyan),
            Cell::new(tags),
            Cell::new(item.external_id).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}

fn print_report<T: Ord + AsRef<str>>(title: &str, report: &AffinityReport<T>) {
    println!();
    println!("  {}", style(title).bold());
    println!(
        "  {}",
        style(format!(
            "{} votes scored, {} skipped",
            report.records_scored, report.records_skipped
        ))
        .dim()
    );

    if report.percentages.is_empty() {
        empty("No tagged votes yet.");
        return;
    }

    let mut table = table(&["Tag", "Chosen", "Shown", "Affinity"]);
    for TagAffinity { tag, percentage } in &report.percentages {
        table.add_row(vec![
            Cell::new(tag.as_ref()),
            Cell::new(report.chosen_counts.get(tag).copied().unwrap_or(0)),
            Cell::new(report.exposure_counts.get(tag).copied().unwrap_or(0)),
            percentage_cell(*percentage),
        ]);
    }
    println!("{table}");
    println!();
}

/// Motivation affinity report.
pub async fn motivations(state: &AppState, user: &str, json: bool) -> Result<()> {
    let user_id = resolve_user(state, user).await?;
    let report = state.taste_service.motivation_report(&user_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report("Motivations", &report);
    Ok(())
}

/// Submotivation affinity report, optionally running the keyword query.
pub async fn submotivations(
    state: &AppState,
    user: &str,
    candidates: bool,
    json: bool,
) -> Result<()> {
    let user_id = resolve_user(state, user).await?;
    let report = state.taste_service.submotivation_report(&user_id).await?;

    let entries = if candidates {
        let spinner = spinner("Searching the catalog...");
        let result = state
            .catalog_service
            .source_candidates(&report.content_query, DEFAULT_CANDIDATE_LIMIT)
            .await;
        spinner.finish_and_clear();
        Some(result?)
    } else {
        None
    };

    if json {
        let out = serde_json::json!({
            "report": report.report,
            "content_query": report.content_query,
            "candidates": entries,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_report("Submotivations", &report.report);

    let query = &report.content_query;
    if query.keywords.is_empty() {
        println!("  {}", style("No keyword query (no mapped themes yet).").dim());
    } else {
        let themes = query
            .themes
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {}  {}", style("Themes:").bold(), style(themes).cyan());
        println!("  {}  {}", style("Keywords:").bold(), query.keywords.join(", "));
    }

    if let Some(entries) = entries {
        println!();
        if entries.is_empty() {
            println!("  {}", style("The content provider found no candidates.").dim());
        }
        for entry in &entries {
            println!(
                "    {} {} {}",
                style("•").dim(),
                entry.name,
                style(format!("({})", entry.external_id)).dim()
            );
        }
    }
    println!();
    Ok(())
}

/// Users ranked by engagement.
pub async fn leaderboard(state: &AppState, json: bool) -> Result<()> {
    let entries = state.taste_service.leaderboard().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        empty(&format!(
            "No users yet. Create one with: {}",
            style("versus create-user").yellow()
        ));
        return Ok(());
    }

    let mut table = table(&["#", "Username", "Name", "Votes"]);
    for (rank, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&entry.username).fg(Color::Cyan),
            Cell::new(format!("{} {}", entry.first_name, entry.last_name)),
            Cell::new(entry.engagement_count).fg(Color::Green),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}
