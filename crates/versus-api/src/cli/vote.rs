//! `versus vote`: record a pairwise choice from the command line.

use anyhow::{Context, Result};
use console::style;

use versus_types::choice::VoteRequest;
use versus_types::id::ItemId;

use crate::cli::resolve_user;
use crate::state::AppState;

fn parse_item(raw: &str, label: &str) -> Result<ItemId> {
    raw.parse::<ItemId>()
        .with_context(|| format!("{label} must be an item id"))
}

pub async fn vote(
    state: &AppState,
    user: &str,
    item_one: &str,
    item_two: &str,
    chosen: &str,
    json: bool,
) -> Result<()> {
    let user_id = resolve_user(state, user).await?;
    let request = VoteRequest {
        item_one_id: parse_item(item_one, "item_one")?,
        item_two_id: parse_item(item_two, "item_two")?,
        chosen_id: parse_item(chosen, "chosen")?,
    };

    let record = state.vote_service.record_vote(&user_id, request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let chosen = state.catalog_service.get_item(&record.chosen_id).await?;
    println!();
    println!(
        "  {} Vote recorded for {}",
        style("✓").green().bold(),
        style(&chosen.name).cyan()
    );
    println!("  {}", style(record.id.to_string()).dim());
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        let id = ItemId::new();
        assert_eq!(parse_item(&id.to_string(), "chosen").unwrap(), id);

        let err = parse_item("portal", "chosen").unwrap_err();
        assert!(err.to_string().contains("chosen must be an item id"));
    }
}
