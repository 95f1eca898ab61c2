//! `versus import`: pull an item from the content provider into the catalog.

use anyhow::Result;
use console::style;

use versus_types::id::ExternalId;

use crate::cli::spinner;
use crate::state::AppState;

pub async fn import(state: &AppState, external_id: &str, json: bool) -> Result<()> {
    let external_id: ExternalId = external_id.parse()?;

    let spinner = spinner(&format!("Importing {external_id}..."));
    let result = state.catalog_service.import_item(external_id).await;
    spinner.finish_and_clear();
    let item = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&item)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Imported {}",
        style("✓").green().bold(),
        style(&item.name).cyan()
    );
    println!("  {}  {}", style("Slug:").bold(), item.slug);
    println!(
        "  {}  {}",
        style("ID:").bold(),
        style(item.id.to_string()).dim()
    );
    if !item.tags.is_empty() {
        let tags = item
            .tags
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {}  {}", style("Tags:").bold(), tags);
    }
    println!(
        "  {}  {}",
        style("Related:").bold(),
        item.related_ids.len()
    );
    println!();
    Ok(())
}
