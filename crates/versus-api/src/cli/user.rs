//! User commands: create-user, exclude.

use anyhow::Result;
use console::style;

use versus_types::id::ExternalId;
use versus_types::user::CreateUserRequest;

use crate::cli::resolve_user;
use crate::state::AppState;

pub async fn create_user(
    state: &AppState,
    request: CreateUserRequest,
    json: bool,
) -> Result<()> {
    let user = state.user_service.create_user(request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} User created successfully!",
        style("✓").green().bold()
    );
    println!();
    println!("  {}  {}", style("Username:").bold(), style(&user.username).cyan());
    println!(
        "  {}  {} {}",
        style("Name:").bold(),
        user.first_name,
        user.last_name
    );
    println!(
        "  {}  {}",
        style("ID:").bold(),
        style(user.id.to_string()).dim()
    );
    println!();
    Ok(())
}

pub async fn exclude(state: &AppState, user: &str, external_id: &str, json: bool) -> Result<()> {
    let user_id = resolve_user(state, user).await?;
    let external_id: ExternalId = external_id.parse()?;
    let added = state.user_service.exclude_item(&user_id, external_id).await?;

    if json {
        let out = serde_json::json!({ "external_id": external_id, "added": added });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    if added {
        println!(
            "  {} {} will no longer be recommended",
            style("✓").green().bold(),
            external_id
        );
    } else {
        println!(
            "  {} {} was already excluded",
            style("i").blue().bold(),
            external_id
        );
    }
    println!();
    Ok(())
}
