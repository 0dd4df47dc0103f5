//! Session command handlers (whoami, logout).

use anyhow::{Context, Result};
use cwala_core::api::{self, ApiClient, resolve_base_url};
use cwala_core::config::Config;
use cwala_core::session::{SessionCache, mask_token};
use serde_json::json;

/// Prints the cached identity without touching the network.
pub fn whoami(config: &Config, as_json: bool) -> Result<()> {
    let cache = SessionCache::load().context("load session")?;

    if as_json {
        return print_json(config, &cache);
    }

    let Some(user) = &cache.user else {
        println!("Not signed in.");
        return Ok(());
    };

    println!("{} <{}>", user.name, user.email);
    println!("Role: {}", user.role.label());
    if !user.registration_status.is_approved() {
        println!("Status: awaiting approval");
    }
    if let Some(token) = &cache.access_token {
        println!("Token: {}", mask_token(token));
    }
    if let Some(balance) = &cache.wallet_balance {
        println!("Wallet: {}", balance.display());
    }
    println!("Server: {}", resolve_base_url(config));
    Ok(())
}

/// JSON shape for scripting. The token never appears here, masked or not.
fn print_json(config: &Config, cache: &SessionCache) -> Result<()> {
    let body = match &cache.user {
        Some(user) => json!({
            "signed_in": true,
            "name": user.name,
            "email": user.email,
            "role": user.role,
            "approved": user.registration_status.is_approved(),
            "wallet": cache.wallet_balance,
            "server": resolve_base_url(config),
        }),
        None => json!({ "signed_in": false }),
    };
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

/// Signs out. Local state wins: the session file is deleted even when
/// the server call fails or the file is unreadable.
pub async fn logout(config: &Config) -> Result<()> {
    let cache = SessionCache::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "session file unreadable");
        SessionCache::default()
    });
    let removed = SessionCache::clear().context("clear session")?;

    let Some(token) = cache.access_token else {
        if removed {
            println!("Signed out.");
        } else {
            println!("Not signed in.");
        }
        return Ok(());
    };

    let client = ApiClient::from_config(config).with_token(Some(token));
    match api::auth::logout(&client).await {
        Ok(_) => println!("Signed out."),
        Err(err) => println!(
            "Signed out locally. Server logout failed: {}",
            err.display_message()
        ),
    }
    Ok(())
}
