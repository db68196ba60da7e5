//! Console user commands.
//!
//! # Usage
//!
//! ```bash
//! bo-cli users add -e owner@example.com -r owner
//! bo-cli users remove -i 0
//! bo-cli users role -i 0 -r viewer
//! ```

use backoffice_admin::SettingsStore;
use backoffice_core::Role;

use super::CliError;

fn parse_role(role: &str) -> Result<Role, CliError> {
    role.parse().map_err(|_| CliError::InvalidRole(role.to_owned()))
}

/// Invite a user.
pub async fn add(store: &SettingsStore, email: &str, role: &str) -> Result<(), CliError> {
    let role = parse_role(role)?;
    let saved = store
        .modify_users(|users| Ok(users.invite(email, role)?.email.to_string()))
        .await?;

    tracing::info!("Invited {} ({})", saved.value, role);
    Ok(())
}

/// Remove the user at `index`.
pub async fn remove(store: &SettingsStore, index: usize) -> Result<(), CliError> {
    let saved = store.modify_users(|users| users.remove(index)).await?;

    tracing::info!("Removed {}", saved.value.email);
    Ok(())
}

/// Change the role of the user at `index`.
pub async fn change_role(store: &SettingsStore, index: usize, role: &str) -> Result<(), CliError> {
    let role = parse_role(role)?;
    let saved = store
        .modify_users(|users| Ok(users.set_role(index, role)?.email.to_string()))
        .await?;

    tracing::info!("{} is now {}", saved.value, role);
    Ok(())
}
