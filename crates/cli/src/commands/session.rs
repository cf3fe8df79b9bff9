//! Session commands: login and logout.

use tracing::info;

use super::CliContext;

/// Log in, establishing a local session.
///
/// # Errors
///
/// Returns an error if the credentials are malformed or the session cannot
/// be persisted.
pub fn login(email: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CliContext::load()?;

    let profile = ctx.auth.login(email, password)?;
    info!("Logged in as {} ({})", profile.name, profile.email);
    info!("Run `bz-cli cart sync` to reconcile your cart with the server");

    Ok(())
}

/// Log out and tear down the stored session.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded.
pub fn logout() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CliContext::load()?;

    ctx.auth.logout();
    info!("Logged out");

    Ok(())
}
