use eyre::{Context, Result};
use lifeplan_client::api_client::ApiClient;
use lifeplan_client::auth::AuthSession;
use lifeplan_client::error::RequestError;
use lifeplan_client::settings::Settings;
use std::sync::Arc;

pub async fn run(settings: &Settings) -> Result<()> {
    let client = Arc::new(ApiClient::from_settings(settings)?);

    if client.token().is_none() {
        println!("You are not logged in.");
        return Ok(());
    }

    let mut auth = AuthSession::new(client);
    if let Some(remote) = check(auth.logout().await)? {
        println!("Remote server did not log out session: {remote}");
    }

    println!("You are logged out!");
    Ok(())
}

/// A session left on disk fails the command. A server that did not answer is
/// only worth a warning, the local session is gone either way.
fn check(res: Result<(), RequestError>) -> Result<Option<RequestError>> {
    match res {
        Ok(()) => Ok(None),
        Err(e @ RequestError::Session(_)) => Err(e).wrap_err("Failed to remove the local session"),
        Err(e) => Ok(Some(e)),
    }
}
