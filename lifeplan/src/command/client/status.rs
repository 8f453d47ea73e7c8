use eyre::Result;
use lifeplan_client::api_client::ApiClient;
use lifeplan_client::auth::{AuthSession, AuthState};
use lifeplan_client::settings::Settings;
use std::sync::Arc;

pub async fn run(settings: &Settings) -> Result<()> {
    let client = Arc::new(ApiClient::from_settings(settings)?);
    let had_token = client.token().is_some();
    let mut auth = AuthSession::new(client);

    match auth.initialize().await {
        AuthState::Authenticated(user) => {
            println!("Logged in as {} <{}>", user.name, user.email);
        }
        AuthState::Anonymous if had_token => {
            println!("Your session has expired. Log in again.");
        }
        _ => println!("You are not logged in."),
    }

    Ok(())
}
