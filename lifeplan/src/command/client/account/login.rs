use clap::Parser;
use eyre::{Context, Result};
use lifeplan_client::api_client::ApiClient;
use lifeplan_client::auth::AuthSession;
use lifeplan_client::settings::Settings;
use lifeplan_client::utils::{read_input, read_input_hidden};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[clap(infer_subcommands = true)]
pub struct Cmd {
    #[arg(long, short)]
    pub email: Option<String>,
    #[arg(long, short)]
    pub password: Option<String>,
}

impl Cmd {
    pub async fn run(self, settings: &Settings) -> Result<()> {
        let client = Arc::new(ApiClient::from_settings(settings)?);
        let mut auth = AuthSession::new(client);

        auth.initialize().await;
        if let Some(user) = auth.user() {
            println!("You are already logged in as {}.", user.email);
            return Ok(());
        }

        let email = match self.email {
            Some(email) => email,
            None => read_input("email").wrap_err("Failed to read email")?,
        };
        let password = match self.password {
            Some(password) => password,
            None => read_input_hidden("password").wrap_err("Failed to read password")?,
        };

        let user = auth
            .login(&email, &password)
            .await
            .wrap_err("Failed to log in")?;

        println!("Logged in as {}!", user.name);
        Ok(())
    }
}
