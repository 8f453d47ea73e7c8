use clap::Parser;
use eyre::{bail, Context, Result};
use lifeplan_client::api_client::ApiClient;
use lifeplan_client::auth::AuthSession;
use lifeplan_client::settings::Settings;
use lifeplan_client::utils::{read_input, read_input_hidden};
use lifeplan_common::domain::User;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[clap(infer_subcommands = true)]
pub struct Cmd {
    #[arg(short, long)]
    name: Option<String>,
    #[arg(short, long)]
    email: Option<String>,
    #[arg(short, long)]
    password: Option<String>,
    /// Defaults to the password when given on the command line
    #[arg(long)]
    password_confirmation: Option<String>,
}

impl Cmd {
    pub async fn run(self, settings: &Settings) -> Result<()> {
        let client = Arc::new(ApiClient::from_settings(settings)?);
        let mut auth = AuthSession::new(client);

        match self.register(&mut auth).await? {
            Some(user) => println!("Welcome, {}! You are logged in.", user.name),
            None => println!("You are already logged in. Log out first to create a new account."),
        }
        Ok(())
    }

    /// `None` when a session that the server still accepts is already there.
    async fn register(self, auth: &mut AuthSession) -> Result<Option<User>> {
        auth.initialize().await;
        if auth.is_authenticated() {
            return Ok(None);
        }

        let name = match self.name {
            Some(name) => name,
            None => read_input("name").wrap_err("Failed to read name")?,
        };
        let email = match self.email {
            Some(email) => email,
            None => read_input("email").wrap_err("Failed to read email")?,
        };
        let (password, confirmation) = match self.password {
            Some(password) => {
                let confirmation = self
                    .password_confirmation
                    .unwrap_or_else(|| password.clone());
                (password, confirmation)
            }
            None => (
                read_input_hidden("password").wrap_err("Failed to read password")?,
                read_input_hidden("password again").wrap_err("Failed to read password")?,
            ),
        };

        if password != confirmation {
            bail!("Passwords do not match");
        }

        let user = auth
            .register(&name, &email, &password, &confirmation)
            .await
            .wrap_err("Failed to register user")?;
        Ok(Some(user))
    }
}
