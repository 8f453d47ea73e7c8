use clap::Subcommand;
use eyre::{bail, Result};
use lifeplan_client::api_client::ApiClient;
use lifeplan_client::auth::AuthSession;
use lifeplan_client::settings::Settings;
use lifeplan_client::views::Notice;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod account;
mod event;
mod goal;
mod info;
mod profile;
mod status;

#[derive(Subcommand, Debug)]
#[clap(infer_subcommands = true)]
pub enum Cmd {
    /// Show paths, server and session details
    Info,
    /// Check the stored session against the server
    Status,
    #[command(subcommand)]
    Account(account::Cmd),
    #[command(subcommand)]
    Event(event::Cmd),
    #[command(subcommand)]
    Goal(goal::Cmd),
    #[command(subcommand)]
    Profile(profile::Cmd),
}

impl Cmd {
    #[tokio::main]
    pub async fn run(self) -> Result<()> {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();

        let settings = Settings::new()?;
        debug!(?settings, "settings loaded");

        match self {
            Self::Info => {
                info::run(&settings);
                Ok(())
            }
            Self::Status => status::run(&settings).await,
            Self::Account(cmd) => cmd.run(&settings).await,
            Self::Event(cmd) => cmd.run(&settings).await,
            Self::Goal(cmd) => cmd.run(&settings).await,
            Self::Profile(cmd) => cmd.run(&settings).await,
        }
    }
}

/// Restore the session from disk. `None` when nobody is logged in, after
/// telling the user so.
pub(crate) async fn restore_session(settings: &Settings) -> Result<Option<AuthSession>> {
    let client = Arc::new(ApiClient::from_settings(settings)?);
    let mut auth = AuthSession::new(client);
    auth.initialize().await;

    if !auth.is_authenticated() {
        debug!("no usable session");
        println!("You are not logged in.");
        return Ok(None);
    }

    Ok(Some(auth))
}

/// Print what a view had to say. Error notices turn into the command's error.
pub(crate) fn finish(notices: Vec<Notice>) -> Result<()> {
    let mut errors = vec![];
    for notice in notices {
        if notice.is_error() {
            errors.push(notice.to_string());
        } else {
            println!("{notice}");
        }
    }

    if !errors.is_empty() {
        bail!(errors.join("\n"));
    }

    Ok(())
}
