use clap::Subcommand;
use eyre::Result;
use lifeplan_client::settings::Settings;

mod login;
mod logout;
mod register;

#[derive(Subcommand, Debug)]
#[clap(infer_subcommands = true)]
pub enum Cmd {
    /// Log in to an existing account
    Login(login::Cmd),
    /// Create a new account and log in
    Register(register::Cmd),
    /// End the session on the server and forget it locally
    Logout,
}

impl Cmd {
    pub(crate) async fn run(self, settings: &Settings) -> Result<()> {
        match self {
            Self::Login(cmd) => cmd.run(settings).await,
            Self::Register(cmd) => cmd.run(settings).await,
            Self::Logout => logout::run(settings).await,
        }
    }
}
