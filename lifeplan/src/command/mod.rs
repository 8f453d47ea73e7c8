use clap::Subcommand;
use eyre::Result;

mod client;

#[derive(Subcommand)]
pub enum LifeplanCmd {
    #[command(flatten)]
    Client(client::Cmd),
}

impl LifeplanCmd {
    pub fn run(self) -> Result<()> {
        match self {
            Self::Client(cmd) => cmd.run(),
        }
    }
}
