use clap::Parser;
use eyre::Result;
use lifeplan::command::LifeplanCmd;
use lifeplan::VERSION;

#[derive(Parser)]
#[command(
    author = "Sam Uherek",
    version = VERSION,
    about = "Keep track of your events and goals",
    )]
struct Lifeplan {
    #[command(subcommand)]
    lifeplan: LifeplanCmd,
}

impl Lifeplan {
    fn run(self) -> Result<()> {
        self.lifeplan.run()
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    Lifeplan::parse().run()
}
