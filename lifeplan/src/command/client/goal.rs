use super::{finish, restore_session};
use clap::Subcommand;
use eyre::{Context, Result};
use lifeplan_client::settings::Settings;
use lifeplan_client::views::{GoalsView, Scope};
use lifeplan_common::domain::{Goal, Id};

#[derive(Subcommand, Debug)]
#[clap(infer_subcommands = true)]
pub enum Cmd {
    /// List goals
    List {
        /// Show completed goals instead of active ones
        #[arg(short, long)]
        completed: bool,
    },
    /// Show a single goal
    Show { id: Id },
    /// Create a goal
    Add { name: String },
    /// Rename a goal
    Edit { id: Id, name: String },
    /// Delete a goal
    Delete { id: Id },
    /// Flip a goal between active and completed
    Toggle {
        id: Id,
        /// The goal is currently completed
        #[arg(short, long)]
        completed: bool,
    },
}

fn scope(completed: bool) -> Scope {
    if completed {
        Scope::Completed
    } else {
        Scope::Active
    }
}

impl Cmd {
    pub(crate) async fn run(self, settings: &Settings) -> Result<()> {
        let Some(auth) = restore_session(settings).await? else {
            return Ok(());
        };
        let client = auth.client().clone();

        let mut view = match &self {
            Self::List { completed } | Self::Toggle { completed, .. } => {
                GoalsView::new(client.clone(), scope(*completed))
            }
            _ => GoalsView::new(client.clone(), Scope::Active),
        };

        match self {
            Self::List { .. } => {
                view.mount().await;
                if view.goals().is_empty() {
                    println!("No goals.");
                }
                for goal in view.goals() {
                    println!("{}", format_goal(goal));
                }
            }
            Self::Show { id } => {
                let goal = client
                    .goal(id)
                    .await
                    .wrap_err_with(|| format!("Failed to load goal {id}"))?;
                println!("{}", format_goal(&goal));
            }
            Self::Add { name } => {
                view.create(&name).await;
            }
            Self::Edit { id, name } => {
                view.update(id, &name).await;
            }
            Self::Delete { id } => {
                view.delete(id).await;
            }
            Self::Toggle { id, .. } => {
                view.toggle_status(id).await;
            }
        }

        finish(view.take_notices())
    }
}

fn format_goal(goal: &Goal) -> String {
    let mark = if goal.completed { "x" } else { " " };
    format!("[{mark}] {:>4}  {}", goal.id, goal.name)
}
