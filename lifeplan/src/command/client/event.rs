use super::{finish, restore_session};
use clap::{Args, Subcommand};
use eyre::{Context, Result};
use lifeplan_client::settings::Settings;
use lifeplan_client::views::{EventDraft, EventFilter, EventsView, Scope};
use lifeplan_common::domain::{self, Event, Id, DATE_FORMAT};
use time::{Date, Time};

fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value, DATE_FORMAT).map_err(|_| format!("expected YYYY-MM-DD, got {value:?}"))
}

fn parse_time(value: &str) -> Result<Time, String> {
    domain::parse_time(value).ok_or_else(|| format!("expected HH:MM, got {value:?}"))
}

#[derive(Args, Debug)]
pub struct ListCmd {
    /// Show completed events instead of active ones
    #[arg(short, long)]
    completed: bool,
    /// Only events of this type code
    #[arg(short = 't', long = "type")]
    type_code: Option<String>,
    /// Only events activated on this day
    #[arg(short, long, value_parser = parse_date)]
    date: Option<Date>,
}

#[derive(Args, Debug)]
pub struct AddCmd {
    name: String,
    #[arg(long)]
    type_id: Option<Id>,
    #[arg(short, long, value_parser = parse_date)]
    date: Option<Date>,
    /// Ignored without --date
    #[arg(short, long, value_parser = parse_time)]
    time: Option<Time>,
}

#[derive(Args, Debug)]
pub struct EditCmd {
    id: Id,
    #[arg(short, long)]
    name: Option<String>,
    #[arg(long)]
    type_id: Option<Id>,
    #[arg(short, long, value_parser = parse_date)]
    date: Option<Date>,
    #[arg(short, long, value_parser = parse_time)]
    time: Option<Time>,
}

#[derive(Subcommand, Debug)]
#[clap(infer_subcommands = true)]
pub enum Cmd {
    /// List events
    List(ListCmd),
    /// List the available event types
    Types,
    /// Show a single event
    Show { id: Id },
    /// Create an event
    Add(AddCmd),
    /// Change an event. Fields that are not given keep their value
    Edit(EditCmd),
    /// Delete an event
    Delete { id: Id },
    /// Flip an event between active and completed
    Toggle {
        id: Id,
        /// The event is currently completed
        #[arg(short, long)]
        completed: bool,
    },
}

impl Cmd {
    pub(crate) async fn run(self, settings: &Settings) -> Result<()> {
        let Some(auth) = restore_session(settings).await? else {
            return Ok(());
        };
        let client = auth.client().clone();

        match self {
            Self::List(cmd) => {
                let scope = if cmd.completed {
                    Scope::Completed
                } else {
                    Scope::Active
                };
                let filter = EventFilter {
                    type_code: cmd.type_code,
                    date: cmd.date,
                };
                let mut view = EventsView::new(client, scope).with_filter(filter);
                view.refresh().await;

                if view.events().is_empty() {
                    println!("No events.");
                }
                for event in view.events() {
                    println!("{}", format_event(event));
                }
                finish(view.take_notices())
            }
            Self::Types => {
                let mut view = EventsView::new(client, Scope::Active);
                view.load_types().await;
                for kind in view.event_types() {
                    println!("{:>4}  {:<12} {}", kind.id, kind.code, kind.name);
                }
                finish(view.take_notices())
            }
            Self::Show { id } => {
                let event = client
                    .event(id)
                    .await
                    .wrap_err_with(|| format!("Failed to load event {id}"))?;
                println!("{}", format_event(&event));
                Ok(())
            }
            Self::Add(cmd) => {
                let draft = EventDraft {
                    name: cmd.name,
                    type_id: cmd.type_id,
                    date: cmd.date,
                    time: cmd.time,
                };
                let mut view = EventsView::new(client, Scope::Active);
                view.create(&draft).await;
                finish(view.take_notices())
            }
            Self::Edit(cmd) => {
                let event = client
                    .event(cmd.id)
                    .await
                    .wrap_err_with(|| format!("Failed to load event {}", cmd.id))?;
                let mut draft = EventDraft::from_event(&event);
                if let Some(name) = cmd.name {
                    draft.name = name;
                }
                if let Some(type_id) = cmd.type_id {
                    draft.type_id = Some(type_id);
                }
                if let Some(date) = cmd.date {
                    draft.date = Some(date);
                }
                if let Some(time) = cmd.time {
                    draft.time = Some(time);
                }

                let scope = if event.completed {
                    Scope::Completed
                } else {
                    Scope::Active
                };
                let mut view = EventsView::new(client, scope);
                view.update(cmd.id, &draft).await;
                finish(view.take_notices())
            }
            Self::Delete { id } => {
                let mut view = EventsView::new(client, Scope::Active);
                view.delete(id).await;
                finish(view.take_notices())
            }
            Self::Toggle { id, completed } => {
                let scope = if completed {
                    Scope::Completed
                } else {
                    Scope::Active
                };
                let mut view = EventsView::new(client, scope);
                view.toggle_status(id).await;
                finish(view.take_notices())
            }
        }
    }
}

fn format_event(event: &Event) -> String {
    let mark = if event.completed { "x" } else { " " };
    let mut line = format!("[{mark}] {:>4}  {}", event.id, event.name);
    if let Some(kind) = &event.kind {
        line.push_str(&format!("  ({})", kind.name));
    }
    match (&event.activate_date, &event.activate_time) {
        (Some(date), Some(time)) => line.push_str(&format!("  @ {date} {time}")),
        (Some(date), None) => line.push_str(&format!("  @ {date}")),
        _ => {}
    }
    line
}
