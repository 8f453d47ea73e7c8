//! Screen state for the resource pages.
//!
//! A view owns the one copy of its list. Every successful write is followed by
//! a full re-fetch; a failed request only adds a [`Notice`] and leaves the list
//! as it was.

pub mod events;
pub mod goals;
pub mod listing;
pub mod notice;
pub mod profile;

pub use events::{EventDraft, EventFilter, EventsView};
pub use goals::GoalsView;
pub use listing::{Listing, Ticket};
pub use notice::{Notice, NoticeLevel};
pub use profile::ProfileView;

/// Which half of a list a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Active,
    Completed,
}

impl Scope {
    pub fn is_completed(&self) -> bool {
        matches!(self, Scope::Completed)
    }
}
