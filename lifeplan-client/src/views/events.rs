use super::listing::{Listing, Ticket};
use super::notice::Notice;
use super::Scope;
use crate::api_client::ApiClient;
use crate::error::RequestError;
use lifeplan_common::api::{CreateEventRequest, UpdateEventRequest};
use lifeplan_common::domain::{compose_activation, Event, EventType, Id};
use std::sync::Arc;
use time::{Date, Time};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// `None` means every type.
    pub type_code: Option<String>,
    pub date: Option<Date>,
}

/// What the event form holds before it is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub name: String,
    pub type_id: Option<Id>,
    pub date: Option<Date>,
    pub time: Option<Time>,
}

impl EventDraft {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Prefill from an existing event, for editing.
    pub fn from_event(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            type_id: event.kind.as_ref().map(|x| x.id),
            date: event.date(),
            time: event.time(),
        }
    }

    pub fn activate_at(&self) -> Option<String> {
        compose_activation(self.date, self.time)
    }

    pub fn to_create(&self) -> CreateEventRequest {
        CreateEventRequest {
            name: self.name.clone(),
            type_id: self.type_id,
            activate_at: self.activate_at(),
        }
    }

    pub fn to_update(&self) -> UpdateEventRequest {
        UpdateEventRequest {
            name: Some(self.name.clone()),
            type_id: self.type_id,
            activate_at: self.activate_at(),
        }
    }
}

/// One in-flight list request, detached from the view so callers can run
/// several at once and hand the results back in any order.
#[derive(Debug, Clone)]
pub struct EventFetch {
    ticket: Ticket,
    scope: Scope,
    filter: EventFilter,
}

impl EventFetch {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub async fn send(&self, client: &ApiClient) -> Result<Vec<Event>, RequestError> {
        let date = self.filter.date;
        match (&self.filter.type_code, self.scope) {
            (None, Scope::Active) => client.events(date).await,
            (None, Scope::Completed) => client.completed_events(date).await,
            (Some(code), Scope::Active) => client.events_by_type(code, date).await,
            (Some(code), Scope::Completed) => client.completed_events_by_type(code, date).await,
        }
    }
}

#[derive(Debug)]
pub struct EventsView {
    client: Arc<ApiClient>,
    scope: Scope,
    filter: EventFilter,
    events: Listing<Event>,
    types: Vec<EventType>,
    notices: Vec<Notice>,
}

impl EventsView {
    pub fn new(client: Arc<ApiClient>, scope: Scope) -> Self {
        Self {
            client,
            scope,
            filter: EventFilter::default(),
            events: Listing::new(),
            types: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: EventFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    pub fn events(&self) -> &[Event] {
        self.events.items()
    }

    pub fn event_types(&self) -> &[EventType] {
        &self.types
    }

    pub fn is_loading(&self) -> bool {
        self.events.is_loading()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub async fn mount(&mut self) {
        self.refresh().await;
        self.load_types().await;
    }

    pub async fn load_types(&mut self) {
        match self.client.event_types().await {
            Ok(types) => self.types = types,
            Err(e) => self
                .notices
                .push(Notice::failure("Failed to load event types", &e)),
        }
    }

    pub async fn set_type_filter(&mut self, type_code: Option<String>) {
        if self.filter.type_code != type_code {
            self.filter.type_code = type_code;
            self.refresh().await;
        }
    }

    pub async fn set_date_filter(&mut self, date: Option<Date>) {
        if self.filter.date != date {
            self.filter.date = date;
            self.refresh().await;
        }
    }

    pub async fn set_filter(&mut self, filter: EventFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.refresh().await;
        }
    }

    pub async fn clear_filters(&mut self) {
        self.set_filter(EventFilter::default()).await;
    }

    pub fn begin_fetch(&mut self) -> EventFetch {
        EventFetch {
            ticket: self.events.begin(),
            scope: self.scope,
            filter: self.filter.clone(),
        }
    }

    /// Returns whether the result was applied. Stale results are dropped
    /// without a notice.
    pub fn finish_fetch(&mut self, ticket: Ticket, res: Result<Vec<Event>, RequestError>) -> bool {
        match res {
            Ok(events) => self.events.complete(ticket, events),
            Err(e) => {
                if self.events.fail(ticket) {
                    let title = match self.scope {
                        Scope::Active => "Failed to load events",
                        Scope::Completed => "Failed to load completed events",
                    };
                    self.notices.push(Notice::failure(title, &e));
                }
                false
            }
        }
    }

    pub async fn refresh(&mut self) -> bool {
        let fetch = self.begin_fetch();
        let res = fetch.send(&self.client).await;
        self.finish_fetch(fetch.ticket(), res)
    }

    pub async fn create(&mut self, draft: &EventDraft) -> bool {
        if draft.name.trim().is_empty() {
            self.notices
                .push(Notice::error("Failed to create event", "Name is required"));
            return false;
        }
        let client = Arc::clone(&self.client);
        let res = client.create_event(&draft.to_create()).await.map(|_| ());
        self.after_write(res, ("Event created", draft.name.as_str()), "Failed to create event")
            .await
    }

    pub async fn update(&mut self, id: Id, draft: &EventDraft) -> bool {
        if draft.name.trim().is_empty() {
            self.notices
                .push(Notice::error("Failed to update event", "Name is required"));
            return false;
        }
        let client = Arc::clone(&self.client);
        let res = client.update_event(id, &draft.to_update()).await.map(|_| ());
        self.after_write(res, ("Event updated", draft.name.as_str()), "Failed to update event")
            .await
    }

    pub async fn delete(&mut self, id: Id) -> bool {
        let client = Arc::clone(&self.client);
        let res = client.delete_event(id).await;
        self.after_write(res, ("Event deleted", ""), "Failed to delete event")
            .await
    }

    pub async fn toggle_status(&mut self, id: Id) -> bool {
        let client = Arc::clone(&self.client);
        let res = client.toggle_event_status(id).await.map(|_| ());
        let message = match self.scope {
            Scope::Active => "Moved to completed",
            Scope::Completed => "Moved back to active",
        };
        self.after_write(res, ("Event status changed", message), "Failed to change event status")
            .await
    }

    async fn after_write(
        &mut self,
        res: Result<(), RequestError>,
        (title, message): (&str, &str),
        failure: &str,
    ) -> bool {
        match res {
            Ok(()) => {
                self.refresh().await;
                self.notices.push(Notice::success(title, message));
                true
            }
            Err(e) => {
                self.notices.push(Notice::failure(failure, &e));
                false
            }
        }
    }
}
