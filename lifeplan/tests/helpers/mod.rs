#![allow(dead_code)]

use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use lifeplan_client::api_client::ApiClient;
use lifeplan_client::error::SessionError;
use lifeplan_client::session::{MemorySessionStore, SessionStore};
use lifeplan_common::api::{CreateEventRequest, CreateGoalRequest};
use lifeplan_common::domain::{Event, EventType, Goal, Id, Profile, User};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub fn base_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

pub fn build_client(server: &MockServer, store: &MemorySessionStore) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(&base_url(server), store.clone()).unwrap())
}

/// Store that can be read but never written, like a session file on a
/// read-only disk.
#[derive(Debug, Clone, Default)]
pub struct ReadOnlyStore {
    token: Option<String>,
}

impl ReadOnlyStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
        }
    }
}

fn read_only() -> SessionError {
    SessionError::Write(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "read-only file system",
    ))
}

impl SessionStore for ReadOnlyStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.token.clone())
    }

    fn save(&self, _token: &str) -> Result<(), SessionError> {
        Err(read_only())
    }

    fn clear(&self) -> Result<(), SessionError> {
        Err(read_only())
    }
}

pub fn fake_user() -> User {
    User {
        id: (1i64..1000).fake(),
        name: Name().fake(),
        email: FreeEmail().fake(),
    }
}

pub fn profile_of(user: &User) -> Profile {
    Profile {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        bio: None,
        avatar: None,
        birthday: None,
        telegram: None,
        height: None,
        weight: None,
    }
}

pub fn sport() -> EventType {
    EventType {
        id: 1,
        name: "Sport".into(),
        code: "sport".into(),
    }
}

pub fn event(id: Id, name: &str, owner: &User) -> Event {
    Event {
        id,
        name: name.into(),
        completed: false,
        kind: None,
        user: owner.clone(),
        activate_date: None,
        activate_time: None,
    }
}

pub fn goal(id: Id, name: &str, owner: &User) -> Goal {
    Goal {
        id,
        name: name.into(),
        completed: false,
        user: owner.clone(),
    }
}

fn not_found(what: &str) -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(serde_json::json!({
        "message": format!("{what} not found")
    }))
}

fn id_segment(req: &Request) -> Option<Id> {
    req.url
        .path_segments()?
        .nth(2)
        .and_then(|x| x.parse().ok())
}

/// Small stateful stand-in for the REST API: enough of `/event` and `/goal`
/// for writes to show up in the next list fetch.
#[derive(Clone)]
pub struct Backend {
    owner: User,
    events: Arc<Mutex<Vec<Event>>>,
    goals: Arc<Mutex<Vec<Goal>>>,
    next_id: Arc<Mutex<Id>>,
}

impl Backend {
    pub fn new(owner: User) -> Self {
        Self {
            owner,
            events: Arc::default(),
            goals: Arc::default(),
            next_id: Arc::new(Mutex::new(100)),
        }
    }

    pub fn with_events(self, events: Vec<Event>) -> Self {
        *self.events.lock().unwrap() = events;
        self
    }

    pub fn with_goals(self, goals: Vec<Goal>) -> Self {
        *self.goals.lock().unwrap() = goals;
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn goals(&self) -> Vec<Goal> {
        self.goals.lock().unwrap().clone()
    }

    fn next_id(&self) -> Id {
        let mut id = self.next_id.lock().unwrap();
        *id += 1;
        *id
    }

    pub async fn mount(&self, server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/event"))
            .respond_with(ListEvents {
                backend: self.clone(),
                completed: false,
            })
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/event/completed"))
            .respond_with(ListEvents {
                backend: self.clone(),
                completed: true,
            })
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/event"))
            .respond_with(CreateEvent(self.clone()))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/api/event/\d+/statusChange$"))
            .respond_with(ToggleEvent(self.clone()))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/goal"))
            .respond_with(ListGoals {
                backend: self.clone(),
                completed: false,
            })
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/goal/completed"))
            .respond_with(ListGoals {
                backend: self.clone(),
                completed: true,
            })
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/goal"))
            .respond_with(CreateGoal(self.clone()))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/api/goal/\d+/statusChange$"))
            .respond_with(ToggleGoal(self.clone()))
            .mount(server)
            .await;
        Mock::given(method("DELETE"))
            .and(path_regex(r"^/api/goal/\d+$"))
            .respond_with(DeleteGoal(self.clone()))
            .mount(server)
            .await;
    }
}

struct ListEvents {
    backend: Backend,
    completed: bool,
}

impl Respond for ListEvents {
    fn respond(&self, req: &Request) -> ResponseTemplate {
        let date = req
            .url
            .query_pairs()
            .find(|(k, _)| k == "date")
            .map(|(_, v)| v.into_owned());
        let events: Vec<Event> = self
            .backend
            .events()
            .into_iter()
            .filter(|x| x.completed == self.completed)
            .filter(|x| date.is_none() || x.activate_date == date)
            .collect();
        ResponseTemplate::new(200).set_body_json(events)
    }
}

struct CreateEvent(Backend);

impl Respond for CreateEvent {
    fn respond(&self, req: &Request) -> ResponseTemplate {
        let Ok(body) = serde_json::from_slice::<CreateEventRequest>(&req.body) else {
            return ResponseTemplate::new(422);
        };
        let (date, time) = match body.activate_at {
            Some(value) => match value.split_once(' ') {
                Some((date, time)) => (Some(date.to_string()), Some(time.to_string())),
                None => (Some(value), None),
            },
            None => (None, None),
        };
        let mut created = event(self.0.next_id(), &body.name, &self.0.owner);
        created.activate_date = date;
        created.activate_time = time;
        self.0.events.lock().unwrap().push(created.clone());
        ResponseTemplate::new(201).set_body_json(created)
    }
}

struct ToggleEvent(Backend);

impl Respond for ToggleEvent {
    fn respond(&self, req: &Request) -> ResponseTemplate {
        let id = id_segment(req);
        let mut events = self.0.events.lock().unwrap();
        match events.iter_mut().find(|x| Some(x.id) == id) {
            Some(found) => {
                found.completed = !found.completed;
                ResponseTemplate::new(200).set_body_json(found.clone())
            }
            None => not_found("Event"),
        }
    }
}

struct ListGoals {
    backend: Backend,
    completed: bool,
}

impl Respond for ListGoals {
    fn respond(&self, _req: &Request) -> ResponseTemplate {
        let goals: Vec<Goal> = self
            .backend
            .goals()
            .into_iter()
            .filter(|x| x.completed == self.completed)
            .collect();
        ResponseTemplate::new(200).set_body_json(goals)
    }
}

struct CreateGoal(Backend);

impl Respond for CreateGoal {
    fn respond(&self, req: &Request) -> ResponseTemplate {
        let Ok(body) = serde_json::from_slice::<CreateGoalRequest>(&req.body) else {
            return ResponseTemplate::new(422);
        };
        let created = goal(self.0.next_id(), &body.name, &self.0.owner);
        self.0.goals.lock().unwrap().push(created.clone());
        ResponseTemplate::new(201).set_body_json(created)
    }
}

struct ToggleGoal(Backend);

impl Respond for ToggleGoal {
    fn respond(&self, req: &Request) -> ResponseTemplate {
        let id = id_segment(req);
        let mut goals = self.0.goals.lock().unwrap();
        match goals.iter_mut().find(|x| Some(x.id) == id) {
            Some(found) => {
                found.completed = !found.completed;
                ResponseTemplate::new(200).set_body_json(found.clone())
            }
            None => not_found("Goal"),
        }
    }
}

struct DeleteGoal(Backend);

impl Respond for DeleteGoal {
    fn respond(&self, req: &Request) -> ResponseTemplate {
        let id = id_segment(req);
        let mut goals = self.0.goals.lock().unwrap();
        match goals.iter().position(|x| Some(x.id) == id) {
            Some(index) => {
                goals.remove(index);
                ResponseTemplate::new(204)
            }
            None => not_found("Goal"),
        }
    }
}
