use crate::error::RequestError;
use crate::session::SessionStore;
use crate::settings::Settings;
use lifeplan_common::api::{
    AuthResponse, CreateEventRequest, CreateGoalRequest, ErrorMessage, LoginRequest,
    LoginResponse, RegisterRequest, UpdateEventRequest, UpdateGoalRequest, UpdateProfileRequest,
};
use lifeplan_common::domain::{format_date, Event, EventType, Goal, Id, Profile};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use time::Date;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin wrapper over the REST API.
///
/// Owns the session: the token is read from the store once when the client is
/// built and then attached to every request. [`ApiClient::set_token`] is the
/// only way to change it.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Box<dyn SessionStore>,
    token: RwLock<Option<String>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token().is_some())
            .finish()
    }
}

async fn handle_response_error(res: Response) -> Result<Response, RequestError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let message = match res.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorMessage>(&body)
            .ok()
            .and_then(|x| x.message),
        Err(_) => None,
    };

    Err(RequestError::status(status, message))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, RequestError> {
    serde_json::from_slice(body).map_err(|e| RequestError::Decode(e.to_string()))
}

fn with_date(endpoint: String, date: Option<Date>) -> String {
    match date {
        Some(date) => format!("{endpoint}?date={}", format_date(date)),
        None => endpoint,
    }
}

/// Path for the event listings: every combination of active/completed, a type
/// code and a date filter maps to one endpoint.
pub(crate) fn events_endpoint(completed: bool, type_code: Option<&str>, date: Option<Date>) -> String {
    let mut endpoint = String::from("/event");
    if let Some(code) = type_code {
        endpoint.push('/');
        endpoint.push_str(&urlencoding::encode(code));
    }
    if completed {
        endpoint.push_str("/completed");
    }
    with_date(endpoint, date)
}

impl ApiClient {
    pub fn new(base_url: &str, store: impl SessionStore + 'static) -> Result<Self, RequestError> {
        Self::with_timeout(base_url, store, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        store: impl SessionStore + 'static,
        timeout: Duration,
    ) -> Result<Self, RequestError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let token = store.load()?.filter(|x| !x.is_empty());
        debug!(base_url, has_token = token.is_some(), "api client ready");

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            store: Box::new(store),
            token: RwLock::new(token),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, RequestError> {
        Self::with_timeout(
            &settings.server_address,
            settings.session_store(),
            settings.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn read_token(&self) -> RwLockReadGuard<'_, Option<String>> {
        self.token.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_token(&self) -> RwLockWriteGuard<'_, Option<String>> {
        self.token.write().unwrap_or_else(|e| e.into_inner())
    }

    /// The token currently attached to requests.
    pub fn token(&self) -> Option<String> {
        self.read_token().clone()
    }

    /// Install or remove the session token, both in memory and in the store.
    /// An empty token is the same as no token.
    pub fn set_token(&self, token: Option<&str>) -> Result<(), RequestError> {
        match token.filter(|x| !x.is_empty()) {
            Some(value) => {
                // A token that could not be stored is never attached to requests.
                self.store.save(value)?;
                *self.write_token() = Some(value.to_string());
            }
            None => {
                // Forgetting always happens in memory, even when the store failed.
                *self.write_token() = None;
                self.store.clear()?;
            }
        }
        Ok(())
    }

    async fn execute<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<Response, RequestError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%method, endpoint, "api request");

        let mut req = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.token() {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await.map_err(|e| {
            warn!(endpoint, "request failed: {e}");
            RequestError::from(e)
        })?;
        handle_response_error(res).await
    }

    /// Send a request and parse the JSON body of a successful response.
    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let res = self.execute(method, endpoint, body).await?;
        let body = res.bytes().await?;
        decode(&body)
    }

    /// Like [`ApiClient::request`] but an empty success body is allowed.
    async fn request_optional<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<Option<T>, RequestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let res = self.execute(method, endpoint, body).await?;
        let body = res.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        decode(&body).map(Some)
    }

    /// Send a request where only the status matters.
    pub async fn request_empty(&self, method: Method, endpoint: &str) -> Result<(), RequestError> {
        self.execute::<()>(method, endpoint, None).await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, RequestError> {
        self.request::<T, ()>(Method::GET, endpoint, None).await
    }

    pub async fn register(&self, data: &RegisterRequest) -> Result<AuthResponse, RequestError> {
        self.request(Method::POST, "/register", Some(data)).await
    }

    pub async fn login(&self, data: &LoginRequest) -> Result<LoginResponse, RequestError> {
        self.request(Method::POST, "/login", Some(data)).await
    }

    /// Tell the server the session is over. Does not touch the local token.
    pub async fn logout(&self) -> Result<(), RequestError> {
        self.request_empty(Method::GET, "/logout").await
    }

    pub async fn events(&self, date: Option<Date>) -> Result<Vec<Event>, RequestError> {
        self.get(&events_endpoint(false, None, date)).await
    }

    pub async fn completed_events(&self, date: Option<Date>) -> Result<Vec<Event>, RequestError> {
        self.get(&events_endpoint(true, None, date)).await
    }

    pub async fn events_by_type(
        &self,
        type_code: &str,
        date: Option<Date>,
    ) -> Result<Vec<Event>, RequestError> {
        self.get(&events_endpoint(false, Some(type_code), date)).await
    }

    pub async fn completed_events_by_type(
        &self,
        type_code: &str,
        date: Option<Date>,
    ) -> Result<Vec<Event>, RequestError> {
        self.get(&events_endpoint(true, Some(type_code), date)).await
    }

    pub async fn event(&self, id: Id) -> Result<Event, RequestError> {
        self.get(&format!("/event/{id}")).await
    }

    pub async fn create_event(
        &self,
        data: &CreateEventRequest,
    ) -> Result<Option<Event>, RequestError> {
        self.request_optional(Method::POST, "/event", Some(data)).await
    }

    pub async fn update_event(
        &self,
        id: Id,
        data: &UpdateEventRequest,
    ) -> Result<Option<Event>, RequestError> {
        self.request_optional(Method::PUT, &format!("/event/{id}"), Some(data))
            .await
    }

    pub async fn delete_event(&self, id: Id) -> Result<(), RequestError> {
        self.request_empty(Method::DELETE, &format!("/event/{id}"))
            .await
    }

    pub async fn toggle_event_status(&self, id: Id) -> Result<Option<Event>, RequestError> {
        self.request_optional::<Event, ()>(Method::GET, &format!("/event/{id}/statusChange"), None)
            .await
    }

    pub async fn event_types(&self) -> Result<Vec<EventType>, RequestError> {
        self.get("/event/types").await
    }

    pub async fn goals(&self) -> Result<Vec<Goal>, RequestError> {
        self.get("/goal").await
    }

    pub async fn completed_goals(&self) -> Result<Vec<Goal>, RequestError> {
        self.get("/goal/completed").await
    }

    pub async fn goal(&self, id: Id) -> Result<Goal, RequestError> {
        self.get(&format!("/goal/{id}")).await
    }

    pub async fn create_goal(&self, data: &CreateGoalRequest) -> Result<Option<Goal>, RequestError> {
        self.request_optional(Method::POST, "/goal", Some(data)).await
    }

    pub async fn update_goal(
        &self,
        id: Id,
        data: &UpdateGoalRequest,
    ) -> Result<Option<Goal>, RequestError> {
        self.request_optional(Method::PUT, &format!("/goal/{id}"), Some(data))
            .await
    }

    pub async fn delete_goal(&self, id: Id) -> Result<(), RequestError> {
        self.request_empty(Method::DELETE, &format!("/goal/{id}"))
            .await
    }

    pub async fn toggle_goal_status(&self, id: Id) -> Result<Option<Goal>, RequestError> {
        self.request_optional::<Goal, ()>(Method::GET, &format!("/goal/{id}/statusChange"), None)
            .await
    }

    pub async fn profile(&self) -> Result<Profile, RequestError> {
        self.get("/profile").await
    }

    pub async fn update_profile(
        &self,
        data: &UpdateProfileRequest,
    ) -> Result<Option<Profile>, RequestError> {
        self.request_optional(Method::PUT, "/profile", Some(data))
            .await
    }
}
