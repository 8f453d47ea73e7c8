use crate::api_client::ApiClient;
use crate::error::RequestError;
use lifeplan_common::api::{LoginRequest, RegisterRequest};
use lifeplan_common::domain::User;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Startup, the stored token has not been checked yet.
    Initializing,
    Authenticated(User),
    Anonymous,
}

/// Who is logged in, derived from the token held by the [`ApiClient`].
#[derive(Debug)]
pub struct AuthSession {
    client: Arc<ApiClient>,
    state: AuthState,
}

impl AuthSession {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: AuthState::Initializing,
        }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == AuthState::Initializing
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// Validate the stored token by fetching the profile. A rejected token is
    /// removed so the next start does not try it again.
    pub async fn initialize(&mut self) -> &AuthState {
        if self.client.token().is_none() {
            self.state = AuthState::Anonymous;
            return &self.state;
        }

        match self.client.profile().await {
            Ok(profile) => {
                info!(user_id = profile.id, "session restored");
                self.state = AuthState::Authenticated(profile.into());
            }
            Err(e) => {
                warn!("stored session rejected: {e}");
                if let Err(e) = self.client.set_token(None) {
                    warn!("failed to clear stored session: {e}");
                }
                self.state = AuthState::Anonymous;
            }
        }

        &self.state
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, RequestError> {
        let res = self
            .client
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        self.client.set_token(Some(&res.token))?;

        let user = match res.user {
            Some(user) => user,
            None => match self.client.profile().await {
                Ok(profile) => profile.into(),
                Err(e) => {
                    // Never leave a token behind without a user to go with it.
                    self.client.set_token(None)?;
                    return Err(e);
                }
            },
        };

        info!(user_id = user.id, "logged in");
        Ok(self.authenticated(user))
    }

    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<User, RequestError> {
        let res = self
            .client
            .register(&RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                password_confirmation: password_confirmation.to_string(),
            })
            .await?;
        self.client.set_token(Some(&res.token))?;

        info!(user_id = res.user.id, "registered");
        Ok(self.authenticated(res.user))
    }

    /// Always ends anonymous with no token in memory. The server is only
    /// notified on a best effort basis; its error is handed back after the
    /// local cleanup. A store that could not be cleared wins over the server
    /// error, as `RequestError::Session`.
    pub async fn logout(&mut self) -> Result<(), RequestError> {
        let remote = self.client.logout().await;
        let local = self.client.set_token(None);
        self.state = AuthState::Anonymous;

        if let Err(e) = &remote {
            warn!("server did not confirm logout: {e}");
        }
        if let Err(e) = &local {
            warn!("failed to clear stored session: {e}");
        }
        info!("logged out");

        local?;
        remote
    }

    fn authenticated(&mut self, user: User) -> User {
        self.state = AuthState::Authenticated(user.clone());
        user
    }
}
