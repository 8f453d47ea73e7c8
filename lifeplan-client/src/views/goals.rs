use super::listing::Listing;
use super::notice::Notice;
use super::Scope;
use crate::api_client::ApiClient;
use crate::error::RequestError;
use lifeplan_common::api::{CreateGoalRequest, UpdateGoalRequest};
use lifeplan_common::domain::{Goal, Id};
use std::sync::Arc;

#[derive(Debug)]
pub struct GoalsView {
    client: Arc<ApiClient>,
    scope: Scope,
    goals: Listing<Goal>,
    notices: Vec<Notice>,
}

impl GoalsView {
    pub fn new(client: Arc<ApiClient>, scope: Scope) -> Self {
        Self {
            client,
            scope,
            goals: Listing::new(),
            notices: Vec::new(),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn goals(&self) -> &[Goal] {
        self.goals.items()
    }

    pub fn is_loading(&self) -> bool {
        self.goals.is_loading()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    pub async fn refresh(&mut self) -> bool {
        let ticket = self.goals.begin();
        let res = match self.scope {
            Scope::Active => self.client.goals().await,
            Scope::Completed => self.client.completed_goals().await,
        };

        match res {
            Ok(goals) => self.goals.complete(ticket, goals),
            Err(e) => {
                if self.goals.fail(ticket) {
                    self.notices
                        .push(Notice::failure("Failed to load goals", &e));
                }
                false
            }
        }
    }

    pub async fn create(&mut self, name: &str) -> bool {
        if name.trim().is_empty() {
            self.notices
                .push(Notice::error("Failed to create goal", "Name is required"));
            return false;
        }
        let client = Arc::clone(&self.client);
        let res = client
            .create_goal(&CreateGoalRequest {
                name: name.to_string(),
            })
            .await
            .map(|_| ());
        self.after_write(res, ("Goal created", name), "Failed to create goal")
            .await
    }

    pub async fn update(&mut self, id: Id, name: &str) -> bool {
        if name.trim().is_empty() {
            self.notices
                .push(Notice::error("Failed to update goal", "Name is required"));
            return false;
        }
        let client = Arc::clone(&self.client);
        let res = client
            .update_goal(
                id,
                &UpdateGoalRequest {
                    name: Some(name.to_string()),
                },
            )
            .await
            .map(|_| ());
        self.after_write(res, ("Goal updated", name), "Failed to update goal")
            .await
    }

    pub async fn delete(&mut self, id: Id) -> bool {
        let client = Arc::clone(&self.client);
        let res = client.delete_goal(id).await;
        self.after_write(res, ("Goal deleted", ""), "Failed to delete goal")
            .await
    }

    pub async fn toggle_status(&mut self, id: Id) -> bool {
        let client = Arc::clone(&self.client);
        let res = client.toggle_goal_status(id).await.map(|_| ());
        let message = match self.scope {
            Scope::Active => "Moved to completed",
            Scope::Completed => "Moved back to active",
        };
        self.after_write(res, ("Goal status changed", message), "Failed to change goal status")
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
