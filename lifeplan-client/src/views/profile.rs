use super::notice::Notice;
use crate::api_client::ApiClient;
use lifeplan_common::api::UpdateProfileRequest;
use lifeplan_common::domain::Profile;
use std::sync::Arc;

#[derive(Debug)]
pub struct ProfileView {
    client: Arc<ApiClient>,
    profile: Option<Profile>,
    notices: Vec<Notice>,
}

impl ProfileView {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            profile: None,
            notices: Vec::new(),
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub async fn load(&mut self) -> bool {
        match self.client.profile().await {
            Ok(profile) => {
                self.profile = Some(profile);
                true
            }
            Err(e) => {
                self.notices
                    .push(Notice::failure("Failed to load profile", &e));
                false
            }
        }
    }

    /// Send the changed fields, then reload the whole profile.
    pub async fn update(&mut self, changes: &UpdateProfileRequest) -> bool {
        if changes.is_empty() {
            self.notices
                .push(Notice::error("Profile not updated", "Nothing to change"));
            return false;
        }

        match self.client.update_profile(changes).await {
            Ok(_) => {
                self.load().await;
                self.notices
                    .push(Notice::success("Profile updated", "Your changes were saved"));
                true
            }
            Err(e) => {
                self.notices
                    .push(Notice::failure("Failed to update profile", &e));
                false
            }
        }
    }
}
