use crate::error::RequestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Short lived message for the user, the equivalent of a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: &str, message: &str) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    /// Failure notice. The server's own message wins over the generic one.
    pub fn failure(title: &str, err: &RequestError) -> Self {
        Self::error(title, &err.to_string())
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{}: {}", self.title, self.message)
        }
    }
}
