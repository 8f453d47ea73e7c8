use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("Failed to read session: {0}")]
    Read(std::io::Error),

    #[error("Failed to write session: {0}")]
    Write(std::io::Error),
}

/// Every way a call to the API can fail. All of them end up in front of the
/// user as a single message, see the `Display` impl.
#[derive(thiserror::Error, Debug)]
pub enum RequestError {
    #[error("Could not reach the server: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Unexpected response from the server: {0}")]
    Decode(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl RequestError {
    pub fn status(status: StatusCode, message: Option<String>) -> Self {
        let message = message
            .filter(|x| !x.is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
        Self::Status { status, message }
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(StatusCode::UNAUTHORIZED)
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            RequestError::Decode(value.to_string())
        } else {
            RequestError::Transport(value)
        }
    }
}
