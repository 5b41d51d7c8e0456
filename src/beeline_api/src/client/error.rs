use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Bad credentials, a rejected cached session or a request made before signing in.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A marker is missing from the portal markup, or the value next to it is not a number.
    #[error("Could not extract {0} from the portal response, the page layout may have changed")]
    Parse(String),

    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),

    #[error("Invalid redirect location: {0}")]
    InvalidRedirect(String),

    #[error("Invalid base url: {0}")]
    InvalidBaseUrl(String),

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
