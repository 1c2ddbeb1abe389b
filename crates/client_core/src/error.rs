use thiserror::Error;

pub const PRODUCT_NOT_FOUND: &str = "product not found";
pub const SERVER_ERROR: &str = "server error occurred";
pub const FETCH_FAILED: &str = "failed to fetch product";
pub const SEARCH_FAILED: &str = "failed to search products";
pub const CREATE_FAILED: &str = "failed to create product";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("product not found")]
    NotFound,
    #[error("server responded with status {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request was never sent: {0}")]
    Dispatch(String),
}

impl FetchError {
    /// Network, decoding, URL and dispatch failures are indistinguishable to the user.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::InvalidUrl(_) | Self::Dispatch(_)
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound => Some(404),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) | Self::Dispatch(_) => None,
        }
    }

    pub fn lookup_message(&self) -> &'static str {
        match self {
            Self::NotFound => PRODUCT_NOT_FOUND,
            Self::Status { .. } => SERVER_ERROR,
            Self::Transport(_) | Self::InvalidUrl(_) | Self::Dispatch(_) => FETCH_FAILED,
        }
    }

    pub fn search_message(&self) -> &'static str {
        if self.is_transport() {
            SEARCH_FAILED
        } else {
            SERVER_ERROR
        }
    }

    pub fn create_message(&self) -> &'static str {
        CREATE_FAILED
    }
}
