use std::fmt::Formatter;

#[derive(Debug)]
pub enum GeocodeError {
    /// The API answered with something that is not a usable JSON document
    InvalidServerResponse { url: String, status: Option<u16> },
    InvalidCredentials(String),
    QuotaExceeded(String),
    UnsupportedOperation(String),
    InvalidArgument(String),
    InvalidEndpoint(String),
    /// A configured header value (API key, user agent) cannot be sent
    InvalidHeader(String),
    Transport(Box<dyn std::error::Error + Send + Sync>),
    CollectionIsEmpty,
    OutOfBounds(usize)
}

impl GeocodeError {
    pub fn invalid_response(url: &str) -> Self {
        GeocodeError::InvalidServerResponse { url: url.to_owned(), status: None }
    }

    pub fn invalid_status(url: &str, status: u16) -> Self {
        GeocodeError::InvalidServerResponse { url: url.to_owned(), status: Some(status) }
    }

    /// Failures caused by the remote API rather than by the caller
    pub fn is_upstream(&self) -> bool {
        match self {
            GeocodeError::InvalidServerResponse { .. }
            | GeocodeError::InvalidCredentials(_)
            | GeocodeError::QuotaExceeded(_)
            | GeocodeError::Transport(_) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            GeocodeError::InvalidServerResponse { url, status: Some(status) } => {
                write!(f, "The geocoder server returned an invalid response ({}) for query \"{}\"", status, url)
            },
            GeocodeError::InvalidServerResponse { url, status: None } => {
                write!(f, "The geocoder server returned an invalid response for query \"{}\"", url)
            },
            GeocodeError::InvalidCredentials(msg) => {
                write!(f, "Invalid credentials: {}", msg)
            },
            GeocodeError::QuotaExceeded(msg) => {
                write!(f, "Quota exceeded: {}", msg)
            },
            GeocodeError::UnsupportedOperation(msg) => {
                write!(f, "Unsupported operation: {}", msg)
            },
            GeocodeError::InvalidArgument(msg) => {
                write!(f, "Invalid argument: {}", msg)
            },
            GeocodeError::InvalidEndpoint(msg) => {
                write!(f, "Invalid endpoint: {}", msg)
            },
            GeocodeError::InvalidHeader(msg) => {
                write!(f, "Invalid header: {}", msg)
            },
            GeocodeError::Transport(inner) => {
                write!(f, "Transport: {}", inner)
            },
            GeocodeError::CollectionIsEmpty => {
                write!(f, "The collection is empty")
            },
            GeocodeError::OutOfBounds(index) => {
                write!(f, "Index {} is out of bounds", index)
            }
        }
    }
}

impl std::error::Error for GeocodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeocodeError::Transport(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GeocodeError {
    fn from(error: reqwest::Error) -> Self {
        GeocodeError::Transport(Box::new(error))
    }
}

impl From<reqwest::header::InvalidHeaderValue> for GeocodeError {
    fn from(error: reqwest::header::InvalidHeaderValue) -> Self {
        GeocodeError::InvalidHeader(format!("invalid header value: {}", error))
    }
}

impl From<reqwest::header::InvalidHeaderName> for GeocodeError {
    fn from(error: reqwest::header::InvalidHeaderName) -> Self {
        GeocodeError::InvalidHeader(format!("invalid header name: {}", error))
    }
}
