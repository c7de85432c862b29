use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("file too large ({0} bytes)")]
    FileTooLarge(u64),

    #[error("unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("http error {status}")]
    Http {
        status: reqwest::StatusCode,
        retriable: bool,
    },

    #[error("io error: {0}")]
    Io(String),

    #[error("malformed response body: {0}")]
    Decode(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl ClientError {
    pub fn should_retry(&self) -> bool {
        match self {
            // Fatal errors - don't retry
            Self::InvalidUrl(_) => false,
            Self::FileTooLarge(_) => false,
            Self::UnsupportedMedia(_) => false,
            Self::Decode(_) => false,
            Self::Http { retriable, .. } => *retriable,

            // Temporary errors - retry
            Self::ConnectTimeout => true,
            Self::RequestTimeout => true,
            Self::Io(_) => true,
            Self::Unknown(_) => true,
        }
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if let Some(status) = err.status() {
            Self::Http {
                status,
                retriable: status.is_server_error(),
            }
        } else if err.is_request() || err.is_connect() {
            Self::Io(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_classification() {
        assert!(!ClientError::FileTooLarge(1024).should_retry());
        assert!(!ClientError::UnsupportedMedia("text/csv".to_string()).should_retry());
        assert!(!ClientError::Decode("bad json".to_string()).should_retry());

        assert!(ClientError::ConnectTimeout.should_retry());
        assert!(ClientError::RequestTimeout.should_retry());
        assert!(ClientError::Io("reset".to_string()).should_retry());

        assert!(
            !ClientError::Http {
                status: reqwest::StatusCode::UNPROCESSABLE_ENTITY,
                retriable: false,
            }
            .should_retry()
        );
        assert!(
            ClientError::Http {
                status: reqwest::StatusCode::BAD_GATEWAY,
                retriable: true,
            }
            .should_retry()
        );
    }
}
