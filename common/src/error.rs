use std::time::Duration;
use thiserror::Error;

/// Reasons an upstream resource could not be used.
///
/// Every variant is recoverable: callers route to synthetic or mock data
/// instead of failing the request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Unavailable {
    #[error("{resource} is not configured")]
    NotConfigured { resource: String },

    #[error("{resource} timed out after {timeout:?}")]
    Timeout { resource: String, timeout: Duration },

    #[error("{resource} request failed: {reason}")]
    Transport { resource: String, reason: String },

    #[error("{resource} returned status {status}")]
    Status { resource: String, status: u16 },

    #[error("{resource} payload malformed: {reason}")]
    Malformed { resource: String, reason: String },
}

impl Unavailable {
    pub fn malformed(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Unavailable::Malformed {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    pub fn not_configured(resource: impl Into<String>) -> Self {
        Unavailable::NotConfigured {
            resource: resource.into(),
        }
    }

    /// Name of the resource that failed
    pub fn resource(&self) -> &str {
        match self {
            Unavailable::NotConfigured { resource }
            | Unavailable::Timeout { resource, .. }
            | Unavailable::Transport { resource, .. }
            | Unavailable::Status { resource, .. }
            | Unavailable::Malformed { resource, .. } => resource,
        }
    }
}

pub type UpstreamResult<T> = std::result::Result<T, Unavailable>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_resource() {
        let err = Unavailable::Status {
            resource: "coingecko:bitcoin".to_string(),
            status: 429,
        };
        assert_eq!(err.to_string(), "coingecko:bitcoin returned status 429");
        assert_eq!(err.resource(), "coingecko:bitcoin");

        let err = Unavailable::malformed("market_chart", "missing prices");
        assert!(err.to_string().contains("missing prices"));
    }
}
