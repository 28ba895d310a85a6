use thiserror::Error;

/// Gateway discovery failure. Non-2xx responses and bodies missing a `url`
/// field are both fatal for the current discovery attempt.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("gateway discovery request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("gateway discovery response had status {0}")]
    Status(reqwest::StatusCode),
}
