//! Error types for the catalog client.

#[derive(Debug, thiserror::Error)]
pub enum UnipaError {
    #[error("upstream issued no session cookie")]
    MissingSessionCookie,
    #[error("upstream returned HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },
    #[error(transparent)]
    RequestFailed(#[from] anyhow::Error),
}
