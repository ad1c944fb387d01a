use thiserror::Error;

/// Every way a single generation attempt can fail. None of these reach the
/// caller of `ItineraryGenerator::generate`; they select the fallback path.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Service responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Service returned no text payload")]
    EmptyPayload,
    #[error("Payload is not a valid itinerary: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error("Itinerary contains no days")]
    NoDays,
    #[error("Generative model unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment error: {0} not set")]
    MissingVar(&'static str),
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
