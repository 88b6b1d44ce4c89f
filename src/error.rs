#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("Routing request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Routing service answered {code}: {message}")]
    Service { code: String, message: String },
    #[error("Route geometry is malformed: {0}")]
    BadGeometry(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
    #[error("Invalid coordinate list for {name}: {value:?}")]
    InvalidCoordinates { name: &'static str, value: String },
}
