//! Andhrimnir error types

/// Andhrimnir error types
#[derive(Debug, thiserror::Error)]
pub enum AndhrimnirError {
    // Input errors
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Detection errors
    #[error("no food detected in image")]
    NoFoodDetected,

    // Lookup errors
    #[error("no food database match for '{0}'")]
    FoodNotFound(String),

    /// A required nutrient field is absent from the fetched record.
    ///
    /// Protein (id 1003) has no fallback; calories fail only when every id
    /// in the fallback order is absent.
    #[error("nutrient '{0}' missing from food record")]
    MissingNutrient(&'static str),

    // Calculation errors
    #[error("nutrient scaling produced a non-finite value")]
    Calculation,

    // Transport/API errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for Andhrimnir operations
pub type Result<T> = std::result::Result<T, AndhrimnirError>;
