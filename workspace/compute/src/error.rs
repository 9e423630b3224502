use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug, PartialEq)]
pub enum ComputeError {
    /// An offer price could not be parsed as a decimal amount
    #[error("Invalid price '{value}' in offer {offer_index}")]
    InvalidPrice { offer_index: usize, value: String },

    /// An offer has no itinerary or no segment to take the carrier from
    #[error("Offer {offer_index} has no flight segments")]
    MissingSegment { offer_index: usize },

    /// A running total left the representable range
    #[error("Arithmetic overflow while aggregating {0}")]
    Overflow(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
