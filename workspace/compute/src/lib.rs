pub mod error;
pub mod insights;
pub mod offers;
pub mod prompt;

use insights::InsightsComputer;

/// Returns the insights computer used by the server, pricing in `currency`.
pub fn default_compute(currency: &str) -> InsightsComputer {
    InsightsComputer::new(currency)
}
