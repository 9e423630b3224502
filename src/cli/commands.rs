pub mod insights;
pub mod serve;

pub use insights::print_insights;
pub use serve::serve;
