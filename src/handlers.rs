pub mod health;
pub mod market_demand;
