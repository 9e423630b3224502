pub mod chart;
pub mod controller;
pub mod dashboard;
pub mod view;

pub use dashboard::DemandDashboard;
