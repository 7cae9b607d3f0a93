pub mod aggregator;
pub mod generator;
pub mod synchronizer;
pub mod views;

pub use aggregator::{HolidayStreak, LeaveRisk, LeaveSimulation};
