//! Data models for the cake booking server

pub mod cake;
pub mod order;
pub mod sales;
pub mod timeslot;

// Re-export commonly used types
pub use cake::{Cake, CakeSize};
pub use order::{CakeLineItem, Order, OrderStatus};
pub use sales::{MonthlyReport, MonthlySummary};
pub use timeslot::{Day, ProvisionOutcome, TimeLabel, Timeslot};
