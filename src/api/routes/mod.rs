pub mod coins;
pub mod health;
pub mod stats;
pub mod update;
