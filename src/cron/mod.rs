//! Periodic background jobs for the collector service.

pub mod jobs;
mod scheduler;

pub use scheduler::CronScheduler;
