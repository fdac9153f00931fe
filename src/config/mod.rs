mod config;

pub use config::{
    CollectorSettings, CronSettings, ExpoSettings, MarketSettings, PostgresSettings, Settings,
};
