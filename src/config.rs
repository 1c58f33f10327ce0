//! Runtime configuration assembled from global CLI flags and environment.

use tracing_subscriber::EnvFilter;

/// Guest count assumed wherever an event or command leaves it unspecified.
pub const DEFAULT_GUEST_COUNT: u32 = 50;

/// Location stored for events created without one.
pub const DEFAULT_LOCATION: &str = "Majhitar, East Sikkim, India";

pub const DEFAULT_DB_PATH: &str = "partypal.db";

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub log_level: String,
}

impl Config {
    pub fn new(db_path: Option<String>, log_level: Option<String>) -> Self {
        Self {
            db_path: db_path
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            log_level: log_level
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// `RUST_LOG` wins over the configured level.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}

/// Installs the stderr `fmt` subscriber. Safe to call once per process.
pub fn init_tracing(config: &Config) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Guest count used by budget calculations: 0 means "not specified".
pub fn effective_guest_count(guest_count: u32) -> u32 {
    if guest_count == 0 {
        DEFAULT_GUEST_COUNT
    } else {
        guest_count
    }
}
