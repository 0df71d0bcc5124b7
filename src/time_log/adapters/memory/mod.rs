//! In-memory adapters for time log persistence.

mod time_log;

pub use time_log::InMemoryTimeLogRepository;
