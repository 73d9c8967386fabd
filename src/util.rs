pub mod event_log;
pub mod read_bytes;
