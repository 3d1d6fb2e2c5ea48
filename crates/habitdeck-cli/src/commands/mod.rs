pub mod config;
pub mod habit;
pub mod history;
pub mod maintenance;
pub mod note;
pub mod stats;
pub mod sync;
pub mod toggle;
pub mod week;
