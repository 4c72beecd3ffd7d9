pub mod files;
pub mod settings;
pub mod store;

pub use files::{data_dir, ensure_dir, log_file};
pub use settings::Settings;
pub use store::{JsonStore, Store};
