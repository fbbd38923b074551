pub mod app;
pub mod chart;
pub mod clock;
pub mod config;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod models;
pub mod offline;
pub mod state;
pub mod storage;
pub mod store;
pub mod summary;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use store::EntryStore;
