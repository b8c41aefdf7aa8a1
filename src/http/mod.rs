mod envelope;
mod handlers;
pub mod metrics;

pub use handlers::{router, AppState};
