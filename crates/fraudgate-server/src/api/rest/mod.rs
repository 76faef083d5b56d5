//! REST API module

mod extractors;
mod handlers;
mod router;
pub mod types;

pub use router::create_router;
pub use types::*;
