//! API server HTTP handlers.

mod analyze;
mod compare;
mod seo;
mod status;

pub use analyze::{analyze_basic_handler, analyze_handler};
pub use compare::compare_handler;
pub use seo::seo_handler;
pub use status::status_handler;
