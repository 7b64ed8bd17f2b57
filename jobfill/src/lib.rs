#[path = "handlers.rs"]
pub mod handlers;

pub use handlers::{handle_detect, handle_fill, handle_rules, load_resume_data};
