pub mod backend;
pub mod error;
pub mod statichtml;
pub mod webdriver;

pub use backend::{ElementHandle, PageDriver};
pub use error::DriverError;
pub use statichtml::StaticBackend;
pub use webdriver::WebDriverBackend;
