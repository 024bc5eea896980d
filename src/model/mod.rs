pub mod config;
pub mod report;
pub mod request;

pub use config::Config;
pub use report::*;
pub use request::*;
