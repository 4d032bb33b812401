mod application;
pub mod data;
mod output;
mod runtime_config;

pub use application::{Application, ApplicationError};
pub use output::Printer;
pub use runtime_config::RuntimeConfig;
