pub mod catalog;
pub mod codec;
pub mod config;
pub mod errors;
pub mod logging;
pub mod resolution;
pub mod source;
pub mod types;
pub mod v1;
pub mod validation;
