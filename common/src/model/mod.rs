pub mod collection;
pub mod config;
pub mod file;
pub mod pipeline;
pub mod user;
