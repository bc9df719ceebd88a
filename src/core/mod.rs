pub mod app;
pub mod banner;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod message;
pub mod render;
