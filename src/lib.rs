// src/lib.rs

pub mod api;
pub mod app;
pub mod chat_message;
pub mod config;
pub mod constants;
pub mod context;
pub mod errors;
pub mod image_export;
pub mod inspiration;
pub mod key_handlers;
pub mod logging;
pub mod markdown;
pub mod models;
pub mod session;
pub mod status_indicator;
pub mod store;
pub mod ui;
