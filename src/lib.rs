// src/lib.rs

pub mod api;
pub mod app_state;
pub mod assets;
pub mod config;
pub mod error;
pub mod records;
