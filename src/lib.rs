// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod core;
pub mod params;

pub mod classify;
pub mod monitor;
pub mod notify;
pub mod render;
