// src/core/mod.rs
pub mod page;
pub mod signals;
