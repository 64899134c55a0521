// src/core/mod.rs

pub mod alphabet;
pub mod color;
pub mod generator;
pub mod transform;
pub mod types;
