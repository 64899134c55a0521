// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod pipeline;
pub mod preview;
pub mod render;
pub mod session;

pub use crate::core::generator::{generate_stimuli, StimulusGenerator};
pub use crate::error::{Result, StimulusError};
