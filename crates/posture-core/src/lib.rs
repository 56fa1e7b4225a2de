//! # Posture-Core
//!
//! Core types and geometry for the posture scoring engine: the 33-point
//! landmark frame produced by an upstream pose model, exercise identity,
//! and the feedback/metric vocabulary shared by the analysis crate.

pub mod error;
pub mod exercise;
pub mod geometry;
pub mod types;

pub use error::{Error, Result};
pub use exercise::*;
pub use geometry::*;
pub use types::*;
