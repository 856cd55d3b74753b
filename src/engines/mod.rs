//! Word segmentation engines.
//!
//! This module contains implementations of phonics segmentation engines.
//!
//! # Available Engines
//!
//! - `phonics` - natural-phonics splitter driven by replaceable rule tables

pub mod phonics;
