#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, frames, and hit testing.

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod headless;
