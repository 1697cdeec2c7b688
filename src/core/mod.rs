//! Core infrastructure
//!
//! This module contains the fundamental building blocks shared by the rest
//! of the firmware: logging, interrupt-safe shared state, and the
//! millisecond time base.

pub mod logging;
pub mod sync;
pub mod time;
