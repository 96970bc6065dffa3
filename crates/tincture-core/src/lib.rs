//! Core primitives for Tincture.
//!
//! This crate provides the observer plumbing shared by the Tincture crates:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Logging**: `tracing` target and span names for filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use tincture_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
