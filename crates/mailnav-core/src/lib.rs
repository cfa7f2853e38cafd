//! Host event-loop primitives for mailnav.
//!
//! This crate provides the small set of event-loop facilities the window
//! manager is written against:
//!
//! - **Signal/Slot System**: Type-safe subscription and notification
//! - **Task Queue**: Deferred/idle task processing behind the [`Scheduler`] trait
//! - **Logging**: Tracing targets and span names shared by the workspace
//!
//! # Signal/Slot Example
//!
//! ```
//! use mailnav_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Deferred Task Example
//!
//! ```
//! use mailnav_core::{IdleQueue, Scheduler};
//!
//! let queue = IdleQueue::new();
//! queue.schedule_deferred(Box::new(|| println!("next turn")));
//!
//! // The host loop drains the queue once per turn.
//! assert_eq!(queue.run_pending(), 1);
//! ```

mod error;
pub mod logging;
pub mod signal;
mod task;

pub use error::{CoreError, Result};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use task::{DeferredTask, IdleQueue, Scheduler, TaskId, TaskQueue};
