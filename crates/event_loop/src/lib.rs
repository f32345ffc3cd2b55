//! Single-threaded task scheduling for the custom select widget.
//!
//! Time is virtual: the owner moves the clock forward with
//! [`TimerQueue::advance`] and receives the timers that came due, in order.

pub mod timers;

pub use timers::{FiredTimer, Timer, TimerId, TimerQueue};
