//! Domain events.
//!
//! Lifecycle transitions on items and kits are described as events so that the
//! decision logic stays pure and the surrounding services can log and persist
//! a uniform record of what happened.

pub mod event;

pub use event::Event;
