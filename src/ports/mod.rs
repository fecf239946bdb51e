//! Ports (trait boundaries) between the training core and its observers.

pub mod observer;

pub use observer::Observer;
