#![cfg_attr(not(test), no_std)]

//! framelog - Serial frame reception and sequential flash persistence
//!
//! This library implements the datalogger core for small MCU targets: a
//! length-prefixed, CRC-8 protected framing protocol on a point-to-point
//! serial link, a receiver state machine that validates and acknowledges
//! packets, and a flash store that appends accepted payloads into a
//! reserved erase region with a monotonically advancing write cursor. A
//! playback command streams the persisted region back over the link.
//!
//! Board bring-up, the RTOS, USB bridging and the concrete UART/flash
//! drivers stay outside this crate; they plug in through the traits in
//! [`platform`].

#[cfg(any(test, feature = "mock"))]
extern crate alloc;

// Platform abstraction layer (UART, flash, timer contracts + mocks)
pub mod platform;

// Core infrastructure (logging macros)
pub mod core;

// Wire protocol: framing, CRC-8, receiver state machine
pub mod communication;

// Sequential flash persistence
pub mod storage;
