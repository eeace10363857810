//! Badge environment logger - testable core logic.
//!
//! This library contains the polling-loop logic that can be tested on the
//! host machine. The binary (`main.rs`) uses this library and adds the
//! embedded-specific code: real drivers for the display, sensors, LEDs,
//! buttons, and battery sense.
//!
//! # Architecture
//!
//! Every external collaborator (sensor, display, LED chain, buttons, clock,
//! log sink) is modeled as a port trait in [`ports`]. The loop itself is a
//! pure step function in [`app`]: `(state, ports) -> (state', effects)`.
//! Loop-owned state (animation mode, log cadence counter) lives in explicit
//! structs threaded through each call, never in globals.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the
//! standard test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod animation;
pub mod app;
pub mod battery;
pub mod config;
pub mod ports;

#[cfg(test)]
pub(crate) mod mocks;
