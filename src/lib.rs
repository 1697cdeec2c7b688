#![cfg_attr(not(test), no_std)]

//! serial-accel - Firmware core for a serial 3-axis accelerometer dongle
//!
//! This library provides the continuous sampling engine (interrupt-driven
//! ADC round-robin, circular averaging buffers, millisecond time base),
//! the counts -> millivolts -> G conversion pipeline, the output rate
//! governor, the operator configuration/calibration flows, and persistent
//! settings storage for an MMA7361-class analog accelerometer dongle.
//!
//! Hardware is reached exclusively through the traits in [`platform`];
//! the mock platform lets the complete firmware logic run on the host.

// Platform abstraction layer (ADC, UART, EEPROM, GPIO, timer)
pub mod platform;

// Core infrastructure (logging, shared state, time base)
pub mod core;

// Shared value types (axes, reading triples)
pub mod types;

// Sampling engine: scheduler, conversion pipeline, rate governor
pub mod sampler;

// Device settings and EEPROM-backed persistence
pub mod settings;

// Serial wire formats for governed emissions
pub mod output;

// Operator configuration / calibration state machine
pub mod config;

// First-boot self test
pub mod selftest;

// Top-level device wiring and run loop
pub mod app;
