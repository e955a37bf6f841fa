//! ESP32-S3 firmware-specific modules for alco-rs
//!
//! This crate contains hardware-specific code that cannot compile on desktop
//! targets: board pin assignments, peripheral bring-up, the ADC adapter for
//! the MQ-3 sensor and the button edge task.

#![no_std]

pub mod app_state;
pub mod board;
pub mod button;
pub mod mq3;
