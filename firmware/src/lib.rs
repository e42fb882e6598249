//! GPIO/ADC to USB HID gamepad for RP2040.
//!
//! This crate provides the embedded side of the gamepad: pin and ADC
//! adapters for the [`pico_gamepad_core`] input traits and a USB HID sink.
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | NORTH    | 5    | Button to ground, internal pull-up |
//! | WEST     | 6    | Button to ground, internal pull-up |
//! | SOUTH    | 7    | Button to ground, internal pull-up |
//! | EAST     | 8    | Button to ground, internal pull-up |
//! | MODE     | 9    | Button to ground, internal pull-up |
//! | SELECT   | 20   | Button to ground, internal pull-up |
//! | START    | 21   | Button to ground, internal pull-up |
//! | Stick X  | 26   | ADC0 |
//! | Stick Y  | 27   | ADC1 |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with two tasks:
//!
//! - **USB Task**: Runs the USB device stack and publishes readiness
//! - **Gamepad Task**: On a fixed ticker, samples inputs and sends the gated
//!   report through the HID writer
//!
//! The only value shared between the tasks is the USB readiness flag.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//!
//! # Re-exports
//!
//! This crate re-exports the public items of [`pico_gamepad_core`] so
//! consumers only need to depend on this crate.

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they link conflicting panic handlers");

// Re-export core types for convenience
pub use pico_gamepad_core::{
    build_and_maybe_send, AdcChannel, AnalogInput, AxisSample, AxisScale, BridgeError,
    ButtonBinding, Buttons, ConfigError, Cycle, DigitalInput, GamepadBridge, GamepadConfig,
    GamepadReport, IdlePolicy, InputSampler, Level, LineId, OutputError, OutputSink,
    PollInterval, ReportKind, TransmissionState, PICO_BINDINGS, REPORT_DESCRIPTOR,
};

pub mod pins;
pub mod usb_output;

pub use pins::{AdcAxes, PinBank, MAX_AXES, MAX_BUTTONS};
pub use usb_output::{configure_usb_hid, UsbHidOutput, UsbStateHandler, REPORT_BUFFER_SIZE};
