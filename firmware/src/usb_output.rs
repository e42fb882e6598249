//! USB HID gamepad output implementation.

use defmt::info;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{HidWriter, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, Handler};
use pico_gamepad_core::{GamepadReport, OutputError, OutputSink, REPORT_DESCRIPTOR};
use portable_atomic::{AtomicBool, Ordering};

/// HID IN endpoint buffer size; holds one [`GamepadReport`] with its ID.
pub const REPORT_BUFFER_SIZE: usize = 8;

const _: () = assert!(GamepadReport::SIZE <= REPORT_BUFFER_SIZE);

type UsbDriver<'d> = Driver<'d, USB>;

#[inline]
fn endpoint_error_to_output_error(e: EndpointError) -> OutputError {
    match e {
        EndpointError::Disabled => OutputError::NotReady,
        EndpointError::BufferOverflow => OutputError::Io,
    }
}

/// USB HID gamepad output.
///
/// Wraps an embassy-usb HID writer. Readiness follows the device's
/// configured state as published by [`UsbStateHandler`].
pub struct UsbHidOutput<'d> {
    writer: HidWriter<'d, UsbDriver<'d>, REPORT_BUFFER_SIZE>,
    configured: &'d AtomicBool,
}

impl<'d> UsbHidOutput<'d> {
    /// Create a new USB HID output from the given HID writer.
    #[must_use]
    pub fn new(
        writer: HidWriter<'d, UsbDriver<'d>, REPORT_BUFFER_SIZE>,
        configured: &'d AtomicBool,
    ) -> Self {
        Self { writer, configured }
    }
}

impl OutputSink for UsbHidOutput<'_> {
    async fn send(&mut self, report: &GamepadReport) -> Result<(), OutputError> {
        self.writer
            .write(&report.as_bytes())
            .await
            .map_err(endpoint_error_to_output_error)
    }

    fn is_ready(&self) -> bool {
        self.configured.load(Ordering::Acquire)
    }
}

/// Publishes whether the host is listening: configured and not suspended.
///
/// Reports are dropped instead of queued while the flag is clear.
pub struct UsbStateHandler<'d> {
    ready: &'d AtomicBool,
    configured: bool,
    suspended: bool,
}

impl<'d> UsbStateHandler<'d> {
    #[must_use]
    pub const fn new(ready: &'d AtomicBool) -> Self {
        Self {
            ready,
            configured: false,
            suspended: false,
        }
    }

    fn publish(&self) {
        self.ready
            .store(self.configured && !self.suspended, Ordering::Release);
    }
}

impl Handler for UsbStateHandler<'_> {
    fn enabled(&mut self, enabled: bool) {
        if !enabled {
            self.configured = false;
            self.publish();
        }
        info!("USB enabled: {}", enabled);
    }

    fn reset(&mut self) {
        self.configured = false;
        self.suspended = false;
        self.publish();
        info!("USB bus reset");
    }

    fn configured(&mut self, configured: bool) {
        self.configured = configured;
        self.publish();
        info!("USB configured: {}", configured);
    }

    fn suspended(&mut self, suspended: bool) {
        self.suspended = suspended;
        self.publish();
        info!("USB suspended: {}", suspended);
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Returns the HID writer for use by the application. GET_REPORT and
/// SET_REPORT are not handled.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, UsbDriver<'d>>,
    state: &'d mut State<'d>,
) -> HidWriter<'d, UsbDriver<'d>, REPORT_BUFFER_SIZE> {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: 1,
        max_packet_size: REPORT_BUFFER_SIZE as u16,
        hid_subclass: embassy_usb::class::hid::HidSubclass::No,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
