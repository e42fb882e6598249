#![no_std]
#![no_main]

use defmt::{error, info, trace, unwrap};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_time::{Duration, Ticker};
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use pico_gamepad::{
    configure_usb_hid, AdcAxes, AdcChannel, Cycle, GamepadBridge, GamepadConfig, GamepadReport,
    LineId, PinBank, UsbHidOutput, UsbStateHandler, MAX_BUTTONS,
};
use portable_atomic::AtomicBool;
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Button wiring, axis channels, scaling, cadence.
static CONFIG: GamepadConfig<'static> = GamepadConfig::pico_default();

/// Set by the USB handler while the host is listening.
static USB_READY: AtomicBool = AtomicBool::new(false);

/// USB device configuration buffers.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state and USB event handler.
static HID_STATE: StaticCell<State> = StaticCell::new();
static USB_HANDLER: StaticCell<UsbStateHandler<'static>> = StaticCell::new();

type ButtonPins = PinBank<Input<'static>, MAX_BUTTONS>;
type PicoBridge = GamepadBridge<'static, ButtonPins, AdcAxes<'static>, UsbHidOutput<'static>>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pico gamepad starting...");

    if let Err(e) = CONFIG.validate() {
        defmt::panic!("Invalid gamepad config: {:?}", e);
    }

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Buttons: active-low with internal pull-ups ---
    let mut buttons = ButtonPins::new();
    unwrap!(buttons.bind(LineId(5), Input::new(p.PIN_5, Pull::Up)));
    unwrap!(buttons.bind(LineId(6), Input::new(p.PIN_6, Pull::Up)));
    unwrap!(buttons.bind(LineId(7), Input::new(p.PIN_7, Pull::Up)));
    unwrap!(buttons.bind(LineId(8), Input::new(p.PIN_8, Pull::Up)));
    unwrap!(buttons.bind(LineId(9), Input::new(p.PIN_9, Pull::Up)));
    unwrap!(buttons.bind(LineId(20), Input::new(p.PIN_20, Pull::Up)));
    unwrap!(buttons.bind(LineId(21), Input::new(p.PIN_21, Pull::Up)));

    if let Some(line) = CONFIG.first_unwired_line(|line| buttons.has_line(line)) {
        defmt::panic!("Bound line {:?} has no pin wired", line);
    }

    // --- Joystick: GPIO 26/27 on ADC0/ADC1 ---
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let mut axes = AdcAxes::new(adc);
    unwrap!(axes.bind(AdcChannel(0), Channel::new_pin(p.PIN_26, Pull::None)));
    unwrap!(axes.bind(AdcChannel(1), Channel::new_pin(p.PIN_27, Pull::None)));

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Rust Gamepad");
    usb_config.product = Some("Pico HID Gamepad");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    builder.handler(USB_HANDLER.init(UsbStateHandler::new(&USB_READY)));

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let hid_writer = configure_usb_hid(&mut builder, hid_state);

    // Build the USB device
    let usb_device = builder.build();

    let output = UsbHidOutput::new(hid_writer, &USB_READY);
    let bridge = GamepadBridge::new(&CONFIG, buttons, axes, output);
    let interval = Duration::from_millis(u64::from(CONFIG.poll_interval.as_millis()));

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(gamepad_task(bridge, interval).unwrap());

    info!(
        "Pico gamepad initialized, polling every {} ms",
        CONFIG.poll_interval.as_millis()
    );
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Gamepad task - samples inputs on a fixed cadence and sends gated reports.
#[embassy_executor::task]
async fn gamepad_task(mut bridge: PicoBridge, interval: Duration) {
    let mut ticker = Ticker::every(interval);

    loop {
        ticker.next().await;

        match bridge.poll_once().await {
            Ok(Cycle::Sent(report)) => {
                trace!("Sent report: {:?}", report);
                // The write resolved, so the transfer is complete.
                if let Err(e) = bridge.on_report_complete(GamepadReport::KIND).await {
                    error!("Output error: {:?}", e);
                }
            }
            Ok(Cycle::NotReady) => trace!("USB not ready, cycle dropped"),
            Ok(Cycle::Suppressed | Cycle::Idle) => {}
            Err(e) => error!("Output error: {:?}", e),
        }
    }
}
