#![no_std]
#![no_main]

use ble_hid_bridge::{
    bring_up, configure_usb_hid, ChannelSource, CommandBridge, EmbassyClock, LineChannel,
    LineSender, UartAtLink, UartLineReader, UsbHidSink, BRIDGE_CONFIG, DEVICE_NAME, UART_BAUD,
    USB_PID, USB_VID,
};
use defmt::{error, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{UART1, USB};
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_rp::usb::Driver;
use embassy_time::Delay;
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Complete command lines from the reader task to the bridge loop.
static LINES: StaticCell<LineChannel> = StaticCell::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static KEYBOARD_STATE: StaticCell<State> = StaticCell::new();
static MOUSE_STATE: StaticCell<State> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("BLE HID bridge starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // On-board LED: lit when the wireless module failed to come up
    let mut led = Output::new(p.PIN_25, Level::Low);

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = UART_BAUD;

    let mut uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );

    // --- Wireless module bring-up ---
    let report = bring_up(&mut UartAtLink::new(&mut uart), DEVICE_NAME).await;
    if !report.is_clean() {
        warn!("Wireless module bring-up incomplete: {:?}", report.failures());
        led.set_high();
    }

    let (_tx, rx) = uart.split();
    let reader = UartLineReader::new(rx);
    let lines: &'static LineChannel = LINES.init(LineChannel::new());

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some("Rust HID Bridge");
    usb_config.product = Some(DEVICE_NAME);
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

    // Configure HID classes
    let keyboard_state = KEYBOARD_STATE.init(State::new());
    let mouse_state = MOUSE_STATE.init(State::new());
    let (keyboard, mouse) = configure_usb_hid(&mut builder, keyboard_state, mouse_state);

    // Build the USB device
    let usb_device = builder.build();
    let mut sink = UsbHidSink::new(keyboard, mouse);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(reader_task(reader, lines.sender(), led).unwrap());

    // Wait for USB to be ready
    sink.wait_ready().await;
    info!("USB HID ready, waiting for commands...");

    let mut bridge = CommandBridge::new(
        ChannelSource::new(lines.receiver()),
        sink,
        EmbassyClock,
        Delay,
        BRIDGE_CONFIG,
    );
    bridge.run().await
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Reader task - splits the UART byte stream into lines and queues them.
#[embassy_executor::task]
async fn reader_task(
    mut reader: UartLineReader<'static>,
    lines: LineSender,
    mut led: Output<'static>,
) {
    loop {
        match reader.read_line().await {
            Ok(line) => lines.send(line).await,
            Err(e) => {
                error!("Input error: {:?}", e);
                // Toggle LED to indicate error
                led.toggle();
            }
        }
    }
}
