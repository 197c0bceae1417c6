//! USB HID keyboard + mouse output implementation.

use bridge_core::{ActionSink, SinkError};
use command_proto::{Key, KeyboardReport, MouseButton, MouseReport, ReportState};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{Config as HidConfig, HidBootProtocol, HidSubclass, HidWriter, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;
use usbd_hid::descriptor::{KeyboardReport as KeyboardDescriptor, MouseReport as MouseDescriptor};
use usbd_hid::descriptor::SerializedDescriptor;

/// Max packet size of both HID interrupt endpoints.
pub const HID_PACKET_SIZE: usize = 8;

/// HID writer on the RP2040 USB peripheral.
pub type UsbHidWriter<'d> = HidWriter<'d, Driver<'d, USB>, HID_PACKET_SIZE>;

#[inline]
fn endpoint_error_to_sink_error(e: EndpointError) -> SinkError {
    match e {
        EndpointError::Disabled => SinkError::NotReady,
        EndpointError::BufferOverflow => SinkError::Io,
    }
}

/// USB HID keyboard and mouse output.
///
/// Wraps the two embassy-usb HID writers and the report state that turns
/// primitive actions into reports.
pub struct UsbHidSink<'d> {
    keyboard: UsbHidWriter<'d>,
    mouse: UsbHidWriter<'d>,
    state: ReportState,
    ready: bool,
}

impl<'d> UsbHidSink<'d> {
    /// Create a new USB HID sink from the keyboard and mouse writers.
    pub fn new(keyboard: UsbHidWriter<'d>, mouse: UsbHidWriter<'d>) -> Self {
        Self {
            keyboard,
            mouse,
            state: ReportState::new(),
            ready: false,
        }
    }

    /// Wait until the device is ready (USB enumerated).
    pub async fn wait_ready(&mut self) {
        self.keyboard.ready().await;
        self.mouse.ready().await;
        self.ready = true;
    }

    async fn write_keyboard(&mut self, report: KeyboardReport) -> Result<(), SinkError> {
        self.keyboard
            .write(&report.as_bytes())
            .await
            .map_err(endpoint_error_to_sink_error)
    }

    async fn write_mouse(&mut self, report: MouseReport) -> Result<(), SinkError> {
        self.mouse
            .write(&report.as_bytes())
            .await
            .map_err(endpoint_error_to_sink_error)
    }
}

impl ActionSink for UsbHidSink<'_> {
    async fn press(&mut self, key: Key) -> Result<(), SinkError> {
        let report = self.state.press(key)?;
        self.write_keyboard(report).await
    }

    async fn release(&mut self, key: Key) -> Result<(), SinkError> {
        let report = self.state.release(key)?;
        self.write_keyboard(report).await
    }

    async fn move_pointer(&mut self, dx: i16, dy: i16) -> Result<(), SinkError> {
        for report in self.state.movement(dx, dy) {
            self.write_mouse(report).await?;
        }
        Ok(())
    }

    async fn click(&mut self, button: MouseButton) -> Result<(), SinkError> {
        let [down, up] = self.state.click(button);
        self.write_mouse(down).await?;
        self.write_mouse(up).await
    }

    async fn release_all(&mut self) -> Result<(), SinkError> {
        let (keyboard, mouse) = self.state.clear();
        let keyboard_result = self.write_keyboard(keyboard).await;
        let mouse_result = self.write_mouse(mouse).await;
        keyboard_result.and(mouse_result)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Configure the boot keyboard and mouse HID interfaces in the USB builder.
///
/// Returns the keyboard and mouse writers, in that order.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    keyboard_state: &'d mut State<'d>,
    mouse_state: &'d mut State<'d>,
) -> (UsbHidWriter<'d>, UsbHidWriter<'d>) {
    let keyboard_config = HidConfig {
        report_descriptor: KeyboardDescriptor::desc(),
        request_handler: None,
        poll_ms: 1,
        max_packet_size: HID_PACKET_SIZE as u16,
        hid_subclass: HidSubclass::Boot,
        hid_boot_protocol: HidBootProtocol::Keyboard,
    };
    let mouse_config = HidConfig {
        report_descriptor: MouseDescriptor::desc(),
        request_handler: None,
        poll_ms: 1,
        max_packet_size: HID_PACKET_SIZE as u16,
        hid_subclass: HidSubclass::Boot,
        hid_boot_protocol: HidBootProtocol::Mouse,
    };

    let keyboard = HidWriter::new(builder, keyboard_state, keyboard_config);
    let mouse = HidWriter::new(builder, mouse_state, mouse_config);
    (keyboard, mouse)
}
