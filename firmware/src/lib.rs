//! BLE command link to USB keyboard and mouse bridge for RP2040.
//!
//! This crate provides the embedded side of the bridge: it reads command
//! lines from a wireless UART module on UART1 and presents itself to the host
//! as a composite USB HID boot keyboard and mouse.
//!
//! The deployment variant is chosen at build time:
//!
//! - mouse scheme: `mouse-dual` (default), `mouse-fixed`, `mouse-continuous`
//! - mode markers: `mode-explicit` (default), `mode-toggle`

#![no_std]

use bridge_core::{BridgeConfig, ModeSwitch, MouseScheme};

#[cfg(any(
    all(feature = "mouse-dual", feature = "mouse-fixed"),
    all(feature = "mouse-dual", feature = "mouse-continuous"),
    all(feature = "mouse-fixed", feature = "mouse-continuous"),
))]
compile_error!("select exactly one of `mouse-dual`, `mouse-fixed`, `mouse-continuous`");

#[cfg(all(feature = "mode-explicit", feature = "mode-toggle"))]
compile_error!("select exactly one of `mode-explicit`, `mode-toggle`");

// Re-export core types for convenience
pub use bridge_core::{
    bring_up, ActionSink, BridgeError, BringUpReport, CommandBridge, CommandSource, Line,
    LinkError, ModuleLink, SinkError, SourceError, MAX_LINE_LENGTH,
};

pub mod at_link;
pub mod clock;
pub mod uart_input;
pub mod usb_output;

pub use at_link::UartAtLink;
pub use clock::EmbassyClock;
pub use uart_input::{ChannelSource, LineChannel, LineReceiver, LineSender, UartLineReader};
pub use usb_output::{configure_usb_hid, UsbHidSink, UsbHidWriter};

/// UART1 baud rate of the wireless module.
pub const UART_BAUD: u32 = 9600;

/// Name the wireless module advertises.
pub const DEVICE_NAME: &str = "MouseAndKeyboard";

/// pid.codes test VID/PID.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;

#[cfg(feature = "mouse-fixed")]
const MOUSE_SCHEME: MouseScheme = MouseScheme::FIXED_STEP;
#[cfg(feature = "mouse-continuous")]
const MOUSE_SCHEME: MouseScheme = MouseScheme::CONTINUOUS;
#[cfg(not(any(feature = "mouse-fixed", feature = "mouse-continuous")))]
const MOUSE_SCHEME: MouseScheme = MouseScheme::DUAL_MAGNITUDE;

#[cfg(feature = "mode-toggle")]
const MODE_SWITCH: ModeSwitch = ModeSwitch::TOGGLE;
#[cfg(not(feature = "mode-toggle"))]
const MODE_SWITCH: ModeSwitch = ModeSwitch::EXPLICIT;

/// Bridge configuration selected by the enabled features.
pub const BRIDGE_CONFIG: BridgeConfig = BridgeConfig::new()
    .with_mode_switch(MODE_SWITCH)
    .with_mouse(MOUSE_SCHEME);
