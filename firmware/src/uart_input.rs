//! UART line reader and the channel-backed command source.
//!
//! The wireless module runs in data mode and forwards every byte received
//! over the air to UART1. A reader task splits the byte stream into lines and
//! queues them; the bridge loop polls the queue without blocking.
//!
//! # Pins
//!
//! Uses UART1:
//! - GPIO 8: TX (to module RX)
//! - GPIO 9: RX (from module TX)

use bridge_core::{CommandSource, Line, LineAssembler, SourceError};
use embassy_rp::uart::{Async, Error as UartError, UartRx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

/// Number of complete lines buffered between the reader task and the bridge.
pub const LINE_QUEUE_DEPTH: usize = 8;

/// Queue of complete lines.
pub type LineChannel = Channel<CriticalSectionRawMutex, Line, LINE_QUEUE_DEPTH>;
pub type LineSender = Sender<'static, CriticalSectionRawMutex, Line, LINE_QUEUE_DEPTH>;
pub type LineReceiver = Receiver<'static, CriticalSectionRawMutex, Line, LINE_QUEUE_DEPTH>;

/// Convert UART errors to [`SourceError`].
///
/// This is a helper function instead of a `From` impl to avoid orphan rule issues
/// (both `UartError` and `SourceError` are defined in external crates).
#[inline]
fn uart_error_to_source_error(e: UartError) -> SourceError {
    match e {
        UartError::Framing => SourceError::Framing,
        UartError::Overrun => SourceError::BufferOverflow,
        _ => SourceError::Io,
    }
}

/// Reads newline-terminated command lines from UART.
pub struct UartLineReader<'d> {
    rx: UartRx<'d, Async>,
    assembler: LineAssembler,
}

impl<'d> UartLineReader<'d> {
    /// Create a new line reader from the given UART receiver.
    #[must_use]
    pub fn new(rx: UartRx<'d, Async>) -> Self {
        Self {
            rx,
            assembler: LineAssembler::new(),
        }
    }

    /// Wait for the next non-blank line.
    ///
    /// Lines longer than [`MAX_LINE_LENGTH`](bridge_core::MAX_LINE_LENGTH)
    /// are returned as consecutive segments. A UART error drops the partial
    /// line.
    pub async fn read_line(&mut self) -> Result<Line, SourceError> {
        let mut byte = [0u8; 1];

        loop {
            if let Err(e) = self.rx.read(&mut byte).await {
                self.assembler.reset();
                return Err(uart_error_to_source_error(e));
            }
            if let Some(line) = self.assembler.push(byte[0]) {
                return Ok(line);
            }
        }
    }
}

/// Non-blocking [`CommandSource`] over the line queue.
pub struct ChannelSource {
    receiver: LineReceiver,
}

impl ChannelSource {
    #[must_use]
    pub fn new(receiver: LineReceiver) -> Self {
        Self { receiver }
    }
}

impl CommandSource for ChannelSource {
    fn next_line(&mut self) -> Option<Line> {
        self.receiver.try_receive().ok()
    }
}
