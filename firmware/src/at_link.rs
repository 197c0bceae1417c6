//! AT command link to the wireless module over UART1.

use bridge_core::{LinkError, ModuleLink};
use defmt::debug;
use embassy_rp::uart::{Async, Uart};
use embassy_time::{with_timeout, Duration};
use heapless::Vec;

/// Time allowed for the module to send its final response.
pub const RESPONSE_TIMEOUT: Duration = Duration::from_secs(2);

const RESPONSE_LINE_LENGTH: usize = 64;

/// Borrows the UART for the duration of bring-up.
pub struct UartAtLink<'a, 'd> {
    uart: &'a mut Uart<'d, Async>,
    line: Vec<u8, RESPONSE_LINE_LENGTH>,
}

impl<'a, 'd> UartAtLink<'a, 'd> {
    pub fn new(uart: &'a mut Uart<'d, Async>) -> Self {
        Self {
            uart,
            line: Vec::new(),
        }
    }

    /// Read response lines until `OK` or `ERROR`. Echo and info lines are skipped.
    async fn final_response(&mut self) -> Result<(), LinkError> {
        loop {
            self.read_response_line().await?;
            match trimmed(&self.line) {
                b"OK" => return Ok(()),
                b"ERROR" => return Err(LinkError::Rejected),
                other => {
                    if let Ok(text) = core::str::from_utf8(other) {
                        debug!("Module: {}", text);
                    }
                }
            }
        }
    }

    async fn read_response_line(&mut self) -> Result<(), LinkError> {
        self.line.clear();
        let mut byte = [0u8; 1];
        loop {
            self.uart.read(&mut byte).await.map_err(|_| LinkError::Io)?;
            if byte[0] == b'\n' {
                return Ok(());
            }
            // Long info lines are truncated; they never match a final
            // response, and the buffer is cleared before the next line
            let _ = self.line.push(byte[0]);
        }
    }
}

fn trimmed(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace());
    let end = bytes.iter().rposition(|b| !b.is_ascii_whitespace());
    match (start, end) {
        (Some(start), Some(end)) => &bytes[start..=end],
        _ => &[],
    }
}

impl ModuleLink for UartAtLink<'_, '_> {
    async fn command(&mut self, command: &str) -> Result<(), LinkError> {
        debug!("AT> {}", command);
        self.uart
            .write(command.as_bytes())
            .await
            .map_err(|_| LinkError::Io)?;
        self.uart.write(b"\r\n").await.map_err(|_| LinkError::Io)?;

        with_timeout(RESPONSE_TIMEOUT, self.final_response())
            .await
            .map_err(|_| LinkError::Timeout)?
    }
}
