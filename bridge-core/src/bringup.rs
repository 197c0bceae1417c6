//! One-time initialization of the wireless UART module.
//!
//! The module is configured through AT commands before the command loop
//! starts. Every step is attempted once; failures are logged and collected in
//! a [`BringUpReport`], and the loop starts regardless.

use core::fmt::Write as _;
use core::future::Future;

use heapless::{String, Vec};

/// Error type for module link operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// UART/communication I/O error.
    Io,
    /// No final response within the timeout.
    Timeout,
    /// The module answered `ERROR`, or the command could not be built.
    Rejected,
}

/// Command channel to the wireless module.
pub trait ModuleLink {
    /// Send one AT command and wait for its final `OK`/`ERROR` response.
    fn command(&mut self, command: &str) -> impl Future<Output = Result<(), LinkError>>;
}

/// Steps of the bring-up sequence, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringUpStep {
    FactoryReset,
    DeviceName,
    Info,
    EchoOff,
    DataMode,
}

impl BringUpStep {
    pub const ALL: [BringUpStep; 5] = [
        BringUpStep::FactoryReset,
        BringUpStep::DeviceName,
        BringUpStep::Info,
        BringUpStep::EchoOff,
        BringUpStep::DataMode,
    ];
}

/// Longest AT command the sequence builds.
const MAX_COMMAND_LENGTH: usize = 48;

const DEVICE_NAME_PREFIX: &str = "AT+GAPDEVNAME=";

/// Result of [`bring_up`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BringUpReport {
    failures: Vec<(BringUpStep, LinkError), 5>,
}

impl BringUpReport {
    /// True if every step succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failed steps with their errors, in execution order.
    #[must_use]
    pub fn failures(&self) -> &[(BringUpStep, LinkError)] {
        &self.failures
    }
}

fn command_for(step: BringUpStep, device_name: &str) -> Result<String<MAX_COMMAND_LENGTH>, LinkError> {
    let mut command = String::new();
    let written = match step {
        BringUpStep::FactoryReset => command.push_str("AT+FACTORYRESET").map_err(|_| ()),
        BringUpStep::DeviceName => {
            write!(command, "{DEVICE_NAME_PREFIX}{device_name}").map_err(|_| ())
        }
        BringUpStep::Info => command.push_str("ATI").map_err(|_| ()),
        BringUpStep::EchoOff => command.push_str("ATE=0").map_err(|_| ()),
        BringUpStep::DataMode => command.push_str("+++").map_err(|_| ()),
    };
    written.map_err(|()| LinkError::Rejected)?;
    Ok(command)
}

/// Run the bring-up sequence: factory reset, device name, info query, echo
/// off, switch to data mode.
///
/// Never fails; see [`BringUpReport`] for what went wrong.
pub async fn bring_up<L: ModuleLink>(link: &mut L, device_name: &str) -> BringUpReport {
    let mut report = BringUpReport::default();

    for step in BringUpStep::ALL {
        let result = match command_for(step, device_name) {
            Ok(command) => link.command(&command).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => debug!("Bring-up step {:?} ok", step),
            Err(e) => {
                warn!("Bring-up step {:?} failed: {:?}", step, e);
                // Capacity equals the number of steps
                let _ = report.failures.push((step, e));
            }
        }
    }

    if report.is_clean() {
        info!("Wireless module ready as {:?}", device_name);
    }
    report
}
