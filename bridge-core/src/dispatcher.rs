//! Command dispatcher: owns the mode and routes lines to the translators.

use command_proto::{Key, Mode};
use embedded_hal_async::delay::DelayNs;

use crate::config::{BridgeConfig, BurstConfig, ModeSwitch};
use crate::keyboard::{tap, KeyboardOutcome, KeyboardTranslator};
use crate::mouse::MouseTranslator;
use crate::output::{ActionSink, SinkError};

/// What the dispatcher is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Activity {
    /// Waiting for the next line.
    Idle,
    /// Running the delete burst; `remaining` taps are left.
    Burst { remaining: u16 },
}

/// Routes each line to the keyboard or mouse translator.
///
/// Order of checks for every line:
/// 1. Mode markers (mouse marker first). A marker line only changes the
///    mode and is not forwarded.
/// 2. Keyboard table, then literal typing, in keyboard mode.
/// 3. Mouse table in mouse mode; unmatched lines are dropped.
///
/// Within a table the longest contained identifier wins.
pub struct Dispatcher {
    mode: Mode,
    mode_switch: ModeSwitch,
    keyboard: KeyboardTranslator,
    mouse: MouseTranslator,
    activity: Activity,
}

impl Dispatcher {
    /// Create a dispatcher in [`Mode::Mouse`].
    #[must_use]
    pub const fn new(config: &BridgeConfig) -> Self {
        Self {
            mode: Mode::Mouse,
            mode_switch: config.mode_switch,
            keyboard: KeyboardTranslator::new(config.burst),
            mouse: MouseTranslator::new(config.mouse),
            activity: Activity::Idle,
        }
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub const fn activity(&self) -> Activity {
        self.activity
    }

    #[must_use]
    pub const fn mouse(&self) -> &MouseTranslator {
        &self.mouse
    }

    /// Target mode if `line` carries a mode marker.
    ///
    /// The mouse marker wins when a line carries both.
    fn mode_marker(&self, line: &str) -> Option<Mode> {
        match self.mode_switch {
            ModeSwitch::Explicit { mouse, keyboard } => {
                if line.contains(mouse) {
                    Some(Mode::Mouse)
                } else if line.contains(keyboard) {
                    Some(Mode::Keyboard)
                } else {
                    None
                }
            }
            ModeSwitch::Toggle(marker) => line.contains(marker).then(|| self.mode.flipped()),
        }
    }

    /// Process one line to completion.
    ///
    /// Blocks for the whole burst when the line requests it.
    pub async fn dispatch<A: ActionSink, D: DelayNs>(
        &mut self,
        line: &str,
        sink: &mut A,
        delay: &mut D,
    ) -> Result<(), SinkError> {
        trace!("Dispatching {:?} in {:?}", line, self.mode);

        if let Some(target) = self.mode_marker(line) {
            if target != self.mode {
                info!("Switched to {:?} mode", target);
            }
            self.mode = target;
            return Ok(());
        }

        match self.mode {
            Mode::Keyboard => {
                if let KeyboardOutcome::Burst(burst) = self.keyboard.handle(line, sink).await? {
                    self.run_burst(burst, sink, delay).await?;
                }
            }
            Mode::Mouse => {
                self.mouse.handle(line, sink).await?;
            }
        }
        Ok(())
    }

    /// Periodic tick; drives continuous movement while in mouse mode.
    pub async fn tick<A: ActionSink>(&mut self, now_ms: u64, sink: &mut A) -> Result<(), SinkError> {
        if self.mode == Mode::Mouse && self.mouse.is_continuous() {
            self.mouse.update(now_ms, sink).await?;
        }
        Ok(())
    }

    /// Tap delete `burst.count` times with `burst.interval_ms` after each tap.
    ///
    /// Not interruptible: no line is read while it runs.
    async fn run_burst<A: ActionSink, D: DelayNs>(
        &mut self,
        burst: BurstConfig,
        sink: &mut A,
        delay: &mut D,
    ) -> Result<(), SinkError> {
        info!(
            "Delete burst: {} taps every {} ms",
            burst.count, burst.interval_ms
        );
        self.activity = Activity::Burst {
            remaining: burst.count,
        };

        while let Activity::Burst { remaining } = self.activity {
            if remaining == 0 {
                break;
            }
            if let Err(e) = tap(sink, Key::Delete).await {
                self.activity = Activity::Idle;
                return Err(e);
            }
            delay.delay_ms(burst.interval_ms).await;
            self.activity = Activity::Burst {
                remaining: remaining - 1,
            };
        }

        self.activity = Activity::Idle;
        info!("Delete burst finished");
        Ok(())
    }
}
