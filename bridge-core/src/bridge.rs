//! CommandBridge: the cooperative loop connecting the command source to the
//! dispatcher and the action sink.

use embedded_hal_async::delay::DelayNs;

use crate::clock::Clock;
use crate::config::BridgeConfig;
use crate::dispatcher::Dispatcher;
use crate::input::CommandSource;
use crate::output::{ActionSink, SinkError};

/// Outcome of one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// No line was pending.
    Idle,
    /// One line was dispatched to completion.
    Dispatched,
}

/// Single-threaded command loop.
///
/// Each iteration first ticks the mouse translator (continuous scheme, mouse
/// mode), then polls the source once and dispatches the line, if any, before
/// the next iteration. Lines are handled strictly in arrival order.
///
/// # Error Handling
///
/// Sink errors abort the current line, release every held key and button so
/// nothing stays stuck on the host, and are logged. Nothing is reported back
/// over the command link.
pub struct CommandBridge<S, A, C, D> {
    source: S,
    sink: A,
    clock: C,
    delay: D,
    dispatcher: Dispatcher,
    idle_poll_ms: u32,
}

impl<S: CommandSource, A: ActionSink, C: Clock, D: DelayNs> CommandBridge<S, A, C, D> {
    /// Create a new bridge.
    pub fn new(source: S, sink: A, clock: C, delay: D, config: BridgeConfig) -> Self {
        Self {
            source,
            sink,
            clock,
            delay,
            dispatcher: Dispatcher::new(&config),
            idle_poll_ms: config.idle_poll_ms,
        }
    }

    /// Run the bridge indefinitely.
    ///
    /// This method never returns under normal operation.
    pub async fn run(&mut self) -> ! {
        loop {
            if let Ok(Step::Idle) = self.step().await {
                self.delay.delay_ms(self.idle_poll_ms).await;
            }
        }
    }

    /// Run one iteration: tick, then poll and dispatch at most one line.
    ///
    /// Lines stay queued in the source while the sink is not ready.
    /// Returns the result of the iteration for testing purposes.
    pub async fn step(&mut self) -> Result<Step, BridgeError> {
        if !self.sink.is_ready() {
            return Ok(Step::Idle);
        }

        let now = self.clock.now_ms();
        if let Err(e) = self.dispatcher.tick(now, &mut self.sink).await {
            return Err(self.recover(e).await);
        }

        let Some(line) = self.source.next_line() else {
            return Ok(Step::Idle);
        };

        match self
            .dispatcher
            .dispatch(&line, &mut self.sink, &mut self.delay)
            .await
        {
            Ok(()) => Ok(Step::Dispatched),
            Err(e) => Err(self.recover(e).await),
        }
    }

    async fn recover(&mut self, e: SinkError) -> BridgeError {
        error!("Output error: {:?}", e);
        if let Err(e) = self.sink.release_all().await {
            error!("Release after error failed: {:?}", e);
        }
        BridgeError::Sink(e)
    }

    /// Get a reference to the dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Get a reference to the command source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a reference to the action sink.
    pub fn sink(&self) -> &A {
        &self.sink
    }

    /// Get a mutable reference to the action sink.
    pub fn sink_mut(&mut self) -> &mut A {
        &mut self.sink
    }

    /// Decompose the bridge into its source and sink.
    pub fn into_parts(self) -> (S, A) {
        (self.source, self.sink)
    }
}

/// Error type for bridge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// Error from the action sink.
    Sink(SinkError),
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;

    use super::*;
    use crate::config::MouseScheme;
    use crate::mock::{Action, ManualClock, RecordingDelay, RecordingSink, ScriptedSource};
    use command_proto::{Key, Mode, MouseButton};
    use embassy_futures::block_on;

    fn bridge<'c>(
        lines: &[&str],
        sink: RecordingSink,
        clock: &'c ManualClock,
        config: BridgeConfig,
    ) -> CommandBridge<ScriptedSource, RecordingSink, &'c ManualClock, RecordingDelay> {
        CommandBridge::new(
            ScriptedSource::new(lines),
            sink,
            clock,
            RecordingDelay::default(),
            config,
        )
    }

    #[test]
    fn test_lines_processed_in_order() {
        let clock = ManualClock::default();
        let mut bridge = bridge(
            &["MODE_KEYBOARD", "ab", "BIOS_ENTER"],
            RecordingSink::new(),
            &clock,
            BridgeConfig::new(),
        );

        for _ in 0..3 {
            assert_eq!(block_on(bridge.step()), Ok(Step::Dispatched));
        }
        assert_eq!(block_on(bridge.step()), Ok(Step::Idle));

        assert_eq!(bridge.dispatcher().mode(), Mode::Keyboard);
        assert_eq!(
            bridge.sink().actions,
            vec![
                Action::Press(Key::Char('a')),
                Action::Release(Key::Char('a')),
                Action::Press(Key::Char('b')),
                Action::Release(Key::Char('b')),
                Action::Press(Key::Enter),
                Action::Release(Key::Enter),
            ]
        );
    }

    #[test]
    fn test_tick_runs_without_input() {
        let clock = ManualClock::default();
        let config = BridgeConfig::new().with_mouse(MouseScheme::CONTINUOUS);
        let mut bridge = bridge(&["MOUSE_LEFT"], RecordingSink::new(), &clock, config);

        assert_eq!(block_on(bridge.step()), Ok(Step::Dispatched));
        clock.set(250);
        assert_eq!(block_on(bridge.step()), Ok(Step::Idle));
        assert!(bridge.sink().moves().is_empty());

        clock.set(500);
        assert_eq!(block_on(bridge.step()), Ok(Step::Idle));
        clock.set(999);
        assert_eq!(block_on(bridge.step()), Ok(Step::Idle));
        clock.set(1000);
        assert_eq!(block_on(bridge.step()), Ok(Step::Idle));
        assert_eq!(bridge.sink().moves(), vec![(-20, 0), (-20, 0)]);
    }

    #[test]
    fn test_sink_error_releases_everything() {
        let clock = ManualClock::default();
        let mut bridge = bridge(
            &["MODE_KEYBOARD", "KEYBOARD_PASTE"],
            RecordingSink::failing_after(2),
            &clock,
            BridgeConfig::new(),
        );

        assert_eq!(block_on(bridge.step()), Ok(Step::Dispatched));
        assert_eq!(
            block_on(bridge.step()),
            Err(BridgeError::Sink(SinkError::Io))
        );
        assert_eq!(bridge.sink().actions.last(), Some(&Action::ReleaseAll));
    }

    #[test]
    fn test_lines_wait_for_ready_sink() {
        let clock = ManualClock::default();
        let mut sink = RecordingSink::new();
        sink.ready = false;
        let mut bridge = bridge(&["MOUSE_LEFT_CLICK"], sink, &clock, BridgeConfig::new());

        assert_eq!(block_on(bridge.step()), Ok(Step::Idle));
        assert!(bridge.sink().actions.is_empty());

        bridge.sink_mut().ready = true;
        assert_eq!(block_on(bridge.step()), Ok(Step::Dispatched));
        assert_eq!(bridge.sink().actions, vec![Action::Click(MouseButton::Left)]);
    }

    fn drain<S: CommandSource>(
        bridge: &mut CommandBridge<S, RecordingSink, &ManualClock, RecordingDelay>,
    ) {
        while block_on(bridge.step()) == Ok(Step::Dispatched) {}
    }

    #[test]
    fn test_long_literal_typed_in_full() {
        let text = "The quick brown fox jumps over the lazy dog while running far far away";
        assert_eq!(text.len(), 70);
        let clock = ManualClock::default();
        let mut bridge = bridge(
            &["MODE_KEYBOARD", text],
            RecordingSink::new(),
            &clock,
            BridgeConfig::new(),
        );
        drain(&mut bridge);
        assert_eq!(bridge.sink().typed(), text);
    }

    #[test]
    fn test_malformed_bytes_still_typed() {
        let clock = ManualClock::default();
        let mut bridge = CommandBridge::new(
            ScriptedSource::from_bytes(b"MODE_KEYBOARD\r\nhello\xFFworld\r\n"),
            RecordingSink::new(),
            &clock,
            RecordingDelay::default(),
            BridgeConfig::new(),
        );
        drain(&mut bridge);
        assert_eq!(bridge.sink().typed(), "helloworld");
    }

    #[test]
    fn test_unrecognized_mouse_line_sends_nothing() {
        let clock = ManualClock::default();
        let mut bridge = bridge(&["jump"], RecordingSink::new(), &clock, BridgeConfig::new());
        assert_eq!(block_on(bridge.step()), Ok(Step::Dispatched));
        let (_, sink) = bridge.into_parts();
        assert!(sink.actions.is_empty());
    }
}
