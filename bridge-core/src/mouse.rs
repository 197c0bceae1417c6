//! Mouse-mode translation and the continuous movement state machine.

use command_proto::{
    longest_match, Direction, Magnitude, MouseCommand, Table, DUAL_MOUSE_COMMANDS,
    STEP_MOUSE_COMMANDS,
};

use crate::config::MouseScheme;
use crate::output::{ActionSink, SinkError};

/// Maps mouse-mode lines to pointer actions according to a [`MouseScheme`].
///
/// With [`MouseScheme::Continuous`], direction commands toggle a latched
/// direction instead of moving: the same direction twice clears the latch, a
/// different direction replaces it. [`update`](Self::update) then moves the
/// pointer one step per elapsed interval while a direction is latched. Clicks
/// are always sent immediately.
#[derive(Debug, Clone)]
pub struct MouseTranslator {
    scheme: MouseScheme,
    latched: Option<Direction>,
    last_emit_ms: u64,
}

impl MouseTranslator {
    #[must_use]
    pub const fn new(scheme: MouseScheme) -> Self {
        Self {
            scheme,
            latched: None,
            last_emit_ms: 0,
        }
    }

    /// Currently latched direction (continuous scheme only).
    #[must_use]
    pub const fn latched(&self) -> Option<Direction> {
        self.latched
    }

    /// True if this translator needs periodic [`update`](Self::update) calls.
    #[must_use]
    pub const fn is_continuous(&self) -> bool {
        matches!(self.scheme, MouseScheme::Continuous { .. })
    }

    fn table(&self) -> &'static Table<MouseCommand> {
        match self.scheme {
            MouseScheme::DualMagnitude { .. } => DUAL_MOUSE_COMMANDS,
            MouseScheme::FixedStep { .. } | MouseScheme::Continuous { .. } => STEP_MOUSE_COMMANDS,
        }
    }

    fn step(&self, magnitude: Magnitude) -> i16 {
        match (self.scheme, magnitude) {
            (MouseScheme::DualMagnitude { small, .. }, Magnitude::Small) => small,
            (MouseScheme::DualMagnitude { large, .. }, Magnitude::Large) => large,
            (MouseScheme::FixedStep { step }, _) | (MouseScheme::Continuous { step, .. }, _) => {
                step
            }
        }
    }

    /// Handle one mouse-mode line.
    ///
    /// Returns `Ok(false)` if the line matched no command; such lines are
    /// dropped without any action.
    pub async fn handle<A: ActionSink>(
        &mut self,
        line: &str,
        sink: &mut A,
    ) -> Result<bool, SinkError> {
        let Some(command) = longest_match(line, self.table()) else {
            debug!("Ignoring unrecognized mouse command");
            return Ok(false);
        };

        match command {
            MouseCommand::Click(button) => sink.click(button).await?,
            MouseCommand::Move(compass, magnitude) => {
                let (dx, dy) = compass.delta(self.step(magnitude));
                sink.move_pointer(dx, dy).await?;
            }
            MouseCommand::Step(direction) => match self.scheme {
                MouseScheme::Continuous { .. } => self.toggle(direction),
                _ => {
                    let (dx, dy) = direction.delta(self.step(Magnitude::Small));
                    sink.move_pointer(dx, dy).await?;
                }
            },
        }
        Ok(true)
    }

    fn toggle(&mut self, direction: Direction) {
        self.latched = if self.latched == Some(direction) {
            None
        } else {
            Some(direction)
        };
        debug!("Latched direction: {:?}", self.latched);
    }

    /// Periodic tick of the continuous scheme.
    ///
    /// Once at least one interval has passed since the last emission, moves the
    /// pointer one step along the latched direction (nothing if none is
    /// latched) and restarts the interval. Calls within an interval do nothing.
    /// Other schemes ignore the tick.
    pub async fn update<A: ActionSink>(&mut self, now_ms: u64, sink: &mut A) -> Result<(), SinkError> {
        let MouseScheme::Continuous { step, interval_ms } = self.scheme else {
            return Ok(());
        };
        if now_ms.saturating_sub(self.last_emit_ms) < interval_ms {
            return Ok(());
        }
        self.last_emit_ms = now_ms;
        if let Some(direction) = self.latched {
            let (dx, dy) = direction.delta(step);
            sink.move_pointer(dx, dy).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;

    use super::*;
    use crate::mock::{Action, RecordingSink};
    use command_proto::MouseButton;
    use embassy_futures::block_on;

    fn run(translator: &mut MouseTranslator, lines: &[&str]) -> RecordingSink {
        let mut sink = RecordingSink::new();
        for line in lines {
            block_on(translator.handle(line, &mut sink)).unwrap();
        }
        sink
    }

    #[test]
    fn test_fixed_step_moves_immediately() {
        let mut mouse = MouseTranslator::new(MouseScheme::FixedStep { step: 40 });
        let sink = run(&mut mouse, &["MOUSE_UP", "MOUSE_RIGHT", "MOUSE_DOWN", "MOUSE_LEFT"]);
        assert_eq!(sink.moves(), vec![(0, -40), (40, 0), (0, 40), (-40, 0)]);
        assert_eq!(mouse.latched(), None);
    }

    #[test]
    fn test_click_is_not_mistaken_for_step() {
        let mut mouse = MouseTranslator::new(MouseScheme::FIXED_STEP);
        let sink = run(&mut mouse, &["MOUSE_LEFT_CLICK", "MOUSE_RIGHT_CLICK"]);
        assert_eq!(
            sink.actions,
            vec![
                Action::Click(MouseButton::Left),
                Action::Click(MouseButton::Right)
            ]
        );
    }

    #[test]
    fn test_dual_magnitude_directions() {
        let mut mouse = MouseTranslator::new(MouseScheme::DUAL_MAGNITUDE);
        let sink = run(
            &mut mouse,
            &[
                "MOUSE_UP_20",
                "MOUSE_DOWN_80",
                "MOUSE_UP_LEFT_20",
                "MOUSE_DOWN_RIGHT_80",
                "MOUSE_UP_RIGHT_80",
                "MOUSE_DOWN_LEFT_20",
            ],
        );
        assert_eq!(
            sink.moves(),
            vec![(0, -20), (0, 80), (-20, -20), (80, 80), (80, -80), (-20, 20)]
        );
    }

    #[test]
    fn test_dual_magnitude_ignores_bare_steps() {
        let mut mouse = MouseTranslator::new(MouseScheme::DUAL_MAGNITUDE);
        let sink = run(&mut mouse, &["MOUSE_UP"]);
        assert!(sink.actions.is_empty());
    }

    #[test]
    fn test_unrecognized_command_sends_nothing() {
        let mut mouse = MouseTranslator::new(MouseScheme::DUAL_MAGNITUDE);
        let mut sink = RecordingSink::new();
        let recognized = block_on(mouse.handle("KEYBOARD_COPY", &mut sink)).unwrap();
        assert!(!recognized);
        assert!(sink.actions.is_empty());
    }

    #[test]
    fn test_continuous_same_direction_twice_clears() {
        let mut mouse = MouseTranslator::new(MouseScheme::CONTINUOUS);
        let mut sink = run(&mut mouse, &["MOUSE_UP", "MOUSE_UP"]);
        assert_eq!(mouse.latched(), None);
        for now in [500, 1000, 1500, 2000] {
            block_on(mouse.update(now, &mut sink)).unwrap();
        }
        assert!(sink.actions.is_empty());
    }

    #[test]
    fn test_continuous_other_direction_replaces() {
        let mut mouse = MouseTranslator::new(MouseScheme::CONTINUOUS);
        let sink = run(&mut mouse, &["MOUSE_UP", "MOUSE_LEFT"]);
        assert_eq!(mouse.latched(), Some(Direction::Left));
        // Latching never moves the pointer by itself
        assert!(sink.actions.is_empty());
    }

    #[test]
    fn test_continuous_tick_respects_interval() {
        let mut mouse = MouseTranslator::new(MouseScheme::CONTINUOUS);
        let mut sink = run(&mut mouse, &["MOUSE_RIGHT"]);

        block_on(mouse.update(100, &mut sink)).unwrap();
        block_on(mouse.update(499, &mut sink)).unwrap();
        assert!(sink.moves().is_empty());

        block_on(mouse.update(500, &mut sink)).unwrap();
        block_on(mouse.update(700, &mut sink)).unwrap();
        assert_eq!(sink.moves(), vec![(20, 0)]);

        block_on(mouse.update(1000, &mut sink)).unwrap();
        assert_eq!(sink.moves(), vec![(20, 0), (20, 0)]);
    }

    #[test]
    fn test_continuous_interval_restarts_without_latch() {
        let mut mouse = MouseTranslator::new(MouseScheme::CONTINUOUS);
        let mut sink = RecordingSink::new();
        // Empty tick at 600 restarts the interval
        block_on(mouse.update(600, &mut sink)).unwrap();
        block_on(mouse.handle("MOUSE_DOWN", &mut sink)).unwrap();
        block_on(mouse.update(900, &mut sink)).unwrap();
        assert!(sink.moves().is_empty());
        block_on(mouse.update(1100, &mut sink)).unwrap();
        assert_eq!(sink.moves(), vec![(0, 20)]);
    }

    #[test]
    fn test_continuous_click_is_immediate() {
        let mut mouse = MouseTranslator::new(MouseScheme::CONTINUOUS);
        let sink = run(&mut mouse, &["MOUSE_UP", "MOUSE_LEFT_CLICK"]);
        assert_eq!(sink.actions, vec![Action::Click(MouseButton::Left)]);
        assert_eq!(mouse.latched(), Some(Direction::Up));
    }

    #[test]
    fn test_update_is_noop_for_discrete_schemes() {
        let mut mouse = MouseTranslator::new(MouseScheme::FIXED_STEP);
        let mut sink = run(&mut mouse, &["MOUSE_UP"]);
        block_on(mouse.update(10_000, &mut sink)).unwrap();
        assert_eq!(sink.moves(), vec![(0, -20)]);
    }
}
