//! Keyboard-mode translation: table commands, chords and literal text.

use command_proto::{longest_match, Key, KeyboardCommand, Modifier, KEYBOARD_COMMANDS};

use crate::config::BurstConfig;
use crate::output::{ActionSink, SinkError};

/// What the dispatcher must do after a keyboard line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyboardOutcome {
    /// All actions for the line have been sent.
    Done,
    /// The line requested the delete burst; the dispatcher runs it.
    Burst(BurstConfig),
}

/// Maps keyboard-mode lines to key actions.
///
/// Lines matching no identifier are typed verbatim, one tap per character.
#[derive(Debug, Clone, Copy)]
pub struct KeyboardTranslator {
    burst: BurstConfig,
}

impl KeyboardTranslator {
    #[must_use]
    pub const fn new(burst: BurstConfig) -> Self {
        Self { burst }
    }

    /// Handle one keyboard-mode line.
    pub async fn handle<A: ActionSink>(
        &self,
        line: &str,
        sink: &mut A,
    ) -> Result<KeyboardOutcome, SinkError> {
        match longest_match(line, KEYBOARD_COMMANDS) {
            Some(KeyboardCommand::Tap(key)) => tap(sink, key).await?,
            Some(KeyboardCommand::Chord(modifier, letter)) => {
                chord(sink, modifier, letter).await?
            }
            Some(KeyboardCommand::Burst) => return Ok(KeyboardOutcome::Burst(self.burst)),
            None => type_literal(sink, line).await?,
        }
        Ok(KeyboardOutcome::Done)
    }
}

/// Press then release `key`.
pub async fn tap<A: ActionSink>(sink: &mut A, key: Key) -> Result<(), SinkError> {
    sink.press(key).await?;
    sink.release(key).await
}

/// Send `modifier` + `letter`.
///
/// Order is fixed: press modifier, press letter, release modifier, release
/// letter. The host sees the modifier go up before the letter.
pub async fn chord<A: ActionSink>(
    sink: &mut A,
    modifier: Modifier,
    letter: char,
) -> Result<(), SinkError> {
    let modifier = Key::Modifier(modifier);
    let letter = Key::Char(letter);
    sink.press(modifier).await?;
    sink.press(letter).await?;
    sink.release(modifier).await?;
    sink.release(letter).await
}

/// Type `text` one character at a time, in order.
///
/// Characters without a US layout usage are skipped.
pub async fn type_literal<A: ActionSink>(sink: &mut A, text: &str) -> Result<(), SinkError> {
    for c in text.chars() {
        let key = Key::Char(c);
        if key.usage().is_none() {
            debug!("Skipping untypeable character {:?}", c);
            continue;
        }
        tap(sink, key).await?;
    }
    Ok(())
}
