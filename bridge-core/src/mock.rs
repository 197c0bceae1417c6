//! Test doubles shared by the unit tests.

extern crate std;

use core::cell::Cell;
use std::collections::VecDeque;
use std::vec::Vec;

use command_proto::{Key, MouseButton};
use embedded_hal_async::delay::DelayNs;

use crate::bringup::{LinkError, ModuleLink};
use crate::clock::Clock;
use crate::input::{CommandSource, Line, LineAssembler};
use crate::output::{ActionSink, SinkError};

/// One recorded sink call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Press(Key),
    Release(Key),
    Move(i16, i16),
    Click(MouseButton),
    ReleaseAll,
}

/// Sink that records every call, optionally failing after a number of calls.
pub struct RecordingSink {
    pub actions: Vec<Action>,
    pub fail_after: Option<usize>,
    pub ready: bool,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
            fail_after: None,
            ready: true,
        }
    }
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(calls: usize) -> Self {
        Self {
            fail_after: Some(calls),
            ..Self::default()
        }
    }

    fn record(&mut self, action: Action) -> Result<(), SinkError> {
        if let Some(limit) = self.fail_after {
            if self.actions.len() >= limit {
                return Err(SinkError::Io);
            }
        }
        self.actions.push(action);
        Ok(())
    }

    /// Characters of every pressed [`Key::Char`], in order.
    pub fn typed(&self) -> std::string::String {
        self.actions
            .iter()
            .filter_map(|a| match a {
                Action::Press(Key::Char(c)) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn moves(&self) -> Vec<(i16, i16)> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                Action::Move(dx, dy) => Some((*dx, *dy)),
                _ => None,
            })
            .collect()
    }
}

impl ActionSink for RecordingSink {
    async fn press(&mut self, key: Key) -> Result<(), SinkError> {
        self.record(Action::Press(key))
    }

    async fn release(&mut self, key: Key) -> Result<(), SinkError> {
        self.record(Action::Release(key))
    }

    async fn move_pointer(&mut self, dx: i16, dy: i16) -> Result<(), SinkError> {
        self.record(Action::Move(dx, dy))
    }

    async fn click(&mut self, button: MouseButton) -> Result<(), SinkError> {
        self.record(Action::Click(button))
    }

    async fn release_all(&mut self) -> Result<(), SinkError> {
        self.actions.push(Action::ReleaseAll);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Source yielding a fixed script of lines.
pub struct ScriptedSource {
    lines: VecDeque<Line>,
}

impl ScriptedSource {
    /// Each entry is sent as one newline-terminated line.
    pub fn new(lines: &[&str]) -> Self {
        let mut raw = Vec::new();
        for line in lines {
            raw.extend_from_slice(line.as_bytes());
            raw.push(b'\n');
        }
        Self::from_bytes(&raw)
    }

    /// Lines as the UART reader would split `raw`.
    pub fn from_bytes(raw: &[u8]) -> Self {
        let mut assembler = LineAssembler::new();
        Self {
            lines: raw.iter().filter_map(|&b| assembler.push(b)).collect(),
        }
    }
}

impl CommandSource for ScriptedSource {
    fn next_line(&mut self) -> Option<Line> {
        self.lines.pop_front()
    }
}

/// Clock advanced by hand.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for &ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Delay that returns immediately and records the requested durations.
#[derive(Default)]
pub struct RecordingDelay {
    pub waits_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}

/// Module link answering each command from a script.
pub struct ScriptedLink {
    pub sent: Vec<std::string::String>,
    replies: VecDeque<Result<(), LinkError>>,
}

impl ScriptedLink {
    pub fn new(replies: &[Result<(), LinkError>]) -> Self {
        Self {
            sent: Vec::new(),
            replies: replies.iter().copied().collect(),
        }
    }
}

impl ModuleLink for ScriptedLink {
    async fn command(&mut self, command: &str) -> Result<(), LinkError> {
        self.sent.push(command.into());
        self.replies.pop_front().unwrap_or(Ok(()))
    }
}
