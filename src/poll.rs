//! Periodic refresh tied to surface visibility

use crate::data::SensorTarget;
use crate::display::{DisplaySurface, OutputSlots, TemperatureFormatter};
use crate::error::Result;
use crate::reader::ReadTemperature;
use log::debug;
use std::time::{Duration, Instant};

/// Whether a cycle is scheduled, and when
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling { next_due: Instant },
}

/// Reads both targets on a fixed cadence while active and writes the
/// formatted results to its surface.
///
/// Nothing here spawns or sleeps: the owner calls [`PollingDisplay::tick`]
/// from its own loop and uses [`PollingDisplay::next_due`] to know when.
pub struct PollingDisplay<R, S> {
    reader: R,
    surface: S,
    formatter: TemperatureFormatter,
    delay: Duration,
    state: PollState,
    slots: OutputSlots,
    cycles: u64,
}

impl<R: ReadTemperature, S: DisplaySurface> PollingDisplay<R, S> {
    pub fn new(reader: R, surface: S, formatter: TemperatureFormatter, delay: Duration) -> Self {
        Self {
            reader,
            surface,
            formatter,
            delay,
            state: PollState::Idle,
            slots: OutputSlots::default(),
            cycles: 0,
        }
    }

    /// Run one cycle now and schedule the next; no-op while already polling
    pub fn activate(&mut self, now: Instant) -> Result<()> {
        if self.is_active() {
            return Ok(());
        }
        debug!("polling every {:?}", self.delay);
        self.run_cycle()?;
        self.state = PollState::Polling {
            next_due: now + self.delay,
        };
        Ok(())
    }

    /// Drop the pending cycle
    pub fn deactivate(&mut self) {
        if self.is_active() {
            debug!("polling stopped after {} cycles", self.cycles);
        }
        self.state = PollState::Idle;
    }

    pub fn set_visible(&mut self, visible: bool, now: Instant) -> Result<()> {
        if visible {
            self.activate(now)
        } else {
            self.deactivate();
            Ok(())
        }
    }

    /// Run the scheduled cycle if it is due. Returns whether one ran.
    pub fn tick(&mut self, now: Instant) -> Result<bool> {
        match self.state {
            PollState::Polling { next_due } if now >= next_due => {
                self.run_cycle()?;
                self.state = PollState::Polling {
                    next_due: now + self.delay,
                };
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn next_due(&self) -> Option<Instant> {
        match self.state {
            PollState::Polling { next_due } => Some(next_due),
            PollState::Idle => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, PollState::Polling { .. })
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn slots(&self) -> &OutputSlots {
        &self.slots
    }

    /// Completed cycles since creation
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn run_cycle(&mut self) -> Result<()> {
        for target in SensorTarget::ALL {
            let reading = self.reader.read(target);
            self.slots.set(target, self.formatter.format(target, reading));
        }
        self.surface.render(&self.slots)?;
        self.cycles += 1;
        Ok(())
    }
}
