//! Entry guard and generation counter for feed loads.

use fg_core::LoadMode;

use super::outcome::RejectReason;

/// Identifies one accepted load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket {
    pub generation: u64,
    pub mode: LoadMode,
}

/// Tracks the single load allowed to mutate feed state.
///
/// `Initial` and `Refresh` supersede whatever is in flight by taking a new
/// generation. `Append` never supersedes: it is refused while any load is
/// in flight.
#[derive(Debug, Default)]
pub(crate) struct LoadGate {
    generation: u64,
    in_flight: Option<Ticket>,
}

impl LoadGate {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn in_flight(&self) -> Option<Ticket> {
        self.in_flight
    }

    pub fn try_acquire(&mut self, mode: LoadMode) -> Result<Ticket, RejectReason> {
        if mode == LoadMode::Append && self.in_flight.is_some() {
            return Err(RejectReason::Busy);
        }
        self.generation += 1;
        let ticket = Ticket {
            generation: self.generation,
            mode,
        };
        self.in_flight = Some(ticket);
        Ok(ticket)
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.in_flight
            .map(|t| t.generation == ticket.generation)
            .unwrap_or(false)
    }

    /// Clears the in-flight slot if `ticket` still owns it.
    ///
    /// Returns `false` for a superseded ticket; its response must be dropped.
    pub fn release(&mut self, ticket: &Ticket) -> bool {
        if self.is_current(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Orphans every outstanding ticket.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = None;
    }
}
