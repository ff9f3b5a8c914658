use super::context::AppContext;
use super::handlers;
use super::signal::{EventStatus, Signal, State};
use crate::hardware::traits::Board;

/// Action bound to one (state, signal) cell.
pub type Handler<B> = fn(&mut AppContext, &mut B, Signal) -> EventStatus;

/// Total `State x Signal -> Handler` lookup.
///
/// The array shape gives every pair exactly one handler, so a lookup can never miss.
pub struct StateTable<B> {
    cells: [[Handler<B>; Signal::COUNT]; State::COUNT],
}

impl<B> StateTable<B> {
    /// Builds a table by asking `handler_for` about every pair.
    pub fn from_fn(mut handler_for: impl FnMut(State, Signal) -> Handler<B>) -> Self {
        let cells = core::array::from_fn(|row| {
            core::array::from_fn(|column| handler_for(State::ALL[row], Signal::ALL[column]))
        });
        Self { cells }
    }

    pub fn handler(&self, state: State, signal: Signal) -> Handler<B> {
        self.cells[state.index()][signal.index()]
    }
}

impl<B: Board> StateTable<B> {
    /// The application's handlers.
    pub fn standard() -> Self {
        Self::from_fn(handlers::handler_for)
    }
}

impl<B> Clone for StateTable<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for StateTable<B> {}
