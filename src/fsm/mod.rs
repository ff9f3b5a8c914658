//! Table-driven flat state machine.

mod context;
mod dispatcher;
mod handlers;
mod signal;
mod table;

pub use context::{AppContext, MAX_LEDS};
pub use dispatcher::Fsm;
pub use handlers::handler_for;
pub use signal::{EventStatus, Signal, State};
pub use table::{Handler, StateTable};
