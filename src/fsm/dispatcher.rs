use super::context::AppContext;
use super::signal::{EventStatus, Signal, State};
use super::table::StateTable;
use crate::config::FsmConfig;
use crate::error::FsmError;
use crate::hardware::traits::Board;

/// The state machine: context, handler table and the board the handlers act on.
///
/// `dispatch` takes `&mut self`, so it can never be re-entered; callers running in several
/// contexts serialize signals before they reach it (the firmware funnels them through a
/// channel into one task).
pub struct Fsm<B: Board> {
    context: AppContext,
    table: StateTable<B>,
    board: B,
    max_transition_depth: u8,
}

impl<B: Board> Fsm<B> {
    /// Creates the machine with the standard handlers.
    ///
    /// The blink timer is created here; failing to create it is a startup error because
    /// BLINK cannot work without it.
    pub fn new(board: B, config: &FsmConfig) -> Result<Self, FsmError> {
        Self::with_table(board, StateTable::standard(), config)
    }

    pub fn with_table(
        mut board: B,
        table: StateTable<B>,
        config: &FsmConfig,
    ) -> Result<Self, FsmError> {
        config.validate()?;
        board.create(config.blink_period)?;
        Ok(Self {
            context: AppContext::new(),
            table,
            board,
            max_transition_depth: config.max_transition_depth,
        })
    }

    /// Runs the entry action of the initial state. Call once before the first dispatch.
    pub fn start(&mut self) -> EventStatus {
        let initial = self.context.active_state();
        info!("fsm start in {}", initial);
        let status = self.invoke(initial, Signal::Entry);
        if status == EventStatus::Transition {
            self.chase(initial, 0);
        }
        status
    }

    /// Routes `signal` to the handler of the active state and runs the exit/entry protocol
    /// when it requests a transition. Returns the outcome of the handler that received `signal`.
    pub fn dispatch(&mut self, signal: Signal) -> EventStatus {
        let source = self.context.active_state();
        debug!("dispatch {} in {}", signal, source);

        let status = self.invoke(source, signal);
        if status == EventStatus::Transition {
            self.chase(source, 0);
        }
        status
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn state(&self) -> State {
        self.context.active_state()
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    fn invoke(&mut self, state: State, signal: Signal) -> EventStatus {
        let handler = self.table.handler(state, signal);
        handler(&mut self.context, &mut self.board, signal)
    }

    /// Exit `source`, enter the state its handler selected, and keep going while entry
    /// actions request further transitions, up to the configured depth.
    fn chase(&mut self, mut source: State, mut depth: u16) {
        loop {
            depth += 1;
            let target = self.context.active_state();
            if depth > u16::from(self.max_transition_depth) {
                error!(
                    "transition chain exceeded {} steps at {} -> {}",
                    self.max_transition_depth,
                    source,
                    target
                );
                panic!("transition chain too deep");
            }
            info!("transition {} -> {}", source, target);

            self.invoke(source, Signal::Exit);
            if self.context.active_state() != target {
                error!("exit action of {} changed the active state", source);
                panic!("exit action changed the active state");
            }

            if self.invoke(target, Signal::Entry) != EventStatus::Transition {
                return;
            }
            source = target;
        }
    }
}
