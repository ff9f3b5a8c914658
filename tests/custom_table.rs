//! Dispatcher protocol checks with hand-built tables.

mod common;

use common::RecordingBoard;
use led_fsm::fsm::{AppContext, EventStatus, Fsm, Handler, Signal, State, StateTable};
use led_fsm::hardware::StatusOutput;
use led_fsm::{ConfigError, FsmConfig, FsmError};

type Cell = Handler<RecordingBoard>;

fn handled(_: &mut AppContext, _: &mut RecordingBoard, _: Signal) -> EventStatus {
    EventStatus::Handled
}

fn log_entry(ctx: &mut AppContext, board: &mut RecordingBoard, _: Signal) -> EventStatus {
    board.emit(&format!("entry {}", ctx.active_state()));
    EventStatus::Handled
}

fn log_exit<const STATE: usize>(_: &mut AppContext, board: &mut RecordingBoard, _: Signal) -> EventStatus {
    board.emit(&format!("exit {}", State::ALL[STATE]));
    EventStatus::Handled
}

fn exit_of(state: State) -> Cell {
    match state {
        State::Idle => log_exit::<0>,
        State::LedSet => log_exit::<1>,
        State::Blink => log_exit::<2>,
        State::Pause => log_exit::<3>,
    }
}

fn go_led_set(ctx: &mut AppContext, board: &mut RecordingBoard, _: Signal) -> EventStatus {
    board.emit(&format!("entry {}", ctx.active_state()));
    ctx.transition_to(State::LedSet)
}

fn go_blink(ctx: &mut AppContext, board: &mut RecordingBoard, _: Signal) -> EventStatus {
    board.emit(&format!("entry {}", ctx.active_state()));
    ctx.transition_to(State::Blink)
}

fn go_pause(ctx: &mut AppContext, board: &mut RecordingBoard, _: Signal) -> EventStatus {
    board.emit(&format!("entry {}", ctx.active_state()));
    ctx.transition_to(State::Pause)
}

fn request_led_set(ctx: &mut AppContext, _: &mut RecordingBoard, _: Signal) -> EventStatus {
    ctx.transition_to(State::LedSet)
}

fn sneaky_exit(ctx: &mut AppContext, _: &mut RecordingBoard, _: Signal) -> EventStatus {
    ctx.transition_to(State::Pause);
    EventStatus::Handled
}

/// IDLE --INC--> LED_SET; every entry is logged; `entries` decides which entry actions
/// bounce onward.
fn table(entries: fn(State) -> Cell) -> StateTable<RecordingBoard> {
    StateTable::from_fn(|state, signal| match (state, signal) {
        (_, Signal::Entry) => entries(state),
        (_, Signal::Exit) => exit_of(state),
        (State::Idle, Signal::Inc) => request_led_set,
        _ => handled,
    })
}

fn machine(table: StateTable<RecordingBoard>, depth: u8) -> Fsm<RecordingBoard> {
    let config = FsmConfig {
        max_transition_depth: depth,
        ..FsmConfig::default()
    };
    Fsm::with_table(RecordingBoard::default(), table, &config).unwrap()
}

#[test]
fn plain_transition_runs_one_exit_then_one_entry() {
    let mut fsm = machine(table(|_| log_entry), 2);

    assert_eq!(fsm.dispatch(Signal::Inc), EventStatus::Transition);
    assert_eq!(fsm.state(), State::LedSet);
    assert_eq!(fsm.board().messages(), ["exit IDLE", "entry LED_SET"]);
}

#[test]
fn non_transition_runs_no_exit_or_entry() {
    let mut fsm = machine(table(|_| log_entry), 2);

    assert_eq!(fsm.dispatch(Signal::Dec), EventStatus::Handled);
    assert!(fsm.board().messages().is_empty());
}

#[test]
fn entry_transition_chains_within_the_bound() {
    fn entries(state: State) -> Cell {
        match state {
            State::LedSet => go_blink,
            _ => log_entry,
        }
    }
    let mut fsm = machine(table(entries), 2);

    assert_eq!(fsm.dispatch(Signal::Inc), EventStatus::Transition);
    assert_eq!(fsm.state(), State::Blink);
    assert_eq!(
        fsm.board().messages(),
        ["exit IDLE", "entry LED_SET", "exit LED_SET", "entry BLINK"]
    );
}

#[test]
#[should_panic(expected = "transition chain too deep")]
fn entry_transition_chain_past_the_bound_is_fatal() {
    fn entries(state: State) -> Cell {
        match state {
            State::LedSet => go_blink,
            State::Blink => go_pause,
            _ => log_entry,
        }
    }
    let mut fsm = machine(table(entries), 2);
    fsm.dispatch(Signal::Inc);
}

#[test]
#[should_panic(expected = "transition chain too deep")]
fn depth_one_forbids_any_chaining() {
    fn entries(state: State) -> Cell {
        match state {
            State::LedSet => go_blink,
            _ => log_entry,
        }
    }
    let mut fsm = machine(table(entries), 1);
    fsm.dispatch(Signal::Inc);
}

#[test]
#[should_panic(expected = "transition chain too deep")]
fn endless_entry_cycle_is_fatal_at_the_largest_depth() {
    fn entries(state: State) -> Cell {
        match state {
            State::LedSet => go_blink,
            State::Blink => go_led_set,
            _ => log_entry,
        }
    }
    let mut fsm = machine(table(entries), u8::MAX);
    fsm.dispatch(Signal::Inc);
}

#[test]
fn start_follows_an_initial_entry_transition() {
    fn entries(state: State) -> Cell {
        match state {
            State::Idle => go_led_set,
            _ => log_entry,
        }
    }
    let mut fsm = machine(table(entries), 2);

    assert_eq!(fsm.start(), EventStatus::Transition);
    assert_eq!(fsm.state(), State::LedSet);
    assert_eq!(
        fsm.board().messages(),
        ["entry IDLE", "exit IDLE", "entry LED_SET"]
    );
}

#[test]
#[should_panic(expected = "exit action changed the active state")]
fn exit_action_may_not_pick_the_next_state() {
    let table = StateTable::from_fn(|state, signal| -> Cell {
        match (state, signal) {
            (State::Idle, Signal::Exit) => sneaky_exit,
            (State::Idle, Signal::Inc) => request_led_set,
            _ => handled,
        }
    });
    let mut fsm = machine(table, 2);
    fsm.dispatch(Signal::Inc);
}

#[test]
fn zero_depth_is_rejected_at_construction() {
    let config = FsmConfig {
        max_transition_depth: 0,
        ..FsmConfig::default()
    };
    let result = Fsm::with_table(RecordingBoard::default(), table(|_| log_entry), &config);
    assert!(matches!(
        result,
        Err(FsmError::Config(ConfigError::ZeroTransitionDepth))
    ));
}
