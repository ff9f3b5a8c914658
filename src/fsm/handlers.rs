//! Per-state actions.
//!
//! Handlers decide transitions by calling [`AppContext::transition_to`]; they never run entry
//! or exit actions themselves. Exit actions only clean up and leave the active state alone.

use core::fmt::Write;

use heapless::String;

use super::context::{AppContext, MAX_LEDS};
use super::signal::{EventStatus, Signal, State};
use super::table::Handler;
use crate::hardware::traits::Board;

pub(crate) const IGNORED_MESSAGE: &str = "EVENT_IGNORED";

/// Exhaustive binding of every (state, signal) pair.
pub fn handler_for<B: Board>(state: State, signal: Signal) -> Handler<B> {
    use Signal::*;
    use State::*;

    match (state, signal) {
        (Idle, Entry) => idle_entry::<B>,
        (Idle, Exit) => idle_exit::<B>,
        (Idle, Inc | Dec) => enter_led_set::<B>,
        (Idle, StartPause) => idle_start_pause::<B>,
        (Idle, Abort) => ignore::<B>,

        (LedSet, Entry) => led_set_entry::<B>,
        (LedSet, Exit) => led_set_exit::<B>,
        (LedSet, Inc) => led_set_inc::<B>,
        (LedSet, Dec) => led_set_dec::<B>,
        (LedSet, StartPause) => enter_blink::<B>,
        (LedSet, Abort) => enter_idle::<B>,

        (Blink, Entry) => blink_entry::<B>,
        (Blink, Exit) => blink_exit::<B>,
        (Blink, Inc | Dec) => ignore::<B>,
        (Blink, StartPause) => enter_pause::<B>,
        (Blink, Abort) => abort_blinking::<B>,

        (Pause, Entry) => pause_entry::<B>,
        (Pause, Exit) => pause_exit::<B>,
        (Pause, Inc | Dec) => ignore::<B>,
        (Pause, StartPause) => enter_blink::<B>,
        (Pause, Abort) => abort_blinking::<B>,
    }
}

fn show_leds<B: Board>(ctx: &AppContext, board: &mut B) {
    let mut line: String<20> = String::new();
    // capacity covers the longest count; a failed write only shortens the message
    let _ = write!(line, "Current LEDs: {}", ctx.led_count());
    board.emit(&line);
    for index in 0..usize::from(ctx.led_count()) {
        board.set_led(index);
    }
}

fn clear_leds<B: Board>(board: &mut B) {
    for index in 0..usize::from(MAX_LEDS) {
        board.clear_led(index);
    }
}

fn ignore<B: Board>(ctx: &mut AppContext, board: &mut B, signal: Signal) -> EventStatus {
    debug!("{} ignored in {}", signal, ctx.active_state());
    board.emit(IGNORED_MESSAGE);
    EventStatus::Ignored
}

fn enter_idle<B: Board>(ctx: &mut AppContext, _: &mut B, _: Signal) -> EventStatus {
    ctx.transition_to(State::Idle)
}

fn enter_led_set<B: Board>(ctx: &mut AppContext, _: &mut B, _: Signal) -> EventStatus {
    ctx.transition_to(State::LedSet)
}

fn enter_blink<B: Board>(ctx: &mut AppContext, _: &mut B, _: Signal) -> EventStatus {
    ctx.transition_to(State::Blink)
}

fn enter_pause<B: Board>(ctx: &mut AppContext, _: &mut B, _: Signal) -> EventStatus {
    ctx.transition_to(State::Pause)
}

// IDLE

fn idle_entry<B: Board>(ctx: &mut AppContext, board: &mut B, _: Signal) -> EventStatus {
    show_leds(ctx, board);
    board.emit("IDLE STATE");
    EventStatus::Handled
}

fn idle_exit<B: Board>(_: &mut AppContext, board: &mut B, _: Signal) -> EventStatus {
    clear_leds(board);
    board.emit("Exit from: IDLE");
    EventStatus::Handled
}

fn idle_start_pause<B: Board>(ctx: &mut AppContext, board: &mut B, signal: Signal) -> EventStatus {
    // nothing to blink
    if ctx.led_count() == 0 {
        return ignore(ctx, board, signal);
    }
    ctx.transition_to(State::Blink)
}

// LED_SET

fn led_set_entry<B: Board>(ctx: &mut AppContext, board: &mut B, _: Signal) -> EventStatus {
    show_leds(ctx, board);
    board.emit("Set Leds");
    EventStatus::Handled
}

fn led_set_exit<B: Board>(_: &mut AppContext, board: &mut B, _: Signal) -> EventStatus {
    clear_leds(board);
    board.emit("Exit from: LED_SET");
    EventStatus::Handled
}

fn led_set_inc<B: Board>(ctx: &mut AppContext, board: &mut B, signal: Signal) -> EventStatus {
    if !ctx.increment() {
        return ignore(ctx, board, signal);
    }
    clear_leds(board);
    show_leds(ctx, board);
    EventStatus::Handled
}

fn led_set_dec<B: Board>(ctx: &mut AppContext, board: &mut B, signal: Signal) -> EventStatus {
    if !ctx.decrement() {
        return ignore(ctx, board, signal);
    }
    clear_leds(board);
    show_leds(ctx, board);
    EventStatus::Handled
}

// BLINK

fn blink_entry<B: Board>(ctx: &mut AppContext, board: &mut B, signal: Signal) -> EventStatus {
    if ctx.led_count() == 0 {
        return ignore(ctx, board, signal);
    }
    show_leds(ctx, board);
    if let Err(e) = board.start(ctx.led_count()) {
        error!("blink timer did not start: {}", e);
        return ignore(ctx, board, signal);
    }
    board.emit("Blinking LEDs");
    EventStatus::Handled
}

fn blink_exit<B: Board>(_: &mut AppContext, board: &mut B, _: Signal) -> EventStatus {
    board.stop();
    clear_leds(board);
    board.emit("Exit from: BLINK");
    EventStatus::Handled
}

/// ABRT from BLINK or PAUSE.
fn abort_blinking<B: Board>(ctx: &mut AppContext, board: &mut B, _: Signal) -> EventStatus {
    board.stop();
    ctx.transition_to(State::Idle)
}

// PAUSE

fn pause_entry<B: Board>(ctx: &mut AppContext, board: &mut B, signal: Signal) -> EventStatus {
    board.stop();
    if ctx.led_count() == 0 {
        return ignore(ctx, board, signal);
    }
    show_leds(ctx, board);
    board.emit("PAUSE Leds");
    EventStatus::Handled
}

fn pause_exit<B: Board>(_: &mut AppContext, board: &mut B, _: Signal) -> EventStatus {
    clear_leds(board);
    board.emit("Exit from: PAUSE");
    EventStatus::Handled
}
