use std::time::Instant;

use crate::state::State;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton},
    keyboard::{Key, NamedKey},
};

/// Converts a window position in physical pixels into board-relative points.
fn board_position(state: &State, position: PhysicalPosition<f64>) -> (f64, f64) {
    let scale = state.window.scale_factor();
    (
        position.x / scale - f64::from(state.board_origin.x),
        position.y / scale - f64::from(state.board_origin.y),
    )
}

pub fn handle_mouse_input(state: &mut State, button: MouseButton, element_state: ElementState) {
    if button != MouseButton::Left {
        return;
    }
    match element_state {
        ElementState::Pressed => {
            if let Some(position) = state.cursor_pos {
                let (x, y) = board_position(state, position);
                state.session.pointer_down_at(x, y);
            }
        }
        ElementState::Released => state.session.pointer_up(),
    }
}

pub fn handle_cursor_move(state: &mut State, position: PhysicalPosition<f64>) {
    state.cursor_pos = Some(position);
    let (x, y) = board_position(state, position);
    state.session.pointer_move_at(x, y);
}

pub fn handle_cursor_left(state: &mut State) {
    state.cursor_pos = None;
    state.session.pointer_left();
}

/// Space toggles the simulation, `s` steps, `r` resets.
pub fn handle_key(state: &mut State, event: &KeyEvent) {
    if event.state != ElementState::Pressed || event.repeat {
        return;
    }
    match &event.logical_key {
        Key::Named(NamedKey::Space) => state.session.toggle_running(Instant::now()),
        Key::Character(c) if c.as_str() == "s" => state.session.step(),
        Key::Character(c) if c.as_str() == "r" => state.session.reset(),
        _ => {}
    }
}
