//! End-to-end behavior of a sandbox session, driven only through its public API.

use chroma_life::{Cell, EditMode, Rgb, Session, Settings};

const INK: Rgb = Rgb::new(0x11, 0x22, 0x33);
const RED: Rgb = Rgb::new(0xff, 0x00, 0x00);

fn still_session() -> Session {
    let mut settings = Settings {
        grid_width: 10,
        grid_height: 10,
        seed: Some(17),
        ..Settings::default()
    };
    settings.set_draw_color(INK);
    settings.set_hue_sat_speed(0.0);
    settings.set_lightness_speed(0.0);
    Session::new(settings)
}

fn paint(session: &mut Session, cells: &[(i64, i64)]) {
    for &(row, col) in cells {
        session.pointer_down(row, col);
        session.pointer_up();
    }
}

#[test_log::test]
fn painted_cell_with_two_neighbors_survives_with_its_color() {
    let mut session = still_session();
    paint(&mut session, &[(2, 2), (2, 3), (3, 2)]);
    session.step();
    assert_eq!(session.grid().get(2, 2), Some(Cell::Alive(INK)));
    assert_eq!(session.generation(), 1);
}

#[test_log::test]
fn lone_cell_dies_in_one_step() {
    let mut session = still_session();
    paint(&mut session, &[(5, 5)]);
    session.step();
    assert_eq!(session.live_cells(), 0);
}

#[test_log::test]
fn block_is_stable_without_mutation() {
    let mut session = still_session();
    paint(&mut session, &[(4, 4), (4, 5), (5, 4), (5, 5)]);
    let block = session.grid().clone();
    for _ in 0..5 {
        session.step();
        assert_eq!(session.grid(), &block);
    }
}

#[test_log::test]
fn three_same_colored_parents_give_birth_to_that_color() {
    let mut session = still_session();
    paint(&mut session, &[(0, 0), (0, 2), (2, 1)]);
    session.step();
    assert_eq!(session.grid().get(1, 1), Some(Cell::Alive(INK)));
}

#[test_log::test]
fn copy_and_paste_moves_a_block_with_its_empties() {
    let mut session = still_session();
    session.set_draw_color(RED);
    paint(&mut session, &[(0, 0)]);
    session.set_draw_color(INK);
    paint(&mut session, &[(5, 6), (6, 5), (6, 6)]);

    session.set_mode(EditMode::Copy);
    session.pointer_down(1, 1);
    session.pointer_move(0, 0);
    session.pointer_down(0, 0);

    session.set_mode(EditMode::Paste);
    assert!(session.pointer_down(5, 5));

    let grid = session.grid();
    assert_eq!(grid.get(5, 5), Some(Cell::Alive(RED)));
    assert_eq!(grid.get(5, 6), Some(Cell::Empty));
    assert_eq!(grid.get(6, 5), Some(Cell::Empty));
    assert_eq!(grid.get(6, 6), Some(Cell::Empty));
}

#[test_log::test]
fn paste_that_does_not_fit_changes_nothing() {
    let mut session = still_session();
    paint(&mut session, &[(0, 0), (1, 1), (9, 9)]);
    session.set_mode(EditMode::Copy);
    session.pointer_down(0, 0);
    session.pointer_down(2, 2);

    let before = session.grid().clone();
    session.set_mode(EditMode::Paste);
    assert!(!session.pointer_down(8, 8));
    assert_eq!(session.grid(), &before);
}

#[test_log::test]
fn paste_without_copy_is_a_no_op() {
    let mut session = still_session();
    session.set_mode(EditMode::Paste);
    assert!(!session.pointer_down(0, 0));
    assert_eq!(session.live_cells(), 0);
}

#[test_log::test]
fn abandoning_a_selection_keeps_grid_and_clipboard() {
    let mut session = still_session();
    paint(&mut session, &[(3, 3)]);
    session.set_mode(EditMode::Copy);
    session.pointer_down(3, 3);
    session.pointer_down(4, 4);
    let copied = session.clipboard().block().cloned();

    session.pointer_down(0, 0);
    session.pointer_move(9, 9);
    assert!(session.selection_preview().is_some());

    let before = session.grid().clone();
    session.set_mode(EditMode::Create);
    assert!(session.selection_preview().is_none());
    assert_eq!(session.grid(), &before);
    assert_eq!(session.clipboard().block().cloned(), copied);
}

#[test_log::test]
fn clipboard_survives_mode_switches_but_not_resize() {
    let mut session = still_session();
    paint(&mut session, &[(0, 0)]);
    session.set_mode(EditMode::Copy);
    session.pointer_down(0, 0);
    session.pointer_down(0, 0);

    for mode in EditMode::ALL {
        session.set_mode(mode);
    }
    assert!(!session.clipboard().is_empty());

    session.resize(12, 12);
    assert!(session.clipboard().is_empty());
}

#[test_log::test]
fn recolor_paints_only_live_cells_in_the_rectangle() {
    let mut session = still_session();
    paint(&mut session, &[(1, 1), (2, 3), (7, 7)]);
    session.set_draw_color(RED);
    session.set_mode(EditMode::Recolor);
    session.pointer_down(3, 4);
    assert!(session.pointer_down(0, 0));

    let grid = session.grid();
    assert_eq!(grid.get(1, 1), Some(Cell::Alive(RED)));
    assert_eq!(grid.get(2, 3), Some(Cell::Alive(RED)));
    assert_eq!(grid.get(7, 7), Some(Cell::Alive(INK)));
    assert_eq!(grid.get(0, 0), Some(Cell::Empty));
}

#[test_log::test]
fn mutation_with_fixed_seed_is_reproducible() {
    let settings = Settings {
        grid_width: 20,
        grid_height: 20,
        hue_sat_speed: 30.0,
        lightness_speed: 10.0,
        seed: Some(2024),
        ..Settings::default()
    };
    let glider = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

    let run = || {
        let mut session = Session::new(settings.clone());
        paint(&mut session, &glider);
        for _ in 0..12 {
            session.step();
        }
        session.grid().clone()
    };
    assert_eq!(run(), run());
}
