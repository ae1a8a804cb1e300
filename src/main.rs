// Frontend modules live in the binary; the engine is the `chroma_life` library.
mod input;
mod render;
mod state;

use crate::state::State;

use anyhow::Context as _;
use chroma_life::{Session, Settings};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

/// Width reserved for the side panel when sizing the window.
const PANEL_WIDTH: f64 = 260.0;

#[derive(Parser, Debug)]
#[command(author, version, about = "Color Game of Life sandbox")]
struct Args {
    /// JSON settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board file to load at startup.
    #[arg(short, long)]
    board: Option<PathBuf>,

    /// Grid width in cells (10-200).
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells (10-200).
    #[arg(long)]
    height: Option<usize>,

    /// Seed for color mutation.
    #[arg(long)]
    seed: Option<u64>,
}

fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?,
        None => Settings::default(),
    };
    settings.set_grid_size(
        args.width.unwrap_or(settings.grid_width),
        args.height.unwrap_or(settings.grid_height),
    );
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    Ok(settings)
}

async fn run(event_loop: EventLoop<()>, window: Arc<Window>, session: Session) -> anyhow::Result<()> {
    let mut state = State::new(window, session).await?;

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { window_id, ref event }
                if window_id == state.window.id() =>
            {
                // egui gets the event first; pointer input over the panel stays there.
                let response = state.egui_winit_state.on_window_event(&state.window, event);
                if response.repaint {
                    state.window.request_redraw();
                }
                let consumed_by_egui = response.consumed && !matches!(event, WindowEvent::Resized(_));
                if consumed_by_egui {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(*new_size);
                    }
                    WindowEvent::MouseInput { state: element_state, button, .. } => {
                        input::handle_mouse_input(&mut state, *button, *element_state);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        input::handle_cursor_move(&mut state, *position);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        input::handle_cursor_left(&mut state);
                    }
                    WindowEvent::KeyboardInput { event: key_event, .. } => {
                        input::handle_key(&mut state, key_event);
                    }
                    WindowEvent::RedrawRequested => match state.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Out of GPU memory, exiting");
                            window_target.exit();
                        }
                        Err(e) => {
                            log::warn!("Skipping frame due to surface error: {e:?}");
                            state.window.request_redraw();
                        }
                    },
                    _ => (),
                }
            }
            Event::AboutToWait => {
                state.session.update(Instant::now());
                state.window.request_redraw();
            }
            _ => (),
        }
    })?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = load_settings(&args)?;
    let mut session = Session::new(settings);
    if let Some(path) = &args.board {
        session
            .load_board_file(path)
            .with_context(|| format!("failed to load board {}", path.display()))?;
    }

    let (width, height) = session.grid().dimensions();
    let cell_size = f64::from(session.settings().cell_size);
    let initial_size = winit::dpi::LogicalSize::new(
        PANEL_WIDTH + width as f64 * cell_size + 16.0,
        (height as f64 * cell_size + 16.0).max(480.0),
    );

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        winit::window::WindowBuilder::new()
            .with_title("Chroma Life")
            .with_inner_size(initial_size)
            .build(&event_loop)?,
    );

    pollster::block_on(run(event_loop, window, session))
}
