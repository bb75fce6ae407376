use std::process::ExitCode;

use noteboard::board::Board;
use noteboard::bounds::{quad_center, world_quad};
use noteboard::config::BoardConfig;
use noteboard::demo::{DEMO_AREA, DEMO_COUNT, scatter_texts};
use noteboard::geom::{Point, Vec2};
use noteboard::input::{Action, Tool, WheelDelta};
use noteboard::scene::NodeId;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const VIEWPORT: (f64, f64) = (800.0, 600.0);

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match BoardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid board configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut board = Board::new(config);
    board.on_ready(|board| {
        let mut rng = rand::rng();
        match scatter_texts(board, DEMO_COUNT, DEMO_AREA, &mut rng) {
            Ok(ids) => info!(count = ids.len(), "demo notes added"),
            Err(e) => warn!(error = %e, "failed to add demo notes"),
        }
    });
    board.resize(VIEWPORT.0, VIEWPORT.1);
    report(board.tick());

    replay(&mut board);

    let camera = board.camera();
    info!(
        nodes = board.scene().len(),
        zoom = camera.zoom,
        pan_x = camera.pan.x,
        pan_y = camera.pan.y,
        active = ?board.active_object().map(|a| a.target),
        "headless session finished"
    );
    ExitCode::SUCCESS
}

/// Frame clock for the scripted session.
struct Session {
    clock_ms: u64,
}

impl Session {
    const FRAME_MS: u64 = 16;

    /// Report a handler's actions, run one frame, and return the new time.
    fn step(&mut self, board: &mut Board, actions: Vec<Action>) -> u64 {
        report(actions);
        report(board.tick());
        self.clock_ms += Self::FRAME_MS;
        self.clock_ms
    }

    /// Let the clock run without input.
    fn pause(&mut self, ms: u64) {
        self.clock_ms += ms;
    }
}

/// Drive one scripted session: pan, zoom, drag and turn a note, edit it,
/// then marquee-select part of the view.
fn replay(board: &mut Board) {
    let mut session = Session { clock_ms: 0 };

    let start = Point::new(400.0, 300.0);
    let actions = board.pointer_down(start);
    session.step(board, actions);
    let actions = board.pointer_move(start + Vec2::new(-150.0, -100.0));
    let t = session.step(board, actions);
    let actions = board.pointer_up(start + Vec2::new(-150.0, -100.0), t);
    session.step(board, actions);

    let actions = board.wheel(start, WheelDelta { dx: 0.0, dy: -400.0 });
    session.step(board, actions);

    let Some(note) = visible_note(board) else {
        warn!("no note in view; skipping note gestures");
        return;
    };
    let Some(grab) = note_center_on_screen(board, note) else {
        return;
    };
    let actions = board.pointer_down(grab);
    session.step(board, actions);
    let actions = board.pointer_move(grab + Vec2::new(40.0, 25.0));
    let t = session.step(board, actions);
    let actions = board.pointer_up(grab + Vec2::new(40.0, 25.0), t);
    session.step(board, actions);

    let actions = board.set_active_angle(30.0);
    session.step(board, actions);

    // Wait out the drag release so it does not pair with the next click.
    session.pause(board.config().double_click_ms);

    // Two quick releases on the same note open the overlay.
    if let Some(grab) = note_center_on_screen(board, note) {
        for _ in 0..2 {
            let actions = board.pointer_down(grab);
            let t = session.step(board, actions);
            let actions = board.pointer_up(grab, t);
            session.step(board, actions);
        }
    }
    let actions = board.edit_text("edited from the headless driver");
    if !actions.iter().any(|a| matches!(a, Action::TextChanged { .. })) {
        warn!(%note, "scripted edit did not reach an open editor");
    }
    session.step(board, actions);
    let actions = board.close_text_editor();
    session.step(board, actions);

    board.set_tool(Tool::Selector);
    let corner = Point::new(20.0, 20.0);
    let actions = board.pointer_down(corner);
    session.step(board, actions);
    let actions = board.pointer_move(Point::new(780.0, 580.0));
    let t = session.step(board, actions);
    let actions = board.pointer_up(Point::new(780.0, 580.0), t);
    session.step(board, actions);

    if let Some(group) = board.group() {
        info!(members = group.children(board.scene()).len(), "marquee grouped notes");
    }
}

/// Topmost text note whose center is inside the viewport.
fn visible_note(board: &Board) -> Option<NodeId> {
    let scene = board.scene();
    let viewport = board.viewport();
    scene.children(scene.root()).iter().rev().copied().find(|id| {
        scene.kind(*id).is_some_and(|k| k.is_text())
            && note_center_on_screen(board, *id)
                .is_some_and(|p| p.x > 0.0 && p.y > 0.0 && p.x < viewport.width && p.y < viewport.height)
    })
}

fn note_center_on_screen(board: &Board, id: NodeId) -> Option<Point> {
    let quad = world_quad(board.scene(), id)?;
    Some(board.world_to_screen(quad_center(&quad)))
}

fn report(actions: Vec<Action>) {
    for action in actions {
        debug!(?action, "host action");
    }
}
