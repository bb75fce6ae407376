//! Sample content for headless runs and manual testing.

#[cfg(test)]
#[path = "demo_test.rs"]
mod demo_test;

use rand::Rng;

use crate::board::Board;
use crate::geom::{Point, Rect};
use crate::scene::{NodeId, SceneError};
use crate::text::TextStyle;

/// Number of notes in the default demo board.
pub const DEMO_COUNT: usize = 500;

/// Region the default demo notes are scattered over, in world units.
pub const DEMO_AREA: Rect = Rect::new(0.0, 0.0, 8000.0, 6000.0);

const SAMPLE_TEXT: &str = "床前明月光\n疑是地上霜123\n举头望明月\n低头思故乡asdasd";

/// Add `count` copies of the sample note at uniformly random top-left
/// positions inside `area`.
///
/// # Errors
///
/// Returns the first scene error; notes added before it stay on the board.
pub fn scatter_texts<R: Rng + ?Sized>(
    board: &mut Board,
    count: usize,
    area: Rect,
    rng: &mut R,
) -> Result<Vec<NodeId>, SceneError> {
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let position = Point::new(sample(rng, area.x0, area.x1), sample(rng, area.y0, area.y1));
        ids.push(board.add_text(SAMPLE_TEXT, TextStyle::default(), position)?);
    }
    Ok(ids)
}

fn sample<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}
