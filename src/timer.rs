use std::io::{self, Write};
use std::time::Duration;

use crate::render::Renderer;
use crate::session::Phase;
use crate::skip::SkipToken;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Completed,
    Skipped,
}

/// Count `minutes` down to `00:00`, one rendered tick per second.
///
/// An N-minute countdown renders `N * 60 + 1` ticks. The skip token is checked
/// before every tick. Requests made before the countdown starts are dropped, and
/// the token is left clear when this returns.
pub async fn run<W: Write>(
    minutes: u64,
    phase: Phase,
    skip: &SkipToken,
    renderer: &mut Renderer<W>,
) -> io::Result<Outcome> {
    let total_secs = minutes.saturating_mul(60);
    let mut outcome = Outcome::Completed;
    skip.clear();

    for remaining in (0..=total_secs).rev() {
        if skip.take() {
            outcome = Outcome::Skipped;
            break;
        }
        renderer.tick(phase, remaining)?;
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    let finished = renderer.finish();
    // last, so a request arriving while output drains is not carried over
    skip.clear();
    finished?;
    Ok(outcome)
}
