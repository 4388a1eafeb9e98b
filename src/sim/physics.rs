//! Per-tick hazard motion and opacity breathing

use super::state::{Bounds, HazardBall};
use crate::consts::*;

/// Walk opacity one step, reversing direction at either end of the range
pub fn breathe(ball: &mut HazardBall) {
    let next = i32::from(ball.alpha) + i32::from(ball.flash_dir) * FLASH_SPEED;
    if next <= i32::from(MIN_ALPHA) {
        ball.alpha = MIN_ALPHA;
        ball.flash_dir = 1;
    } else if next >= i32::from(MAX_ALPHA) {
        ball.alpha = MAX_ALPHA;
        ball.flash_dir = -1;
    } else {
        ball.alpha = next as u8;
    }
}

/// Move the ball and reflect it off the window edges.
///
/// Returns true if either axis bounced this tick. Bounds are the live window
/// size, so a shrinking window can push the ball past an edge; it keeps
/// reversing until it is back inside.
pub fn advance(ball: &mut HazardBall, bounds: Bounds) -> bool {
    ball.pos += ball.vel * SPEED_MULTIPLIER;

    let mut bounced = false;
    if ball.pos.x - ball.radius <= 0.0 || ball.pos.x + ball.radius >= bounds.width {
        ball.vel.x = -ball.vel.x;
        bounced = true;
    }
    if ball.pos.y - ball.radius <= 0.0 || ball.pos.y + ball.radius >= bounds.height {
        ball.vel.y = -ball.vel.y;
        bounced = true;
    }

    if bounced {
        ball.vel *= BOUNCE_BOOST;
        ball.vel.x = clamp_speed(ball.vel.x);
        ball.vel.y = clamp_speed(ball.vel.y);
    }
    bounced
}

/// Clamp one velocity axis to `MAX_SPEED`, keeping its sign
#[inline]
pub fn clamp_speed(speed: f32) -> f32 {
    if speed.abs() > MAX_SPEED {
        MAX_SPEED.copysign(speed)
    } else {
        speed
    }
}

/// Full per-tick hazard update: opacity first, then motion
pub fn step_hazard(ball: &mut HazardBall, bounds: Bounds) {
    breathe(ball);
    advance(ball, bounds);
}
