//! Over/ball position stamped on each delivery.

use super::delivery::DeliveryKind;
use serde::{Deserialize, Serialize};

pub const BALLS_PER_OVER: u32 = 6;

/// Position of a delivery within the innings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallPosition {
    pub over: u32,
    pub ball: u32,
}

/// Compute the position for a delivery given the legal balls already bowled.
///
/// Only legal deliveries (anything but wides and no-balls) advance the count,
/// so an illegal delivery shares its position with the ball that follows it.
pub fn ball_position(legal_balls: u32, kind: DeliveryKind) -> BallPosition {
    let prospective = if kind.is_legal() {
        legal_balls + 1
    } else {
        legal_balls
    };

    let mut over = prospective / BALLS_PER_OVER;
    let mut ball = prospective % BALLS_PER_OVER + 1;

    // Carried over from the stored scoring rules; unreachable while the
    // modulo above stays in place.
    if ball == 7 {
        over += 1;
        ball = 1;
    }

    BallPosition { over, ball }
}

/// Legacy cricket notation: `12.3` means 12 overs and 3 balls, not a decimal.
pub fn overs_display(balls: u32) -> f64 {
    f64::from(balls / BALLS_PER_OVER) + f64::from(balls % BALLS_PER_OVER) / 10.0
}
