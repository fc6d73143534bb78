//! Default shot endpoints: one down the line, one cross court.
//!
//! Both targets move continuously with the player. Depth is a clamped linear
//! blend of how far the player has come in from the baseline and how far
//! the contact point is from the center; there are no steps.

use serde::{Deserialize, Serialize};

use crate::{PlayerSide, Position, court};

const DTL_MAX_SHORTEN: f64 = 2.0;
const DTL_FORWARD_SCALE: f64 = 0.8;
const DTL_LATERAL_SCALE: f64 = 0.2;

/// Cross-court shots can come all the way in to the service line.
const CROSS_MAX_SHORTEN: f64 = court::NET_Y - court::SERVICE_DEPTH;
const CROSS_FORWARD_SCALE: f64 = 0.7;
const CROSS_LATERAL_SCALE: f64 = 0.5;

/// Minimum distance between an auto target and the net.
const NET_CLEARANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoShots {
    pub down_the_line: Position,
    pub cross_court: Position,
}

/// How far `player` has advanced from their baseline toward the net, 0..=1.
pub fn forward_factor(player: Position, side: PlayerSide) -> f64 {
    let advanced = (player.y - side.baseline_y()) * side.forward_sign();
    (advanced / court::NET_Y).clamp(0.0, 1.0)
}

/// Lateral displacement of `contact` from the center, 0 (center) ..=1
/// (on or beyond a singles sideline).
pub fn lateral_factor(contact: Position) -> f64 {
    ((contact.x - court::CENTER_X).abs() / (court::SINGLES_WIDTH / 2.0)).clamp(0.0, 1.0)
}

fn target_y(side: PlayerSide, shorten: f64) -> f64 {
    let target = side.opponent();
    let shorten = shorten.clamp(0.0, court::NET_Y - NET_CLEARANCE);
    target.baseline_y() + target.forward_sign() * shorten
}

/// Auto endpoints for the player on `side` hitting from `contact`.
pub fn auto_shot_positions(player: Position, contact: Position, side: PlayerSide) -> AutoShots {
    let forward = forward_factor(player, side);
    let lateral = lateral_factor(contact);

    let (near_line, far_line) = if contact.x < court::CENTER_X {
        (court::LEFT_SIDELINE, court::RIGHT_SIDELINE)
    } else {
        (court::RIGHT_SIDELINE, court::LEFT_SIDELINE)
    };

    let dtl_blend = (DTL_FORWARD_SCALE * forward + DTL_LATERAL_SCALE * lateral).clamp(0.0, 1.0);
    let cross_blend =
        (CROSS_FORWARD_SCALE * forward + CROSS_LATERAL_SCALE * lateral).clamp(0.0, 1.0);

    AutoShots {
        down_the_line: Position::new(near_line, target_y(side, DTL_MAX_SHORTEN * dtl_blend)),
        cross_court: Position::new(far_line, target_y(side, CROSS_MAX_SHORTEN * cross_blend)),
    }
}
