use macroquad::prelude::*;

use crate::agent::Agent;
use crate::config::{self, Config};
use crate::error::SimError;
use crate::obstacle::ObstaclePair;

/// Where the target sits before the first obstacle has been seen.
pub const INITIAL_TARGET: Vec2 = Vec2::new(-10.0, -10.0);

/// First pair whose trailing edge is still ahead of `agent_x`.
///
/// Pairs are kept in spawn order, so this is also the one with the smallest x.
pub fn nearest_upcoming(pairs: &[ObstaclePair], agent_x: f32) -> Option<&ObstaclePair> {
    pairs.iter().find(|pair| pair.top.right() > agent_x)
}

/// Center of the nearest upcoming gap.
pub fn target_point(pairs: &[ObstaclePair], config: &Config) -> Result<Vec2, SimError> {
    let pair = nearest_upcoming(pairs, config.agent_x).ok_or(SimError::NoUpcomingObstacle {
        agent_x: config.agent_x,
        pairs: pairs.len(),
    })?;
    Ok(vec2(
        pair.x() + pair.top.width / 2.0,
        pair.gap_top() + config.gap_size / 2.0,
    ))
}

/// Signed offsets from the agent to the target, scaled by the playfield size.
pub fn sensory_inputs(agent: &Agent, target: Vec2, config: &Config) -> [f32; config::NETWORK_INPUTS] {
    [
        (agent.pos.y - target.y) / config.height,
        (target.x - agent.pos.x) / config.width,
    ]
}
