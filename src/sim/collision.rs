//! Collision detection for the actor against the floor and pillars
//!
//! Everything is axis-aligned: the actor is a square and each obstacle is two
//! rectangles sharing a horizontal span. Edges that merely touch do not count
//! as overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacles::Obstacle;
use super::physics::Actor;

/// Axis-aligned box, y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(x + width, y + height))
    }

    /// Open-interval overlap on the x axis
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x && self.min.x < other.max.x
    }

    /// Open-interval overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.max.y > other.min.y && self.min.y < other.max.y
    }
}

/// What the actor ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hit {
    /// Bottom edge went below the playfield
    Floor,
    /// Actor top above the gap of obstacle `id`
    TopPillar { id: u32 },
    /// Actor bottom below the gap of obstacle `id`
    BottomPillar { id: u32 },
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Clear,
    Collided(Hit),
}

impl Verdict {
    #[inline]
    pub fn is_collided(&self) -> bool {
        matches!(self, Verdict::Collided(_))
    }
}

/// Test the actor against the floor, then every obstacle in stream order.
///
/// The first hit wins. Whether any hit exists does not depend on the order.
pub fn check_collision<'a>(
    actor: &Actor,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    obstacle_width: f32,
    playfield_height: f32,
) -> Verdict {
    if actor.bottom() > playfield_height {
        return Verdict::Collided(Hit::Floor);
    }

    let bounds = actor.bounds();
    for obstacle in obstacles {
        if let Some(hit) = actor_obstacle_hit(&bounds, obstacle, obstacle_width, playfield_height)
        {
            return Verdict::Collided(hit);
        }
    }

    Verdict::Clear
}

/// Check one obstacle. The top pillar is tested first.
///
/// The actor never leaves `[0, playfield_height]` here (ceiling clamp, floor
/// checked first), so overlapping a pillar box is the same as sharing the
/// obstacle's span while being outside the gap.
fn actor_obstacle_hit(
    actor: &Aabb,
    obstacle: &Obstacle,
    obstacle_width: f32,
    playfield_height: f32,
) -> Option<Hit> {
    let top = obstacle.top_pillar(obstacle_width);
    if !actor.overlaps_x(&top) {
        return None;
    }

    if actor.overlaps(&top) {
        return Some(Hit::TopPillar { id: obstacle.id });
    }
    if actor.overlaps(&obstacle.bottom_pillar(obstacle_width, playfield_height)) {
        return Some(Hit::BottomPillar { id: obstacle.id });
    }
    None
}
