//! Obstacle stream: paired pillars spawned on a tick cadence
//!
//! Obstacles all move at the same speed and spawn at the same x, so the deque
//! front is always the leftmost obstacle. Retirement only ever pops the front.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::config::{GameConfig, Playfield};
use crate::consts::GAP_MARGIN;

/// A top and bottom pillar with a passable gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Bottom of the top pillar
    gap_top: f32,
    /// Top of the bottom pillar
    gap_bottom: f32,
    scored: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, gap_top: f32, gap_size: f32) -> Self {
        Self {
            id,
            x,
            gap_top,
            gap_bottom: gap_top + gap_size,
            scored: false,
        }
    }

    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_top
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_bottom
    }

    #[inline]
    pub fn is_scored(&self) -> bool {
        self.scored
    }

    #[inline]
    pub fn right(&self, width: f32) -> f32 {
        self.x + width
    }

    /// The top pillar, from the ceiling down to the gap
    pub fn top_pillar(&self, width: f32) -> Aabb {
        Aabb::from_rect(self.x, 0.0, width, self.gap_top)
    }

    /// The bottom pillar, from the gap down to the floor
    pub fn bottom_pillar(&self, width: f32, playfield_height: f32) -> Aabb {
        Aabb::from_rect(
            self.x,
            self.gap_bottom,
            width,
            (playfield_height - self.gap_bottom).max(0.0),
        )
    }
}

/// Ordered obstacles, oldest (leftmost) first
#[derive(Debug, Clone)]
pub struct ObstacleStream {
    obstacles: VecDeque<Obstacle>,
    next_id: u32,
}

impl Default for ObstacleStream {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleStream {
    pub fn new() -> Self {
        Self {
            obstacles: VecDeque::new(),
            next_id: 1,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn front(&self) -> Option<&Obstacle> {
        self.obstacles.front()
    }

    /// Drop all obstacles (session reset). Ids keep counting.
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Append an already built obstacle at the right end
    pub(crate) fn push(&mut self, obstacle: Obstacle) {
        self.next_id = self.next_id.max(obstacle.id + 1);
        self.obstacles.push_back(obstacle);
    }

    /// Spawn a new obstacle at the right edge if `tick` lands on the cadence.
    ///
    /// The gap top is uniform in `[GAP_MARGIN, height - gap - GAP_MARGIN]`.
    /// The caller guarantees that range is non-empty (see
    /// [`GameConfig::validate_for`]).
    pub fn spawn_if_due<R: Rng>(
        &mut self,
        tick: u64,
        config: &GameConfig,
        playfield: Playfield,
        rng: &mut R,
    ) -> Option<&Obstacle> {
        if !tick.is_multiple_of(config.spawn_cadence()) {
            return None;
        }

        let min_top = GAP_MARGIN;
        let max_top = playfield.height - config.gap_size - GAP_MARGIN;
        let gap_top = rng.random_range(min_top..=max_top);

        let id = self.next_id;
        self.next_id += 1;
        self.obstacles
            .push_back(Obstacle::new(id, playfield.width, gap_top, config.gap_size));

        log::debug!("Spawned obstacle {} at tick {} (gap top {:.1})", id, tick, gap_top);
        self.obstacles.back()
    }

    /// Move every obstacle left by `speed`
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Remove obstacles whose right edge is past `-margin`.
    ///
    /// Returns how many were removed.
    pub fn retire_offscreen(&mut self, width: f32, margin: f32) -> usize {
        let mut retired = 0;
        while self
            .obstacles
            .front()
            .is_some_and(|o| o.right(width) < -margin)
        {
            self.obstacles.pop_front();
            retired += 1;
        }
        retired
    }

    /// Mark obstacles whose right edge is now strictly left of `actor_x`.
    ///
    /// Each obstacle is reported at most once; returns the newly passed ids.
    pub fn detect_passes(&mut self, actor_x: f32, width: f32) -> Vec<u32> {
        let mut passed = Vec::new();
        for obstacle in &mut self.obstacles {
            if !obstacle.scored && obstacle.right(width) < actor_x {
                obstacle.scored = true;
                passed.push(obstacle.id);
            }
        }
        passed
    }
}
