//! Draw list generation for 2D primitives
//!
//! Turns a simulation snapshot into back-to-front shapes. Painting is left to
//! a backend (see `canvas` on the web), so this part stays testable natively.

use glam::Vec2;

use crate::sim::{ActorView, ObstacleView, Snapshot};

/// Colors for game elements
pub mod colors {
    pub const SKY_TOP: [f32; 4] = [0.529, 0.808, 0.922, 1.0]; // #87CEEB
    pub const SKY_BOTTOM: [f32; 4] = [1.0, 0.898, 0.925, 1.0]; // #FFE5EC
    pub const CLOUD: [f32; 4] = [1.0, 1.0, 1.0, 0.6];
    pub const PILLAR: [f32; 4] = [0.133, 0.545, 0.133, 1.0]; // #228B22
    pub const PILLAR_CAP: [f32; 4] = [0.196, 0.804, 0.196, 1.0]; // #32CD32
    pub const ACTOR: [f32; 4] = [0.0, 0.537, 0.482, 1.0]; // #00897B
    pub const ACTOR_OUTLINE: [f32; 4] = [0.0, 0.302, 0.251, 1.0]; // #004D40
}

/// Pillar cap height
pub const CAP_HEIGHT: f32 = 30.0;
/// How far a cap sticks out on each side of its pillar
pub const CAP_OVERHANG: f32 = 5.0;
/// Actor outline width
pub const ACTOR_BORDER: f32 = 4.0;

const CLOUD_COUNT: usize = 5;
const CLOUD_DRIFT: f32 = 0.2;
const CLOUD_SPACING: f32 = 200.0;

/// One primitive in paint order
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Vertical gradient covering the whole playfield
    VerticalGradient {
        size: Vec2,
        top: [f32; 4],
        bottom: [f32; 4],
    },
    Rect {
        min: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    /// Filled disc rotated about its center, with an outline
    Actor {
        center: Vec2,
        radius: f32,
        /// Radians, clockwise on screen
        rotation: f32,
        fill: [f32; 4],
        outline: [f32; 4],
        border: f32,
    },
}

/// Build the full frame: background, clouds, pillars, actor
pub fn build_scene(snapshot: &Snapshot) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(1 + CLOUD_COUNT * 3 + snapshot.obstacles.len() * 4 + 1);
    let size = Vec2::new(snapshot.playfield.width, snapshot.playfield.height);

    shapes.push(Shape::VerticalGradient {
        size,
        top: colors::SKY_TOP,
        bottom: colors::SKY_BOTTOM,
    });
    shapes.extend(clouds(snapshot.time_ticks, snapshot.playfield.width));

    for obstacle in &snapshot.obstacles {
        shapes.extend(pillars(obstacle, snapshot.playfield.height));
    }

    shapes.push(actor(&snapshot.actor));
    shapes
}

/// Puffy clouds drifting right with elapsed ticks, wrapping around the width
pub fn clouds(time_ticks: u64, width: f32) -> Vec<Shape> {
    let wrap = width + 100.0;
    let drift = time_ticks as f32 * CLOUD_DRIFT;

    let mut shapes = Vec::with_capacity(CLOUD_COUNT * 3);
    for i in 0..CLOUD_COUNT {
        let x = (drift + i as f32 * CLOUD_SPACING).rem_euclid(wrap) - 50.0;
        let y = 50.0 + i as f32 * 40.0;

        for (dx, radius) in [(0.0, 30.0), (25.0, 35.0), (50.0, 30.0)] {
            shapes.push(Shape::Circle {
                center: Vec2::new(x + dx, y),
                radius,
                color: colors::CLOUD,
            });
        }
    }
    shapes
}

/// Top pillar, its cap, bottom pillar, its cap
pub fn pillars(obstacle: &ObstacleView, playfield_height: f32) -> [Shape; 4] {
    let x = obstacle.x;
    let w = obstacle.width;
    let cap_x = x - CAP_OVERHANG;
    let cap_w = w + CAP_OVERHANG * 2.0;

    [
        Shape::Rect {
            min: Vec2::new(x, 0.0),
            size: Vec2::new(w, obstacle.gap_top),
            color: colors::PILLAR,
        },
        Shape::Rect {
            min: Vec2::new(cap_x, obstacle.gap_top - CAP_HEIGHT),
            size: Vec2::new(cap_w, CAP_HEIGHT),
            color: colors::PILLAR_CAP,
        },
        Shape::Rect {
            min: Vec2::new(x, obstacle.gap_bottom),
            size: Vec2::new(w, (playfield_height - obstacle.gap_bottom).max(0.0)),
            color: colors::PILLAR,
        },
        Shape::Rect {
            min: Vec2::new(cap_x, obstacle.gap_bottom),
            size: Vec2::new(cap_w, CAP_HEIGHT),
            color: colors::PILLAR_CAP,
        },
    ]
}

pub fn actor(actor: &ActorView) -> Shape {
    let half = actor.size / 2.0;
    Shape::Actor {
        center: Vec2::new(actor.x + half, actor.y + half),
        radius: half,
        rotation: actor.tilt.to_radians(),
        fill: colors::ACTOR,
        outline: colors::ACTOR_OUTLINE,
        border: ACTOR_BORDER,
    }
}

/// CSS color string for a linear RGBA color
pub fn css(color: [f32; 4]) -> String {
    let [r, g, b, a] = color;
    format!(
        "rgba({}, {}, {}, {})",
        (r.clamp(0.0, 1.0) * 255.0).round() as u8,
        (g.clamp(0.0, 1.0) * 255.0).round() as u8,
        (b.clamp(0.0, 1.0) * 255.0).round() as u8,
        a.clamp(0.0, 1.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, Playfield};
    use crate::sim::{GamePhase, GameState, Obstacle};

    fn snapshot_with_obstacle() -> Snapshot {
        let mut state =
            GameState::new(GameConfig::default(), Playfield::new(480.0, 640.0), 3).unwrap();
        state.begin();
        state.obstacles.push(Obstacle::new(1, 200.0, 120.0, 300.0));
        state.actor.tilt = 90.0;
        state.snapshot()
    }

    #[test]
    fn test_scene_order() {
        let snapshot = snapshot_with_obstacle();
        assert_eq!(snapshot.phase, GamePhase::Playing);

        let shapes = build_scene(&snapshot);
        // Background + 5 clouds of 3 circles + 4 pillar parts + actor
        assert_eq!(shapes.len(), 1 + 15 + 4 + 1);
        assert!(matches!(shapes[0], Shape::VerticalGradient { .. }));
        assert!(matches!(shapes.last(), Some(Shape::Actor { .. })));
    }

    #[test]
    fn test_pillar_geometry() {
        let snapshot = snapshot_with_obstacle();
        let [top, top_cap, bottom, bottom_cap] = pillars(&snapshot.obstacles[0], 640.0);

        assert_eq!(
            top,
            Shape::Rect {
                min: Vec2::new(200.0, 0.0),
                size: Vec2::new(70.0, 120.0),
                color: colors::PILLAR,
            }
        );
        assert_eq!(
            top_cap,
            Shape::Rect {
                min: Vec2::new(195.0, 90.0),
                size: Vec2::new(80.0, 30.0),
                color: colors::PILLAR_CAP,
            }
        );
        assert_eq!(
            bottom,
            Shape::Rect {
                min: Vec2::new(200.0, 420.0),
                size: Vec2::new(70.0, 220.0),
                color: colors::PILLAR,
            }
        );
        assert_eq!(
            bottom_cap,
            Shape::Rect {
                min: Vec2::new(195.0, 420.0),
                size: Vec2::new(80.0, 30.0),
                color: colors::PILLAR_CAP,
            }
        );
    }

    #[test]
    fn test_actor_rotation() {
        let snapshot = snapshot_with_obstacle();
        match actor(&snapshot.actor) {
            Shape::Actor {
                center,
                radius,
                rotation,
                fill,
                outline,
                ..
            } => {
                assert_eq!(center, Vec2::new(130.0, 350.0));
                assert_ne!(fill, outline, "outline must stand out from the fill");
                assert_eq!(radius, 30.0);
                assert!((rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
            }
            other => panic!("expected actor shape, got {:?}", other),
        }
    }

    #[test]
    fn test_clouds_wrap() {
        let start = clouds(0, 480.0);
        assert_eq!(start.len(), 15);
        assert!(matches!(start[0], Shape::Circle { center, .. } if center == Vec2::new(-50.0, 50.0)));

        // After drifting a full wrap (580 units at 0.2 per tick) the sky repeats
        let wrapped = clouds(2900, 480.0);
        for (a, b) in start.iter().zip(&wrapped) {
            if let (Shape::Circle { center: ca, .. }, Shape::Circle { center: cb, .. }) = (a, b) {
                assert!((*ca - *cb).length() < 1e-2);
            }
        }
    }

    #[test]
    fn test_css() {
        assert_eq!(css(colors::CLOUD), "rgba(255, 255, 255, 0.6)");
        assert_eq!(css([0.0, 0.0, 0.0, 1.0]), "rgba(0, 0, 0, 1)");
    }
}
