//! Axis-aligned bounding-box collision testing
//!
//! Overlap uses strict inequality on every axis: boxes that merely touch at
//! a shared face do not collide.

use glam::Vec3;

use super::state::Player;
use super::track::TrackEntity;
use crate::consts::*;

/// An axis-aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Build a box from its center and full extents
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict interval overlap on all three axes
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }
}

/// The player's current hitbox
///
/// Centered on the lateral position at z = 0, sitting on top of `height`,
/// with the vertical extent scaled by `scale_y` so a roll shrinks the box
/// the same tick it starts.
pub fn player_hitbox(player: &Player) -> Aabb {
    let size = Vec3::new(PLAYER_SIZE, PLAYER_SIZE * player.scale_y, PLAYER_SIZE);
    let center = Vec3::new(player.lateral, player.height + size.y / 2.0, 0.0);
    Aabb::from_center_size(center, size)
}

/// A track entity's hitbox from its position and fixed geometry
pub fn entity_hitbox(entity: &TrackEntity) -> Aabb {
    Aabb::from_center_size(entity.center(), entity.kind.size())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::VerticalState;
    use crate::sim::track::{EntityKind, ObstacleTier};

    fn entity_at(kind: EntityKind, lane: usize, z: f32) -> TrackEntity {
        TrackEntity {
            id: 0,
            kind,
            lane,
            z,
        }
    }

    #[test]
    fn identical_boxes_intersect() {
        let a = Aabb::from_center_size(Vec3::new(1.0, 2.0, 3.0), Vec3::ONE);
        assert!(a.intersects(&a));
    }

    #[test]
    fn disjoint_on_any_axis_means_no_intersection() {
        let a = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);
        for axis in 0..3 {
            let mut offset = Vec3::ZERO;
            offset[axis] = 1.5;
            let b = Aabb::from_center_size(offset, Vec3::ONE);
            assert!(!a.intersects(&b));
            assert!(!b.intersects(&a));
        }
    }

    #[test]
    fn touching_faces_do_not_collide() {
        let a = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_center_size(Vec3::new(1.0, 0.0, 0.0), Vec3::ONE);
        assert!(!a.intersects(&b));

        let c = Aabb::from_center_size(Vec3::new(0.999, 0.0, 0.0), Vec3::ONE);
        assert!(a.intersects(&c));
    }

    #[test]
    fn standing_player_hits_every_obstacle_tier_in_lane() {
        let player = Player::default();
        let player_box = player_hitbox(&player);

        for tier in [ObstacleTier::Ground, ObstacleTier::Air, ObstacleTier::Elevated] {
            let entity = entity_at(EntityKind::Obstacle(tier), CENTER_LANE, 0.0);
            assert!(
                player_box.intersects(&entity_hitbox(&entity)),
                "standing player should hit {tier:?}"
            );
        }
    }

    #[test]
    fn rolling_player_slips_under_raised_obstacles() {
        let mut player = Player::default();
        assert!(player.roll());
        let rolled_box = player_hitbox(&player);

        for tier in [ObstacleTier::Air, ObstacleTier::Elevated] {
            let entity = entity_at(EntityKind::Obstacle(tier), CENTER_LANE, 0.0);
            assert!(
                !rolled_box.intersects(&entity_hitbox(&entity)),
                "rolling player should clear {tier:?}"
            );
        }

        // Ground obstacles still connect
        let ground = entity_at(EntityKind::Obstacle(ObstacleTier::Ground), CENTER_LANE, 0.0);
        assert!(rolled_box.intersects(&entity_hitbox(&ground)));
    }

    #[test]
    fn airborne_player_clears_ground_obstacles() {
        let mut player = Player::default();
        player.height = 1.6;
        player.vertical = VerticalState::Airborne { velocity: 0.0 };
        let jump_box = player_hitbox(&player);

        let ground = entity_at(EntityKind::Obstacle(ObstacleTier::Ground), CENTER_LANE, 0.0);
        assert!(!jump_box.intersects(&entity_hitbox(&ground)));
    }

    #[test]
    fn adjacent_lanes_do_not_collide() {
        let player = Player::default();
        let player_box = player_hitbox(&player);

        let entity = entity_at(EntityKind::Obstacle(ObstacleTier::Ground), 0, 0.0);
        assert!(!player_box.intersects(&entity_hitbox(&entity)));
    }

    #[test]
    fn coin_overlaps_standing_player() {
        let player = Player::default();
        let coin = entity_at(EntityKind::Coin, CENTER_LANE, 0.0);
        assert!(player_hitbox(&player).intersects(&entity_hitbox(&coin)));
    }
}
