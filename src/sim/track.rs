//! Track entities: the obstacles and coins scrolling toward the camera

use glam::Vec3;

use crate::consts::*;

/// Obstacle height tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleTier {
    /// Sits on the track; jump over it
    Ground,
    /// Floats at torso height with a gap beneath; roll under it
    Air,
    /// Raised full-size block; roll under it
    Elevated,
}

/// What a track entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Obstacle(ObstacleTier),
    Coin,
}

impl EntityKind {
    /// Height of the entity's center above the track
    pub fn center_height(&self) -> f32 {
        match self {
            EntityKind::Obstacle(ObstacleTier::Ground) => 0.5,
            EntityKind::Obstacle(ObstacleTier::Air) => 1.25,
            EntityKind::Obstacle(ObstacleTier::Elevated) => 1.5,
            EntityKind::Coin => 0.75,
        }
    }

    /// Full extents of the entity's bounding box
    pub fn size(&self) -> Vec3 {
        match self {
            EntityKind::Obstacle(ObstacleTier::Air) => Vec3::new(1.0, 0.5, 1.0),
            EntityKind::Obstacle(_) => Vec3::ONE,
            EntityKind::Coin => Vec3::new(0.6, 0.6, 0.2),
        }
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self, EntityKind::Obstacle(_))
    }
}

/// A single obstacle or coin on the track
#[derive(Debug, Clone)]
pub struct TrackEntity {
    pub id: u32,
    pub kind: EntityKind,
    /// Lane index
    pub lane: usize,
    /// Longitudinal position; negative is away from the camera
    pub z: f32,
}

impl TrackEntity {
    /// World-space center of the entity
    pub fn center(&self) -> Vec3 {
        Vec3::new(LANE_POSITIONS[self.lane], self.kind.center_height(), self.z)
    }
}

/// Exclusive owner of every live entity on the track
#[derive(Debug, Clone, Default)]
pub struct TrackEntities {
    entities: Vec<TrackEntity>,
    next_id: u32,
}

impl TrackEntities {
    /// Add an entity at the spawn plane, returning its id
    pub fn spawn(&mut self, kind: EntityKind, lane: usize) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(TrackEntity {
            id,
            kind,
            lane,
            z: SPAWN_Z,
        });
        id
    }

    /// Scroll every live entity toward the camera
    pub fn advance(&mut self, delta: f32) {
        for entity in &mut self.entities {
            entity.z += delta;
        }
    }

    /// Discard entities that scrolled past the camera boundary
    ///
    /// No collision side effects: a reaped entity simply escaped.
    pub fn reap(&mut self, boundary: f32) {
        self.entities.retain(|e| e.z <= boundary);
    }

    /// Remove a specific entity (coin collection)
    pub fn remove(&mut self, id: u32) {
        self.entities.retain(|e| e.id != id);
    }

    /// Live entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &TrackEntity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_places_entities_at_the_spawn_plane() {
        let mut entities = TrackEntities::default();
        entities.spawn(EntityKind::Coin, 0);
        entities.spawn(EntityKind::Obstacle(ObstacleTier::Ground), 2);

        assert_eq!(entities.len(), 2);
        assert!(entities.iter().all(|e| e.z == SPAWN_Z));
    }

    #[test]
    fn advance_moves_every_entity() {
        let mut entities = TrackEntities::default();
        entities.spawn(EntityKind::Coin, 0);
        entities.spawn(EntityKind::Coin, 1);

        entities.advance(2.5);
        assert!(entities.iter().all(|e| e.z == SPAWN_Z + 2.5));
    }

    #[test]
    fn reap_drops_entities_past_the_boundary() {
        let mut entities = TrackEntities::default();
        entities.spawn(EntityKind::Coin, 0);
        entities.spawn(EntityKind::Obstacle(ObstacleTier::Air), 1);

        // Push one entity past the boundary, leave the other short of it
        entities.advance(TRACK_LENGTH + REAP_Z - 1.0);
        entities.spawn(EntityKind::Coin, 2);
        entities.advance(2.0);

        entities.reap(REAP_Z);
        assert_eq!(entities.len(), 1);
        assert!(entities.iter().all(|e| e.z <= REAP_Z));
    }

    #[test]
    fn remove_targets_a_single_id() {
        let mut entities = TrackEntities::default();
        let a = entities.spawn(EntityKind::Coin, 0);
        let b = entities.spawn(EntityKind::Coin, 1);

        entities.remove(a);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities.iter().next().map(|e| e.id), Some(b));
    }

    #[test]
    fn ids_stay_unique_after_clear() {
        let mut entities = TrackEntities::default();
        let a = entities.spawn(EntityKind::Coin, 0);
        entities.clear();
        let b = entities.spawn(EntityKind::Coin, 0);
        assert_ne!(a, b);
    }
}
