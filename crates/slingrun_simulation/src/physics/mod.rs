//! Physics module — locomotion интеграция и raycast сервис
//!
//! Kinematic контроллер, гравитация, ground detection, sync в rapier.
//! Геометрические запросы — через SurfaceQuery backend (host физика).

use bevy::prelude::*;

pub mod locomotion;
pub mod raycast;

// Re-export основных типов
pub use locomotion::GROUND_PROBE_LENGTH;
pub use raycast::{
    NoHitBackend, RayHit, RaycastBackend, SurfaceQuery, COLLISION_LAYER_ACTORS,
    COLLISION_LAYER_ENVIRONMENT, COLLISION_LAYER_PROJECTILES, COLLISION_MASK_GRAPPLE,
    COLLISION_MASK_GROUND, COLLISION_MASK_WALL_PROBE,
};

use crate::MovementSet;

/// Event: контакт капсулы персонажа с поверхностью (host collision callback)
///
/// Host физика (или тестовый harness) доставляет контакты с impact normal;
/// wall-run контроллер решает начинать/заканчивать wall-run.
#[derive(Event, Debug, Clone)]
pub struct SurfaceContact {
    /// Персонаж получивший контакт
    pub entity: Entity,
    /// Точка контакта (world space)
    pub point: Vec3,
    /// Impact normal поверхности (unit)
    pub impact_normal: Vec3,
}

/// Locomotion Plugin
///
/// Порядок выполнения (внутри MovementSet::Locomotion):
/// 1. detect_ground — falling флаг + сброс jump count на приземлении
/// 2. apply_move_input — движение от осей (земля/воздух)
/// 3. apply_gravity — гравитация с учётом gravity_scale
/// 4. integrate_velocity — velocity → Transform
/// 5. sync_velocity_to_rapier — velocity → rapier linvel
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SurfaceQuery>();
        app.add_event::<SurfaceContact>();

        app.add_systems(
            FixedUpdate,
            (
                locomotion::detect_ground,
                locomotion::apply_move_input,
                locomotion::apply_gravity,
                locomotion::integrate_velocity,
                locomotion::sync_velocity_to_rapier,
            )
                .chain()
                .in_set(MovementSet::Locomotion),
        );
    }
}
