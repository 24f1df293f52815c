//! Player — спавн персонажа со всеми movement компонентами

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, RigidBody, Velocity};

use crate::components::{CameraRig, MotionState, MoveInput};
use crate::grapple::{GrappleConfig, GrappleCooldown, GrappleState};
use crate::logger;
use crate::wallrun::{WallRunConfig, WallRunState};

/// Полувысота цилиндрической части капсулы (cm): полная полувысота 96 - радиус 55
pub const CAPSULE_HALF_HEIGHT: f32 = 41.0;

/// Радиус капсулы (cm)
pub const CAPSULE_RADIUS: f32 = 55.0;

/// Маркер персонажа игрока
///
/// Require гарантирует полный набор movement компонентов: спавн с одним
/// маркером уже даёт рабочий контроллер с дефолтным тюнингом.
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component)]
#[require(
    MotionState,
    MoveInput,
    WallRunState,
    WallRunConfig,
    GrappleState,
    GrappleConfig,
    GrappleCooldown,
    CameraRig
)]
pub struct Player;

/// Спавн персонажа в заданной позиции
pub fn spawn_player(commands: &mut Commands, position: Vec3) -> Entity {
    let entity = commands
        .spawn((
            Player,
            Transform::from_translation(position),
            RigidBody::KinematicVelocityBased,
            Collider::capsule_y(CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS),
            Velocity::zero(),
        ))
        .id();
    logger::log_info(&format!("player spawned at {position:?}"));
    entity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_player_has_full_component_set() {
        let mut world = World::new();
        let mut queue = bevy::ecs::world::CommandQueue::default();
        let mut commands = Commands::new(&mut queue, &world);
        let entity = spawn_player(&mut commands, Vec3::new(0.0, 300.0, 0.0));
        queue.apply(&mut world);

        assert!(world.get::<MotionState>(entity).is_some());
        assert!(world.get::<MoveInput>(entity).is_some());
        assert!(world.get::<WallRunState>(entity).is_some());
        assert!(world.get::<GrappleState>(entity).is_some());
        assert!(world.get::<GrappleCooldown>(entity).is_some());
        assert!(world.get::<CameraRig>(entity).is_some());
        assert_eq!(
            world.get::<Transform>(entity).unwrap().translation.y,
            300.0
        );
    }
}
