//! Kinematic locomotion персонажа
//!
//! Архитектура:
//! - Rapier для коллизий (RigidBody::KinematicVelocityBased)
//! - Custom velocity integration (не используем rapier forces)
//! - Gravity + ground probe + движение от input
//!
//! Детерминизм: fixed timestep (60Hz), никакого wall-clock времени.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use crate::components::{MoveInput, MotionState, GRAVITY};
use crate::physics::raycast::{SurfaceQuery, COLLISION_MASK_GROUND};

/// Длина ground probe вниз от центра капсулы (cm)
///
/// Капсула: радиус 55, полувысота 96 → нижняя точка на 96 cm ниже центра,
/// небольшой запас на numerical errors.
pub const GROUND_PROBE_LENGTH: f32 = 100.0;

/// Скорость набора air-скорости при полном air control (доля max_walk_speed в секунду)
const AIR_ACCEL_RATE: f32 = 4.0;

/// Скорость торможения на земле при отпущенных осях (умножается на ground_friction)
const BRAKING_RATE: f32 = 8.0;

/// Система: ground detection через probe вниз
///
/// falling = луч вниз ничего не нашёл. При приземлении сбрасывает jump count
/// (wall-run завершение на приземлении — в wallrun системе).
pub fn detect_ground(
    surface: Res<SurfaceQuery>,
    mut query: Query<(Entity, &Transform, &mut MotionState)>,
) {
    for (entity, transform, mut motion) in query.iter_mut() {
        let origin = transform.translation;
        let end = origin + Vec3::NEG_Y * GROUND_PROBE_LENGTH;
        let grounded = surface
            .cast_ray(origin, end, COLLISION_MASK_GROUND, Some(entity))
            .is_some();

        let was_falling = motion.falling;
        motion.falling = !grounded;

        if was_falling && grounded {
            motion.jump_count = 0;
            if motion.velocity.y < 0.0 {
                motion.velocity.y = 0.0;
            }
        }
    }
}

/// Система: движение от input осей
///
/// На земле — прямое управление горизонтальной скоростью, торможение трением
/// при отпущенных осях. В воздухе — подруливание, масштабированное air_control
/// (1.0 во время wall-run даёт полное управление, 0.05 default почти ничего).
pub fn apply_move_input(
    time: Res<Time<Fixed>>,
    mut query: Query<(&Transform, &MoveInput, &mut MotionState)>,
) {
    let delta = time.delta_secs();

    for (transform, input, mut motion) in query.iter_mut() {
        let wish = input.wish_direction(transform);

        if !motion.falling {
            if wish != Vec3::ZERO {
                motion.velocity.x = wish.x * motion.max_walk_speed;
                motion.velocity.z = wish.z * motion.max_walk_speed;
            } else {
                // Торможение трением; friction == 0 (grapple) — скольжение
                let braking = (1.0 - motion.ground_friction * BRAKING_RATE * delta).max(0.0);
                motion.velocity.x *= braking;
                motion.velocity.z *= braking;
            }
        } else if wish != Vec3::ZERO {
            let accel = motion.max_walk_speed * motion.air_control * AIR_ACCEL_RATE * delta;
            motion.velocity.x += wish.x * accel;
            motion.velocity.z += wish.z * accel;
        }
    }
}

/// Система: гравитация
///
/// Применяется только в падении; gravity_scale модулируют контроллеры
/// (0.6 во время wall-run, 0.0 на grapple attach).
pub fn apply_gravity(time: Res<Time<Fixed>>, mut query: Query<&mut MotionState>) {
    let delta = time.delta_secs();

    for mut motion in query.iter_mut() {
        if motion.falling {
            let scale = motion.gravity_scale;
            motion.velocity.y += GRAVITY * scale * delta;
        }
    }
}

/// Система: интеграция velocity → position
///
/// Host rapier слой двигает kinematic тело сам по synced Velocity; в headless
/// режиме транслируем velocity в Transform здесь.
pub fn integrate_velocity(
    time: Res<Time<Fixed>>,
    mut query: Query<(&MotionState, &mut Transform)>,
) {
    let delta = time.delta_secs();

    for (motion, mut transform) in query.iter_mut() {
        transform.translation += motion.velocity * delta;
    }
}

/// Система: синхронизация MotionState.velocity → rapier Velocity
///
/// Host физика читает linvel для collision resolution kinematic тел.
pub fn sync_velocity_to_rapier(mut query: Query<(&MotionState, &mut Velocity)>) {
    for (motion, mut rapier_velocity) in query.iter_mut() {
        rapier_velocity.linvel = motion.velocity;
    }
}
