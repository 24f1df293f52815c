//! Grapple системы: fire → attach → pull → detach жизненный цикл
//!
//! Порядок внутри тика (MovementSet::Grapple):
//! 1. tick_cooldown — монотонный накопитель (до обработки detach'ей)
//! 2. attach_on_impact — HookImpact → Attached + motion overrides
//! 3. apply_grapple_pull — сила притяжения + detach проверки (proximity, swing-past)
//! 4. cleanup_on_hook_destroyed — HookDestroyed → Ready + восстановление motion

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, RigidBody, Velocity};

use crate::components::{MotionState, DEFAULT_AIR_CONTROL};
use crate::grapple::components::{
    GrappleConfig, GrappleCooldown, GrappleState, HookDestroyed, HookImpact,
};
use crate::grapple::hook::{HookProjectile, HOOK_RADIUS};
use crate::logger;

/// Локальное смещение точки запуска hook'а (от центра актора, local frame)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchOffset {
    pub forward: f32,
    pub right: f32,
    pub up: f32,
}

impl LaunchOffset {
    /// Точка запуска в world space
    pub fn world_origin(&self, transform: &Transform) -> Vec3 {
        transform.translation
            + *transform.forward() * self.forward
            + *transform.right() * self.right
            + *transform.up() * self.up
    }
}

/// Выстрел grapple'а
///
/// No-op если уже in use. Спавнит hook в точке запуска со скоростью
/// normalize(target - origin) * speed, зажатой в [min_speed, max_speed]
/// (полёт равномерный, так что кламп на запуске ограничивает весь полёт),
/// и атомарно переводит state в Firing { hook } — повторный выстрел в том
/// же тике отклонится.
pub fn fire_grapple(
    commands: &mut Commands,
    owner: Entity,
    transform: &Transform,
    config: &GrappleConfig,
    state: &mut GrappleState,
    target: Vec3,
    local_offset: LaunchOffset,
) {
    if state.in_use() {
        return;
    }

    let origin = local_offset.world_origin(transform);
    let direction = (target - origin).normalize_or_zero();
    if direction == Vec3::ZERO {
        // Вырожденная цель (target в точке запуска) — выстрел отменён
        logger::log_warning("grapple fire aborted: degenerate target");
        return;
    }
    let velocity = (direction * config.speed).clamp_length(config.min_speed, config.max_speed);

    let hook = commands
        .spawn((
            HookProjectile {
                owner,
                velocity,
                start_location: origin,
                max_distance: config.max_distance,
                attached: false,
            },
            Transform::from_translation(origin),
            RigidBody::KinematicVelocityBased,
            Collider::ball(HOOK_RADIUS),
            Velocity {
                linvel: velocity,
                ..Default::default()
            },
        ))
        .id();

    *state = GrappleState::Firing { hook };
    logger::log_info(&format!("grapple fired toward {target:?}"));
}

/// Detach grapple'а
///
/// Уничтожает hook (HookDestroyed cleanup выполнит возврат в Ready и
/// восстановление motion) и сбрасывает cooldown накопитель.
/// Идемпотентен при отсутствии hook'а.
///
/// Despawn безусловный: hook, заспавненный командой в этом же тике, ещё
/// не виден query, но команды применяются по порядку — spawn раньше
/// despawn'а, сироты не остаётся.
pub fn detach_grapple(
    commands: &mut Commands,
    destroyed: &mut EventWriter<HookDestroyed>,
    owner: Entity,
    state: &GrappleState,
    cooldown: &mut GrappleCooldown,
) {
    if let Some(hook) = state.hook() {
        commands.entity(hook).despawn();
        destroyed.write(HookDestroyed { hook, owner });
    }
    cooldown.time_since_last_detach = 0.0;
}

/// Направление от персонажа на hook (unit; ZERO если hook'а нет)
fn to_hook(player_position: Vec3, hook_position: Vec3) -> Vec3 {
    (hook_position - player_position).normalize_or_zero()
}

/// То же, но в горизонтальной плоскости (для swing-past проверки)
fn to_hook_2d(player_position: Vec3, hook_position: Vec3) -> Vec3 {
    let direction = to_hook(player_position, hook_position);
    Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero()
}

/// Система: накопитель времени с последнего detach'а
pub fn tick_cooldown(time: Res<Time<Fixed>>, mut query: Query<&mut GrappleCooldown>) {
    let delta = time.delta_secs();
    for mut cooldown in query.iter_mut() {
        cooldown.time_since_last_detach += delta;
    }
}

/// Система: attach по HookImpact
///
/// Firing → Attached; grapple берёт владение motion state: трение и гравитация
/// в ноль, air control на swing значение, стартовый рывок к hook'у.
pub fn attach_on_impact(
    mut impacts: EventReader<HookImpact>,
    mut players: Query<(
        &Transform,
        &GrappleConfig,
        &mut GrappleState,
        &mut MotionState,
    )>,
) {
    for impact in impacts.read() {
        let Ok((transform, config, mut state, mut motion)) = players.get_mut(impact.owner)
        else {
            continue;
        };

        // Stale impact от уже отцепленного hook'а игнорируется
        if state.hook() != Some(impact.hook) {
            continue;
        }

        motion.ground_friction = 0.0;
        motion.gravity_scale = 0.0;
        motion.air_control = config.swing_air_control;

        let direction = to_hook(transform.translation, impact.point);
        motion.velocity = direction * config.pull_initial_speed;

        let initial_dir_2d = to_hook_2d(transform.translation, impact.point);
        *state = GrappleState::Attached {
            hook: impact.hook,
            initial_dir_2d,
        };
        logger::log_info("grapple attached");
    }
}

/// Система: притяжение + detach проверки (только в Attached)
///
/// Сила притяжения аддитивна (накапливается с текущей скоростью), не
/// velocity set. Detach условия проверяются строго по порядку:
/// 1. proximity — дистанция до hook'а < disconnect_distance
/// 2. swing-past — горизонтальное направление на hook развернулось
///    (dot с initial направлением < 0): персонаж пролетел мимо якоря
pub fn apply_grapple_pull(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut destroyed: EventWriter<HookDestroyed>,
    hook_transforms: Query<&Transform, With<HookProjectile>>,
    mut players: Query<(
        Entity,
        &Transform,
        &GrappleConfig,
        &GrappleState,
        &mut GrappleCooldown,
        &mut MotionState,
    ), Without<HookProjectile>>,
) {
    let delta = time.delta_secs();

    for (entity, transform, config, state, mut cooldown, mut motion) in players.iter_mut() {
        let GrappleState::Attached { hook, initial_dir_2d } = *state else {
            continue;
        };
        let Ok(hook_transform) = hook_transforms.get(hook) else {
            continue;
        };
        let hook_position = hook_transform.translation;
        let player_position = transform.translation;

        // Аддитивная сила: ускорение = force / mass
        let pull_direction = to_hook(player_position, hook_position);
        let mass = motion.mass;
        motion.velocity += pull_direction * (config.pull_force / mass) * delta;

        if player_position.distance(hook_position) < config.disconnect_distance {
            detach_grapple(&mut commands, &mut destroyed, entity, state, &mut cooldown);
            logger::log("grapple detach: proximity");
            continue;
        }

        if initial_dir_2d.dot(to_hook_2d(player_position, hook_position)) < 0.0 {
            detach_grapple(&mut commands, &mut destroyed, entity, state, &mut cooldown);
            logger::log("grapple detach: swung past anchor");
        }
    }
}

/// Система: cleanup по HookDestroyed
///
/// Возврат в Ready и восстановление motion дефолтов (трение/гравитация 1.0,
/// air control default). Выполняется и для range expiry (Firing → Ready),
/// и для detach'а (Attached → Ready).
pub fn cleanup_on_hook_destroyed(
    mut events: EventReader<HookDestroyed>,
    mut players: Query<(&mut GrappleState, &mut MotionState)>,
) {
    for event in events.read() {
        let Ok((mut state, mut motion)) = players.get_mut(event.owner) else {
            continue;
        };
        if state.hook() != Some(event.hook) {
            continue;
        }

        *state = GrappleState::Ready;
        motion.ground_friction = 1.0;
        motion.gravity_scale = 1.0;
        motion.air_control = DEFAULT_AIR_CONTROL;
        logger::log("grapple ready");
    }
}
