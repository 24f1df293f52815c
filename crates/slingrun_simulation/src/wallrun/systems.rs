//! Wall-run системы: начало/поддержание/конец бега по стене + camera tilt
//!
//! Жизненный цикл:
//! - SurfaceContact (host collision callback) → begin_wall_run при выполнении
//!   предусловий (падение, forward ось, высота, пригодная поверхность)
//! - каждый тик: contact probe через SurfaceQuery; промах, отпущенные оси или
//!   смена стороны завершают бег безусловно — без retry, без частичного state
//! - приземление завершает бег

use bevy::prelude::*;

use crate::components::{CameraRig, MotionState, MoveInput, DEFAULT_AIR_CONTROL,
    DEFAULT_MAX_WALK_SPEED};
use crate::logger;
use crate::physics::{SurfaceContact, SurfaceQuery, COLLISION_MASK_WALL_PROBE};
use crate::wallrun::components::{
    run_direction_and_side, surface_is_runnable, WallRunConfig, WallRunState, WallSide,
};

/// Начало wall-run: модуляция гравитации, полный air control, сброс прыжков
///
/// Камера наклоняется tilt системой, пока state Running.
pub fn begin_wall_run(
    state: &mut WallRunState,
    motion: &mut MotionState,
    config: &WallRunConfig,
    side: WallSide,
    direction: Vec3,
) {
    motion.gravity_scale = config.gravity_scale;
    motion.air_control = 1.0;
    motion.jump_count = 0;
    motion.max_walk_speed = config.run_speed;
    *state = WallRunState::Running { side, direction };
    logger::log(&format!("wall run begin: side {side:?}, direction {direction:?}"));
}

/// Конец wall-run: восстановление дефолтов движения
///
/// Восстанавливает безусловно — частичного завершения не существует.
pub fn end_wall_run(state: &mut WallRunState, motion: &mut MotionState) {
    if !state.is_running() {
        return;
    }
    motion.gravity_scale = 1.0;
    motion.air_control = DEFAULT_AIR_CONTROL;
    motion.max_walk_speed = DEFAULT_MAX_WALK_SPEED;
    *state = WallRunState::Inactive;
    logger::log("wall run end");
}

/// Система: обработка контактов с поверхностями (host collision events)
///
/// Начинает wall-run при: пригодной поверхности, падении, forward оси > порога
/// и высоте выше min_wall_height. Контакт при невыполненных условиях во время
/// активного бега завершает его.
pub fn handle_surface_contacts(
    mut contacts: EventReader<SurfaceContact>,
    mut players: Query<(
        &Transform,
        &MoveInput,
        &WallRunConfig,
        &mut WallRunState,
        &mut MotionState,
    )>,
) {
    for contact in contacts.read() {
        let Ok((transform, input, config, mut state, mut motion)) =
            players.get_mut(contact.entity)
        else {
            continue;
        };

        if !surface_is_runnable(contact.impact_normal, motion.walkable_floor_angle) {
            continue;
        }
        if !motion.falling {
            continue;
        }

        let keys_down = input.forward > config.min_forward_axis;
        let high_enough = transform.translation.y > config.min_wall_height;

        if keys_down && high_enough {
            if !state.is_running() {
                let (side, direction) =
                    run_direction_and_side(*transform.right(), contact.impact_normal);
                begin_wall_run(&mut state, &mut motion, config, side, direction);
            }
        } else {
            end_wall_run(&mut state, &mut motion);
        }
    }
}

/// Система: поддержание wall-run (contact probe + velocity override)
///
/// Probe луч перпендикулярен направлению бега, в сторону текущей стены.
/// Попадание → пересчёт стороны/направления из свежей normal и override
/// скорости; промах → конец бега.
pub fn maintain_wall_run(
    surface: Res<SurfaceQuery>,
    mut players: Query<(
        Entity,
        &Transform,
        &MoveInput,
        &WallRunConfig,
        &mut WallRunState,
        &mut MotionState,
    )>,
) {
    for (entity, transform, input, config, mut state, mut motion) in players.iter_mut() {
        let WallRunState::Running { side, direction } = *state else {
            continue;
        };
        if !motion.falling {
            continue;
        }

        let origin = transform.translation;
        let toward_wall = direction.cross(side.run_up()) * config.contact_probe_length;

        match surface.cast_ray(origin, origin + toward_wall, COLLISION_MASK_WALL_PROBE, Some(entity))
        {
            Some(hit) => {
                update_wall_run(transform, input, config, &mut state, &mut motion, hit.normal);
            }
            None => end_wall_run(&mut state, &mut motion),
        }
    }
}

/// Один тик активного бега: пересчёт направления и velocity override
///
/// Горизонтальная скорость = direction * max speed; вертикальная демпфируется
/// тем же фактором, что и гравитация (floaty arc). Отпущенная forward ось или
/// смена стороны завершают бег.
fn update_wall_run(
    transform: &Transform,
    input: &MoveInput,
    config: &WallRunConfig,
    state: &mut WallRunState,
    motion: &mut MotionState,
    wall_normal: Vec3,
) {
    if input.forward <= config.min_forward_axis {
        end_wall_run(state, motion);
        return;
    }

    let WallRunState::Running { side: previous_side, .. } = *state else {
        return;
    };

    let (side, direction) = run_direction_and_side(*transform.right(), wall_normal);
    if side != previous_side {
        end_wall_run(state, motion);
        return;
    }
    *state = WallRunState::Running { side, direction };

    let max_speed = motion.max_walk_speed;
    motion.velocity = Vec3::new(
        direction.x * max_speed,
        motion.velocity.y * config.gravity_scale,
        direction.z * max_speed,
    );
}

/// Система: приземление завершает wall-run
pub fn end_wall_run_on_landing(
    mut players: Query<(&mut WallRunState, &mut MotionState)>,
) {
    for (mut state, mut motion) in players.iter_mut() {
        if state.is_running() && !motion.falling {
            end_wall_run(&mut state, &mut motion);
        }
    }
}

/// Один шаг roll'а камеры (градусы, mod-360)
///
/// Простой first-order ease, не физическая модель. Snap-зона у границы
/// 0°/360°: "около 330–360 или 0–30" — в ней камера докручивается к крену
/// ±30°, вне её наклон не растёт. tilt = None возвращает камеру к 0°.
pub(crate) fn step_camera_roll(roll: f32, tilt: Option<WallSide>, step: f32) -> f32 {
    let roll = roll.rem_euclid(360.0);
    match tilt {
        // Крен влево: уменьшаем roll через границу 0/360 до ~330 (-30°)
        Some(WallSide::Left) => {
            if roll > 330.0 || roll <= 30.0 {
                (roll - step).rem_euclid(360.0)
            } else {
                roll
            }
        }
        // Крен вправо: увеличиваем roll до 30°
        Some(WallSide::Right) => {
            if roll < 30.0 || roll >= 330.0 {
                (roll + step).rem_euclid(360.0)
            } else {
                roll
            }
        }
        // Возврат к нулю с ближайшей стороны
        None => {
            if roll >= 330.0 {
                (roll + step).rem_euclid(360.0)
            } else if roll > 0.0 && roll <= 30.0 {
                (roll - step).max(0.0)
            } else {
                roll
            }
        }
    }
}

/// Система: camera tilt анимация
///
/// Наклоняет камеру к банк-углу стороны стены пока бег активен, иначе
/// возвращает к 0°.
pub fn tilt_camera(
    mut players: Query<(&WallRunState, &WallRunConfig, &mut CameraRig)>,
) {
    for (state, config, mut rig) in players.iter_mut() {
        rig.roll = step_camera_roll(rig.roll, state.side(), config.camera_tilt_step);
    }
}
