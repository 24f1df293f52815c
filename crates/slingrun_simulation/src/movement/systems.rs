//! Coordinator системы: telemetry, clamp, intents, precedence
//!
//! Порядок внутри тика (см. MovementSet):
//! 1. refresh_telemetry — снапшот состояния для host UI/логов
//! 2. clamp_airborne_velocity — горизонтальный speed clamp в воздухе
//! 3. handle_jump / handle_use_grapple — обработка intent событий
//! 4. resolve_precedence — grapple attach принудительно завершает wall-run

use bevy::prelude::*;

use crate::components::{CameraRig, JumpIntent, MotionState, MoveInput, UseGrappleIntent};
use crate::grapple::{
    detach_grapple, fire_grapple, GrappleConfig, GrappleCooldown, GrappleDenied, GrappleState,
    HookDestroyed, LaunchOffset,
};
use crate::logger;
use crate::physics::{SurfaceQuery, COLLISION_MASK_GRAPPLE};
use crate::wallrun::{end_wall_run, WallRunState, WallSide};

/// Дальность camera ray для прицеливания grapple'а (cm)
pub const GRAPPLE_AIM_RAY_LENGTH: f32 = 10_000.0;

/// Интервал между telemetry логами (тики; 60 = раз в секунду)
const TELEMETRY_LOG_INTERVAL: u64 = 60;

/// Снапшот состояния движения для host UI и периодических логов
///
/// Обновляется первым в тике — host читает значения предыдущего тика,
/// до того как контроллеры начнут мутировать state.
#[derive(Resource, Debug, Clone, Default)]
pub struct MovementTelemetry {
    pub tick: u64,
    /// Секунд cooldown'а до следующего выстрела grapple'а (0.0 = готов)
    pub grapple_cooldown_remaining: f32,
    pub wall_running: bool,
    pub grapple_attached: bool,
    pub horizontal_speed: f32,
    pub falling: bool,
}

/// Локальное смещение точки запуска hook'а в зависимости от стороны стены
///
/// Во время wall-run рука с крюком прижата к корпусу и смещена от стены,
/// иначе точка запуска перед грудью.
pub fn grapple_launch_offset(side: Option<WallSide>) -> LaunchOffset {
    match side {
        Some(WallSide::Left) => LaunchOffset { forward: -30.0, right: -30.0, up: 40.0 },
        Some(WallSide::Right) => LaunchOffset { forward: -30.0, right: 30.0, up: 40.0 },
        None => LaunchOffset { forward: 50.0, right: 0.0, up: 40.0 },
    }
}

/// Launch вектор прыжка (НЕ нормализован)
///
/// - wall-run: direction × launch_up(side) — от стены
/// - падение: right/forward оси актора, взвешенные текущим вводом
/// - всегда добавляется вертикальный unit (прыжок вверх даже с нулевым вводом)
///
/// Итог масштабируется jump_z_velocity без нормализации: диагональный прыжок
/// в воздухе быстрее осевого. Это сознательно сохранённое поведение.
pub fn find_launch_velocity(
    transform: &Transform,
    input: &MoveInput,
    motion: &MotionState,
    wall_run: &WallRunState,
) -> Vec3 {
    let mut launch = match *wall_run {
        WallRunState::Running { side, direction } => direction.cross(side.launch_up()),
        WallRunState::Inactive if motion.falling => {
            *transform.right() * input.right + *transform.forward() * input.forward
        }
        WallRunState::Inactive => Vec3::ZERO,
    };
    launch += Vec3::Y;
    launch * motion.jump_z_velocity
}

/// Система: снапшот telemetry + периодический лог
pub fn refresh_telemetry(
    mut telemetry: ResMut<MovementTelemetry>,
    players: Query<(
        &MotionState,
        &WallRunState,
        &GrappleState,
        &GrappleConfig,
        &GrappleCooldown,
    )>,
) {
    telemetry.tick += 1;

    let Some((motion, wall_run, grapple, config, cooldown)) = players.iter().next() else {
        return;
    };
    telemetry.grapple_cooldown_remaining =
        (config.cooldown - cooldown.time_since_last_detach).max(0.0);
    telemetry.wall_running = wall_run.is_running();
    telemetry.grapple_attached = grapple.is_attached();
    telemetry.horizontal_speed = motion.horizontal_speed();
    telemetry.falling = motion.falling;

    if telemetry.tick % TELEMETRY_LOG_INTERVAL == 0 {
        logger::log(&format!(
            "tick {}: speed {:.0}, falling {}, wall_run {}, grapple_attached {}",
            telemetry.tick,
            telemetry.horizontal_speed,
            telemetry.falling,
            telemetry.wall_running,
            telemetry.grapple_attached,
        ));
    }
}

/// Система: clamp горизонтальной скорости в воздухе
pub fn clamp_airborne_velocity(mut players: Query<&mut MotionState>) {
    for mut motion in players.iter_mut() {
        motion.clamp_horizontal_velocity();
    }
}

/// Система: precedence — grapple attach принудительно завершает wall-run
///
/// Инвариант: не более одного контроллера владеет gravity/friction за тик.
/// end_wall_run восстанавливает motion дефолты, поэтому grapple overrides
/// переустанавливаются следом — владение остаётся за grapple'ом.
pub fn resolve_precedence(
    mut players: Query<(
        &GrappleState,
        &GrappleConfig,
        &mut WallRunState,
        &mut MotionState,
    )>,
) {
    for (grapple, config, mut wall_run, mut motion) in players.iter_mut() {
        if grapple.is_attached() && wall_run.is_running() {
            end_wall_run(&mut wall_run, &mut motion);
            motion.ground_friction = 0.0;
            motion.gravity_scale = 0.0;
            motion.air_control = config.swing_air_control;
            logger::log("wall run ended: grapple takes precedence");
        }
    }
}

/// Система: обработка JumpIntent
///
/// Launch вектор аддитивен по всем трём осям (накапливается с текущей
/// скоростью). Прыжок во время wall-run всегда завершает бег.
pub fn handle_jump(
    mut intents: EventReader<JumpIntent>,
    mut players: Query<(
        &Transform,
        &MoveInput,
        &mut WallRunState,
        &mut MotionState,
    )>,
) {
    for intent in intents.read() {
        let Ok((transform, input, mut wall_run, mut motion)) = players.get_mut(intent.entity)
        else {
            continue;
        };
        if motion.jump_count >= motion.max_jumps {
            continue;
        }

        let launch = find_launch_velocity(transform, input, &motion, &wall_run);
        motion.velocity += launch;
        motion.jump_count += 1;
        motion.falling = true;

        if wall_run.is_running() {
            end_wall_run(&mut wall_run, &mut motion);
        }
        logger::log(&format!("jump {} of {}", motion.jump_count, motion.max_jumps));
    }
}

/// Система: обработка UseGrappleIntent
///
/// - grapple in use → detach
/// - cooldown прошёл → camera ray (10000 cm) и выстрел в hit point
///   (или в дальний конец луча при промахе)
/// - иначе → GrappleDenied с остатком cooldown'а
pub fn handle_use_grapple(
    mut intents: EventReader<UseGrappleIntent>,
    surface: Res<SurfaceQuery>,
    mut commands: Commands,
    mut destroyed: EventWriter<HookDestroyed>,
    mut denied: EventWriter<GrappleDenied>,
    mut players: Query<(
        &Transform,
        &CameraRig,
        &WallRunState,
        &GrappleConfig,
        &mut GrappleState,
        &mut GrappleCooldown,
    )>,
) {
    for intent in intents.read() {
        let Ok((transform, rig, wall_run, config, mut state, mut cooldown)) =
            players.get_mut(intent.entity)
        else {
            continue;
        };

        if state.in_use() {
            detach_grapple(
                &mut commands,
                &mut destroyed,
                intent.entity,
                &state,
                &mut cooldown,
            );
            continue;
        }

        if cooldown.time_since_last_detach <= config.cooldown {
            let remaining = config.cooldown - cooldown.time_since_last_detach;
            denied.write(GrappleDenied {
                entity: intent.entity,
                remaining,
            });
            logger::log_warning(&format!("grapple on cooldown: {remaining:.1}s remaining"));
            continue;
        }

        let origin = rig.eye_position(transform);
        let far_end = origin + rig.forward * GRAPPLE_AIM_RAY_LENGTH;
        let target = surface
            .cast_ray(origin, far_end, COLLISION_MASK_GRAPPLE, Some(intent.entity))
            .map(|hit| hit.point)
            .unwrap_or(far_end);

        fire_grapple(
            &mut commands,
            intent.entity,
            transform,
            config,
            &mut state,
            target,
            grapple_launch_offset(wall_run.side()),
        );
    }
}
