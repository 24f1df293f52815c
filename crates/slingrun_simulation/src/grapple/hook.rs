//! Hook projectile — снаряд grapple'а
//!
//! Прямолинейный полёт с постоянной скоростью, нулевая гравитация.
//! Самоуничтожается когда пройденная дистанция превышает max range.
//! Коллизия — segment cast по пройденному за тик отрезку через SurfaceQuery
//! (host физика), попадание → HookImpact, уничтожение → HookDestroyed.

use bevy::prelude::*;

use crate::grapple::components::{HookDestroyed, HookImpact};
use crate::logger;
use crate::physics::{SurfaceQuery, COLLISION_MASK_GRAPPLE};

/// Радиус collision сферы hook'а (cm)
pub const HOOK_RADIUS: f32 = 25.0;

/// Hook projectile (живёт от выстрела до detach'а/range expiry)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct HookProjectile {
    /// Кто выстрелил (владелец grapple state machine)
    pub owner: Entity,
    /// Скорость полёта (постоянная, cm/s)
    pub velocity: Vec3,
    /// Точка спавна — от неё считается пройденная дистанция
    pub start_location: Vec3,
    /// Макс. дальность до самоуничтожения (cm)
    pub max_distance: f32,
    /// Зацепился ли hook (полёт остановлен)
    pub attached: bool,
}

/// Система: интеграция полёта hook'ов
///
/// Для каждого летящего hook'а: сдвиг по velocity, коллизия по пройденному
/// отрезку, range expiry. Попавший hook прибивается к точке impact'а и
/// перестаёт двигаться (якорь притяжения).
pub fn integrate_hooks(
    time: Res<Time<Fixed>>,
    surface: Res<SurfaceQuery>,
    mut commands: Commands,
    mut hooks: Query<(Entity, &mut Transform, &mut HookProjectile)>,
    mut impacts: EventWriter<HookImpact>,
    mut destroyed: EventWriter<HookDestroyed>,
) {
    let delta = time.delta_secs();

    for (entity, mut transform, mut hook) in hooks.iter_mut() {
        if hook.attached {
            continue;
        }

        let from = transform.translation;
        let to = from + hook.velocity * delta;

        if let Some(hit) = surface.cast_ray(from, to, COLLISION_MASK_GRAPPLE, Some(hook.owner)) {
            transform.translation = hit.point;
            hook.attached = true;
            impacts.write(HookImpact {
                hook: entity,
                owner: hook.owner,
                point: hit.point,
                normal: hit.normal,
            });
            logger::log(&format!("hook impact at {:?}", hit.point));
            continue;
        }

        transform.translation = to;

        if (transform.translation - hook.start_location).length() >= hook.max_distance {
            commands.entity(entity).despawn();
            destroyed.write(HookDestroyed {
                hook: entity,
                owner: hook.owner,
            });
            logger::log("hook reached max range, self-destructing");
        }
    }
}
