//! Grapple domain — крюк-кошка (fire → flight → attach → pull → detach)
//!
//! Содержит:
//! - GrappleState (Ready | Firing { hook } | Attached { hook, initial_dir_2d })
//! - GrappleCooldown (накопитель времени с последнего detach'а)
//! - GrappleConfig (тюнинг: speed, pull force, disconnect distance)
//! - HookProjectile (снаряд: прямолинейный полёт, range expiry)
//! - события HookImpact / HookDestroyed / GrappleDenied

use bevy::prelude::*;

pub mod components;
pub mod hook;
pub mod systems;


// Re-export основных типов
pub use components::{
    GrappleConfig, GrappleCooldown, GrappleDenied, GrappleState, HookDestroyed, HookImpact,
};
pub use hook::{HookProjectile, HOOK_RADIUS};
pub use systems::{detach_grapple, fire_grapple, LaunchOffset};

use crate::MovementSet;

/// Grapple Plugin
///
/// Полёт hook'ов — в MovementSet::Hooks (до grapple state переходов, чтобы
/// HookImpact/HookDestroyed потреблялись в том же тике).
///
/// Порядок выполнения (внутри MovementSet::Grapple):
/// 1. tick_cooldown — накопитель времени (до detach проверок)
/// 2. attach_on_impact — Firing → Attached + motion overrides
/// 3. apply_grapple_pull — сила притяжения + proximity/swing-past detach
/// 4. cleanup_on_hook_destroyed — возврат в Ready + восстановление motion
pub struct GrapplePlugin;

impl Plugin for GrapplePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HookImpact>()
            .add_event::<HookDestroyed>()
            .add_event::<GrappleDenied>();

        app.add_systems(
            FixedUpdate,
            hook::integrate_hooks.in_set(MovementSet::Hooks),
        );

        app.add_systems(
            FixedUpdate,
            (
                systems::tick_cooldown,
                systems::attach_on_impact,
                systems::apply_grapple_pull,
                systems::cleanup_on_hook_destroyed,
            )
                .chain()
                .in_set(MovementSet::Grapple),
        );
    }
}
