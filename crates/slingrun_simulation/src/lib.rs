//! SLINGRUN Simulation Core
//!
//! ECS-симуляция first-person движения на Bevy 0.16: wall-run, grapple hook,
//! kinematic locomotion. Fixed timestep 60Hz.
//!
//! Архитектура:
//! - Симуляция владеет movement state и правилами (этот crate)
//! - Host слой (рендер, ввод, физика) доставляет события (SurfaceContact,
//!   intents) и геометрические запросы через SurfaceQuery backend

use bevy::prelude::*;

// Публичные модули
pub mod components;
pub mod grapple;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod player;
pub mod wallrun;

// Re-export базовых типов для удобства
pub use components::{
    CameraRig, JumpIntent, MotionState, MoveInput, UseGrappleIntent, DEFAULT_AIR_CONTROL,
    DEFAULT_MAX_WALK_SPEED, GRAVITY,
};
pub use grapple::{
    GrappleConfig, GrappleCooldown, GrappleDenied, GrapplePlugin, GrappleState, HookDestroyed,
    HookImpact, HookProjectile,
};
pub use movement::{CoordinatorPlugin, MovementTelemetry};
pub use physics::{
    LocomotionPlugin, RayHit, RaycastBackend, SurfaceContact, SurfaceQuery,
};
pub use player::{spawn_player, Player};
pub use wallrun::{WallRunConfig, WallRunPlugin, WallRunState, WallSide};

/// Порядок выполнения movement систем внутри FixedUpdate
///
/// Один тик: telemetry снапшот → clamp → intents (прыжок/grapple) →
/// precedence → wall-run → полёт hook'ов → grapple state machine →
/// locomotion интеграция → camera tilt.
///
/// Инвариант precedence: grapple attach завершает wall-run до того, как
/// wall-run системы успеют мутировать motion в том же тике.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementSet {
    Telemetry,
    Clamp,
    Intents,
    Precedence,
    WallRun,
    Hooks,
    Grapple,
    Locomotion,
    Camera,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .configure_sets(
                FixedUpdate,
                (
                    MovementSet::Telemetry,
                    MovementSet::Clamp,
                    MovementSet::Intents,
                    MovementSet::Precedence,
                    MovementSet::WallRun,
                    MovementSet::Hooks,
                    MovementSet::Grapple,
                    MovementSet::Locomotion,
                    MovementSet::Camera,
                )
                    .chain(),
            )
            .add_plugins((
                CoordinatorPlugin,
                wallrun::WallRunPlugin,
                GrapplePlugin,
                LocomotionPlugin,
            ));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app() -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}
