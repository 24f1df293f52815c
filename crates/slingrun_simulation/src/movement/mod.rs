//! Movement coordinator — верхний слой над wall-run и grapple контроллерами
//!
//! Отвечает за:
//! - telemetry снапшот для host UI (cooldown display, скорость, флаги)
//! - clamp горизонтальной скорости в воздухе
//! - диспетчеризацию intent событий (прыжок, grapple)
//! - precedence: grapple attach принудительно завершает wall-run

use bevy::prelude::*;

pub mod systems;


pub use systems::{
    find_launch_velocity, grapple_launch_offset, MovementTelemetry, GRAPPLE_AIM_RAY_LENGTH,
};

use crate::components::{JumpIntent, UseGrappleIntent};
use crate::MovementSet;

/// Coordinator Plugin
///
/// Telemetry → Clamp → Intents → Precedence, до доменных контроллеров
/// (wall-run, grapple) в том же тике.
pub struct CoordinatorPlugin;

impl Plugin for CoordinatorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTelemetry>();
        app.add_event::<JumpIntent>();
        app.add_event::<UseGrappleIntent>();

        app.add_systems(
            FixedUpdate,
            systems::refresh_telemetry.in_set(MovementSet::Telemetry),
        );
        app.add_systems(
            FixedUpdate,
            systems::clamp_airborne_velocity.in_set(MovementSet::Clamp),
        );
        app.add_systems(
            FixedUpdate,
            (systems::handle_jump, systems::handle_use_grapple)
                .chain()
                .in_set(MovementSet::Intents),
        );
        app.add_systems(
            FixedUpdate,
            systems::resolve_precedence.in_set(MovementSet::Precedence),
        );
    }
}
