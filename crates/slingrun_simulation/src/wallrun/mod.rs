//! Wall-run domain — бег по вертикальным поверхностям
//!
//! Содержит:
//! - WallRunState (Inactive | Running { side, direction })
//! - WallRunConfig (тюнинг: gravity scale, run speed, probe length)
//! - surface_is_runnable / run_direction_and_side (чистая геометрия)
//! - системы begin/maintain/end + camera tilt

use bevy::prelude::*;

pub mod components;
pub mod systems;

#[cfg(test)]
mod systems_tests;

// Re-export основных типов
pub use components::{
    run_direction_and_side, surface_is_runnable, WallRunConfig, WallRunState, WallSide,
};
pub use systems::{begin_wall_run, end_wall_run};

use crate::MovementSet;

/// Wall-Run Plugin
///
/// Порядок выполнения (внутри MovementSet::WallRun):
/// 1. handle_surface_contacts — begin/end решения по host контактам
/// 2. end_wall_run_on_landing — приземление завершает бег
/// 3. maintain_wall_run — contact probe + velocity override
///
/// Camera tilt — отдельно в MovementSet::Camera (после всех контроллеров).
pub struct WallRunPlugin;

impl Plugin for WallRunPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                systems::handle_surface_contacts,
                systems::end_wall_run_on_landing,
                systems::maintain_wall_run,
            )
                .chain()
                .in_set(MovementSet::WallRun),
        );

        app.add_systems(FixedUpdate, systems::tilt_camera.in_set(MovementSet::Camera));
    }
}
