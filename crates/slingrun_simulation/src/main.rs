//! Headless симуляция SLINGRUN
//!
//! Запускает Bevy App без рендера: спавнит персонажа, гонит фиксированные
//! тики и печатает telemetry. Для smoke-тестирования механик движения.

use bevy::prelude::*;

use slingrun_simulation::{
    create_headless_app, spawn_player, MovementTelemetry, MoveInput, SimulationPlugin,
};

fn main() {
    println!("Starting SLINGRUN headless simulation");

    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);

    // Персонаж над землёй, бежит вперёд
    let player = spawn_player(&mut app.world_mut().commands(), Vec3::new(0.0, 300.0, 0.0));
    app.world_mut().flush();
    if let Some(mut input) = app.world_mut().get_mut::<MoveInput>(player) {
        input.forward = 1.0;
    }

    // 1000 фиксированных тиков (~16.7 секунд симуляции)
    for tick in 0..1000u32 {
        let timestep = app.world().resource::<Time<Fixed>>().timestep();
        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(timestep);
        app.world_mut().run_schedule(FixedUpdate);

        if tick % 100 == 0 {
            let telemetry = app.world().resource::<MovementTelemetry>();
            println!(
                "Tick {}: speed {:.0} cm/s, falling {}",
                tick, telemetry.horizontal_speed, telemetry.falling
            );
        }
    }

    println!("Simulation complete!");
}
