//! Тесты детерминизма движения
//!
//! Фиксированный timestep + отсутствие wall-clock времени: одинаковая
//! последовательность ввода обязана давать побайтово идентичные траектории.

use bevy::prelude::*;
use slingrun_simulation::physics::{RayHit, RaycastBackend};
use slingrun_simulation::*;

/// Одна вертикальная стена при x=100 (normal -X)
struct SingleWall;

impl RaycastBackend for SingleWall {
    fn cast_ray(
        &self,
        origin: Vec3,
        end: Vec3,
        _mask: u32,
        _exclude: Option<Entity>,
    ) -> Option<RayHit> {
        let segment = end - origin;
        if segment.x <= 1e-6 || origin.x >= 100.0 {
            return None;
        }
        let t = (100.0 - origin.x) / segment.x;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }
        Some(RayHit {
            entity: None,
            point: origin + segment * t,
            normal: Vec3::NEG_X,
            distance: segment.length() * t,
        })
    }
}

/// Сценарий: wall-run + прыжок + grapple, возвращает snapshot траектории
fn run_scenario(tick_count: usize) -> Vec<u8> {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);
    app.insert_resource(SurfaceQuery::new(Box::new(SingleWall)));

    let player = spawn_player(&mut app.world_mut().commands(), Vec3::new(0.0, 300.0, 0.0));
    app.world_mut().flush();
    app.world_mut().get_mut::<MoveInput>(player).unwrap().forward = 1.0;

    let mut snapshot = Vec::new();
    for tick in 0..tick_count {
        // Скриптованный ввод: контакт со стеной, прыжок, grapple
        match tick {
            5 => {
                app.world_mut().send_event(SurfaceContact {
                    entity: player,
                    point: Vec3::new(100.0, 300.0, 0.0),
                    impact_normal: Vec3::NEG_X,
                });
            }
            40 => {
                app.world_mut().send_event(JumpIntent { entity: player });
            }
            60 => {
                app.world_mut().send_event(UseGrappleIntent { entity: player });
            }
            _ => {}
        }

        let timestep = app.world().resource::<Time<Fixed>>().timestep();
        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(timestep);
        app.world_mut().run_schedule(FixedUpdate);

        let transform = app.world().get::<Transform>(player).unwrap();
        snapshot.extend_from_slice(format!("{:?}", transform.translation).as_bytes());
        let motion = app.world().get::<MotionState>(player).unwrap();
        snapshot.extend_from_slice(format!("{:?}", motion.velocity).as_bytes());
    }
    snapshot
}

#[test]
fn test_identical_input_gives_identical_trajectory() {
    const TICK_COUNT: usize = 300;

    let snapshot1 = run_scenario(TICK_COUNT);
    let snapshot2 = run_scenario(TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Одинаковый ввод дал разные траектории!"
    );
}

#[test]
fn test_trajectory_stable_across_multiple_runs() {
    const TICK_COUNT: usize = 200;

    let snapshots: Vec<_> = (0..5).map(|_| run_scenario(TICK_COUNT)).collect();
    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}
