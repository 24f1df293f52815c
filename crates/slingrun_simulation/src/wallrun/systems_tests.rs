//! Tests for wall-run session lifecycle and camera tilt stepping.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::components::{WallRunConfig, WallRunState, WallSide};
    use super::super::systems::{begin_wall_run, end_wall_run, step_camera_roll};
    use crate::components::{MotionState, DEFAULT_AIR_CONTROL, DEFAULT_MAX_WALK_SPEED};

    #[test]
    fn test_begin_wall_run_overrides_motion() {
        let mut state = WallRunState::default();
        let mut motion = MotionState {
            falling: true,
            jump_count: 1,
            ..default()
        };
        let config = WallRunConfig::default();

        begin_wall_run(&mut state, &mut motion, &config, WallSide::Left, Vec3::NEG_Z);

        assert!(state.is_running());
        assert_eq!(motion.gravity_scale, config.gravity_scale);
        assert_eq!(motion.air_control, 1.0);
        assert_eq!(motion.jump_count, 0);
        assert_eq!(motion.max_walk_speed, config.run_speed);
    }

    #[test]
    fn test_end_wall_run_restores_defaults() {
        let mut state = WallRunState::Running {
            side: WallSide::Right,
            direction: Vec3::NEG_Z,
        };
        let mut motion = MotionState {
            gravity_scale: 0.6,
            air_control: 1.0,
            max_walk_speed: 1100.0,
            ..default()
        };

        end_wall_run(&mut state, &mut motion);

        assert!(!state.is_running());
        assert_eq!(motion.gravity_scale, 1.0);
        assert_eq!(motion.air_control, DEFAULT_AIR_CONTROL);
        assert_eq!(motion.max_walk_speed, DEFAULT_MAX_WALK_SPEED);
    }

    #[test]
    fn test_end_wall_run_idempotent_when_inactive() {
        let mut state = WallRunState::Inactive;
        let mut motion = MotionState {
            gravity_scale: 0.3, // чужое значение (grapple) — не трогаем
            ..default()
        };
        end_wall_run(&mut state, &mut motion);
        assert_eq!(motion.gravity_scale, 0.3);
    }

    #[test]
    fn test_roll_banks_left_through_wrap() {
        // Крен влево идёт через границу 0/360
        let mut roll = 0.0;
        roll = step_camera_roll(roll, Some(WallSide::Left), 1.0);
        assert!((roll - 359.0).abs() < 1e-4);

        // Докручивается до 330 и останавливается
        for _ in 0..60 {
            roll = step_camera_roll(roll, Some(WallSide::Left), 1.0);
        }
        assert!((roll - 330.0).abs() < 1e-4);
    }

    #[test]
    fn test_roll_banks_right_to_thirty() {
        let mut roll = 0.0;
        for _ in 0..60 {
            roll = step_camera_roll(roll, Some(WallSide::Right), 1.0);
        }
        assert!((roll - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_roll_returns_to_zero_from_left_bank() {
        let mut roll = 330.0;
        for _ in 0..60 {
            roll = step_camera_roll(roll, None, 1.0);
        }
        assert!(roll.abs() < 1e-4 || (roll - 360.0).abs() < 1e-4);
    }

    #[test]
    fn test_roll_returns_to_zero_from_right_bank() {
        let mut roll = 30.0;
        for _ in 0..60 {
            roll = step_camera_roll(roll, None, 1.0);
        }
        assert!(roll.abs() < 1e-4);
    }

    #[test]
    fn test_roll_outside_snap_zone_untouched() {
        // Вне snap-зоны (например камера перевёрнута host'ом) tilt не трогает roll
        assert_eq!(step_camera_roll(180.0, Some(WallSide::Left), 1.0), 180.0);
        assert_eq!(step_camera_roll(180.0, Some(WallSide::Right), 1.0), 180.0);
        assert_eq!(step_camera_roll(180.0, None, 1.0), 180.0);
    }
}
