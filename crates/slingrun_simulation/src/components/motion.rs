//! MotionState — состояние движения персонажа (character motion sink)
//!
//! Архитектура:
//! - Единственный владелец velocity/gravity/friction персонажа
//! - Wall-run и grapple контроллеры переопределяют поля по precedence правилу
//!   (не более одного контроллера мутирует state за тик, см. MovementSet)
//! - Host физика читает velocity через rapier Velocity sync
//!
//! Единицы: сантиметры, секунды, градусы. Ось вверх: +Y.

use bevy::prelude::*;

/// Макс. скорость ходьбы по умолчанию (cm/s)
pub const DEFAULT_MAX_WALK_SPEED: f32 = 800.0;

/// Air control по умолчанию (доля управляемости в падении)
pub const DEFAULT_AIR_CONTROL: f32 = 0.05;

/// Гравитация (cm/s², до gravity_scale)
pub const GRAVITY: f32 = -980.0;

/// Состояние движения персонажа
///
/// Инвариант: gravity_scale/ground_friction переопределяет не более одного
/// контроллера одновременно (wall-run и grapple-attach взаимоисключающие).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct MotionState {
    /// Текущая скорость (cm/s, world space)
    pub velocity: Vec3,
    /// Множитель гравитации (1.0 = нормальная, 0.6 во время wall-run, 0.0 на grapple)
    pub gravity_scale: f32,
    /// Трение о землю (1.0 = нормальное, 0.0 на grapple — скольжение)
    pub ground_friction: f32,
    /// Управляемость в воздухе (0.05 default, 1.0 во время wall-run, 0.2 на swing)
    pub air_control: f32,
    /// Макс. скорость ходьбы (cm/s); wall-run временно поднимает до run_speed
    pub max_walk_speed: f32,
    /// Порог "walkable floor" угла (градусы) — используется wall-run проверкой поверхности
    pub walkable_floor_angle: f32,
    /// В падении ли персонаж (обновляется ground detection каждый тик)
    pub falling: bool,
    /// Сколько прыжков уже сделано с момента последнего приземления
    pub jump_count: u32,
    /// Макс. число прыжков (2 = double jump)
    pub max_jumps: u32,
    /// Вертикальная скорость прыжка (cm/s)
    pub jump_z_velocity: f32,
    /// Масса персонажа (kg) — для конвертации pull force в ускорение
    pub mass: f32,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            gravity_scale: 1.0,
            ground_friction: 1.0,
            air_control: DEFAULT_AIR_CONTROL,
            max_walk_speed: DEFAULT_MAX_WALK_SPEED,
            walkable_floor_angle: 45.0,
            falling: false,
            jump_count: 0,
            max_jumps: 2,      // double jump
            jump_z_velocity: 420.0,
            mass: 100.0,
        }
    }
}

impl MotionState {
    /// Ограничивает горизонтальную скорость до max_walk_speed (только в воздухе)
    ///
    /// Горизонтальные компоненты масштабируются равномерно, вертикальная не
    /// трогается. На земле скорость и так ограничена locomotion системой.
    pub fn clamp_horizontal_velocity(&mut self) {
        if !self.falling {
            return;
        }
        let horizontal = Vec2::new(self.velocity.x, self.velocity.z);
        let speed_ratio = horizontal.length() / self.max_walk_speed;
        if speed_ratio > 1.0 {
            let scaled = horizontal / speed_ratio;
            self.velocity.x = scaled.x;
            self.velocity.z = scaled.y;
        }
    }

    /// Горизонтальная составляющая скорости (XZ)
    pub fn horizontal_speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_rescales_to_exactly_max_speed() {
        let mut motion = MotionState {
            velocity: Vec3::new(3000.0, -500.0, 4000.0),
            falling: true,
            ..default()
        };
        motion.clamp_horizontal_velocity();

        let horizontal = Vec2::new(motion.velocity.x, motion.velocity.z);
        assert!((horizontal.length() - motion.max_walk_speed).abs() < 1e-2);
        // Вертикальная компонента не тронута
        assert_eq!(motion.velocity.y, -500.0);
    }

    #[test]
    fn test_clamp_keeps_slow_velocity_untouched() {
        let mut motion = MotionState {
            velocity: Vec3::new(100.0, -50.0, 100.0),
            falling: true,
            ..default()
        };
        let before = motion.velocity;
        motion.clamp_horizontal_velocity();
        assert_eq!(motion.velocity, before);
    }

    #[test]
    fn test_clamp_noop_on_ground() {
        let mut motion = MotionState {
            velocity: Vec3::new(3000.0, 0.0, 0.0),
            falling: false,
            ..default()
        };
        motion.clamp_horizontal_velocity();
        assert_eq!(motion.velocity.x, 3000.0);
    }

    #[test]
    fn test_clamp_preserves_direction() {
        let mut motion = MotionState {
            velocity: Vec3::new(2000.0, 0.0, 1000.0),
            falling: true,
            ..default()
        };
        let dir_before = Vec2::new(2000.0, 1000.0).normalize();
        motion.clamp_horizontal_velocity();
        let dir_after = Vec2::new(motion.velocity.x, motion.velocity.z).normalize();
        assert!((dir_before - dir_after).length() < 1e-5);
    }
}
