//! Wall-run components: состояние сессии, сторона стены, тюнинг
//!
//! Геометрия (Y-up, правосторонняя система):
//! - run direction = wall_normal × run_up(side), горизонтальный unit вектор
//! - probe к стене = direction × run_up(side)
//! - launch от стены (прыжок) = direction × launch_up(side)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// С какой стороны СТЕНЫ находится персонаж
///
/// Right = dot(right вектора актора, wall normal) > 0 в горизонтальной
/// плоскости (персонаж справа от стены, стена слева от него).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// Up-вектор для вычисления run direction (и probe к стене)
    ///
    /// Знак подобран так, чтобы wall_normal × up всегда указывал вдоль
    /// стены в сторону бега, независимо от стороны.
    pub fn run_up(&self) -> Vec3 {
        match self {
            WallSide::Left => Vec3::Y,
            WallSide::Right => Vec3::NEG_Y,
        }
    }

    /// Up-вектор для launch direction прыжка (противоположный run_up —
    /// cross даёт вектор ОТ стены)
    pub fn launch_up(&self) -> Vec3 {
        match self {
            WallSide::Left => Vec3::NEG_Y,
            WallSide::Right => Vec3::Y,
        }
    }
}

/// Состояние wall-run контроллера
///
/// Сессия существует только в Running: сторона + направление бега.
/// direction — горизонтальный unit вектор, пересчитывается каждый тик из
/// актуальной wall normal.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub enum WallRunState {
    #[default]
    Inactive,
    Running {
        side: WallSide,
        direction: Vec3,
    },
}

impl WallRunState {
    pub fn is_running(&self) -> bool {
        matches!(self, WallRunState::Running { .. })
    }

    /// Сторона стены активной сессии (None если не бежим)
    pub fn side(&self) -> Option<WallSide> {
        match self {
            WallRunState::Running { side, .. } => Some(*side),
            WallRunState::Inactive => None,
        }
    }
}

/// Параметры wall-run
#[derive(Component, Debug, Clone, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct WallRunConfig {
    /// Множитель гравитации во время бега по стене (floaty arc)
    pub gravity_scale: f32,
    /// Скорость бега по стене (cm/s, временный max_walk_speed)
    pub run_speed: f32,
    /// Мин. высота над землёй для начала wall-run (cm)
    pub min_wall_height: f32,
    /// Длина contact probe луча к стене (cm)
    pub contact_probe_length: f32,
    /// Мин. значение forward оси для начала/продолжения бега
    pub min_forward_axis: f32,
    /// Шаг наклона камеры (градусы за тик)
    pub camera_tilt_step: f32,
}

impl Default for WallRunConfig {
    fn default() -> Self {
        Self {
            gravity_scale: 0.6,
            run_speed: 1100.0,
            min_wall_height: 200.0,
            contact_probe_length: 200.0,
            min_forward_axis: 0.1,
            camera_tilt_step: 1.0,
        }
    }
}

/// Решает, пригодна ли поверхность для wall-run по её impact normal
///
/// Крутые "потолочные" поверхности (normal.y < -0.05) отбрасываются сразу.
/// Дальше угол между normal и её горизонтальной проекцией сравнивается с
/// walkable floor angle порогом: меньше порога — бежать можно. Пол даёт
/// угол 90° и отбрасывается; вертикальная стена даёт 0°.
pub fn surface_is_runnable(impact_normal: Vec3, walkable_floor_angle: f32) -> bool {
    if impact_normal.y < -0.05 {
        return false;
    }
    let horizontal = Vec3::new(impact_normal.x, 0.0, impact_normal.z);
    let Some(horizontal) = horizontal.try_normalize() else {
        // Чисто вертикальная normal (пол/потолок)
        return false;
    };
    let slope = impact_normal.dot(horizontal).clamp(-1.0, 1.0);
    let wall_angle = slope.acos().to_degrees();
    wall_angle < walkable_floor_angle
}

/// Сторона стены и направление бега из wall normal и right вектора актора
///
/// Сторона — знак горизонтального dot(actor_right, wall_normal).
/// Направление — wall_normal × run_up(side), нормализованное: горизонтальный
/// unit вектор вдоль стены.
pub fn run_direction_and_side(actor_right: Vec3, wall_normal: Vec3) -> (WallSide, Vec3) {
    let right_2d = Vec2::new(actor_right.x, actor_right.z);
    let normal_2d = Vec2::new(wall_normal.x, wall_normal.z);

    let side = if right_2d.dot(normal_2d) > 0.0 {
        WallSide::Right
    } else {
        WallSide::Left
    };

    let direction = wall_normal.cross(side.run_up()).normalize_or_zero();
    (side, direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downward_facing_surfaces_never_runnable() {
        // Потолочные normal'ы (y < -0.05) всегда отбрасываются
        let normals = [
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.5, -0.5, 0.0).normalize(),
            Vec3::new(0.0, -0.06, 1.0).normalize(),
        ];
        for normal in normals {
            assert!(!surface_is_runnable(normal, 45.0), "normal {normal:?}");
        }
    }

    #[test]
    fn test_vertical_wall_is_runnable() {
        assert!(surface_is_runnable(Vec3::X, 45.0));
        assert!(surface_is_runnable(Vec3::NEG_Z, 45.0));
        assert!(surface_is_runnable(Vec3::new(0.7, 0.0, 0.7).normalize(), 45.0));
    }

    #[test]
    fn test_floor_is_not_runnable() {
        // Пол: горизонтальная проекция нулевая → угол 90° → больше порога
        assert!(!surface_is_runnable(Vec3::Y, 45.0));
    }

    #[test]
    fn test_slightly_tilted_wall_respects_floor_angle() {
        // 30° от вертикали — меньше порога 45°, бежать можно
        let tilted = Vec3::new(30f32.to_radians().cos(), 30f32.to_radians().sin(), 0.0);
        assert!(surface_is_runnable(tilted, 45.0));
        // но не при пороге 20°
        assert!(!surface_is_runnable(tilted, 20.0));
    }

    #[test]
    fn test_run_direction_is_horizontal_unit() {
        let normals = [
            Vec3::X,
            Vec3::NEG_X,
            Vec3::new(0.6, 0.3, 0.742).normalize(),
            Vec3::new(-0.5, 0.1, 0.86).normalize(),
        ];
        for normal in normals {
            let (_, direction) = run_direction_and_side(Vec3::X, normal);
            assert_eq!(direction.y, 0.0, "normal {normal:?}");
            assert!((direction.length() - 1.0).abs() < 1e-5, "normal {normal:?}");
        }
    }

    #[test]
    fn test_side_detection() {
        // Актор смотрит в -Z, right = +X. Стена справа → normal в -X → Left
        // (персонаж слева ОТ СТЕНЫ)
        let (side, _) = run_direction_and_side(Vec3::X, Vec3::NEG_X);
        assert_eq!(side, WallSide::Left);

        // Стена слева → normal в +X → Right
        let (side, _) = run_direction_and_side(Vec3::X, Vec3::X);
        assert_eq!(side, WallSide::Right);
    }

    #[test]
    fn test_run_direction_points_along_wall() {
        // Стена при +X с normal -X, актор right = +X: бег вдоль стены в -Z
        let (side, direction) = run_direction_and_side(Vec3::X, Vec3::NEG_X);
        assert_eq!(side, WallSide::Left);
        assert!((direction - Vec3::NEG_Z).length() < 1e-5);

        // Зеркальный случай: стена при -X с normal +X → тоже бег в -Z
        let (side, direction) = run_direction_and_side(Vec3::X, Vec3::X);
        assert_eq!(side, WallSide::Right);
        assert!((direction - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_probe_points_toward_wall() {
        // direction × run_up должен указывать НА стену (против normal)
        let (side, direction) = run_direction_and_side(Vec3::X, Vec3::NEG_X);
        let probe = direction.cross(side.run_up());
        assert!(probe.dot(Vec3::NEG_X) < 0.0, "probe {probe:?} должен смотреть в +X");

        let (side, direction) = run_direction_and_side(Vec3::X, Vec3::X);
        let probe = direction.cross(side.run_up());
        assert!(probe.dot(Vec3::X) < 0.0, "probe {probe:?} должен смотреть в -X");
    }

    #[test]
    fn test_launch_points_away_from_wall() {
        let (side, direction) = run_direction_and_side(Vec3::X, Vec3::NEG_X);
        let launch = direction.cross(side.launch_up());
        assert!(launch.dot(Vec3::NEG_X) > 0.0, "launch {launch:?} должен смотреть от стены");
    }
}
