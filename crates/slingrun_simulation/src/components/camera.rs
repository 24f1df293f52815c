//! First-person camera rig
//!
//! Host рендер-слой владеет самой камерой; симуляция хранит только то, что
//! нужно механикам движения: eye offset (для grapple ray), forward вектор
//! (обновляется host mouse-look системой) и roll для wall-run tilt анимации.

use bevy::prelude::*;

/// Camera rig персонажа
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct CameraRig {
    /// Смещение глаз от позиции актора (cm)
    pub eye_offset: Vec3,
    /// Направление взгляда (world space, пишет host mouse-look)
    pub forward: Vec3,
    /// Roll камеры в градусах, mod-360 (анимируется wall-run tilt системой)
    pub roll: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            eye_offset: Vec3::new(0.0, 64.0, -40.0), // высота глаз ~64 cm над центром капсулы
            forward: Vec3::NEG_Z,
            roll: 0.0,
        }
    }
}

impl CameraRig {
    /// Позиция глаз в world space
    pub fn eye_position(&self, transform: &Transform) -> Vec3 {
        transform.translation + transform.rotation * self.eye_offset
    }
}
