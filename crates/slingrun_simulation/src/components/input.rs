//! Сырые оси ввода от host слоя
//!
//! Host input system (клавиатура/геймпад) пишет значения осей каждый кадр,
//! симуляция только читает. Для headless тестов оси задаются напрямую.

use bevy::prelude::*;

/// Значения осей движения (forward/right, диапазон -1.0..1.0)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MoveInput {
    /// Ось вперёд/назад (>0.1 требуется для wall-run)
    pub forward: f32,
    /// Ось вправо/влево
    pub right: f32,
}

impl MoveInput {
    /// Направление движения в world space из осей и базиса актора (горизонтальное)
    pub fn wish_direction(&self, transform: &Transform) -> Vec3 {
        let forward = *transform.forward() * self.forward;
        let right = *transform.right() * self.right;
        let wish = forward + right;
        Vec3::new(wish.x, 0.0, wish.z).normalize_or_zero()
    }
}

/// Event: намерение прыгнуть (от host input, Space)
#[derive(Event, Debug, Clone)]
pub struct JumpIntent {
    pub entity: Entity,
}

/// Event: намерение использовать grapple (от host input)
///
/// Обрабатывается координатором: либо detach (если hook в полёте/прицеплен),
/// либо выстрел по camera ray, либо отказ по cooldown'у.
#[derive(Event, Debug, Clone)]
pub struct UseGrappleIntent {
    pub entity: Entity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wish_direction_is_horizontal_unit() {
        let input = MoveInput {
            forward: 1.0,
            right: 0.5,
        };
        let transform = Transform::default();
        let wish = input.wish_direction(&transform);
        assert_eq!(wish.y, 0.0);
        assert!((wish.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_wish_direction_zero_input() {
        let input = MoveInput::default();
        let wish = input.wish_direction(&Transform::default());
        assert_eq!(wish, Vec3::ZERO);
    }
}
