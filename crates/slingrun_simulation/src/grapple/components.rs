//! Grapple components: tagged state machine, cooldown, тюнинг, события hook'а
//!
//! State machine:
//! - Ready → Firing { hook } при выстреле (отклоняется если уже in use)
//! - Firing → Attached { hook, initial_dir_2d } по HookImpact
//! - Firing|Attached → Ready по HookDestroyed (detach, range expiry)
//!
//! Firing без живого hook entity непредставим: hook id зашит в вариант.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Состояние grapple контроллера
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub enum GrappleState {
    /// Готов к выстрелу
    #[default]
    Ready,
    /// Hook в полёте
    Firing { hook: Entity },
    /// Hook зацепился, персонаж притягивается
    Attached {
        hook: Entity,
        /// Горизонтальное направление на hook в момент attach'а
        /// (для swing-past detach: dot с текущим направлением < 0)
        initial_dir_2d: Vec3,
    },
}

impl GrappleState {
    /// Занят ли grapple (полёт или притяжение) — новый выстрел отклоняется
    pub fn in_use(&self) -> bool {
        !matches!(self, GrappleState::Ready)
    }

    pub fn is_attached(&self) -> bool {
        matches!(self, GrappleState::Attached { .. })
    }

    /// Entity hook'а если он существует
    pub fn hook(&self) -> Option<Entity> {
        match self {
            GrappleState::Ready => None,
            GrappleState::Firing { hook } | GrappleState::Attached { hook, .. } => Some(*hook),
        }
    }
}

/// Накопитель времени с последнего detach'а
///
/// Монотонно растёт каждый тик, сбрасывается в 0 на каждом detach'е.
/// Выстрел блокируется пока не превысит GrappleConfig::cooldown.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct GrappleCooldown {
    pub time_since_last_detach: f32,
}

impl Default for GrappleCooldown {
    fn default() -> Self {
        Self {
            // Большое стартовое значение: grapple доступен сразу после спавна
            time_since_last_detach: 1000.0,
        }
    }
}

/// Параметры grapple
#[derive(Component, Debug, Clone, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct GrappleConfig {
    /// Скорость полёта hook'а (cm/s, до клампа в [min_speed, max_speed])
    pub speed: f32,
    /// Нижняя граница скорости hook'а (cm/s)
    pub min_speed: f32,
    /// Верхняя граница скорости hook'а (cm/s) — эффективная полётная скорость
    pub max_speed: f32,
    /// Начальная скорость притяжения при attach'е (cm/s)
    pub pull_initial_speed: f32,
    /// Сила притяжения за тик (N; ускорение = force / mass)
    pub pull_force: f32,
    /// Дистанция авто-detach'а при сближении (cm)
    pub disconnect_distance: f32,
    /// Макс. дальность полёта hook'а до самоуничтожения (cm)
    pub max_distance: f32,
    /// Cooldown между detach'ем и следующим выстрелом (сек)
    pub cooldown: f32,
    /// Air control во время притяжения (swing)
    pub swing_air_control: f32,
}

impl Default for GrappleConfig {
    fn default() -> Self {
        Self {
            speed: 7500.0,
            min_speed: 1.0,
            max_speed: 3000.0,
            pull_initial_speed: 1500.0,
            pull_force: 100_000.0,
            disconnect_distance: 250.0,
            max_distance: 3000.0,
            cooldown: 5.0,
            swing_air_control: 0.2,
        }
    }
}

/// Event: hook столкнулся с поверхностью (→ Attached)
#[derive(Event, Debug, Clone)]
pub struct HookImpact {
    pub hook: Entity,
    pub owner: Entity,
    pub point: Vec3,
    pub normal: Vec3,
}

/// Event: hook уничтожен (range expiry или detach) — cleanup и возврат в Ready
#[derive(Event, Debug, Clone)]
pub struct HookDestroyed {
    pub hook: Entity,
    pub owner: Entity,
}

/// Event: выстрел отклонён по cooldown'у (user-facing notice для UI)
#[derive(Event, Debug, Clone)]
pub struct GrappleDenied {
    pub entity: Entity,
    /// Сколько секунд cooldown'а осталось
    pub remaining: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grapple_state_default_ready() {
        let state = GrappleState::default();
        assert!(matches!(state, GrappleState::Ready));
        assert!(!state.in_use());
        assert!(!state.is_attached());
        assert!(state.hook().is_none());
    }

    #[test]
    fn test_firing_and_attached_are_in_use() {
        let hook = Entity::from_raw(7);
        assert!(GrappleState::Firing { hook }.in_use());
        assert!(GrappleState::Attached { hook, initial_dir_2d: Vec3::X }.in_use());
        assert!(GrappleState::Attached { hook, initial_dir_2d: Vec3::X }.is_attached());
        assert!(!GrappleState::Firing { hook }.is_attached());
    }

    #[test]
    fn test_hook_accessor() {
        let hook = Entity::from_raw(42);
        assert_eq!(GrappleState::Firing { hook }.hook(), Some(hook));
        assert_eq!(
            GrappleState::Attached { hook, initial_dir_2d: Vec3::X }.hook(),
            Some(hook)
        );
    }

    #[test]
    fn test_cooldown_starts_elapsed() {
        let cooldown = GrappleCooldown::default();
        let config = GrappleConfig::default();
        assert!(cooldown.time_since_last_detach > config.cooldown);
    }

    #[test]
    fn test_config_defaults() {
        let config = GrappleConfig::default();
        assert_eq!(config.speed, 7500.0);
        assert_eq!(config.min_speed, 1.0);
        assert_eq!(config.max_speed, 3000.0);
        assert_eq!(config.disconnect_distance, 250.0);
        assert_eq!(config.max_distance, 3000.0);
        assert_eq!(config.cooldown, 5.0);
    }
}
