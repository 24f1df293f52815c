//! Raycast backend — внешний физический query сервис
//!
//! Симуляция не реимплементирует collision detection: геометрические запросы
//! ("луч из A в B по маске C, ближайший hit + normal") уходят в host физику
//! через Box<dyn RaycastBackend>. Headless запуск и тесты ставят свои
//! детерминированные backend'ы, host слой — настоящий (rapier scene query).

use bevy::prelude::*;

// ============================================================================
// Collision layers (битовые маски, shared с host слоем)
// ============================================================================

/// Layer: Actors (персонажи)
pub const COLLISION_LAYER_ACTORS: u32 = 0b10; // 2

/// Layer: Environment (стены, пол, статическая геометрия)
pub const COLLISION_LAYER_ENVIRONMENT: u32 = 0b100; // 4

/// Layer: Projectiles (hook и прочие снаряды)
pub const COLLISION_LAYER_PROJECTILES: u32 = 0b1000; // 8

/// Mask: wall-run contact probe (только статическая геометрия)
pub const COLLISION_MASK_WALL_PROBE: u32 = COLLISION_LAYER_ENVIRONMENT;

/// Mask: grapple aim ray и полёт hook'а (стены + акторы)
pub const COLLISION_MASK_GRAPPLE: u32 = COLLISION_LAYER_ENVIRONMENT | COLLISION_LAYER_ACTORS;

/// Mask: ground probe (пол под персонажем)
pub const COLLISION_MASK_GROUND: u32 = COLLISION_LAYER_ENVIRONMENT;

// ============================================================================
// Query types
// ============================================================================

/// Результат raycast'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Entity в которую попали (None если host геометрия без ECS entity)
    pub entity: Option<Entity>,
    /// Точка попадания (world space)
    pub point: Vec3,
    /// Impact normal в точке попадания (unit)
    pub normal: Vec3,
    /// Расстояние от origin до точки попадания
    pub distance: f32,
}

/// Backend физических запросов (реализуется host слоем или тестовым mock'ом)
pub trait RaycastBackend: Send + Sync {
    /// Луч из origin в end по collision маске; ближайший hit или None.
    /// exclude — entity которую игнорировать (обычно сам персонаж).
    fn cast_ray(&self, origin: Vec3, end: Vec3, mask: u32, exclude: Option<Entity>)
        -> Option<RayHit>;
}

/// Backend-заглушка: пустой мир, лучи никогда не попадают
pub struct NoHitBackend;

impl RaycastBackend for NoHitBackend {
    fn cast_ray(&self, _: Vec3, _: Vec3, _: u32, _: Option<Entity>) -> Option<RayHit> {
        None
    }
}

/// Resource-обёртка над backend'ом
///
/// По умолчанию NoHitBackend (персонаж в пустоте). Host заменяет при старте:
/// ```ignore
/// app.insert_resource(SurfaceQuery::new(Box::new(RapierSceneBackend::new(...))));
/// ```
#[derive(Resource)]
pub struct SurfaceQuery {
    backend: Box<dyn RaycastBackend>,
}

impl Default for SurfaceQuery {
    fn default() -> Self {
        Self::new(Box::new(NoHitBackend))
    }
}

impl SurfaceQuery {
    pub fn new(backend: Box<dyn RaycastBackend>) -> Self {
        Self { backend }
    }

    pub fn cast_ray(
        &self,
        origin: Vec3,
        end: Vec3,
        mask: u32,
        exclude: Option<Entity>,
    ) -> Option<RayHit> {
        self.backend.cast_ray(origin, end, mask, exclude)
    }
}
