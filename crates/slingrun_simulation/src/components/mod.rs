//! ECS Components для движения персонажа
//!
//! Организация по доменам:
//! - motion: состояние движка персонажа (MotionState — velocity, gravity scale, friction)
//! - input: сырые оси ввода от host слоя (MoveInput)
//! - camera: first-person camera rig (CameraRig — roll для wall-run tilt)
//!
//! Состояния wall-run и grapple живут в своих доменных модулях
//! (`wallrun::components`, `grapple::components`).

pub mod camera;
pub mod input;
pub mod motion;

// Re-exports для удобного импорта
pub use camera::*;
pub use input::*;
pub use motion::*;
