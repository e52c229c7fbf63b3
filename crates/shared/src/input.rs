//! Applying held controls to a scene, per camera mode.

use serde::{Deserialize, Serialize};

use crate::{CameraType, MoveDirection, RotationPlane, SceneState};

/// Одно удерживаемое действие пользователя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    Move { direction: MoveDirection },
    Rotate { plane: RotationPlane, positive: bool },
}

impl Control {
    pub const fn movement(direction: MoveDirection) -> Self {
        Control::Move { direction }
    }

    pub const fn rotation(plane: RotationPlane, positive: bool) -> Self {
        Control::Rotate { plane, positive }
    }
}

/// Применить удерживаемые действия за кадр длительностью `dt`.
///
/// - `Free`: всё действует на камеру.
/// - `Fps`: без движения вверх/вниз и без крена (`xy`).
/// - `Single`: движение игнорируется, повороты вращают фигуру 0.
pub fn apply_controls(
    state: &mut SceneState,
    controls: &[Control],
    dt: f64,
    move_sensitivity: f64,
    rotate_sensitivity: f64,
) {
    let cam_type = state.scene.cam_type;
    let move_amount = move_sensitivity * dt;
    let rotate_amount = rotate_sensitivity * dt;

    for control in controls {
        match *control {
            Control::Move { direction } => match cam_type {
                CameraType::Single => {}
                CameraType::Fps if direction.is_vertical() => {}
                CameraType::Fps => state.camera.translate(direction, move_amount, true),
                CameraType::Free => state.camera.translate(direction, move_amount, false),
            },
            Control::Rotate { plane, positive } => {
                let delta = if positive { rotate_amount } else { -rotate_amount };
                match cam_type {
                    CameraType::Single => {
                        if let Some(shape) = state.scene.shapes.get_mut(&0) {
                            shape.orientation[plane.index()] += delta;
                        }
                    }
                    CameraType::Fps if plane == RotationPlane::Xy => {}
                    CameraType::Fps | CameraType::Free => {
                        state.camera.theta[plane.index()] += delta;
                    }
                }
            }
        }
    }
}
