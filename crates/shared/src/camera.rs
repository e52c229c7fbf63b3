//! Camera and camera movement

use std::f64::consts::TAU;

use glam::DVec4;
use serde::{Deserialize, Serialize};

use crate::transforms::{make_rotator, Projector};
use crate::GeometryError;

/// 4D-камера.
///
/// `theta` — углы поворота камеры в тех же шести плоскостях, что и у фигур.
/// В системе камеры взгляд направлен вдоль +z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: [f64; 4],
    #[serde(default)]
    pub theta: [f64; 6],
    /// Вертикальный угол обзора (радианы)
    pub fov: f64,
    /// Отношение ширины к высоте
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, -3.0, 0.0],
            theta: [0.0; 6],
            fov: TAU / 5.0,
            aspect: 4.0 / 3.0,
            near: 0.1,
            far: 200.0,
        }
    }
}

impl Camera {
    /// Проверить параметры проекции
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !(self.fov > 0.0 && self.fov < std::f64::consts::PI) {
            return Err(GeometryError::InvalidCamera(format!(
                "fov must be in (0, π), got {}",
                self.fov
            )));
        }
        if !(self.aspect > 0.0) {
            return Err(GeometryError::InvalidCamera(format!(
                "aspect must be positive, got {}",
                self.aspect
            )));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(GeometryError::InvalidCamera(format!(
                "expected 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        if self.position.iter().chain(&self.theta).any(|v| !v.is_finite()) {
            return Err(GeometryError::InvalidCamera(
                "position and angles must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn projector(&self) -> Projector {
        Projector::new(self)
    }

    /// Сдвинуть камеру в направлении `direction` относительно её взгляда
    pub fn translate(&mut self, direction: MoveDirection, amount: f64, fps: bool) {
        let delta = move_camera(direction, &self.theta, amount, fps);
        for (p, d) in self.position.iter_mut().zip(delta) {
            *p += d;
        }
    }
}

/// Режим управления камерой
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraType {
    /// Камера неподвижна, клавиши вращают единственную фигуру
    Single,
    /// Свободный полёт во всех четырёх измерениях
    #[default]
    Free,
    /// Ходьба: без вертикали и без крена
    Fps,
}

/// Направление движения камеры; Ana/Kata — вдоль четвёртой оси
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
    Ana,
    Kata,
}

impl MoveDirection {
    /// Единичный вектор направления в системе камеры
    pub fn unit(self) -> DVec4 {
        match self {
            MoveDirection::Forward => DVec4::Z,
            MoveDirection::Back => DVec4::NEG_Z,
            MoveDirection::Left => DVec4::NEG_X,
            MoveDirection::Right => DVec4::X,
            MoveDirection::Up => DVec4::Y,
            MoveDirection::Down => DVec4::NEG_Y,
            MoveDirection::Ana => DVec4::W,
            MoveDirection::Kata => DVec4::NEG_W,
        }
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, MoveDirection::Up | MoveDirection::Down)
    }
}

/// Смещение камеры в мировых координатах.
///
/// В режиме FPS учитывается только рыскание (плоскость xz), так что движение
/// вперёд не уводит камеру вверх или в ана.
pub fn move_camera(direction: MoveDirection, theta: &[f64; 6], amount: f64, fps: bool) -> [f64; 4] {
    let rotation = if fps {
        make_rotator(&[0.0, 0.0, theta[2], 0.0, 0.0, 0.0])
    } else {
        make_rotator(theta)
    };
    (rotation * direction.unit() * amount).to_array()
}
