//! 4D transforms: plane rotations, model and view matrices, perspective
//! projection.
//!
//! Points are `DVec4` with the ana coordinate in `w`. Translation is applied
//! separately from the 4×4 linear part, so no 5×5 homogeneous matrices are
//! needed.

use glam::{DMat4, DVec3, DVec4};
use serde::{Deserialize, Serialize};

use crate::{Camera, NodeId, Shape};

/// Плоскость вращения в 4D; порядок совпадает с индексами массивов углов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPlane {
    Xy,
    Yz,
    Xz,
    Xa,
    Ya,
    Za,
}

impl RotationPlane {
    pub const ALL: [RotationPlane; 6] = [
        RotationPlane::Xy,
        RotationPlane::Yz,
        RotationPlane::Xz,
        RotationPlane::Xa,
        RotationPlane::Ya,
        RotationPlane::Za,
    ];

    /// Индекс угла в массивах `orientation` / `theta`
    pub const fn index(self) -> usize {
        match self {
            RotationPlane::Xy => 0,
            RotationPlane::Yz => 1,
            RotationPlane::Xz => 2,
            RotationPlane::Xa => 3,
            RotationPlane::Ya => 4,
            RotationPlane::Za => 5,
        }
    }

    /// Вращения с участием ана искажают трёхмерные тела
    pub const fn involves_ana(self) -> bool {
        matches!(self, RotationPlane::Xa | RotationPlane::Ya | RotationPlane::Za)
    }
}

fn from_rows(rows: [[f64; 4]; 4]) -> DMat4 {
    DMat4::from_cols_array_2d(&rows).transpose()
}

/// Матрица вращения по шести углам `xy, yz, xz, xa, ya, za`
pub fn make_rotator(theta: &[f64; 6]) -> DMat4 {
    let (s_xy, c_xy) = theta[0].sin_cos();
    let (s_yz, c_yz) = theta[1].sin_cos();
    let (s_xz, c_xz) = theta[2].sin_cos();
    let (s_xa, c_xa) = theta[3].sin_cos();
    let (s_ya, c_ya) = theta[4].sin_cos();
    let (s_za, c_za) = theta[5].sin_cos();

    let r_xy = from_rows([
        [c_xy, s_xy, 0.0, 0.0],
        [-s_xy, c_xy, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    let r_yz = from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c_yz, s_yz, 0.0],
        [0.0, -s_yz, c_yz, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    let r_xz = from_rows([
        [c_xz, 0.0, -s_xz, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [s_xz, 0.0, c_xz, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    let r_xa = from_rows([
        [c_xa, 0.0, 0.0, s_xa],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [-s_xa, 0.0, 0.0, c_xa],
    ]);
    let r_ya = from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c_ya, 0.0, -s_ya],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, s_ya, 0.0, c_ya],
    ]);
    let r_za = from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, c_za, -s_za],
        [0.0, 0.0, s_za, c_za],
    ]);

    (r_xy * r_yz * r_xz) * (r_xa * r_ya * r_za)
}

/// Равномерное масштабирование
pub fn make_scaler(scale: f64) -> DMat4 {
    DMat4::from_diagonal(DVec4::splat(scale))
}

/// Линейная часть модельного преобразования: сначала масштаб, потом поворот
pub fn model_matrix(shape: &Shape) -> DMat4 {
    make_rotator(&shape.orientation) * make_scaler(shape.scale)
}

/// Мировые координаты узлов фигуры
pub fn position_shape(shape: &Shape) -> Vec<(NodeId, DVec4)> {
    let model = model_matrix(shape);
    let translation = DVec4::from_array(shape.position);

    shape
        .nodes
        .iter()
        .map(|node| (node.id(), model * node.to_vec() + translation))
        .collect()
}

/// Матрица поворота мира в систему камеры (обратная к повороту камеры)
pub fn view_matrix(cam: &Camera) -> DMat4 {
    make_rotator(&cam.theta).transpose()
}

/// Перевести мировую точку в систему камеры
pub fn view_transform(cam: &Camera, world: DVec4) -> DVec4 {
    view_matrix(cam) * (world - DVec4::from_array(cam.position))
}

/// Перспективная проекция точек системы камеры в NDC.
///
/// Камера смотрит вдоль +z. Ана-координата в проекции не участвует.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    x_scale: f64,
    y_scale: f64,
    depth_scale: f64,
    depth_offset: f64,
    near: f64,
}

impl Projector {
    pub fn new(cam: &Camera) -> Self {
        let y_scale = 1.0 / (cam.fov / 2.0).tan();
        Self {
            x_scale: y_scale / cam.aspect,
            y_scale,
            depth_scale: (cam.far + cam.near) / (cam.far - cam.near),
            depth_offset: (-2.0 * cam.far * cam.near) / (cam.far - cam.near),
            near: cam.near,
        }
    }

    /// `x`, `y` в [-1, 1] для видимых точек, `z` — глубина: -1 на ближней
    /// плоскости, +1 на дальней. `None` для точек ближе `near`.
    pub fn project(&self, view: DVec4) -> Option<DVec3> {
        if view.z < self.near {
            return None;
        }
        Some(DVec3::new(
            self.x_scale * view.x / view.z,
            self.y_scale * view.y / view.z,
            (self.depth_scale * view.z + self.depth_offset) / view.z,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape_maker::make_cube;
    use std::f64::consts::FRAC_PI_2;

    fn approx(a: DVec4, b: DVec4) -> bool {
        (a - b).abs().max_element() < 1e-9
    }

    #[test]
    fn test_rotator_identity() {
        assert_eq!(make_rotator(&[0.0; 6]), DMat4::IDENTITY);
    }

    #[test]
    fn test_rotator_xy_quarter_turn() {
        let r = make_rotator(&[FRAC_PI_2, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(approx(r * DVec4::X, DVec4::new(0.0, -1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_rotator_xa_moves_x_into_ana() {
        let r = make_rotator(&[0.0, 0.0, 0.0, FRAC_PI_2, 0.0, 0.0]);
        assert!(approx(r * DVec4::X, DVec4::new(0.0, 0.0, 0.0, -1.0)));
        assert!(approx(r * DVec4::Y, DVec4::Y));
    }

    #[test]
    fn test_rotator_is_orthonormal() {
        let r = make_rotator(&[0.3, -1.2, 2.0, 0.7, 0.1, -0.4]);
        let product = r * r.transpose();
        for i in 0..4 {
            assert!(approx(product.col(i), DMat4::IDENTITY.col(i)));
        }
    }

    #[test]
    fn test_position_shape_scale_rotate_translate() {
        let mut cube = make_cube(2.0, [10.0, 0.0, 0.0, 1.0], [0.0; 6], [0.0; 6]);
        cube.scale = 2.0;
        let positioned = position_shape(&cube);
        // Узел 0 куба — (-1, -1, -1, 0)
        assert_eq!(positioned[0].0, 0);
        assert!(approx(positioned[0].1, DVec4::new(8.0, -2.0, -2.0, 1.0)));
    }

    #[test]
    fn test_view_transform_translates_then_rotates() {
        let mut cam = Camera::default();
        cam.position = [1.0, 0.0, 0.0, 2.0];
        let v = view_transform(&cam, DVec4::new(1.0, 0.0, 5.0, 2.0));
        assert!(approx(v, DVec4::new(0.0, 0.0, 5.0, 0.0)));

        // Поворот камеры на 90° в плоскости xz: то, что было справа, теперь впереди
        cam.position = [0.0; 4];
        cam.theta = [0.0, 0.0, FRAC_PI_2, 0.0, 0.0, 0.0];
        let world_ahead = make_rotator(&cam.theta) * DVec4::Z;
        let v = view_transform(&cam, world_ahead);
        assert!(approx(v, DVec4::Z));
    }

    #[test]
    fn test_projector_depth_range() {
        let cam = Camera::default();
        let p = Projector::new(&cam);

        let near = p.project(DVec4::new(0.0, 0.0, cam.near, 0.0)).unwrap();
        let far = p.project(DVec4::new(0.0, 0.0, cam.far, 0.0)).unwrap();
        assert!((near.z + 1.0).abs() < 1e-9);
        assert!((far.z - 1.0).abs() < 1e-9);
        assert!(p.project(DVec4::new(0.0, 0.0, cam.near / 2.0, 0.0)).is_none());
    }

    #[test]
    fn test_projector_edge_of_fov() {
        let mut cam = Camera::default();
        cam.fov = FRAC_PI_2;
        cam.aspect = 1.0;
        let p = Projector::new(&cam);
        // При fov 90° точка с y = z лежит на верхней границе экрана
        let top = p.project(DVec4::new(0.0, 4.0, 4.0, 3.0)).unwrap();
        assert!((top.y - 1.0).abs() < 1e-9);
        assert!(top.x.abs() < 1e-9);
    }

    #[test]
    fn test_plane_indices() {
        for (i, plane) in RotationPlane::ALL.iter().enumerate() {
            assert_eq!(plane.index(), i);
        }
        assert!(RotationPlane::Ya.involves_ana());
        assert!(!RotationPlane::Xz.involves_ana());
    }
}
