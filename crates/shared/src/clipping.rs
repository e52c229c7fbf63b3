// Line clipping. 2D clipping is Cohen–Sutherland and runs after projection,
// on the screen; the near-plane clip runs before it, in camera space.

use glam::DVec4;
use serde::{Deserialize, Serialize};

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// 2D-точка на экране (в NDC или пикселях)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Прямоугольное окно отсечения
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ClipWindow {
    /// Окно NDC: [-1, 1] по обеим осям
    pub const NDC: ClipWindow = ClipWindow {
        x_min: -1.0,
        x_max: 1.0,
        y_min: -1.0,
        y_max: 1.0,
    };
}

pub fn compute_outcode(pt: &Point2D, window: &ClipWindow) -> u8 {
    let mut code = INSIDE;

    if pt.x < window.x_min {
        code |= LEFT;
    } else if pt.x > window.x_max {
        code |= RIGHT;
    }
    if pt.y < window.y_min {
        code |= BOTTOM;
    } else if pt.y > window.y_max {
        code |= TOP;
    }
    code
}

/// Отсечь отрезок `p0`–`p1` окном.
///
/// `None`, если отрезок целиком снаружи; иначе концы, перенесённые на
/// границы окна.
pub fn clip_2d(p0: Point2D, p1: Point2D, window: &ClipWindow) -> Option<(Point2D, Point2D)> {
    let mut p0 = p0;
    let mut p1 = p1;
    let mut outcode_0 = compute_outcode(&p0, window);
    let mut outcode_1 = compute_outcode(&p1, window);

    loop {
        if outcode_0 | outcode_1 == INSIDE {
            return Some((p0, p1));
        }
        if outcode_0 & outcode_1 != 0 {
            // Оба конца в одной внешней зоне
            return None;
        }

        let outcode_out = if outcode_0 != INSIDE { outcode_0 } else { outcode_1 };

        // Бит зоны гарантирует ненулевой знаменатель
        let crossing = if outcode_out & TOP != 0 {
            Point2D::new(
                p0.x + (p1.x - p0.x) * (window.y_max - p0.y) / (p1.y - p0.y),
                window.y_max,
            )
        } else if outcode_out & BOTTOM != 0 {
            Point2D::new(
                p0.x + (p1.x - p0.x) * (window.y_min - p0.y) / (p1.y - p0.y),
                window.y_min,
            )
        } else if outcode_out & RIGHT != 0 {
            Point2D::new(
                window.x_max,
                p0.y + (p1.y - p0.y) * (window.x_max - p0.x) / (p1.x - p0.x),
            )
        } else {
            Point2D::new(
                window.x_min,
                p0.y + (p1.y - p0.y) * (window.x_min - p0.x) / (p1.x - p0.x),
            )
        };

        if outcode_out == outcode_0 {
            p0 = crossing;
            outcode_0 = compute_outcode(&p0, window);
        } else {
            p1 = crossing;
            outcode_1 = compute_outcode(&p1, window);
        }
    }
}

/// Отсечь отрезок в системе камеры ближней плоскостью `z = near`.
///
/// Точки за плоскостью переносятся на неё по прямой (вместе с ана).
pub fn clip_near(a: DVec4, b: DVec4, near: f64) -> Option<(DVec4, DVec4)> {
    let onto_plane = |from: DVec4, to: DVec4| {
        let mut p = from.lerp(to, (near - from.z) / (to.z - from.z));
        // lerp может промахнуться на ulp за плоскость
        p.z = near;
        p
    };

    match (a.z < near, b.z < near) {
        (true, true) => None,
        (false, false) => Some((a, b)),
        (true, false) => Some((onto_plane(a, b), b)),
        (false, true) => Some((a, onto_plane(b, a))),
    }
}
