//! Builders for wireframe primitives in 3D and 4D.
//!
//! Every builder centres its geometry on the local origin and numbers nodes
//! `0..n`, so edges and faces index straight into the node list.

use crate::util::{cell_center, value_from_grid};
use crate::{Edge, GeometryError, Node, NodeId, Shape};

/// Узлы из единичных координат, растянутых на `half_lens` по каждой оси
fn nodes_from_coords(coords: &[[f64; 4]], half_lens: [f64; 4]) -> Vec<Node> {
    coords
        .iter()
        .enumerate()
        .map(|(id, c)| {
            Node::new(
                c[0] * half_lens[0],
                c[1] * half_lens[1],
                c[2] * half_lens[2],
                c[3] * half_lens[3],
                id as NodeId,
            )
        })
        .collect()
}

fn edges(pairs: &[(NodeId, NodeId)]) -> Vec<Edge> {
    pairs.iter().map(|&(a, b)| Edge::new(a, b)).collect()
}

fn faces(lists: &[&[NodeId]]) -> Vec<Vec<NodeId>> {
    lists.iter().map(|f| f.to_vec()).collect()
}

/// Прямоугольный параллелепипед со сторонами `lens`
pub fn make_box(
    lens: [f64; 3],
    position: [f64; 4],
    orientation: [f64; 6],
    rotation_speed: [f64; 6],
) -> Shape {
    let coords = [
        // Front
        [-1.0, -1.0, -1.0, 0.0],
        [1.0, -1.0, -1.0, 0.0],
        [1.0, 1.0, -1.0, 0.0],
        [-1.0, 1.0, -1.0, 0.0],
        // Back
        [-1.0, -1.0, 1.0, 0.0],
        [1.0, -1.0, 1.0, 0.0],
        [1.0, 1.0, 1.0, 0.0],
        [-1.0, 1.0, 1.0, 0.0],
    ];
    let nodes = nodes_from_coords(&coords, [lens[0] / 2.0, lens[1] / 2.0, lens[2] / 2.0, 0.0]);

    let edges = edges(&[
        // Front
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        // Back
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        // Bridgers
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ]);

    let faces_vert = faces(&[
        &[0, 1, 2, 3], // Front
        &[4, 5, 6, 7], // Back
        &[3, 2, 6, 7], // Top
        &[0, 1, 5, 4], // Bottom
        &[0, 4, 7, 3], // Left
        &[1, 5, 6, 2], // Right
    ]);

    Shape::new(nodes, edges, faces_vert, position, orientation, rotation_speed)
}

pub fn make_cube(
    side_len: f64,
    position: [f64; 4],
    orientation: [f64; 6],
    rotation_speed: [f64; 6],
) -> Shape {
    make_box([side_len; 3], position, orientation, rotation_speed)
}

/// Пирамида: основание в плоскости y = 0, вершина на высоте `lens[1] / 2`
pub fn make_rectangular_pyramid(
    lens: [f64; 3],
    position: [f64; 4],
    orientation: [f64; 6],
    rotation_speed: [f64; 6],
) -> Shape {
    let coords = [
        // Base
        [-1.0, 0.0, -1.0, 0.0],
        [1.0, 0.0, -1.0, 0.0],
        [1.0, 0.0, 1.0, 0.0],
        [-1.0, 0.0, 1.0, 0.0],
        // Tip
        [0.0, 1.0, 0.0, 0.0],
    ];
    let nodes = nodes_from_coords(&coords, [lens[0] / 2.0, lens[1] / 2.0, lens[2] / 2.0, 0.0]);

    let edges = edges(&[
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (0, 4),
        (1, 4),
        (2, 4),
        (3, 4),
    ]);

    let faces_vert = faces(&[
        &[0, 1, 2, 3], // Base
        &[0, 1, 4],    // Front
        &[1, 2, 4],    // Right
        &[2, 3, 4],    // Back
        &[3, 0, 4],    // Left
    ]);

    Shape::new(nodes, edges, faces_vert, position, orientation, rotation_speed)
}

/// Дом: коробка с крышей-пирамидой, нависающей над стенами
pub fn make_house(
    lens: [f64; 3],
    position: [f64; 4],
    orientation: [f64; 6],
    rotation_speed: [f64; 6],
) -> Shape {
    let mut base = make_box(lens, position, orientation, rotation_speed);

    let roof = make_rectangular_pyramid(
        [lens[0] * 1.2, lens[1] / 3.0, lens[2] * 1.2],
        [0.0; 4],
        [0.0; 6],
        [0.0; 6],
    );

    base.merge(roof, [0.0, lens[1] / 2.0, 0.0, 0.0]);
    base
}

/// Четырёхмерный прямоугольный параллелепипед
pub fn make_hyperrect(
    lens: [f64; 4],
    position: [f64; 4],
    orientation: [f64; 6],
    rotation_speed: [f64; 6],
) -> Shape {
    let coords = [
        // Front inner
        [-1.0, -1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0, -1.0],
        [-1.0, 1.0, -1.0, -1.0],
        // Back inner
        [-1.0, -1.0, 1.0, -1.0],
        [1.0, -1.0, 1.0, -1.0],
        [1.0, 1.0, 1.0, -1.0],
        [-1.0, 1.0, 1.0, -1.0],
        // Front outer
        [-1.0, -1.0, -1.0, 1.0],
        [1.0, -1.0, -1.0, 1.0],
        [1.0, 1.0, -1.0, 1.0],
        [-1.0, 1.0, -1.0, 1.0],
        // Back outer
        [-1.0, -1.0, 1.0, 1.0],
        [1.0, -1.0, 1.0, 1.0],
        [1.0, 1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0, 1.0],
    ];
    let nodes = nodes_from_coords(
        &coords,
        [lens[0] / 2.0, lens[1] / 2.0, lens[2] / 2.0, lens[3] / 2.0],
    );

    let edges = edges(&[
        // Front inner
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        // Back inner
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        // Front to back, inner
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
        // Front outer
        (8, 9),
        (9, 10),
        (10, 11),
        (11, 8),
        // Back outer
        (12, 13),
        (13, 14),
        (14, 15),
        (15, 12),
        // Front to back, outer
        (8, 12),
        (9, 13),
        (10, 14),
        (11, 15),
        // Inner to outer
        (0, 8),
        (1, 9),
        (2, 10),
        (3, 11),
        (4, 12),
        (5, 13),
        (6, 14),
        (7, 15),
    ]);

    let faces_vert = faces(&[
        &[0, 1, 2, 3],     // Front inner
        &[4, 5, 6, 7],     // Back inner
        &[3, 2, 6, 7],     // Top inner
        &[0, 1, 5, 4],     // Bottom inner
        &[0, 4, 7, 3],     // Left inner
        &[1, 5, 6, 2],     // Right inner
        &[8, 9, 10, 11],   // Front outer
        &[12, 13, 14, 15], // Back outer
        &[11, 10, 14, 15], // Top outer
        &[8, 9, 13, 12],   // Bottom outer
        &[8, 12, 15, 11],  // Left outer
        &[9, 13, 14, 10],  // Right outer
        &[8, 9, 1, 0],     // Front bottom
        &[12, 13, 5, 4],   // Back bottom
        &[12, 8, 0, 4],    // Left bottom
        &[9, 13, 5, 1],    // Right bottom
        &[11, 10, 2, 3],   // Front top
        &[15, 14, 6, 7],   // Back top
        &[15, 11, 3, 7],   // Left top
        &[14, 10, 2, 6],   // Right top
        &[11, 8, 0, 3],    // Left forward
        &[15, 12, 4, 7],   // Left back
        &[10, 9, 1, 2],    // Right forward
        &[14, 13, 5, 6],   // Right back
    ]);

    Shape::new(nodes, edges, faces_vert, position, orientation, rotation_speed)
}

/// Тессеракт
pub fn make_hypercube(
    side_len: f64,
    position: [f64; 4],
    orientation: [f64; 6],
    rotation_speed: [f64; 6],
) -> Shape {
    make_hyperrect([side_len; 4], position, orientation, rotation_speed)
}

/// Правильный 5-ячейник (4-симплекс) с длиной ребра `side_len`
pub fn make_5cell(
    side_len: f64,
    position: [f64; 4],
    orientation: [f64; 6],
    rotation_speed: [f64; 6],
) -> Shape {
    // Вершины с ребром 2√2 и центром в начале координат
    let root5 = 5.0_f64.sqrt();
    let coords = [
        [1.0, 1.0, 1.0, -1.0 / root5],
        [1.0, -1.0, -1.0, -1.0 / root5],
        [-1.0, 1.0, -1.0, -1.0 / root5],
        [-1.0, -1.0, 1.0, -1.0 / root5],
        [0.0, 0.0, 0.0, root5 - 1.0 / root5],
    ];
    let k = side_len / (2.0 * 2.0_f64.sqrt());
    let nodes = nodes_from_coords(&coords, [k; 4]);

    let mut pairs = Vec::with_capacity(10);
    for i in 0..5 {
        for j in (i + 1)..5 {
            pairs.push((i, j));
        }
    }

    let mut faces_vert = Vec::with_capacity(10);
    for i in 0..5 {
        for j in (i + 1)..5 {
            for l in (j + 1)..5 {
                faces_vert.push(vec![i, j, l]);
            }
        }
    }

    Shape::new(nodes, edges(&pairs), faces_vert, position, orientation, rotation_speed)
}

/// Четырёхмерный «крест» для отметки начала координат
pub fn make_origin(
    len: f64,
    position: [f64; 4],
    orientation: [f64; 6],
    rotation_speed: [f64; 6],
) -> Shape {
    let coords = [
        [-1.0, 0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0, 0.0],
        [0.0, -1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, -1.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
    let nodes = nodes_from_coords(&coords, [len; 4]);
    let edges = edges(&[(0, 1), (2, 3), (4, 5), (6, 7)]);

    Shape::new(nodes, edges, Vec::new(), position, orientation, rotation_speed)
}

fn check_map_2d(map: &[Vec<f64>], name: &'static str, res: usize) -> Result<(), GeometryError> {
    if map.len() != res {
        return Err(GeometryError::MapShape {
            map: name,
            expected: res,
            found: map.len(),
        });
    }
    for (i, row) in map.iter().enumerate() {
        if row.len() != res {
            return Err(GeometryError::MapShape {
                map: name,
                expected: res,
                found: row.len(),
            });
        }
        if let Some(j) = row.iter().position(|v| v.is_nan()) {
            return Err(GeometryError::MissingValue {
                map: name,
                index: vec![i, j],
            });
        }
    }
    Ok(())
}

/// Сетка рельефа `res × res` размером `dims = [x, z]`.
///
/// Каждый узел — `(x, height, z, spissitude)`: карта высот задаёт y, карта
/// spissitude — смещение в ана. Индексы карт — `[i][j]` для `x_i`, `z_j`.
pub fn make_terrain(
    dims: [f64; 2],
    res: usize,
    height_map: &[Vec<f64>],
    spissitude_map: &[Vec<f64>],
    position: [f64; 4],
) -> Result<Shape, GeometryError> {
    if res < 2 {
        return Err(GeometryError::Resolution { min: 2, got: res });
    }
    check_map_2d(height_map, "height map", res)?;
    check_map_2d(spissitude_map, "spissitude map", res)?;

    let x_range = (-dims[0] / 2.0, dims[0] / 2.0);
    let z_range = (-dims[1] / 2.0, dims[1] / 2.0);
    let id_of = |i: usize, j: usize| (i * res + j) as NodeId;

    let mut nodes = Vec::with_capacity(res * res);
    for i in 0..res {
        let x = value_from_grid(i, res, x_range);
        for j in 0..res {
            let z = value_from_grid(j, res, z_range);
            nodes.push(Node::new(
                x,
                height_map[i][j],
                z,
                spissitude_map[i][j],
                id_of(i, j),
            ));
        }
    }

    let mut edges = Vec::with_capacity(2 * res * (res - 1));
    let mut faces_vert = Vec::with_capacity((res - 1) * (res - 1));
    for i in 0..res {
        for j in 0..res {
            if j + 1 < res {
                edges.push(Edge::new(id_of(i, j), id_of(i, j + 1)));
            }
            if i + 1 < res {
                edges.push(Edge::new(id_of(i, j), id_of(i + 1, j)));
            }
            if i + 1 < res && j + 1 < res {
                faces_vert.push(vec![
                    id_of(i, j),
                    id_of(i, j + 1),
                    id_of(i + 1, j + 1),
                    id_of(i + 1, j),
                ]);
            }
        }
    }

    Ok(Shape::new(nodes, edges, faces_vert, position, [0.0; 6], [0.0; 6]))
}

/// Решётка кубов `res³` в объёме `dims`; каждый куб смещён в ана на значение
/// из трёхмерной карты spissitude.
pub fn make_hypergrid(
    dims: [f64; 3],
    res: usize,
    spissitude_map: &[Vec<Vec<f64>>],
    position: [f64; 4],
) -> Result<Vec<Shape>, GeometryError> {
    const MAP: &str = "spissitude map";

    if res < 1 {
        return Err(GeometryError::Resolution { min: 1, got: res });
    }
    if spissitude_map.len() != res {
        return Err(GeometryError::MapShape {
            map: MAP,
            expected: res,
            found: spissitude_map.len(),
        });
    }
    for (i, plane) in spissitude_map.iter().enumerate() {
        if plane.len() != res {
            return Err(GeometryError::MapShape {
                map: MAP,
                expected: res,
                found: plane.len(),
            });
        }
        for (j, row) in plane.iter().enumerate() {
            if row.len() != res {
                return Err(GeometryError::MapShape {
                    map: MAP,
                    expected: res,
                    found: row.len(),
                });
            }
            if let Some(k) = row.iter().position(|v| v.is_nan()) {
                return Err(GeometryError::MissingValue {
                    map: MAP,
                    index: vec![i, j, k],
                });
            }
        }
    }

    let cell = dims.iter().fold(f64::INFINITY, |m, d| m.min(d / res as f64));
    let side = cell / 2.0;

    let mut shapes = Vec::with_capacity(res * res * res);
    for (i, plane) in spissitude_map.iter().enumerate() {
        for (j, row) in plane.iter().enumerate() {
            for (k, spiss) in row.iter().enumerate() {
                let center = [
                    position[0] + cell_center(i, res, (-dims[0] / 2.0, dims[0] / 2.0)),
                    position[1] + cell_center(j, res, (-dims[1] / 2.0, dims[1] / 2.0)),
                    position[2] + cell_center(k, res, (-dims[2] / 2.0, dims[2] / 2.0)),
                    position[3] + spiss,
                ];
                shapes.push(make_cube(side, center, [0.0; 6], [0.0; 6]));
            }
        }
    }

    Ok(shapes)
}

/// Куб-скайбокс вокруг камеры
pub fn make_skybox(len: f64, position: [f64; 4]) -> Shape {
    make_cube(len, position, [0.0; 6], [0.0; 6])
}

/// Имена фигур, которые умеет строить [`make_named`]
pub const SHAPE_KINDS: [&str; 8] = [
    "box", "cube", "pyramid", "house", "hypercube", "5cell", "origin", "skybox",
];

/// Фигура по имени с характерным размером `size`, в начале координат
pub fn make_named(kind: &str, size: f64) -> Result<Shape, GeometryError> {
    const ZERO4: [f64; 4] = [0.0; 4];
    const ZERO6: [f64; 6] = [0.0; 6];

    let shape = match kind {
        "box" => make_box([size, size / 2.0, size * 1.5], ZERO4, ZERO6, ZERO6),
        "cube" => make_cube(size, ZERO4, ZERO6, ZERO6),
        "pyramid" => make_rectangular_pyramid([size; 3], ZERO4, ZERO6, ZERO6),
        "house" => make_house([size; 3], ZERO4, ZERO6, ZERO6),
        "hypercube" => make_hypercube(size, ZERO4, ZERO6, ZERO6),
        "5cell" | "fivecell" => make_5cell(size, ZERO4, ZERO6, ZERO6),
        "origin" => make_origin(size, ZERO4, ZERO6, ZERO6),
        "skybox" => make_skybox(size, ZERO4),
        other => return Err(GeometryError::UnknownShape(other.to_string())),
    };
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO4: [f64; 4] = [0.0; 4];
    const ZERO6: [f64; 6] = [0.0; 6];

    fn distance(a: &Node, b: &Node) -> f64 {
        (a.to_vec() - b.to_vec()).length()
    }

    fn edge_lengths(shape: &Shape) -> Vec<f64> {
        shape
            .edges
            .iter()
            .map(|e| distance(shape.node(e.node1()).unwrap(), shape.node(e.node2()).unwrap()))
            .collect()
    }

    fn assert_consistent(shape: &Shape) {
        assert!(shape.dangling_edges().is_empty());
        for face in &shape.faces_vert {
            for v in face {
                assert!(shape.node(*v).is_some(), "face references missing node {v}");
            }
        }
        assert!(shape.make_tris().is_ok());
    }

    #[test]
    fn test_make_named() {
        for kind in SHAPE_KINDS {
            let shape = make_named(kind, 2.0).unwrap();
            assert!(!shape.nodes.is_empty(), "{kind}");
            assert_consistent(&shape);
        }
        assert_eq!(make_named("5cell", 1.0).unwrap().nodes.len(), 5);
        assert_eq!(
            make_named("sphere", 1.0),
            Err(GeometryError::UnknownShape("sphere".to_string()))
        );
    }

    #[test]
    fn test_box_counts() {
        let b = make_box([1.0, 2.0, 3.0], ZERO4, ZERO6, ZERO6);
        assert_eq!(b.nodes.len(), 8);
        assert_eq!(b.edges.len(), 12);
        assert_eq!(b.faces_vert.len(), 6);
        assert_eq!(b.bounds(), Some(([-0.5, -1.0, -1.5, 0.0], [0.5, 1.0, 1.5, 0.0])));
        assert_consistent(&b);
    }

    #[test]
    fn test_cube_edges_have_side_length() {
        let c = make_cube(3.0, ZERO4, ZERO6, ZERO6);
        assert!(edge_lengths(&c).iter().all(|l| (l - 3.0).abs() < 1e-12));
    }

    #[test]
    fn test_pyramid() {
        let p = make_rectangular_pyramid([2.0, 2.0, 2.0], ZERO4, ZERO6, ZERO6);
        assert_eq!(p.nodes.len(), 5);
        assert_eq!(p.edges.len(), 8);
        assert_eq!(p.node(4).unwrap().y(), 1.0);
        assert_eq!(p.make_tris().unwrap().len(), 6 + 4 * 3);
        assert_consistent(&p);
    }

    #[test]
    fn test_house_merges_roof() {
        let h = make_house([4.0, 4.0, 4.0], [1.0, 2.0, 3.0, 4.0], ZERO6, ZERO6);
        assert_eq!(h.nodes.len(), 13);
        assert_eq!(h.edges.len(), 20);
        assert_eq!(h.faces_vert.len(), 11);
        assert_eq!(h.position, [1.0, 2.0, 3.0, 4.0]);
        // Основание крыши лежит на верхней грани стен
        assert_eq!(h.node(8).unwrap().y(), 2.0);
        assert_eq!(h.node(8).unwrap().x(), -2.4);
        assert_consistent(&h);
    }

    #[test]
    fn test_hypercube() {
        let t = make_hypercube(2.0, ZERO4, ZERO6, ZERO6);
        assert_eq!(t.nodes.len(), 16);
        assert_eq!(t.edges.len(), 32);
        assert_eq!(t.faces_vert.len(), 24);
        assert!(edge_lengths(&t).iter().all(|l| (l - 2.0).abs() < 1e-12));
        assert_consistent(&t);
    }

    #[test]
    fn test_hyperrect_spans_ana() {
        let t = make_hyperrect([1.0, 1.0, 1.0, 6.0], ZERO4, ZERO6, ZERO6);
        let (min, max) = t.bounds().unwrap();
        assert_eq!(min[3], -3.0);
        assert_eq!(max[3], 3.0);
    }

    #[test]
    fn test_5cell_is_regular_and_centred() {
        let s = make_5cell(2.0, ZERO4, ZERO6, ZERO6);
        assert_eq!(s.nodes.len(), 5);
        assert_eq!(s.edges.len(), 10);
        assert_eq!(s.faces_vert.len(), 10);
        assert!(edge_lengths(&s).iter().all(|l| (l - 2.0).abs() < 1e-9));

        let centroid = s
            .nodes
            .iter()
            .fold(glam::DVec4::ZERO, |acc, n| acc + n.to_vec())
            / 5.0;
        assert!(centroid.length() < 1e-9);
        assert_consistent(&s);
    }

    #[test]
    fn test_origin_cross() {
        let o = make_origin(2.0, ZERO4, ZERO6, ZERO6);
        assert_eq!(o.nodes.len(), 8);
        assert_eq!(o.edges.len(), 4);
        assert!(o.faces_vert.is_empty());
        assert_eq!(o.node(7).unwrap().a(), 2.0);
    }

    #[test]
    fn test_terrain_grid() {
        let res = 3;
        let heights = vec![vec![0.0, 1.0, 2.0]; res];
        let spiss = vec![vec![0.5; res]; res];
        let t = make_terrain([10.0, 20.0], res, &heights, &spiss, ZERO4).unwrap();

        assert_eq!(t.nodes.len(), 9);
        assert_eq!(t.edges.len(), 12);
        assert_eq!(t.faces_vert.len(), 4);
        let corner = t.node(8).unwrap();
        assert_eq!((corner.x(), corner.y(), corner.z(), corner.a()), (5.0, 2.0, 10.0, 0.5));
        assert_consistent(&t);
    }

    #[test]
    fn test_terrain_rejects_bad_maps() {
        let spiss = vec![vec![0.0; 3]; 3];
        let short = vec![vec![0.0; 3]; 2];
        assert!(matches!(
            make_terrain([1.0, 1.0], 3, &short, &spiss, ZERO4),
            Err(GeometryError::MapShape { expected: 3, found: 2, .. })
        ));

        let mut holes = vec![vec![0.0; 3]; 3];
        holes[1][2] = f64::NAN;
        assert_eq!(
            make_terrain([1.0, 1.0], 3, &holes, &spiss, ZERO4).unwrap_err(),
            GeometryError::MissingValue {
                map: "height map",
                index: vec![1, 2]
            }
        );

        assert_eq!(
            make_terrain([1.0, 1.0], 1, &[vec![0.0]], &[vec![0.0]], ZERO4).unwrap_err(),
            GeometryError::Resolution { min: 2, got: 1 }
        );
    }

    #[test]
    fn test_hypergrid() {
        let res = 2;
        let mut map = vec![vec![vec![0.0; res]; res]; res];
        map[1][1][1] = 5.0;
        let cubes = make_hypergrid([4.0, 4.0, 4.0], res, &map, [0.0, 0.0, 0.0, 1.0]).unwrap();

        assert_eq!(cubes.len(), 8);
        assert_eq!(cubes[0].position, [-1.0, -1.0, -1.0, 1.0]);
        assert_eq!(cubes[7].position, [1.0, 1.0, 1.0, 6.0]);
        assert!(edge_lengths(&cubes[0]).iter().all(|l| (l - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_hypergrid_rejects_ragged_map() {
        let map = vec![vec![vec![0.0; 2]; 2], vec![vec![0.0; 1]; 2]];
        assert!(make_hypergrid([1.0, 1.0, 1.0], 2, &map, ZERO4).is_err());
    }
}
