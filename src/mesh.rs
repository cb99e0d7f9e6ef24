use crate::graphics::Rgb;
use crate::math::Vec3;

/// Half the edge length of the built-in model meshes
const MODEL_EXTENT: f64 = 0.2;

const WALL_GREEN: Rgb = Rgb::from_hex(0xA8D8A8);
const SIDE_GREEN: Rgb = Rgb::from_hex(0xB8E8B8);
/// Half extents of the open box the scene sits in
const BOX_HALF_WIDTH: f64 = 5.5;
const BOX_HALF_HEIGHT: f64 = 7.5;
const BOX_HALF_DEPTH: f64 = 7.5;
const SIDE_HALF_LENGTH: f64 = 10.0;
const FLOOR_HALF_WIDTH: f64 = 7.5;

/// Triangle mesh with one color per triangle
pub struct Mesh {
    pub name: &'static str,
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[usize; 3]>,
    pub colors: Vec<Rgb>,
}

impl Mesh {
    pub fn cube() -> Self {
        let e = MODEL_EXTENT;
        let vertices = vec![
            [-e, -e, -e], // 0
            [e, -e, -e],  // 1
            [e, e, -e],   // 2
            [-e, e, -e],  // 3
            [-e, -e, e],  // 4
            [e, -e, e],   // 5
            [e, e, e],    // 6
            [-e, e, e],   // 7
        ];

        // Each face is a quad split into two triangles
        let faces = [
            (0, 1, 2, 3),
            (5, 4, 7, 6),
            (4, 0, 3, 7),
            (1, 5, 6, 2),
            (4, 5, 1, 0),
            (3, 2, 6, 7),
        ];
        let face_colors = [
            Rgb(0x1f, 0x6f, 0xb5), // Peacock blue
            Rgb(0x12, 0x8a, 0x7a), // Teal
            Rgb(0x2e, 0x9b, 0x4f), // Green
            Rgb(0xd4, 0xa0, 0x17), // Gold
            Rgb(0x6a, 0x3d, 0x9a), // Violet
            Rgb(0xe8, 0xe8, 0xe8), // White
        ];

        let mut triangles = Vec::with_capacity(12);
        let mut colors = Vec::with_capacity(12);
        for (&(a, b, c, d), &color) in faces.iter().zip(face_colors.iter()) {
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
            colors.push(color);
            colors.push(color);
        }

        Mesh {
            name: "cube",
            vertices,
            triangles,
            colors,
        }
    }

    pub fn octahedron() -> Self {
        let e = MODEL_EXTENT * 1.4;
        let vertices = vec![
            [e, 0.0, 0.0],
            [-e, 0.0, 0.0],
            [0.0, e, 0.0],
            [0.0, -e, 0.0],
            [0.0, 0.0, e],
            [0.0, 0.0, -e],
        ];
        let triangles = vec![
            [0, 2, 4],
            [4, 2, 1],
            [1, 2, 5],
            [5, 2, 0],
            [4, 3, 0],
            [1, 3, 4],
            [5, 3, 1],
            [0, 3, 5],
        ];
        let colors = (0..triangles.len())
            .map(|i| {
                if i % 2 == 0 {
                    Rgb(0xff, 0x69, 0xb4)
                } else {
                    Rgb(0x8a, 0x2b, 0xe2)
                }
            })
            .collect();

        Mesh {
            name: "octahedron",
            vertices,
            triangles,
            colors,
        }
    }

    /// Open box in world space: back wall, two side walls and the floor
    pub fn environment() -> Self {
        let (w, h, d) = (BOX_HALF_WIDTH, BOX_HALF_HEIGHT, BOX_HALF_DEPTH);
        let (s, f) = (SIDE_HALF_LENGTH, FLOOR_HALF_WIDTH);
        let mut mesh = Mesh {
            name: "box",
            vertices: Vec::with_capacity(16),
            triangles: Vec::with_capacity(8),
            colors: Vec::with_capacity(8),
        };
        mesh.push_quad([[-w, -h, -d], [w, -h, -d], [w, h, -d], [-w, h, -d]], WALL_GREEN);
        mesh.push_quad([[-w, -h, s], [-w, -h, -s], [-w, h, -s], [-w, h, s]], SIDE_GREEN);
        mesh.push_quad([[w, -h, -s], [w, -h, s], [w, h, s], [w, h, -s]], SIDE_GREEN);
        mesh.push_quad([[-f, -h, -f], [f, -h, -f], [f, -h, f], [-f, -h, f]], WALL_GREEN);
        mesh
    }

    fn push_quad(&mut self, corners: [Vec3; 4], color: Rgb) {
        let base = self.vertices.len();
        self.vertices.extend_from_slice(&corners);
        self.triangles.push([base, base + 1, base + 2]);
        self.triangles.push([base, base + 2, base + 3]);
        self.colors.push(color);
        self.colors.push(color);
    }
}

/// Line segment of a sprite in object space
pub struct Segment {
    pub from: Vec3,
    pub to: Vec3,
    pub color: Rgb,
}

const QUILL: Rgb = Rgb(0xc8, 0xa2, 0x5a);
const BARB: Rgb = Rgb(0x2e, 0x8b, 0x57);
const EYE_RIM: Rgb = Rgb(0xd4, 0xaf, 0x37);
const EYE: Rgb = Rgb(0x1a, 0x3f, 0x9e);

/// Flat peacock-feather outline lying in the local xz plane, quill along +x
pub fn feather_outline() -> Vec<Segment> {
    let segment = |from: Vec3, to: Vec3, color: Rgb| Segment { from, to, color };
    let mut lines = vec![segment([-0.12, 0.0, 0.0], [0.2, 0.0, 0.0], QUILL)];

    for i in 0..4 {
        let x = -0.06 + i as f64 * 0.05;
        let reach = 0.03 + i as f64 * 0.006;
        lines.push(segment([x, 0.0, 0.0], [x + 0.03, 0.0, reach], BARB));
        lines.push(segment([x, 0.0, 0.0], [x + 0.03, 0.0, -reach], BARB));
    }

    let rim = [[0.13, 0.0, 0.0], [0.17, 0.0, 0.04], [0.22, 0.0, 0.0], [0.17, 0.0, -0.04]];
    for i in 0..rim.len() {
        lines.push(segment(rim[i], rim[(i + 1) % rim.len()], EYE_RIM));
    }
    lines.push(segment([0.155, 0.0, 0.0], [0.19, 0.0, 0.0], EYE));
    lines.push(segment([0.17, 0.0, -0.015], [0.17, 0.0, 0.015], EYE));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(mesh: &Mesh) {
        assert_eq!(mesh.triangles.len(), mesh.colors.len());
        for triangle in &mesh.triangles {
            assert!(triangle.iter().all(|&i| i < mesh.vertices.len()));
        }
    }

    #[test]
    fn meshes_are_well_formed() {
        let cube = Mesh::cube();
        check(&cube);
        assert_eq!(cube.triangles.len(), 12);
        let octahedron = Mesh::octahedron();
        check(&octahedron);
        assert_eq!(octahedron.triangles.len(), 8);
        let environment = Mesh::environment();
        check(&environment);
        assert_eq!(environment.triangles.len(), 8);
    }

    #[test]
    fn environment_floor_sits_below_the_walls() {
        let environment = Mesh::environment();
        let lowest = environment
            .vertices
            .iter()
            .map(|v| v[1])
            .fold(f64::INFINITY, f64::min);
        assert_eq!(lowest, -7.5);
        let floor = &environment.vertices[12..16];
        assert!(floor.iter().all(|v| v[1] == -7.5));
        assert!(floor.iter().all(|v| v[0].abs() == 7.5 && v[2].abs() == 7.5));
    }

    #[test]
    fn feather_stays_flat() {
        assert!(feather_outline().iter().all(|s| s.from[1] == 0.0 && s.to[1] == 0.0));
    }
}
