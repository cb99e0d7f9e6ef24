use crate::graphics::Rgb;

pub type Vec3 = [f64; 3];
pub type Mat3 = [[f64; 3]; 3];

/// Edge function used in rasterization
pub fn edge_function(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &Mat3, vector: &Vec3) -> Vec3 {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Multiplies two 3x3 matrices
pub fn multiply_matrices(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut result = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

pub fn add(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn scale(v: &Vec3, s: f64) -> Vec3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn length(v: &Vec3) -> f64 {
    dot(v, v).sqrt()
}

/// Unit vector in the direction of `v`. A zero vector stays zero.
pub fn normalize(v: &Vec3) -> Vec3 {
    let len = length(v);
    if len == 0.0 {
        *v
    } else {
        scale(v, 1.0 / len)
    }
}

pub fn rotation_x(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]
}

pub fn rotation_y(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]
}

pub fn rotation_z(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]
}

/// Rotation matrix for Euler angles applied in XYZ order (`Rx * Ry * Rz`)
pub fn euler_xyz(angles: &Vec3) -> Mat3 {
    let xy = multiply_matrices(&rotation_x(angles[0]), &rotation_y(angles[1]));
    multiply_matrices(&xy, &rotation_z(angles[2]))
}

/// Calculates the normal vector of a triangle
pub fn calculate_normal(a: &Vec3, b: &Vec3, c: &Vec3) -> Vec3 {
    let u = sub(b, a);
    let v = sub(c, a);
    normalize(&cross(&u, &v))
}

/// Calculates the light intensity based on the normal vector and light position
pub fn calculate_light_intensity(normal: &Vec3, position: &Vec3, light_pos: &Vec3) -> f64 {
    let light_dir = normalize(&sub(light_pos, position));
    dot(normal, &light_dir).max(0.1) // Ensure a minimum ambient light
}

/// Applies lighting to a color, tinted by the light's own color
pub fn apply_lighting(color: Rgb, intensity: f64, tint: Rgb) -> Rgb {
    let channel = |base: u8, light: u8| {
        (base as f64 * intensity * (light as f64 / 255.0)).clamp(0.0, 255.0) as u8
    };
    Rgb(
        channel(color.0, tint.0),
        channel(color.1, tint.1),
        channel(color.2, tint.2),
    )
}
