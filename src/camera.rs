use crate::math::{add, cross, dot, length, normalize, scale, sub, Vec3};

/// A point projected onto the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Normalized device coordinates, both axes in [-1, 1] when on screen
    pub ndc: [f64; 2],
    /// Distance in front of the camera along its view axis
    pub depth: f64,
}

/// Perspective camera with a look-at basis
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveCamera {
    position: Vec3,
    right: Vec3,
    up: Vec3,
    back: Vec3,
    tan_half_fov: f64,
    aspect: f64,
    near: f64,
    far: f64,
}

impl PerspectiveCamera {
    /// Builds a camera at `position` facing `target` with a vertical field of view in degrees.
    ///
    /// World +y is the preferred up direction. When the view axis is parallel to it the
    /// basis is nudged along z, so a camera looking straight down sees world -z as screen up.
    pub fn looking_at(
        position: Vec3,
        target: Vec3,
        fov_degrees: f64,
        aspect: f64,
        near: f64,
        far: f64,
    ) -> Self {
        let world_up = [0.0, 1.0, 0.0];
        let mut back = sub(&position, &target);
        if length(&back) == 0.0 {
            back[2] = 1.0;
        }
        back = normalize(&back);

        let mut right = cross(&world_up, &back);
        if length(&right) == 0.0 {
            back[2] += 0.0001;
            back = normalize(&back);
            right = cross(&world_up, &back);
        }
        let right = normalize(&right);
        let up = cross(&back, &right);

        PerspectiveCamera {
            position,
            right,
            up,
            back,
            tan_half_fov: (fov_degrees.to_radians() / 2.0).tan(),
            aspect,
            near,
            far,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Projects a world point, or `None` when it falls outside the near/far range
    pub fn project(&self, point: &Vec3) -> Option<Projected> {
        let relative = sub(point, &self.position);
        let depth = -dot(&relative, &self.back);
        if depth < self.near || depth > self.far {
            return None;
        }
        let x = dot(&relative, &self.right) / (depth * self.tan_half_fov * self.aspect);
        let y = dot(&relative, &self.up) / (depth * self.tan_half_fov);
        Some(Projected { ndc: [x, y], depth })
    }

    /// Unit direction of the ray leaving the camera through `ndc`
    pub fn ray_direction(&self, ndc: [f64; 2]) -> Vec3 {
        let sideways = scale(&self.right, ndc[0] * self.tan_half_fov * self.aspect);
        let upward = scale(&self.up, ndc[1] * self.tan_half_fov);
        normalize(&sub(&add(&sideways, &upward), &self.back))
    }

    /// Intersects the ray through `ndc` with the horizontal plane `y = height`.
    ///
    /// A ray parallel to the plane yields non-finite coordinates.
    pub fn unproject_to_plane(&self, ndc: [f64; 2], height: f64) -> Vec3 {
        let direction = self.ray_direction(ndc);
        let distance = (height - self.position[1]) / direction[1];
        add(&self.position, &scale(&direction, distance))
    }
}

/// Maps normalized device coordinates to pixel coordinates
pub fn ndc_to_pixels(ndc: [f64; 2], width: usize, height: usize) -> [f64; 2] {
    [
        (ndc[0] + 1.0) / 2.0 * width as f64,
        (1.0 - ndc[1]) / 2.0 * height as f64,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top_down(aspect: f64) -> PerspectiveCamera {
        PerspectiveCamera::looking_at([0.0, 1.0, 0.0], [0.0, 0.0, 0.0], 50.0, aspect, 0.1, 1000.0)
    }

    #[test]
    fn screen_center_hits_origin() {
        let point = top_down(2.0).unproject_to_plane([0.0, 0.0], 0.0);
        assert!(point[0].abs() < 1e-3);
        assert!(point[1].abs() < 1e-9);
        assert!(point[2].abs() < 1e-3);
    }

    #[test]
    fn screen_edges_map_to_fov_extent() {
        let tan = 25f64.to_radians().tan();
        let camera = top_down(2.0);

        let right = camera.unproject_to_plane([1.0, 0.0], 0.0);
        assert!((right[0] - tan * 2.0).abs() < 1e-3);

        // screen up is world -z for a camera looking straight down
        let top = camera.unproject_to_plane([0.0, 1.0], 0.0);
        assert!((top[2] + tan).abs() < 1e-3);
        assert!(top[0].abs() < 1e-3);
    }

    #[test]
    fn project_inverts_unproject() {
        let camera =
            PerspectiveCamera::looking_at([0.0, 20.0, 0.0], [0.0; 3], 50.0, 1.5, 0.1, 1000.0);
        let point = camera.unproject_to_plane([0.3, -0.4], 2.0);
        let projected = camera.project(&point).unwrap();
        assert!((projected.ndc[0] - 0.3).abs() < 1e-9);
        assert!((projected.ndc[1] + 0.4).abs() < 1e-9);
        assert!((projected.depth - 18.0).abs() < 1e-3);
    }

    #[test]
    fn points_behind_the_camera_are_culled() {
        let camera =
            PerspectiveCamera::looking_at([0.0, 20.0, 0.0], [0.0; 3], 50.0, 1.0, 0.1, 1000.0);
        assert!(camera.project(&[0.0, 25.0, 0.0]).is_none());
        assert!(camera.project(&[0.0, 19.95, 0.0]).is_none());
        assert!(camera.project(&[0.0, 10.0, 0.0]).is_some());
    }

    #[test]
    fn ndc_corners_map_to_pixel_corners() {
        assert_eq!(ndc_to_pixels([-1.0, 1.0], 80, 48), [0.0, 0.0]);
        assert_eq!(ndc_to_pixels([1.0, -1.0], 80, 48), [80.0, 48.0]);
    }
}
