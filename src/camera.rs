use crate::{
    ray::Ray,
    vec3::{Float, Point3, Vec3},
};
use rand::RngCore;

/// Thin-lens camera. All basis vectors and viewport extents are derived
/// once at construction; `get_ray` only samples the lens disk.
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: Float,
}

impl Camera {
    /// `vertical_fov` is in degrees. Objects at `focus_distance` from
    /// `lookfrom` are in perfect focus; everything else blurs in
    /// proportion to `aperture`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        lookfrom: Point3,
        lookat: Point3,
        vup: Vec3,
        vertical_fov: Float,
        aspect_ratio: Float,
        aperture: Float,
        focus_distance: Float,
    ) -> Self {
        let theta = vertical_fov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        let w = (lookfrom - lookat).normalized();
        let u = vup.cross(&w).normalized();
        let v = w.cross(&u);

        let origin = lookfrom;
        // Scaling the viewport by the focus distance puts the image plane
        // exactly on the plane of perfect focus
        let horizontal = u * viewport_width * focus_distance;
        let vertical = v * viewport_height * focus_distance;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - w * focus_distance;

        Camera {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            lens_radius: aperture / 2.0,
        }
    }

    /// Returns a ray through the viewport point `(s, t)`, with `s, t` in
    /// [0, 1] mapping left-to-right and bottom-to-top. The origin jitters
    /// within the lens disk, which is the sole source of depth-of-field.
    pub fn get_ray(&self, s: Float, t: Float, rng: &mut dyn RngCore) -> Ray {
        let rd = Vec3::random_in_unit_disk(rng) * self.lens_radius;
        let offset = self.u * rd.x + self.v * rd.y;
        Ray::new(
            self.origin + offset,
            self.lower_left_corner + self.horizontal * s + self.vertical * t
                - self.origin
                - offset,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn pinhole_looking_down_negative_z() -> Camera {
        Camera::new(
            Point3::zero(),
            Point3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            90.0,
            1.0,
            0.0, // aperture 0: no lens jitter, rays are deterministic
            1.0,
        )
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = pinhole_looking_down_negative_z();
        let mut rng = StdRng::seed_from_u64(1);
        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin, Point3::zero());
        let dir = ray.direction.normalized();
        assert_abs_diff_eq!(dir.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(dir.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(dir.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_corner_rays_span_the_fov() {
        // vfov 90 at focus distance 1 gives a viewport from -1 to 1
        let camera = pinhole_looking_down_negative_z();
        let mut rng = StdRng::seed_from_u64(1);
        let bottom_left = camera.get_ray(0.0, 0.0, &mut rng);
        assert_abs_diff_eq!(bottom_left.direction.x, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bottom_left.direction.y, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bottom_left.direction.z, -1.0, epsilon = 1e-12);
        let top_right = camera.get_ray(1.0, 1.0, &mut rng);
        assert_abs_diff_eq!(top_right.direction.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(top_right.direction.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(top_right.direction.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_aperture_jitters_origin_within_lens() {
        let camera = Camera::new(
            Point3::zero(),
            Point3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            90.0,
            1.0,
            0.5,
            1.0,
        );
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let ray = camera.get_ray(0.5, 0.5, &mut rng);
            // Origin stays within the lens radius of the camera center
            assert!((ray.origin - Point3::zero()).length() < 0.25);
            // Rays still converge on the focus point
            let focus_point = ray.at(1.0);
            let aim = Point3::new(0.0, 0.0, -1.0);
            assert_abs_diff_eq!(focus_point.x, aim.x, epsilon = 1e-9);
            assert_abs_diff_eq!(focus_point.y, aim.y, epsilon = 1e-9);
        }
    }
}
