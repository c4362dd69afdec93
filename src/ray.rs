use crate::{
    material::Material,
    vec3::{Float, Point3, Vec3},
};
use std::sync::Arc;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: Float) -> Point3 {
        self.origin + self.direction * t
    }
}

/// Everything the integrator needs to know about a surface intersection.
/// The normal always opposes the incoming ray; `is_front_face` records
/// whether the outward geometric normal already did.
#[derive(Clone)]
pub struct HitRecord {
    pub point: Point3,
    pub normal: Vec3,
    pub material: Arc<Material>,
    pub t: Float,
    pub is_front_face: bool,
}

impl HitRecord {
    pub fn new(
        point: Point3,
        normal: Vec3,
        t: Float,
        material: Arc<Material>,
        is_front_face: bool,
    ) -> Self {
        HitRecord {
            point,
            normal,
            material,
            t,
            is_front_face,
        }
    }

    pub fn is_front_face(ray: &Ray, outward_normal: &Vec3) -> bool {
        ray.direction.dot(outward_normal) < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_at() {
        let ray = Ray::new(Point3::new(1.0, 0.0, -1.0), Vec3::new(0.0, 2.0, 0.0));
        let p = ray.at(1.5);
        assert_abs_diff_eq!(p.x, 1.0);
        assert_abs_diff_eq!(p.y, 3.0);
        assert_abs_diff_eq!(p.z, -1.0);
    }

    #[test]
    fn test_at_zero_is_origin() {
        let ray = Ray::new(Point3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(ray.at(0.0), ray.origin);
    }

    #[test]
    fn test_front_face_detection() {
        let ray = Ray::new(Point3::zero(), Vec3::new(1.0, 0.0, 0.0));
        let opposing = Vec3::new(-1.0, 0.0, 0.0);
        let aligned = Vec3::new(1.0, 0.0, 0.0);
        assert!(HitRecord::is_front_face(&ray, &opposing));
        assert!(!HitRecord::is_front_face(&ray, &aligned));
    }
}
