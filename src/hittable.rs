use crate::{
    material::Material,
    ray::{HitRecord, Ray},
    vec3::{Float, Point3},
};
use enum_dispatch::enum_dispatch;
use std::{ops::Range, sync::Arc};

#[enum_dispatch]
pub trait Hit: Send + Sync {
    /// Returns the nearest intersection along `ray` within `range`, if any.
    fn hit(&self, ray: &Ray, range: &Range<Float>) -> Option<HitRecord>;
}

/// Every shape a ray can intersect. Spheres are the only geometry, but the
/// closed enum keeps dispatch static and the scene a flat `Vec<Shape>`.
#[enum_dispatch(Hit)]
#[derive(Clone)]
pub enum Shape {
    Sphere,
}

pub type World = Vec<Shape>;

impl Hit for World {
    /// Returns nearest hit to the ray origin within the given range
    fn hit(&self, ray: &Ray, range: &Range<Float>) -> Option<HitRecord> {
        // Shrink the admissible range to the nearest hit found so far, so
        // objects behind an earlier hit can never win
        let mut nearest_hit_dist = range.end;
        let mut nearest_hit = None;

        for shape in self.iter() {
            if let Some(hit) = shape.hit(ray, &(range.start..nearest_hit_dist)) {
                nearest_hit_dist = hit.t;
                nearest_hit = Some(hit);
            }
        }

        nearest_hit
    }
}

#[derive(Clone)]
pub struct Sphere {
    pub center: Point3,
    pub radius: Float,
    pub material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: Point3, radius: Float, material: Arc<Material>) -> Self {
        let radius = radius.max(0.0);
        Sphere {
            center,
            radius,
            material,
        }
    }
}

impl Hit for Sphere {
    fn hit(&self, ray: &Ray, range: &Range<Float>) -> Option<HitRecord> {
        let oc = self.center - ray.origin;
        let a = ray.direction.length_squared();
        let h = ray.direction.dot(&oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None; // the ray misses the sphere entirely
        }

        let sqrt_disc = discriminant.sqrt();
        // The smaller root is nearer along the ray; prefer it, fall back to
        // the larger one if it lies outside the range
        let mut t = (h - sqrt_disc) / a;
        if !range.contains(&t) {
            t = (h + sqrt_disc) / a;
            if !range.contains(&t) {
                return None; // both roots out of range
            }
        }

        let point_on_sphere = ray.at(t);
        let mut normal = (point_on_sphere - self.center) / self.radius;
        let is_front_face = HitRecord::is_front_face(ray, &normal);
        if !is_front_face {
            normal = -normal; // set the normal to always oppose the ray
        }

        Some(HitRecord::new(
            point_on_sphere,
            normal,
            t,
            self.material.clone(), // clones the Arc, not the material
            is_front_face,
        ))
    }
}
