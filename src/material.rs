use crate::{
    ray::{HitRecord, Ray},
    vec3::{Color, Float, Vec3},
};
use enum_dispatch::enum_dispatch;
use rand::{Rng, RngCore};

/// A material's decision of whether and how a ray continues after a hit.
/// `None` means the ray was absorbed. The RNG is threaded through instead
/// of grabbing a thread-local one so seeded renders are reproducible.
#[enum_dispatch]
pub trait Scatter: Send + Sync {
    fn scatter(
        &self,
        ray_in: &Ray,
        hit: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)>;
}

/// The full set of materials. A closed enum dispatched statically; the
/// variant set is small and fixed, so there is no reason to pay for a
/// vtable per sphere.
#[enum_dispatch(Scatter)]
#[derive(Clone)]
pub enum Material {
    Lambertian,
    Metal,
    Dielectric,
}

pub fn reflect(incoming_direction: &Vec3, surface_normal: &Vec3) -> Vec3 {
    // Scale normal by length of incoming ray's direction projected onto the normal,
    // then reflect the ray by subtracting twice its height relative to the surface
    let scaled_normal = *surface_normal * incoming_direction.dot(surface_normal);
    *incoming_direction - scaled_normal * 2.0
}

/// Snell refraction decomposed into perpendicular and parallel parts.
/// Expects `incoming_direction` to be a unit vector.
pub fn refract(incoming_direction: &Vec3, surface_normal: &Vec3, refractive_ratio: Float) -> Vec3 {
    let cos_theta = (-incoming_direction.dot(surface_normal)).min(1.0);
    let r_out_perp = (*incoming_direction + *surface_normal * cos_theta) * refractive_ratio;
    let r_out_parallel = *surface_normal * -((1.0 - r_out_perp.length_squared()).abs().sqrt());
    r_out_perp + r_out_parallel
}

/// Schlick's approximation for reflectance at a given angle.
pub fn reflectance(cosine: Float, refractive_index: Float) -> Float {
    let r0 = (1.0 - refractive_index) / (1.0 + refractive_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[derive(Clone, Copy, Debug)]
pub struct Lambertian {
    pub albedo: Color,
}

impl Lambertian {
    pub fn new(albedo: Color) -> Self {
        Lambertian { albedo }
    }
}

impl Scatter for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        hit: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        let mut scatter_dir = hit.normal + Vec3::random_unit_vector(rng);
        if scatter_dir.near_zero() {
            // The random vector cancelled the normal; a zero-length direction
            // would poison everything downstream with NaNs
            scatter_dir = hit.normal;
        }
        Some((self.albedo, Ray::new(hit.point, scatter_dir)))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Metal {
    pub albedo: Color,
    /// Roughness of the reflection, clamped to [0, 1] at construction
    pub fuzz: Float,
}

impl Metal {
    pub fn new(albedo: Color, fuzz: Float) -> Self {
        Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Scatter for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        hit: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        let reflected = reflect(&ray_in.direction.normalized(), &hit.normal);
        let fuzzed = reflected + Vec3::random_in_unit_sphere(rng) * self.fuzz;
        if fuzzed.dot(&hit.normal) <= 0.0 {
            // Fuzzing pushed the reflection below the surface; treat as absorbed
            return None;
        }
        Some((self.albedo, Ray::new(hit.point, fuzzed)))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Dielectric {
    /// Refractive index in vacuum or air, or the ratio of the material's
    /// refractive index over the refractive index of the enclosing media
    pub refractive_index: Float,
}

impl Dielectric {
    pub fn new(refractive_index: Float) -> Self {
        Dielectric { refractive_index }
    }
}

impl Scatter for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        hit: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        let ri = if hit.is_front_face {
            1.0 / self.refractive_index
        } else {
            self.refractive_index
        };

        let incoming_direction = ray_in.direction.normalized();
        let cos_theta = (-incoming_direction.dot(&hit.normal)).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        let cannot_refract = ri * sin_theta > 1.0;

        let direction = if cannot_refract || reflectance(cos_theta, ri) > rng.gen_range(0.0..1.0) {
            reflect(&incoming_direction, &hit.normal)
        } else {
            refract(&incoming_direction, &hit.normal, ri)
        };

        // Glass absorbs nothing, it only redirects
        Some((Color::one(), Ray::new(hit.point, direction)))
    }
}
