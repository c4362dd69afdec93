use crate::{
    hittable::{Sphere, World},
    material::{Dielectric, Lambertian, Material, Metal},
    vec3::{Color, Float, Point3},
};
use itertools::Itertools;
use rand::Rng;
use std::sync::Arc;

/// The classic cover scene: a huge gray ground sphere, a 22x22 field of
/// small randomly-materialed spheres, and three large feature spheres.
pub fn random_scene<R: Rng + ?Sized>(rng: &mut R) -> World {
    let mut world = World::new();

    let ground: Arc<Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)).into());
    world.push(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground).into());

    // All the small glass balls are optically identical, so they share one material
    let glass: Arc<Material> = Arc::new(Dielectric::new(1.5).into());

    for (a, b) in (-11..11).cartesian_product(-11..11) {
        let center = Point3::new(
            a as Float + 0.9 * rng.gen::<Float>(),
            0.2,
            b as Float + 0.9 * rng.gen::<Float>(),
        );

        // Keep the field clear of the big metal sphere
        if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
            continue;
        }

        let choose_mat = rng.gen::<Float>();
        let material: Arc<Material> = if choose_mat < 0.8 {
            let albedo = Color::random(rng, 0.0, 1.0) * Color::random(rng, 0.0, 1.0);
            Arc::new(Lambertian::new(albedo).into())
        } else if choose_mat < 0.95 {
            let albedo = Color::random(rng, 0.5, 1.0);
            let fuzz = rng.gen_range(0.0..0.5);
            Arc::new(Metal::new(albedo, fuzz).into())
        } else {
            glass.clone()
        };
        world.push(Sphere::new(center, 0.2, material).into());
    }

    let big_glass: Arc<Material> = Arc::new(Dielectric::new(1.5).into());
    world.push(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, big_glass).into());

    let big_diffuse: Arc<Material> = Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1)).into());
    world.push(Sphere::new(Point3::new(-4.0, 1.0, 0.0), 1.0, big_diffuse).into());

    let big_metal: Arc<Material> = Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0).into());
    world.push(Sphere::new(Point3::new(4.0, 1.0, 0.0), 1.0, big_metal).into());

    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::{Hit, Shape};
    use crate::ray::Ray;
    use crate::vec3::Vec3;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_scene_has_ground_grid_and_feature_spheres() {
        let mut rng = StdRng::seed_from_u64(11);
        let world = random_scene(&mut rng);
        // Ground + 3 feature spheres + up to 484 small ones, minus the
        // exclusion zone around (4, 0.2, 0)
        assert!(world.len() > 400);
        assert!(world.len() <= 488);
    }

    #[test]
    fn test_scene_is_hittable_from_default_camera() {
        let mut rng = StdRng::seed_from_u64(11);
        let world = random_scene(&mut rng);
        // Straight down from above must at least find the ground sphere
        let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(world.hit(&ray, &(0.001..Float::INFINITY)).is_some());
    }

    #[test]
    fn test_small_spheres_avoid_the_metal_sphere() {
        let mut rng = StdRng::seed_from_u64(11);
        let world = random_scene(&mut rng);
        let metal_center = Point3::new(4.0, 0.2, 0.0);
        for shape in &world {
            let Shape::Sphere(sphere) = shape;
            if sphere.radius == 0.2 {
                assert!((sphere.center - metal_center).length() > 0.9);
            }
        }
    }

    #[test]
    fn test_small_glass_spheres_share_one_material() {
        let mut rng = StdRng::seed_from_u64(11);
        let world = random_scene(&mut rng);
        let glass_smalls: Vec<&Sphere> = world
            .iter()
            .map(|shape| {
                let Shape::Sphere(sphere) = shape;
                sphere
            })
            .filter(|s| s.radius == 0.2 && matches!(*s.material, Material::Dielectric(_)))
            .collect();
        for pair in glass_smalls.windows(2) {
            assert!(Arc::ptr_eq(&pair[0].material, &pair[1].material));
        }
    }
}
