use crate::{
    camera::Camera,
    config::RenderConfig,
    hittable::{Hit, World},
    material::Scatter,
    ray::Ray,
    vec3::{Color, Float},
};
use indicatif::{ParallelProgressIterator, ProgressBar};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use rayon::prelude::*;
use std::io::{self, Write};

/// Lower intersection bound for every bounce. Starting slightly above zero
/// keeps a scattered ray from re-hitting the surface it just left
/// (shadow acne).
const T_MIN: Float = 0.001;

/// Recursively traces `ray` through `world`, accumulating attenuation at
/// each scatter. Exhausting `depth` or being absorbed yields black; a miss
/// yields the sky gradient.
pub fn ray_color(ray: &Ray, world: &World, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::zero(); // bounce budget exhausted, no more light gathered
    }

    if let Some(hit) = world.hit(ray, &(T_MIN..Float::INFINITY)) {
        return match hit.material.scatter(ray, &hit, rng) {
            Some((attenuation, scattered)) => {
                attenuation * ray_color(&scattered, world, depth - 1, rng)
            }
            None => Color::zero(), // absorbed
        };
    }

    // Sky: lerp from white at the horizon to blue straight up
    let unit_dir = ray.direction.normalized();
    let t = 0.5 * (unit_dir.y + 1.0);
    Color::one() * (1.0 - t) + Color::new(0.5, 0.7, 1.0) * t
}

/// Accumulated (not averaged) sample sums per pixel, in the order they are
/// written to the file: rows top to bottom, pixels left to right.
pub struct Image {
    pub pixels: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
}

impl Image {
    /// Writes the image in plain-text PPM (`P3`).
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;
        for color in &self.pixels {
            let (r, g, b) = to_rgb(*color, self.samples_per_pixel);
            writeln!(out, "{} {} {}", r, g, b)?;
        }
        out.flush()
    }
}

/// Maps an accumulated sample sum to 8-bit channels: average over the
/// sample count, gamma-correct for gamma 2.0, clamp to [0, 0.999], scale.
pub fn to_rgb(accumulated: Color, samples_per_pixel: u32) -> (u8, u8, u8) {
    let scale = 1.0 / samples_per_pixel as Float;
    let r = (accumulated.x * scale).sqrt();
    let g = (accumulated.y * scale).sqrt();
    let b = (accumulated.z * scale).sqrt();
    (
        (256.0 * r.clamp(0.0, 0.999)) as u8,
        (256.0 * g.clamp(0.0, 0.999)) as u8,
        (256.0 * b.clamp(0.0, 0.999)) as u8,
    )
}

/// Each pixel gets its own generator so parallel pixels never share RNG
/// state. Under a fixed seed the stream per pixel is stable, making whole
/// renders reproducible.
fn pixel_rng(seed: Option<u64>, x: u32, y: u32) -> StdRng {
    match seed {
        Some(seed) => {
            let index = ((y as u64) << 32) | x as u64;
            StdRng::seed_from_u64(seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        }
        None => StdRng::from_entropy(),
    }
}

/// Renders `world` row-parallel. The progress bar ticks once per row.
pub fn render(camera: &Camera, world: &World, config: &RenderConfig, progress: ProgressBar) -> Image {
    let width = config.image_width;
    let height = config.image_height();

    let pixels = (0..height)
        .into_par_iter()
        .progress_with(progress)
        .flat_map(|row| {
            let j = height - 1 - row; // scan top to bottom, as the PPM is written
            (0..width).into_par_iter().map(move |i| {
                let mut rng = pixel_rng(config.seed, i, j);
                (0..config.samples_per_pixel)
                    .map(|_| {
                        let s = (i as Float + rng.gen::<Float>()) / (width - 1) as Float;
                        let t = (j as Float + rng.gen::<Float>()) / (height - 1) as Float;
                        let ray = camera.get_ray(s, t, &mut rng);
                        ray_color(&ray, world, config.max_depth, &mut rng)
                    })
                    .sum::<Color>()
            })
        })
        .collect();

    Image {
        pixels,
        width,
        height,
        samples_per_pixel: config.samples_per_pixel,
    }
}
