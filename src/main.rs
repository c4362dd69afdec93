use anyhow::Context;
use indicatif::ProgressBar;
use pt::{camera::Camera, config::RenderConfig, render, scenes};
use rand::{rngs::StdRng, SeedableRng};
use std::{fs::File, io::BufWriter, time::Instant};

const OUT_PATH: &str = "out.ppm";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = RenderConfig::default();
    config.validate()?;

    let camera = Camera::new(
        config.lookfrom,
        config.lookat,
        config.vup,
        config.vertical_fov,
        config.aspect_ratio,
        config.aperture,
        config.focus_distance,
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let world = scenes::random_scene(&mut rng);

    log::info!(
        "rendering {}x{} at {} samples/pixel, depth {}, {} shapes",
        config.image_width,
        config.image_height(),
        config.samples_per_pixel,
        config.max_depth,
        world.len()
    );

    let start = Instant::now();
    let progress = ProgressBar::new(config.image_height() as u64);
    let image = render::render(&camera, &world, &config, progress);
    log::info!("rendered in {:.1}s", start.elapsed().as_secs_f64());

    let file = File::create(OUT_PATH).with_context(|| format!("creating {OUT_PATH}"))?;
    let mut writer = BufWriter::new(file);
    image
        .write_ppm(&mut writer)
        .with_context(|| format!("writing {OUT_PATH}"))?;
    log::info!("wrote {OUT_PATH}");

    Ok(())
}
