use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;
mod config;
mod logger;
mod scenes;

use cli::Args;
use config::RenderOverrides;
use ember_renderer::{render, Camera};
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let file = match &args.config {
        Some(path) => RenderOverrides::load(path)?,
        None => RenderOverrides::default(),
    };
    let overrides = file.merge(args.overrides());

    // One seed drives both scene layout and sampling
    let seed = overrides.seed.unwrap_or_else(rand::random);
    let mut scene_rng = StdRng::seed_from_u64(seed);
    let scene = args
        .scene
        .build(&args.texture, &mut scene_rng)
        .with_context(|| format!("failed to build scene {:?}", args.scene))?;

    let mut config = scene.render.clone();
    overrides.apply(&mut config);
    config.seed = Some(seed);

    let camera = Camera::new(&scene.camera.with_aspect(config.aspect_ratio()));
    let image = render(&camera, scene.world.as_ref(), &config).context("render failed")?;

    image
        .save_png(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("Done.");

    Ok(())
}
