use std::path::PathBuf;

use anyhow::Context;
use clap::{ Parser, Subcommand };
use log::LevelFilter;

use sphere_tracer::consts::{ CANVAS_WIDTH, CANVAS_HEIGHT, FIELD_OF_VIEW, OUT_FILE };
use sphere_tracer::canvas::Canvas;
use sphere_tracer::scene::Scene;
use sphere_tracer::demos;

/// Renders spheres with Phong shading and hard shadows to PPM images.
#[derive(Parser)]
#[clap(author, version, about)]
struct Args {
    /// Where to write the rendered image.
    #[clap(short, long, global = true, default_value = OUT_FILE)]
    output: PathBuf,

    /// Log debug output (otherwise `RUST_LOG` decides, defaulting to info).
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a scene described by a JSON file.
    Render {
        scene: PathBuf,
    },

    /// Render the built-in shadow scene.
    Shadows {
        #[clap(long, default_value_t = CANVAS_WIDTH)]
        width: usize,

        #[clap(long, default_value_t = CANVAS_HEIGHT)]
        height: usize,
    },

    /// Draw the twelve hour marks of a clock face.
    Clock,

    /// Plot the flight of a projectile.
    Projectile,
}

fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    );

    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }

    builder.init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let canvas: Canvas = match args.command {
        Command::Render { ref scene } => {
            let scene = Scene::load(scene)
                .with_context(|| format!("failed to load {}", scene.display()))?;
            scene.camera.render(&scene.world)?
        },
        Command::Shadows { width, height } => {
            demos::shadows(width, height, FIELD_OF_VIEW)?
        },
        Command::Clock => demos::clock(200)?,
        Command::Projectile => demos::projectile(1000, 500)?,
    };

    canvas.save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    Ok(())
}
