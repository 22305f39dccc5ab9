//! Scene mesher.
//!
//! Samples the shapes of a TOML scene into a density field, extracts the
//! Surface Nets mesh and writes it as OBJ (world-space positions and normals,
//! quad faces).
//!
//! ```text
//! scene.toml ──► Union of shapes ──► DensityField ──► pipeline ──► mesh.obj
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

mod config;
mod obj;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use web_time::Instant;

use sculpter::prelude::*;

use config::Config;

/// Meshes analytic density scenes into OBJ files.
#[derive(Parser, Debug)]
#[command(name = "sculpt")]
#[command(about = "Extracts a Surface Nets mesh from a density scene")]
struct Args {
	/// Path to the scene TOML file.
	#[arg(short, long)]
	config: PathBuf,

	/// Output OBJ path (default: stdout).
	#[arg(short, long)]
	output: Option<PathBuf>,
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let args = Args::parse();

	log::info!("Loading scene from: {}", args.config.display());
	let config = Config::load(&args.config)?;
	let size = config.size();

	log::info!(
		"Sampling {} shapes on a {}x{}x{} grid",
		config.shapes.len(),
		size.0.x,
		size.0.y,
		size.0.z
	);
	let field = DensityField::sample(size, &config.sampler());

	let pipeline =
		SurfaceNetsPipeline::new(config.pipeline_config()).context("Invalid pipeline settings")?;
	let start = Instant::now();
	let mesh = pipeline.run(&field).context("Surface extraction failed")?;
	log::info!(
		"Extracted {} vertices, {} quads in {:.2?}",
		mesh.vertex_count,
		mesh.face_count,
		start.elapsed()
	);

	let positions = mesh.world_positions(size, config.mesh_size());
	let normals = quad_normals(&positions, &mesh.quads);

	match &args.output {
		Some(path) => {
			let file = File::create(path)
				.with_context(|| format!("Failed to create output: {}", path.display()))?;
			obj::write_obj(&mut BufWriter::new(file), &positions, &normals, &mesh.quads)
				.with_context(|| format!("Failed to write: {}", path.display()))?;
			log::info!("Output written to: {}", path.display());
		}
		None => {
			let stdout = io::stdout();
			obj::write_obj(&mut stdout.lock(), &positions, &normals, &mesh.quads)
				.context("Failed to write to stdout")?;
		}
	}

	Ok(())
}
