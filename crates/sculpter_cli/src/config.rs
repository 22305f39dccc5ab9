//! Scene description parsing.
//!
//! ```toml
//! [grid]
//! size = [48, 48, 48]
//! mesh_size = [10.0, 10.0, 10.0]
//!
//! [pipeline]
//! scan_group_width = 524288
//! scan_workers = 4
//!
//! [[shapes]]
//! type = "sphere"
//! center = [24.0, 24.0, 24.0]
//! radius = 12.0
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use sculpter::prelude::*;
use sculpter::samplers::Union;

/// Root configuration of a scene.
#[derive(Debug, Deserialize)]
pub struct Config {
	pub grid: GridConfig,
	/// Pipeline overrides (defaults apply when absent).
	#[serde(default)]
	pub pipeline: PipelineSection,
	/// Shapes combined by union.
	pub shapes: Vec<ShapeConfig>,
}

/// Sampling grid.
#[derive(Debug, Deserialize)]
pub struct GridConfig {
	/// Samples per axis.
	pub size: [u32; 3],
	/// World-space extent of the grid (default: 10 per axis).
	#[serde(default = "default_mesh_size")]
	pub mesh_size: [f32; 3],
}

fn default_mesh_size() -> [f32; 3] {
	DensityFieldMeshSize::default().0.to_array()
}

/// Optional scan settings.
#[derive(Debug, Default, Deserialize)]
pub struct PipelineSection {
	/// Lanes in the scan group (power of two).
	pub scan_group_width: Option<u32>,
	/// Threads cooperating on one scan.
	pub scan_workers: Option<usize>,
}

/// One analytic shape, in grid coordinates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeConfig {
	Sphere {
		center: [f32; 3],
		radius: f32,
	},
	Plane {
		normal: [f32; 3],
		offset: f32,
	},
	Cuboid {
		center: [f32; 3],
		half_extents: [f32; 3],
	},
	Torus {
		center: [f32; 3],
		major_radius: f32,
		minor_radius: f32,
	},
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::parse(&content).with_context(|| format!("Invalid scene: {}", path.display()))
	}

	/// Parse and validate a scene from TOML text.
	pub fn parse(content: &str) -> Result<Self> {
		let config: Config = toml::from_str(content).context("Failed to parse config TOML")?;

		if config.shapes.is_empty() {
			anyhow::bail!("Config must have at least one shape");
		}
		if config.grid.mesh_size.iter().any(|&s| !s.is_finite() || s <= 0.0) {
			anyhow::bail!(
				"mesh_size must be positive on every axis, got {:?}",
				config.grid.mesh_size
			);
		}

		Ok(config)
	}

	pub fn size(&self) -> DensityFieldSize {
		let [x, y, z] = self.grid.size;
		DensityFieldSize::new(x, y, z)
	}

	pub fn mesh_size(&self) -> DensityFieldMeshSize {
		DensityFieldMeshSize(Vec3::from_array(self.grid.mesh_size))
	}

	/// Pipeline configuration with the scene's overrides applied.
	pub fn pipeline_config(&self) -> PipelineConfig {
		let mut config = PipelineConfig::default();
		if let Some(width) = self.pipeline.scan_group_width {
			config = config.with_scan_group_width(width);
		}
		if let Some(workers) = self.pipeline.scan_workers {
			config = config.with_scan_workers(workers);
		}
		config
	}

	/// Union of every configured shape.
	pub fn sampler(&self) -> Union {
		let mut union = Union::new();
		for shape in &self.shapes {
			union.push(shape.to_sampler());
		}
		union
	}
}

impl ShapeConfig {
	pub fn to_sampler(&self) -> Box<dyn DensitySampler> {
		match *self {
			ShapeConfig::Sphere { center, radius } => {
				Box::new(Sphere::new(Vec3::from_array(center), radius))
			}
			ShapeConfig::Plane { normal, offset } => {
				Box::new(Plane::new(Vec3::from_array(normal), offset))
			}
			ShapeConfig::Cuboid {
				center,
				half_extents,
			} => Box::new(Cuboid::new(
				Vec3::from_array(center),
				Vec3::from_array(half_extents),
			)),
			ShapeConfig::Torus {
				center,
				major_radius,
				minor_radius,
			} => Box::new(Torus::new(
				Vec3::from_array(center),
				major_radius,
				minor_radius,
			)),
		}
	}
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
