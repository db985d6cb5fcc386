//! vertexanim - batch reduction of vertex-animated meshes
//!
//! Loads meshes from JSON documents, welds vertices and drops redundant
//! keyframes, then writes the results back and reports per-mesh savings.

mod io;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use vertexanim_core::Drawable;
use vertexanim_reduce::{KeyframeReducer, MeshReducer, ReductionOptions, ReductionStats};

#[derive(Parser)]
#[command(name = "vertexanim")]
#[command(about = "Reduce vertex-animated meshes by welding vertices and dropping keyframes")]
#[command(version)]
struct Cli {
    /// Input mesh files (JSON)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory (default: overwrite inputs that changed)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Reduce and report without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Start from the lossless preset instead of the console preset
    #[arg(long)]
    lossless: bool,

    /// Only drop keyframes; keep every vertex and triangle
    #[arg(long)]
    frames_only: bool,

    /// Max position drift for welding (fraction of mesh scale)
    #[arg(long)]
    position_tolerance: Option<f32>,

    /// Max UV drift for welding (0..1)
    #[arg(long)]
    uv_tolerance: Option<f32>,

    /// Max face-normal angle for welding in degrees (0 disables the check)
    #[arg(long)]
    normal_angle: Option<f32>,

    /// Max interpolation error for dropped frames (fraction of mesh scale)
    #[arg(long)]
    frame_tolerance: Option<f32>,

    /// Per-vertex frame tolerance growth with vertex motion
    #[arg(long)]
    motion_scale: Option<f32>,

    /// UV snapping grid (0 disables snapping)
    #[arg(long)]
    uv_snap_grid: Option<f32>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> ReductionOptions {
        let mut options = if self.lossless {
            ReductionOptions::lossless()
        } else {
            ReductionOptions::default()
        };
        if let Some(v) = self.position_tolerance {
            options.position_tolerance = v;
        }
        if let Some(v) = self.uv_tolerance {
            options.uv_tolerance = v;
        }
        if let Some(v) = self.normal_angle {
            options.normal_angle_tolerance_deg = v;
        }
        if let Some(v) = self.frame_tolerance {
            options.frame_error_tolerance = v;
        }
        if let Some(v) = self.motion_scale {
            options.motion_error_scale = v;
        }
        if let Some(v) = self.uv_snap_grid {
            options.uv_snap_grid = v;
        }
        options
    }

    fn reducer(&self) -> KeyframeReducer {
        if self.frames_only {
            KeyframeReducer::frames_only(self.options())
        } else {
            KeyframeReducer::new(self.options())
        }
    }

    /// Where the reduced copy of `input` goes, or `None` if nothing should be written
    fn destination(&self, input: &Path, changed: bool) -> Option<PathBuf> {
        if self.dry_run {
            return None;
        }
        match &self.output {
            Some(dir) => Some(dir.join(input.file_name()?)),
            None => changed.then(|| input.to_path_buf()),
        }
    }
}

/// Fail if two inputs would be written to the same file in the output directory
fn check_output_collisions(cli: &Cli) -> Result<()> {
    let Some(dir) = &cli.output else {
        return Ok(());
    };

    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    for input in &cli.inputs {
        let name = input
            .file_name()
            .with_context(|| format!("Input has no file name: {:?}", input))?;
        let target = dir.join(name);
        if let Some(previous) = claimed.insert(target.clone(), input.as_path()) {
            bail!(
                "Inputs {:?} and {:?} would both be written to {:?}",
                previous,
                input,
                target
            );
        }
    }
    Ok(())
}

fn process_file(cli: &Cli, reducer: &KeyframeReducer, input: &Path) -> Result<ReductionStats> {
    let mut mesh =
        io::read_mesh(input).with_context(|| format!("Failed to load mesh: {:?}", input))?;
    mesh.validate()
        .with_context(|| format!("Invalid mesh: {:?}", input))?;
    tracing::debug!(
        "Loaded '{}': {} verts x {} frames, center {:?}",
        mesh.name,
        mesh.frame_vertex_count,
        mesh.anim_frame_count,
        mesh.center()
    );

    let stats = reducer
        .reduce_mesh(&mut mesh)
        .with_context(|| format!("Failed to reduce mesh: {:?}", input))?;

    if let Some(output) = cli.destination(input, stats.changed) {
        io::write_mesh(&mesh, &output)
            .with_context(|| format!("Failed to write mesh: {:?}", output))?;
        tracing::debug!("Wrote {:?}", output);
    }

    Ok(stats)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    check_output_collisions(&cli)?;
    if let Some(dir) = &cli.output {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
    }

    let reducer = cli.reducer();
    tracing::info!("Reducing {} mesh file(s) with {:?}", cli.inputs.len(), reducer.options);

    let mut total_before = 0;
    let mut total_after = 0;
    let mut reduced = 0;
    for input in &cli.inputs {
        let stats = process_file(&cli, &reducer, input)?;
        println!("- {stats}");
        total_before += stats.original_bytes;
        total_after += stats.reduced_bytes;
        if stats.changed {
            reduced += 1;
        }
    }

    println!(
        "Reduced {} of {} meshes: {} -> {} bytes",
        reduced,
        cli.inputs.len(),
        total_before,
        total_after
    );
    Ok(())
}
