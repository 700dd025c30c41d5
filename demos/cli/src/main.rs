use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;

use isomesh::{
    field::PointSet,
    mesh::{Mesh, Octree, Settings, Sweep, ThreadPool},
};

/// Builds an isosurface mesh around a cloud of points
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Input file, with one `x y z` point per line
    #[clap(short, long)]
    input: PathBuf,

    /// Number of cells along each axis (must be a power of two)
    #[clap(short, long, default_value_t = 64)]
    grid: u32,

    /// Isolevel, i.e. the radius of the sphere around each point
    #[clap(short, long, default_value_t = 0.15)]
    level: f32,

    /// Size of a single cell
    ///
    /// If this is not provided, the grid is sized to fit every point
    #[clap(short, long)]
    resolution: Option<f32>,

    /// Meshing strategy
    #[clap(short, long, value_enum, default_value_t = Builder::Octree)]
    builder: Builder,

    /// Number of threads to use
    #[clap(short, long)]
    threads: Option<NonZeroUsize>,

    /// Largest octree cell size which is processed without spawning tasks
    #[clap(short, long, default_value_t = 2)]
    cutoff: u32,

    /// Number of times to build the mesh (for benchmarking)
    #[clap(short = 'N', default_value_t = 1)]
    n: usize,

    /// Name of a `.stl` or `.obj` file to write
    #[clap(short, long)]
    out: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone)]
enum Builder {
    /// Octree with pruning and fork-join parallelism
    Octree,
    /// Parallel loop over every cell, without pruning
    Loop,
}

#[derive(Copy, Clone)]
enum Format {
    Stl,
    Obj,
}

fn output_format(out: &Path) -> Result<Format> {
    match out.extension().and_then(|e| e.to_str()) {
        Some("stl") => Ok(Format::Stl),
        Some("obj") => Ok(Format::Obj),
        _ => Err(anyhow!("unknown output format for {out:?}")),
    }
}

////////////////////////////////////////////////////////////////////////////////

fn run_mesh(points: &PointSet, args: &Args, resolution: f32) -> Result<Mesh> {
    let pool: Option<ThreadPool>;
    let threads = match args.threads {
        Some(n) if n.get() == 1 => None,
        Some(n) => {
            pool = Some(ThreadPool::Custom(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n.get())
                    .build()?,
            ));
            pool.as_ref()
        }
        None => Some(&ThreadPool::Global),
    };
    let settings = Settings {
        grid_size: args.grid,
        iso_level: args.level,
        resolution,
        task_cutoff: args.cutoff,
        threads,
    };

    let mut mesh = Mesh::new();
    for _ in 0..args.n {
        mesh = match args.builder {
            Builder::Octree => Octree::build(points, &settings)?,
            Builder::Loop => Sweep::build(points, &settings)?,
        };
    }
    Ok(mesh)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();

    let now = Instant::now();
    let args = Args::parse();
    let format = args.out.as_deref().map(output_format).transpose()?;
    let file = std::fs::File::open(&args.input)
        .with_context(|| format!("could not open {:?}", args.input))?;
    let points = PointSet::from_text(file)?;
    info!("Loaded {} points in {:?}", points.len(), now.elapsed());

    let resolution = match args.resolution {
        Some(r) => r,
        None => points
            .fit_resolution(args.grid, args.level)
            .context("cannot fit a grid around the input points")?,
    };
    info!(
        "Meshing a {0}x{0}x{0} grid with resolution {resolution}",
        args.grid
    );

    let start = Instant::now();
    let mesh = run_mesh(&points, &args, resolution)?;
    info!(
        "Built {}x at {:?} ms/iter",
        args.n,
        start.elapsed().as_micros() as f64 / 1000.0 / (args.n as f64)
    );
    info!(
        "{} triangles; visited {} cells, pruned {}, built {} cubes",
        mesh.triangle_count(),
        mesh.stats.visited,
        mesh.stats.pruned,
        mesh.stats.cubes,
    );

    if let (Some(out), Some(format)) = (args.out, format) {
        let mut f = std::fs::File::create(&out)?;
        match format {
            Format::Stl => {
                info!("Writing STL to {out:?}");
                mesh.write_stl(&mut f)?;
            }
            Format::Obj => {
                info!("Writing OBJ to {out:?}");
                mesh.write_obj(&mut f)?;
            }
        }
    }

    Ok(())
}
