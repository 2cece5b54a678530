//! lumen CLI - build, inspect and benchmark BVHs over procedural scenes.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lumen_bvh::shapes::Shape;
use lumen_bvh::{Aabb3, Bvh, BvhConfig, Primitive, Ray};
use lumen_math::{Point3, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod scene;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Bounding volume hierarchy tools for the lumen ray tracer", long_about = None)]
struct Cli {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SceneArgs {
    /// Objects per side of the lattice scene
    #[arg(long, global = true, default_value_t = 10)]
    grid: usize,
    /// Distance between lattice points
    #[arg(long, global = true, default_value_t = 2.0)]
    spacing: f64,
    /// TOML file with BVH parameters
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the shape of the hierarchy
    Stats,
    /// Trace one ray through the scene
    Probe {
        /// Ray origin as x,y,z
        #[arg(long, value_parser = scene::parse_vec3, allow_hyphen_values = true)]
        origin: Vec3,
        /// Ray direction as x,y,z
        #[arg(long, value_parser = scene::parse_vec3, allow_hyphen_values = true)]
        dir: Vec3,
        /// Also test occlusion up to this distance
        #[arg(long)]
        length: Option<f64>,
    },
    /// Compare BVH queries against a brute-force scan
    Bench {
        /// Number of random rays
        #[arg(long, default_value_t = 10_000)]
        rays: usize,
        /// Random seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.scene.config.as_deref())?;
    let shapes = scene::lattice(cli.scene.grid, cli.scene.spacing);
    log::info!(
        "scene: {} objects ({}^3 lattice, spacing {})",
        shapes.len(),
        cli.scene.grid,
        cli.scene.spacing
    );

    let start = Instant::now();
    let bvh = Bvh::build_with(&shapes, &config)?;
    log::info!("built in {:.2?}", start.elapsed());

    match cli.command {
        Commands::Stats => {
            println!("{}", bvh.stats());
            println!("root box: {:?} .. {:?}", bvh.root_aabb().min, bvh.root_aabb().max);
        }
        Commands::Probe {
            origin,
            dir,
            length,
        } => {
            probe(&bvh, Point3::from(origin), dir, length)?;
        }
        Commands::Bench { rays, seed } => {
            bench(&bvh, &shapes, rays, seed)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<BvhConfig> {
    let Some(path) = path else {
        return Ok(BvhConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = BvhConfig::from_toml_str(&text)
        .with_context(|| format!("failed to load {}", path.display()))?;
    log::debug!("loaded {config:?} from {}", path.display());
    Ok(config)
}

fn probe(bvh: &Bvh<'_, Shape>, origin: Point3, dir: Vec3, length: Option<f64>) -> Result<()> {
    if dir.norm() == 0.0 || !dir.iter().all(|c| c.is_finite()) {
        anyhow::bail!("direction must be finite and non-zero");
    }

    let ray = Ray::new(origin, dir);
    let mut stats = Default::default();
    match bvh.closest_hit_with_stats(&ray, &mut stats) {
        Some(hit) => println!(
            "hit {:?} at t = {:.6}, point ({:.6}, {:.6}, {:.6})",
            hit.object, hit.t, hit.point.x, hit.point.y, hit.point.z
        ),
        None => println!("miss"),
    }
    println!("{stats:?}");

    if let Some(length) = length {
        let span = ray.direction.into_inner() * length;
        let occluded = bvh.is_occluded(&origin, &span);
        println!("occluded within {length}: {occluded}");
    }

    Ok(())
}

/// Rays from random points around `bounds` towards random points inside it.
fn random_rays(bounds: &Aabb3, count: usize, seed: u64) -> Vec<Ray> {
    let (min, max) = (bounds.min, bounds.max);
    let center = bounds.center();
    let reach = (max - min).norm();
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            let offset = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let origin = center + offset * reach;
            let target = Point3::new(
                rng.gen_range(min.x..=max.x),
                rng.gen_range(min.y..=max.y),
                rng.gen_range(min.z..=max.z),
            );
            Ray::new(origin, target - origin)
        })
        .collect()
}

fn brute_force_closest(shapes: &[Shape], ray: &Ray) -> Option<f64> {
    shapes
        .iter()
        .filter_map(|s| s.intersect(ray))
        .min_by(f64::total_cmp)
}

fn bench(bvh: &Bvh<'_, Shape>, shapes: &[Shape], count: usize, seed: u64) -> Result<()> {
    if bvh.is_empty() {
        anyhow::bail!("nothing to trace: the scene is empty");
    }

    let root = bvh.root_aabb();
    let rays = random_rays(root, count, seed);
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    let lengths: Vec<f64> = (0..count)
        .map(|_| rng.gen_range(0.0..(root.max - root.min).norm()))
        .collect();

    let start = Instant::now();
    let hits: Vec<Option<f64>> = rays.iter().map(|r| bvh.closest_hit(r).map(|h| h.t)).collect();
    let bvh_time = start.elapsed();

    let start = Instant::now();
    let parallel = bvh.closest_hits(&rays);
    let parallel_time = start.elapsed();

    let start = Instant::now();
    let expected: Vec<Option<f64>> = rays.iter().map(|r| brute_force_closest(shapes, r)).collect();
    let brute_time = start.elapsed();

    let hit_mismatches = hits
        .iter()
        .zip(&parallel)
        .zip(&expected)
        .filter(|&((a, p), e)| *a != *e || p.map(|h| h.t) != *e)
        .count();

    let start = Instant::now();
    let occluded: Vec<bool> = rays
        .iter()
        .zip(&lengths)
        .map(|(r, &l)| bvh.occluded_within(r, l, &mut Default::default()))
        .collect();
    let occlusion_time = start.elapsed();

    let occlusion_mismatches = rays
        .iter()
        .zip(&lengths)
        .zip(&occluded)
        .filter(|&((r, &l), &o)| {
            let expected = shapes.iter().any(|s| s.intersect(r).is_some_and(|t| t < l));
            expected != o
        })
        .count();

    let hit_count = expected.iter().filter(|t| t.is_some()).count();
    println!("{count} rays, {hit_count} hits");
    println!(
        "nearest:   bvh {bvh_time:.2?}, bvh parallel {parallel_time:.2?}, brute force {brute_time:.2?}"
    );
    println!("occlusion: bvh {occlusion_time:.2?}");
    println!("mismatches: nearest {hit_mismatches}, occlusion {occlusion_mismatches}");

    if hit_mismatches + occlusion_mismatches > 0 {
        log::warn!("BVH results disagree with brute force");
    }

    Ok(())
}
