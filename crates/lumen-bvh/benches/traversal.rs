use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lumen_bvh::shapes::Sphere;
use lumen_bvh::{Bvh, Ray};
use lumen_math::{Point3, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn sphere_grid(n: usize) -> Vec<Sphere> {
    let mut spheres = Vec::with_capacity(n * n * n);
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                spheres.push(Sphere::new(
                    Point3::new(x as f64 * 2.5, y as f64 * 2.5, z as f64 * 2.5),
                    1.0,
                ));
            }
        }
    }
    spheres
}

fn rays(count: usize, extent: f64) -> Vec<Ray> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            let origin = Point3::new(-10.0, rng.gen_range(0.0..extent), rng.gen_range(0.0..extent));
            let target = Point3::new(extent, rng.gen_range(0.0..extent), rng.gen_range(0.0..extent));
            Ray::new(origin, target - origin)
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for n in [8, 16, 24] {
        let spheres = sphere_grid(n);
        group.bench_with_input(BenchmarkId::from_parameter(n * n * n), &spheres, |b, s| {
            b.iter(|| Bvh::build(black_box(s)))
        });
    }
    group.finish();
}

fn bench_closest_hit(c: &mut Criterion) {
    let spheres = sphere_grid(16);
    let bvh = Bvh::build(&spheres);
    let rays = rays(1024, 16.0 * 2.5);

    c.bench_function("closest_hit_1024_rays", |b| {
        b.iter(|| {
            rays.iter()
                .filter(|r| bvh.closest_hit(black_box(r)).is_some())
                .count()
        })
    });

    c.bench_function("closest_hits_parallel_1024_rays", |b| {
        b.iter(|| bvh.closest_hits(black_box(&rays)))
    });
}

fn bench_occlusion(c: &mut Criterion) {
    let spheres = sphere_grid(16);
    let bvh = Bvh::build(&spheres);
    let segments: Vec<(Point3, Vec3)> = rays(1024, 16.0 * 2.5)
        .iter()
        .map(|r| (r.origin, r.direction.into_inner() * 20.0))
        .collect();

    c.bench_function("is_occluded_1024_segments", |b| {
        b.iter(|| {
            segments
                .iter()
                .filter(|(o, s)| bvh.is_occluded(black_box(o), black_box(s)))
                .count()
        })
    });
}

criterion_group!(benches, bench_build, bench_closest_hit, bench_occlusion);
criterion_main!(benches);
