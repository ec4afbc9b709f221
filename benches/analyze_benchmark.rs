use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use nalgebra::{Point3, Vector3};
use printquote::{TriangleMesh, analyze_mesh};

/// Generate a mesh with the given number of triangles as a tiled strip of
/// upward-facing unwelded triangles, roughly what a decoded upload looks like
/// after normalization.
fn generate_mesh(triangles: usize) -> TriangleMesh {
    let mut positions = Vec::with_capacity(triangles * 3);
    let mut normals = Vec::with_capacity(triangles * 3);

    for i in 0..triangles {
        let x = (i % 1000) as f64;
        let y = (i / 1000) as f64;
        positions.push(Point3::new(x, y, 0.0));
        positions.push(Point3::new(x + 1.0, y, 0.0));
        positions.push(Point3::new(x, y + 1.0, (i % 7) as f64 * 0.1));
        for _ in 0..3 {
            normals.push(Vector3::z());
        }
    }

    TriangleMesh {
        positions,
        normals: Some(normals),
        indices: None,
    }
}

fn bench_analyze_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_mesh");

    for &triangles in &[1_000usize, 10_000, 100_000] {
        let mesh = generate_mesh(triangles);
        group.bench_with_input(
            BenchmarkId::from_parameter(triangles),
            &mesh,
            |b, mesh| b.iter(|| analyze_mesh(black_box(mesh)).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_analyze_mesh);
criterion_main!(benches);
