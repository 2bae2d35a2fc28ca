use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array3;

use vtk_writer::{AmrWriter, Patch, WriteOptions};

/// `per_side` patches of `n` nodes per side, each sharing a face with its neighbours
fn write_tiled(grid: &Array3<f64>, per_side: i64, n: i64) {
    let cells = (per_side * (n - 1)) as usize;
    let mut writer = AmrWriter::new();
    let level = writer.add_level([cells; 3]);

    for i in 0..per_side {
        for j in 0..per_side {
            for k in 0..per_side {
                let offset_i = [i * (n - 1), j * (n - 1), k * (n - 1)];
                let offset = offset_i.map(|o| o as f64);
                writer.add(
                    level,
                    Patch::whole(grid, offset, [1.0; 3]).with_index_offset(offset_i),
                );
            }
        }
    }

    writer.write_to(Vec::new(), &WriteOptions::new()).unwrap();
}

fn amr_dedup_bench(c: &mut Criterion) {
    let n = 17;
    let grid = Array3::from_elem((n, n, n), 1.0f64);

    c.bench_function("amr dedup 2x2x2", |b| {
        b.iter(|| write_tiled(black_box(&grid), 2, n as i64))
    });
    c.bench_function("amr dedup 4x4x4", |b| {
        b.iter(|| write_tiled(black_box(&grid), 4, n as i64))
    });
}

criterion_group!(benches, amr_dedup_bench);
criterion_main!(benches);
