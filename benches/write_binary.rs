use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array3;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use vtk_writer::{Encoding, GridLayout, GridWriter, Patch, WriteOptions};

fn write_binary(grid: &Array3<f32>) {
    let mut writer = GridWriter::new(GridLayout::Pieces).enlarge_upper(false);
    writer.add(Patch::whole(grid, [0.0f32; 3], [0.1; 3]));

    let sink: Vec<u8> = Vec::new();
    let options = WriteOptions::new().encoding(Encoding::Binary);
    writer.write_to(sink, &options).unwrap();
}

fn write_binary_bench(c: &mut Criterion) {
    for n in [32, 64] {
        let grid: Array3<f32> = Array3::random((n, n, n), Uniform::new(0., 10.));
        c.bench_function(&format!("write binary {}", n), |b| {
            b.iter(|| write_binary(black_box(&grid)))
        });
    }
}

criterion_group!(benches, write_binary_bench);
criterion_main!(benches);
