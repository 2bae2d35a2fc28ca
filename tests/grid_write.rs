mod common;

use ndarray::{Array1, Array2};
use vtk_writer::{
    DomainBox, Encoding, GridLayout, GridWriter, Patch, StructuredGridWriter, Warning,
    WriteOptions,
};

fn line_writer(grid: &Array1<f64>, layout: GridLayout) -> GridWriter<'_, Array1<f64>, f64, 1> {
    let mut writer = GridWriter::new(layout);
    writer.add(Patch::new(grid, [0.0], [0.1], DomainBox::new([1], [14])));
    writer.add(Patch::new(grid, [5.0], [0.2], DomainBox::new([2], [13])));
    writer
}

fn to_document(bytes: &[u8]) -> common::Document {
    common::parse(std::str::from_utf8(bytes).unwrap())
}

#[test]
fn line_patches_are_independent_pieces() {
    let grid = Array1::from_shape_fn(16, |i| i as f64);
    let writer = line_writer(&grid, GridLayout::Pieces);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lines.vtu");
    let report = writer.write(&path, &WriteOptions::new()).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.points, 28);
    assert_eq!(report.cells, 26);

    let document = common::parse(&common::read(&path));
    assert_eq!(document.named("VTKFile")[0].attr("type"), "UnstructuredGrid");

    let pieces = document.pieces();
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[0].attr("NumberOfPoints"), "15");
    assert_eq!(pieces[0].attr("NumberOfCells"), "14");
    assert_eq!(pieces[1].attr("NumberOfPoints"), "13");
    assert_eq!(pieces[1].attr("NumberOfCells"), "12");

    let first: Vec<f64> = (1..=15).map(|i| i as f64).collect();
    let second: Vec<f64> = (2..=14).map(|i| i as f64).collect();
    assert_eq!(document.array("PointData", 0, "attr0").values(), first);
    assert_eq!(document.array("PointData", 1, "attr0").values(), second);

    // points are padded to three components, at offset + index * spacing
    let points = document.section("Points", 1)[0].values();
    assert_eq!(points.len(), 13 * 3);
    assert!((points[0] - 5.4).abs() < 1e-12);
    assert_eq!(points[1..3], [0.0, 0.0]);

    let types = document.array("Cells", 0, "types").values();
    assert!(types.iter().all(|t| *t == 3.0));
    let connectivity = document.array("Cells", 1, "connectivity").values();
    assert_eq!(connectivity[..4], [0.0, 1.0, 1.0, 2.0]);
}

#[test]
fn merged_layout_shifts_connectivity() {
    let grid = Array1::from_shape_fn(16, |i| i as f64);
    let writer = line_writer(&grid, GridLayout::Merged);

    let mut out = Vec::new();
    writer.write_to(&mut out, &WriteOptions::new()).unwrap();
    let document = to_document(&out);

    let pieces = document.pieces();
    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0].attr("NumberOfPoints"), "28");
    assert_eq!(pieces[0].attr("NumberOfCells"), "26");

    let connectivity = document.array("Cells", 0, "connectivity").values();
    assert_eq!(connectivity[27], 14.0);
    assert_eq!(connectivity[28..30], [15.0, 16.0]);
    let offsets = document.array("Cells", 0, "offsets").values();
    assert_eq!(offsets.last(), Some(&52.0));
}

#[test]
fn writing_twice_is_identical() {
    let grid = Array1::from_shape_fn(16, |i| (i as f64).sqrt());
    let writer = line_writer(&grid, GridLayout::Pieces);

    let dir = tempfile::tempdir().unwrap();
    for encoding in [Encoding::Ascii, Encoding::Binary] {
        let options = WriteOptions::new().encoding(encoding).meta("time=1.5");
        let first = dir.path().join("first.vtu");
        let second = dir.path().join("second.vtu");
        writer.write(&first, &options).unwrap();
        writer.write(&second, &options).unwrap();
        assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
    }
}

#[test]
fn missing_nodes_are_zero_filled() {
    // the enlarged domain needs index 15, which this grid does not have
    let grid = Array1::from_shape_fn(15, |i| i as f64 + 1.0);
    let mut writer = GridWriter::new(GridLayout::Pieces);
    writer.add(Patch::new(&grid, [0.0], [1.0], DomainBox::new([1], [14])));

    let mut out = Vec::new();
    let report = writer.write_to(&mut out, &WriteOptions::new()).unwrap();
    assert_eq!(
        report.warnings,
        vec![Warning::ShapeMismatch {
            context: "patch values",
            expected: 15,
            found: 14,
        }]
    );

    let values = to_document(&out).array("PointData", 0, "attr0").values();
    assert_eq!(values.len(), 15);
    assert_eq!(values[13], 15.0);
    assert_eq!(values[14], 0.0);
}

#[test]
fn quads_without_enlargement() {
    let grid = Array2::from_shape_fn((3, 3), |(x, y)| (x + 10 * y) as i64);
    let mut writer = GridWriter::new(GridLayout::Pieces).enlarge_upper(false);
    writer.add(Patch::whole(&grid, [0.0f32, 0.0], [1.0, 1.0]));

    let mut out = Vec::new();
    let report = writer
        .write_to(&mut out, &WriteOptions::new().encoding(Encoding::Binary))
        .unwrap();
    assert_eq!(report.points, 9);
    assert_eq!(report.cells, 4);

    let document = to_document(&out);
    assert_eq!(
        document.array("Cells", 0, "types").values(),
        vec![9.0; 4]
    );
    assert_eq!(
        document.array("Cells", 0, "offsets").values(),
        vec![4.0, 8.0, 12.0, 16.0]
    );
    // x varies fastest, corners run around the quad
    assert_eq!(
        document.array("Cells", 0, "connectivity").values()[..4],
        [0.0, 1.0, 4.0, 3.0]
    );
    assert_eq!(
        document.array("PointData", 0, "attr0").values(),
        vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0, 20.0, 21.0, 22.0]
    );
}

#[test]
fn structured_extents_follow_index_offsets() {
    let grid = Array2::from_shape_fn((5, 4), |(x, y)| (x as u64, y as f32));
    let mut writer = StructuredGridWriter::new();
    writer.add(Patch::whole(&grid, [0.0, 0.0], [0.5, 0.5]));
    writer.add(Patch::whole(&grid, [2.0, 0.0], [0.5, 0.5]).with_index_offset([4, 0]));

    let names = ["i", "y"];
    let mut out = Vec::new();
    let report = writer
        .write_to(&mut out, &WriteOptions::new().names(&names))
        .unwrap();
    assert!(report.is_complete());
    assert_eq!(report.points, 40);
    assert_eq!(report.cells, 24);

    let document = to_document(&out);
    assert_eq!(document.named("VTKFile")[0].attr("type"), "StructuredGrid");
    assert_eq!(
        document.named("StructuredGrid")[0].attr("WholeExtent"),
        "0 8 0 3 0 0"
    );

    let extents: Vec<&str> = document
        .pieces()
        .iter()
        .map(|piece| piece.attr("Extent"))
        .collect();
    assert_eq!(extents, vec!["0 4 0 3 0 0", "4 8 0 3 0 0"]);

    let i = document.array("PointData", 1, "i");
    assert_eq!(i.element.attr("type"), "UInt64");
    assert_eq!(i.values()[..5], [0.0, 1.0, 2.0, 3.0, 4.0]);
}
