mod common;

use ndarray::{Array2, Array3};
use proptest::prelude::*;
use std::collections::HashSet;
use vtk_writer::{AmrWriter, DomainBox, Encoding, Patch, Warning, WriteOptions};

fn to_document(bytes: &[u8]) -> common::Document {
    common::parse(std::str::from_utf8(bytes).unwrap())
}

#[test]
fn shared_face_is_written_once() {
    let left = Array2::from_elem((5, 3), 1.0f64);
    let right = Array2::from_elem((5, 3), 2.0f64);

    let mut writer = AmrWriter::new();
    let level = writer.add_level([8, 4]);
    writer.add(level, Patch::whole(&left, [0.0, 0.0], [1.0, 1.0]));
    writer.add(
        level,
        Patch::whole(&right, [4.0, 0.0], [1.0, 1.0]).with_index_offset([4, 0]),
    );

    let mut out = Vec::new();
    let report = writer
        .write_to(&mut out, &WriteOptions::new().encoding(Encoding::Binary))
        .unwrap();
    assert!(report.is_complete());
    assert_eq!(report.points, 27);
    assert_eq!(report.cells, 16);

    let document = to_document(&out);
    assert_eq!(document.pieces().len(), 1);

    // the shared column keeps the values of the patch added first
    let values = document.array("PointData", 0, "attr0").values();
    assert_eq!(values.iter().filter(|v| **v == 1.0).count(), 15);
    assert_eq!(values.iter().filter(|v| **v == 2.0).count(), 12);

    let connectivity = document.array("Cells", 0, "connectivity").values();
    assert_eq!(connectivity.len(), 16 * 4);
    assert!(connectivity.iter().all(|i| *i < 27.0));

    let distinct: HashSet<Vec<u64>> = connectivity
        .chunks(4)
        .map(|cell| cell.iter().map(|i| *i as u64).collect())
        .collect();
    assert_eq!(distinct.len(), 16);
}

#[test]
fn levels_have_separate_vertices() {
    let coarse = Array2::from_elem((5, 5), 0.0f32);
    let fine = Array2::from_elem((3, 3), 1.0f32);

    let mut writer = AmrWriter::new();
    let level_0 = writer.add_level([4, 4]);
    let level_1 = writer.add_level([8, 8]);
    // added fine first, still numbered after the coarse level
    writer.add(
        level_1,
        Patch::whole(&fine, [0.5, 0.5], [0.25, 0.25]).with_index_offset([2, 2]),
    );
    writer.add(level_0, Patch::whole(&coarse, [0.0, 0.0], [0.5, 0.5]));

    let mut out = Vec::new();
    let report = writer.write_to(&mut out, &WriteOptions::new()).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.points, 34);
    assert_eq!(report.cells, 20);

    let values = to_document(&out).array("PointData", 0, "attr0").values();
    assert!(values[..25].iter().all(|v| *v == 0.0));
    assert!(values[25..].iter().all(|v| *v == 1.0));
}

#[test]
fn vertices_outside_the_level_are_skipped() {
    let grid = Array2::from_elem((5, 3), 1i32);

    let mut writer = AmrWriter::new();
    let level = writer.add_level([8, 4]);
    writer.add(level, Patch::whole(&grid, [0.0, 0.0], [1.0, 1.0]).with_index_offset([6, 0]));

    let mut out = Vec::new();
    let report = writer.write_to(&mut out, &WriteOptions::new()).unwrap();
    assert_eq!(
        report.warnings,
        vec![Warning::OutsideLevel {
            level: 0,
            patch: 0,
            skipped: 6,
        }]
    );
    assert_eq!(report.points, 9);
    assert_eq!(report.cells, 4);
}

#[test]
fn undeclared_level_is_reported() {
    let grid = Array2::from_elem((3, 3), 1i32);

    let mut writer = AmrWriter::new();
    let level = writer.add_level([4, 4]);
    writer.add(3, Patch::whole(&grid, [0.0, 0.0], [1.0, 1.0]));
    writer.add(level, Patch::whole(&grid, [0.0, 0.0], [1.0, 1.0]));

    let mut out = Vec::new();
    let report = writer.write_to(&mut out, &WriteOptions::new()).unwrap();
    assert_eq!(
        report.warnings,
        vec![Warning::UndeclaredLevel { level: 3, patch: 0 }]
    );
    assert_eq!(report.points, 9);
    assert_eq!(report.cells, 4);
}

#[test]
fn skipped_patches_are_not_checked_against_their_grid() {
    let grid = Array2::from_elem((3, 3), 1i32);
    let declared = Array2::from_elem((3, 3), 2i32);

    let mut writer = AmrWriter::new();
    let level = writer.add_level([4, 4]);
    // the domain reaches past the grid, but the level does not exist
    writer.add(
        2,
        Patch::new(&grid, [0.0, 0.0], [1.0, 1.0], DomainBox::new([0, 0], [4, 4])),
    );
    writer.add(level, Patch::whole(&declared, [0.0, 0.0], [1.0, 1.0]));

    let mut out = Vec::new();
    let report = writer.write_to(&mut out, &WriteOptions::new()).unwrap();
    assert_eq!(
        report.warnings,
        vec![Warning::UndeclaredLevel { level: 2, patch: 0 }]
    );
    assert_eq!(report.points, 9);
}

#[test]
fn hexahedra_share_a_face() {
    let left = Array3::from_elem((3, 3, 3), 1.0f64);
    let right = Array3::from_elem((3, 3, 3), 2.0f64);

    let mut writer = AmrWriter::new();
    let level = writer.add_level([4, 2, 2]);
    writer.add(level, Patch::whole(&left, [0.0, 0.0, 0.0], [0.5, 0.5, 0.5]));
    writer.add(
        level,
        Patch::whole(&right, [1.0, 0.0, 0.0], [0.5, 0.5, 0.5]).with_index_offset([2, 0, 0]),
    );

    let mut out = Vec::new();
    let report = writer
        .write_to(&mut out, &WriteOptions::new().encoding(Encoding::Binary))
        .unwrap();
    assert!(report.is_complete());
    assert_eq!(report.points, 45);
    assert_eq!(report.cells, 16);

    let document = to_document(&out);
    assert_eq!(document.pieces()[0].attr("NumberOfPoints"), "45");
    assert_eq!(document.pieces()[0].attr("NumberOfCells"), "16");
    assert_eq!(
        document.array("Cells", 0, "types").values(),
        vec![12.0; 16]
    );

    let connectivity = document.array("Cells", 0, "connectivity").values();
    assert_eq!(connectivity.len(), 16 * 8);
    assert!(connectivity.iter().all(|i| *i < 45.0));

    let values = document.array("PointData", 0, "attr0").values();
    assert_eq!(values.iter().filter(|v| **v == 1.0).count(), 27);
    assert_eq!(values.iter().filter(|v| **v == 2.0).count(), 18);
}

proptest! {
    #[test]
    fn points_are_the_distinct_vertices(
        patches in prop::collection::vec((0i64..8, 0i64..8, 1i64..5, 1i64..5), 1..5)
    ) {
        let grid = Array2::from_elem((5, 5), 0.5f64);

        let mut writer = AmrWriter::new();
        let level = writer.add_level([12, 12]);
        let mut vertices = HashSet::new();
        for (ox, oy, lx, ly) in &patches {
            let domain = DomainBox::new([0, 0], [lx - 1, ly - 1]);
            writer.add(
                level,
                Patch::new(&grid, [*ox as f64, *oy as f64], [1.0, 1.0], domain)
                    .with_index_offset([*ox, *oy]),
            );
            for x in 0..*lx {
                for y in 0..*ly {
                    vertices.insert((ox + x, oy + y));
                }
            }
        }

        let cells = vertices
            .iter()
            .filter(|(x, y)| {
                [(x + 1, *y), (x + 1, y + 1), (*x, y + 1)]
                    .iter()
                    .all(|corner| vertices.contains(corner))
            })
            .count();

        let mut out = Vec::new();
        let report = writer.write_to(&mut out, &WriteOptions::new()).unwrap();
        prop_assert!(report.is_complete());
        prop_assert_eq!(report.points, vertices.len());
        prop_assert_eq!(report.cells, cells);

        let document = to_document(&out);
        let connectivity = document.array("Cells", 0, "connectivity").values();
        prop_assert!(connectivity.iter().all(|i| (*i as usize) < vertices.len()));
    }
}
