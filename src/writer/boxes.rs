use crate::encode::encode_ascii;
use crate::legacy;
use crate::mesh::AxisBox;
use crate::options::WriteOptions;
use crate::report::WriteReport;
use crate::types::Coordinate;
use crate::utils;
use crate::Error;

use std::io::Write;
use std::path::Path;

/// Writes axis aligned boxes to a legacy ascii `UNSTRUCTURED_GRID`, one quad (2D) or
/// hexahedron (3D) per box. Corners are not shared between boxes.
#[derive(Debug)]
pub struct BoxWriter<'a, T, const D: usize> {
    boxes: Vec<&'a [AxisBox<T, D>]>,
}

impl<'a, T, const D: usize> Default for BoxWriter<'a, T, D> {
    fn default() -> Self {
        Self { boxes: Vec::new() }
    }
}

impl<'a, T: Coordinate, const D: usize> BoxWriter<'a, T, D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, boxes: &'a [AxisBox<T, D>]) {
        self.boxes.push(boxes);
    }

    pub fn write<P: AsRef<Path>>(
        &self,
        path: P,
        options: &WriteOptions,
    ) -> Result<WriteReport, Error> {
        let file = utils::create(path.as_ref())?;
        self.write_to(file, options)
    }

    pub fn write_to<W: Write>(&self, mut sink: W, options: &WriteOptions) -> Result<WriteReport, Error> {
        let cell_type = super::cell_type::<D>()?;

        let mut report = WriteReport::default();
        super::legacy_encoding(options.encoding, &mut report);
        let field_data = options.field_data(&mut report);

        let corners = cell_type.corners();
        let n_boxes: usize = self.boxes.iter().map(|b| b.len()).sum();
        let n_points = n_boxes * corners;

        legacy::write_header(&mut sink, options.title, "UNSTRUCTURED_GRID")?;
        legacy::write_field_data(&mut sink, &field_data)?;

        writeln!(sink, "POINTS {} {}", n_points, T::SCALAR.legacy_tag())?;
        for axis_box in self.boxes.iter().flat_map(|b| b.iter()) {
            for corner in axis_box.corners() {
                let line: Vec<String> = (0..3)
                    .map(|d| encode_ascii(corner.get(d).copied().unwrap_or_else(T::zero).to_scalar()))
                    .collect();
                writeln!(sink, "{}", line.join(" "))?;
            }
        }

        writeln!(sink, "CELLS {} {}", n_boxes, n_boxes * (corners + 1))?;
        for b in 0..n_boxes {
            let ids: Vec<String> = (b * corners..(b + 1) * corners)
                .map(|i| i.to_string())
                .collect();
            writeln!(sink, "{} {}", corners, ids.join(" "))?;
        }

        writeln!(sink, "CELL_TYPES {}", n_boxes)?;
        for _ in 0..n_boxes {
            writeln!(sink, "{}", cell_type.code())?;
        }
        sink.flush()?;

        report.points = n_points;
        report.cells = n_boxes;
        Ok(report)
    }
}
