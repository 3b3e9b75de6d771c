//! The record-level GDSII writer.

use std::io::{BufWriter, Write};
use std::path::Path;

use arcstr::ArcStr;
use byteorder::{BigEndian, WriteBytesExt};
use chrono::{Datelike, Timelike, Utc};
use geometry::orientation::Orientation;
use geometry::point::Point;
use geometry::shape::Shape;
use photir::{Cell, Element, Instance, Library, Text};

use crate::{GdsError, GdsLayer, GdsResult, GdsUnits};

/// GDSII record types, with the data-type tag in the low byte.
mod record {
    pub const HEADER: u16 = 0x0002;
    pub const BGNLIB: u16 = 0x0102;
    pub const LIBNAME: u16 = 0x0206;
    pub const UNITS: u16 = 0x0305;
    pub const ENDLIB: u16 = 0x0400;
    pub const BGNSTR: u16 = 0x0502;
    pub const STRNAME: u16 = 0x0606;
    pub const ENDSTR: u16 = 0x0700;
    pub const BOUNDARY: u16 = 0x0800;
    pub const SREF: u16 = 0x0A00;
    pub const TEXT: u16 = 0x0C00;
    pub const LAYER: u16 = 0x0D02;
    pub const DATATYPE: u16 = 0x0E02;
    pub const XY: u16 = 0x1003;
    pub const ENDEL: u16 = 0x1100;
    pub const SNAME: u16 = 0x1206;
    pub const TEXTTYPE: u16 = 0x1602;
    pub const STRING: u16 = 0x1906;
    pub const STRANS: u16 = 0x1A01;
    pub const ANGLE: u16 = 0x1C05;
}

/// The GDSII stream-format version emitted.
const GDS_VERSION: i16 = 600;

/// Options controlling GDS export.
#[derive(Debug, Clone)]
pub struct GdsExportOpts {
    /// Name of the GDS library.
    pub name: ArcStr,
    /// Library units.
    pub units: GdsUnits,
}

/// Writes a library to the given output stream.
pub fn export_gds<W: Write>(
    lib: &Library<GdsLayer>,
    opts: &GdsExportOpts,
    out: &mut W,
) -> GdsResult<()> {
    let mut w = GdsWriter { out };
    let now = timestamp();
    w.record_i16s(record::HEADER, &[GDS_VERSION])?;
    w.record_i16s(record::BGNLIB, &now)?;
    w.record_str(record::LIBNAME, &opts.name)?;
    w.record_f64s(
        record::UNITS,
        &[opts.units.user_per_db(), opts.units.meters_per_db()],
    )?;
    for (name, cell) in lib.cells() {
        w.write_cell(lib, name, cell, &now)?;
    }
    w.record_empty(record::ENDLIB)?;
    Ok(())
}

/// Writes a library to a file at the given path.
pub fn write_gds_file(
    lib: &Library<GdsLayer>,
    opts: &GdsExportOpts,
    path: impl AsRef<Path>,
) -> GdsResult<()> {
    let path = path.as_ref();
    tracing::info!(lib = %opts.name, path = %path.display(), cells = lib.len(), "writing GDS");
    let mut file = BufWriter::new(std::fs::File::create(path)?);
    export_gds(lib, opts, &mut file)?;
    file.flush()?;
    Ok(())
}

struct GdsWriter<'a, W: Write> {
    out: &'a mut W,
}

impl<W: Write> GdsWriter<'_, W> {
    fn header(&mut self, rtype: u16, payload_len: usize) -> GdsResult<()> {
        self.out.write_u16::<BigEndian>((payload_len + 4) as u16)?;
        self.out.write_u16::<BigEndian>(rtype)?;
        Ok(())
    }

    fn record_empty(&mut self, rtype: u16) -> GdsResult<()> {
        self.header(rtype, 0)
    }

    fn record_i16s(&mut self, rtype: u16, data: &[i16]) -> GdsResult<()> {
        self.header(rtype, 2 * data.len())?;
        for val in data {
            self.out.write_i16::<BigEndian>(*val)?;
        }
        Ok(())
    }

    fn record_i32s(&mut self, rtype: u16, data: &[i32]) -> GdsResult<()> {
        self.header(rtype, 4 * data.len())?;
        for val in data {
            self.out.write_i32::<BigEndian>(*val)?;
        }
        Ok(())
    }

    fn record_f64s(&mut self, rtype: u16, data: &[f64]) -> GdsResult<()> {
        self.header(rtype, 8 * data.len())?;
        for val in data {
            self.out.write_u64::<BigEndian>(gds_float(*val))?;
        }
        Ok(())
    }

    /// Strings of odd length are padded with a zero byte.
    fn record_str(&mut self, rtype: u16, s: &str) -> GdsResult<()> {
        let bytes = s.as_bytes();
        self.header(rtype, bytes.len() + bytes.len() % 2)?;
        self.out.write_all(bytes)?;
        if bytes.len() % 2 != 0 {
            self.out.write_u8(0)?;
        }
        Ok(())
    }

    fn record_bits(&mut self, rtype: u16, d0: u8, d1: u8) -> GdsResult<()> {
        self.header(rtype, 2)?;
        self.out.write_u8(d0)?;
        self.out.write_u8(d1)?;
        Ok(())
    }

    fn write_cell(
        &mut self,
        lib: &Library<GdsLayer>,
        name: &str,
        cell: &Cell<GdsLayer>,
        now: &[i16; 12],
    ) -> GdsResult<()> {
        self.record_i16s(record::BGNSTR, now)?;
        self.record_str(record::STRNAME, name)?;
        for element in cell.elements() {
            match element {
                Element::Shape(shape) => self.write_boundary(*shape.layer(), shape.shape())?,
                Element::Text(text) => self.write_text(text)?,
            }
        }
        for inst in cell.instances() {
            self.write_sref(lib, inst)?;
        }
        self.record_empty(record::ENDSTR)?;
        Ok(())
    }

    fn write_boundary(&mut self, layer: GdsLayer, shape: &Shape) -> GdsResult<()> {
        self.record_empty(record::BOUNDARY)?;
        self.record_i16s(record::LAYER, &[layer.0 as i16])?;
        self.record_i16s(record::DATATYPE, &[layer.1 as i16])?;
        let mut xy = Vec::new();
        match shape {
            Shape::Rect(rect) => {
                for p in rect.corners() {
                    push_point(&mut xy, p)?;
                }
                push_point(&mut xy, rect.corners()[0])?;
            }
            Shape::Polygon(poly) => {
                for p in poly.points() {
                    push_point(&mut xy, *p)?;
                }
                if let Some(first) = poly.points().first() {
                    push_point(&mut xy, *first)?;
                }
            }
        }
        self.record_i32s(record::XY, &xy)?;
        self.record_empty(record::ENDEL)?;
        Ok(())
    }

    fn write_text(&mut self, text: &Text<GdsLayer>) -> GdsResult<()> {
        self.record_empty(record::TEXT)?;
        self.record_i16s(record::LAYER, &[text.layer().0 as i16])?;
        self.record_i16s(record::TEXTTYPE, &[text.layer().1 as i16])?;
        let mut xy = Vec::new();
        push_point(&mut xy, text.loc())?;
        self.record_i32s(record::XY, &xy)?;
        self.record_str(record::STRING, text.text())?;
        self.record_empty(record::ENDEL)?;
        Ok(())
    }

    fn write_sref(&mut self, lib: &Library<GdsLayer>, inst: &Instance<GdsLayer>) -> GdsResult<()> {
        let child = lib
            .name_of(inst.cell())
            .ok_or_else(|| GdsError::MissingCell(inst.name().clone()))?;
        self.record_empty(record::SREF)?;
        self.record_str(record::SNAME, child)?;
        let orientation = inst.transformation().orientation;
        if orientation != Orientation::default() {
            self.write_strans(orientation)?;
        }
        let mut xy = Vec::new();
        push_point(&mut xy, inst.transformation().offset)?;
        self.record_i32s(record::XY, &xy)?;
        self.record_empty(record::ENDEL)?;
        Ok(())
    }

    /// STRANS reflection is about the x-axis before rotation, matching
    /// [`Orientation`] exactly.
    fn write_strans(&mut self, orientation: Orientation) -> GdsResult<()> {
        let d0 = if orientation.reflect_vert { 0x80 } else { 0x00 };
        self.record_bits(record::STRANS, d0, 0x00)?;
        let degrees = orientation.rotation.degrees();
        if degrees != 0 {
            self.record_f64s(record::ANGLE, &[degrees as f64])?;
        }
        Ok(())
    }
}

fn push_point(xy: &mut Vec<i32>, p: Point) -> GdsResult<()> {
    xy.push(
        i32::try_from(p.x).map_err(|_| GdsError::CoordinateOverflow(p.x))?,
    );
    xy.push(
        i32::try_from(p.y).map_err(|_| GdsError::CoordinateOverflow(p.y))?,
    );
    Ok(())
}

/// The current UTC time as the twelve i16s of a BGNLIB/BGNSTR record
/// (modification and access times).
fn timestamp() -> [i16; 12] {
    let now = Utc::now();
    let stamp = [
        now.year() as i16,
        now.month() as i16,
        now.day() as i16,
        now.hour() as i16,
        now.minute() as i16,
        now.second() as i16,
    ];
    let mut out = [0i16; 12];
    out[..6].copy_from_slice(&stamp);
    out[6..].copy_from_slice(&stamp);
    out
}

/// Encodes an `f64` in the GDSII excess-64 floating-point format.
///
/// GDSII predates IEEE 754: one sign bit, a seven-bit excess-64 base-16
/// exponent, and a 56-bit mantissa normalized to `(1/16, 1)`.
fn gds_float(mut val: f64) -> u64 {
    if val == 0.0 {
        return 0;
    }
    let mut top: u8 = 0;
    if val < 0.0 {
        top = 0x80;
        val = -val;
    }
    let fexp = 0.25 * val.log2();
    let mut exponent = fexp.ceil() as i32;
    if fexp == fexp.ceil() {
        exponent += 1;
    }
    let mantissa = (val * 16f64.powi(14 - exponent)).round() as u64;
    top += (64 + exponent) as u8;
    ((top as u64) << 56) | (mantissa & 0x00FF_FFFF_FFFF_FFFF)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geometry::orientation::Rotation;
    use geometry::rect::Rect;
    use photir::{LibraryBuilder, Port, Shape as IrShape};
    use std::sync::Arc;

    #[test]
    fn float_encoding_matches_known_vectors() {
        assert_eq!(gds_float(0.0), 0x0000_0000_0000_0000);
        assert_eq!(gds_float(1.0), 0x4110_0000_0000_0000);
        assert_eq!(gds_float(-1.0), 0xC110_0000_0000_0000);
        assert_eq!(gds_float(0.5), 0x4080_0000_0000_0000);
        assert_eq!(gds_float(2.0), 0x4120_0000_0000_0000);
    }

    #[test]
    fn records_are_even_length_and_framed() {
        let mut buf = Vec::new();
        let mut w = GdsWriter { out: &mut buf };
        w.record_str(record::LIBNAME, "lib").unwrap();
        // 4-byte header plus "lib" padded to 4 bytes.
        assert_eq!(buf.len(), 8);
        assert_eq!(&buf[..4], &[0x00, 0x08, 0x02, 0x06]);
        assert_eq!(&buf[4..], b"lib\0");
    }

    fn sample_library() -> Library<GdsLayer> {
        let mut leaf = Cell::new("leaf");
        leaf.add_element(IrShape::new(
            GdsLayer(1, 0),
            Rect::from_sides(0, -250, 10_000, 250),
        ));
        leaf.add_port("W0", Port::optical(Point::zero(), Rotation::R180, 500));
        let leaf = Arc::new(leaf);
        let mut top = Cell::new("top");
        top.add_instance(Instance::connect(
            leaf.clone(),
            "i0",
            "W0",
            &Port::optical(Point::new(5_000, 0), Rotation::R0, 500),
        ));
        let top = Arc::new(top);
        let mut builder = LibraryBuilder::new();
        builder.add_tree(&top);
        builder.build()
    }

    #[test]
    fn stream_begins_with_header_and_ends_with_endlib() {
        let lib = sample_library();
        let opts = GdsExportOpts {
            name: "test".into(),
            units: GdsUnits::default(),
        };
        let mut buf = Vec::new();
        export_gds(&lib, &opts, &mut buf).unwrap();
        // HEADER record carrying version 600.
        assert_eq!(&buf[..6], &[0x00, 0x06, 0x00, 0x02, 0x02, 0x58]);
        // Stream terminates with ENDLIB.
        assert_eq!(&buf[buf.len() - 4..], &[0x00, 0x04, 0x04, 0x00]);
        // Both cells are present by name.
        assert!(buf.windows(4).any(|w| w == b"leaf".as_slice()));
        assert!(buf.windows(3).any(|w| w == b"top".as_slice()));
    }

    #[test]
    fn write_to_file_smoke() {
        let lib = sample_library();
        let opts = GdsExportOpts {
            name: "test".into(),
            units: GdsUnits::default(),
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gds");
        write_gds_file(&lib, &opts, &path).unwrap();
        let len = std::fs::metadata(&path).unwrap().len();
        assert!(len > 0);
        assert_eq!(len % 2, 0, "GDS streams are a sequence of even-length records");
    }
}
