//! Builders that write small shapefiles for tests and examples.

use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::{Point, Polygon, PolygonRing, Writer};

use crate::source::StubSource;

/// Closed, clockwise ring tracing the rectangle `(min_x, min_y)..(max_x, max_y)`.
pub fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<(f64, f64)> {
    vec![
        (min_x, min_y),
        (min_x, max_y),
        (max_x, max_y),
        (max_x, min_y),
        (min_x, min_y),
    ]
}

#[derive(Debug, Clone)]
struct FixtureRecord {
    outers: Vec<Vec<(f64, f64)>>,
    values: Vec<String>,
}

/// In-memory description of a polygon shapefile with character fields.
#[derive(Debug, Clone)]
pub struct PolygonFixture {
    fields: Vec<String>,
    records: Vec<FixtureRecord>,
}

impl PolygonFixture {
    /// Start a fixture with the given attribute columns.
    pub fn new(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|field| (*field).to_owned()).collect(),
            records: Vec::new(),
        }
    }

    /// Append a record made of one or more outer rings and one value per field.
    #[must_use]
    pub fn record(mut self, outers: &[Vec<(f64, f64)>], values: &[&str]) -> Self {
        self.records.push(FixtureRecord {
            outers: outers.to_vec(),
            values: values.iter().map(|value| (*value).to_owned()).collect(),
        });
        self
    }

    /// Write `<dir>/<stem>.shp` with its `.shx` and `.dbf` siblings.
    pub fn write(&self, dir: &Path, stem: &str) -> Result<PathBuf, Box<dyn Error>> {
        let path = dir.join(format!("{stem}.shp"));
        let mut table = TableWriterBuilder::new();
        for field in &self.fields {
            table = table.add_character_field(FieldName::try_from(field.as_str())?, 64);
        }
        let mut writer = Writer::from_path(&path, table)?;
        for record in &self.records {
            let rings = record
                .outers
                .iter()
                .map(|ring| {
                    PolygonRing::Outer(ring.iter().map(|&(x, y)| Point::new(x, y)).collect())
                })
                .collect();
            let mut row = Record::default();
            for (field, value) in self.fields.iter().zip(&record.values) {
                row.insert(field.clone(), FieldValue::Character(Some(value.clone())));
            }
            writer.write_shape_and_record(&Polygon::with_rings(rings), &row)?;
        }
        drop(writer);
        Ok(path)
    }

    /// Write the fixture under `dir` and pack its three files into a zip archive.
    pub fn zip(&self, dir: &Path, stem: &str) -> Result<Vec<u8>, Box<dyn Error>> {
        self.write(dir, stem)?;
        let mut contents = Vec::new();
        for extension in ["shp", "shx", "dbf"] {
            let name = format!("{stem}.{extension}");
            let bytes = fs::read(dir.join(&name))?;
            contents.push((name, bytes));
        }
        let entries: Vec<(&str, &[u8])> = contents
            .iter()
            .map(|(name, bytes)| (name.as_str(), bytes.as_slice()))
            .collect();
        Ok(StubSource::zip_archive(&entries)?)
    }
}

/// Overwrite the shape type code of record `index` in the `.shp` at `path`.
///
/// The record is located through the sibling `.shx` index, which must exist.
pub fn overwrite_shape_type(
    path: &Path,
    index: usize,
    shape_type: i32,
) -> Result<(), Box<dyn Error>> {
    const HEADER_LEN: u64 = 100;
    const INDEX_ENTRY_LEN: u64 = 8;
    const RECORD_HEADER_LEN: u64 = 8;

    let mut shx = fs::File::open(path.with_extension("shx"))?;
    shx.seek(SeekFrom::Start(HEADER_LEN + INDEX_ENTRY_LEN * u64::try_from(index)?))?;
    let mut offset = [0_u8; 4];
    shx.read_exact(&mut offset)?;
    let record_start = u64::try_from(i32::from_be_bytes(offset))? * 2;

    let mut shp = OpenOptions::new().write(true).open(path)?;
    shp.seek(SeekFrom::Start(record_start + RECORD_HEADER_LEN))?;
    shp.write_all(&shape_type.to_le_bytes())?;
    Ok(())
}
