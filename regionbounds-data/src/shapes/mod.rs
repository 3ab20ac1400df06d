//! Forward-only streaming of geometry and attribute records from shapefiles.
//!
//! A [`ShapeRecordReader`] holds one open `.shp`/`.dbf` pair and yields
//! records lazily, so memory use does not grow with the file. The stream
//! cannot be rewound; reopen the file to read it again.

mod convert;
mod error;
#[cfg(any(test, doc, feature = "test-support"))]
pub mod test_support;

use std::{
    fs::File,
    io::BufReader,
    iter,
    path::{Path, PathBuf},
};

use geo::Geometry;
use regionbounds_core::Attributes;
use shapefile::{ShapeReader, dbase};

pub use convert::{record_attributes, shape_to_geometry};
pub use error::ShapeReadError;

/// One geometry with the attribute row stored alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRecord {
    /// Planar geometry in source coordinates.
    pub geometry: Geometry<f64>,
    /// Non-null attribute values keyed by field name.
    pub attributes: Attributes,
}

/// An open shapefile ready to be streamed.
///
/// Geometries and attribute rows are read through separate cursors that
/// advance together, so a record whose geometry fails to decode still
/// consumes its attribute row.
pub struct ShapeRecordReader {
    path: PathBuf,
    shapes: ShapeReader<BufReader<File>>,
    table: dbase::Reader<BufReader<File>>,
    indexed: bool,
}

impl ShapeRecordReader {
    /// Open the shapefile at `path` together with its sibling `.dbf` table.
    ///
    /// # Examples
    /// ```no_run
    /// use std::path::Path;
    /// use regionbounds_data::shapes::ShapeRecordReader;
    ///
    /// # fn main() -> Result<(), regionbounds_data::shapes::ShapeReadError> {
    /// let mut reader = ShapeRecordReader::open(Path::new("cb_2020_us_state_500k.shp"))?;
    /// for record in reader.records() {
    ///     let record = record?;
    ///     println!("{:?}", record.attributes.get("STUSPS"));
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(path: &Path) -> Result<Self, ShapeReadError> {
        let open_error = |source| ShapeReadError::Open {
            source,
            path: path.to_path_buf(),
        };
        let table_path = path.with_extension("dbf");
        if !table_path.is_file() {
            return Err(open_error(shapefile::Error::MissingDbf));
        }
        let shapes = ShapeReader::from_path(path).map_err(open_error)?;
        let table = dbase::Reader::from_path(&table_path)
            .map_err(|source| open_error(shapefile::Error::DbaseError(source)))?;
        Ok(Self {
            path: path.to_path_buf(),
            shapes,
            table,
            indexed: path.with_extension("shx").is_file(),
        })
    }

    /// Stream every record in file order.
    ///
    /// A [`ShapeReadError::MalformedRecord`] item leaves the stream usable
    /// and the following records keep their own attributes; a
    /// [`ShapeReadError::Decode`] item is the last one produced. Without a
    /// `.shx` index a geometry that fails to decode leaves the cursor
    /// mid-record, so it is reported as [`ShapeReadError::Decode`].
    pub fn records(&mut self) -> impl Iterator<Item = Result<ShapeRecord, ShapeReadError>> + '_ {
        let path = self.path.clone();
        let indexed = self.indexed;
        let mut shapes = self.shapes.iter_shapes();
        let mut rows = self.table.iter_records();
        let mut index = 0;
        let mut finished = false;
        iter::from_fn(move || {
            if finished {
                return None;
            }
            let shape = shapes.next()?;
            let row = rows.next()?;
            let result = match (shape, row) {
                (Ok(shape), Ok(row)) => Ok(ShapeRecord {
                    geometry: shape_to_geometry(&shape),
                    attributes: record_attributes(row),
                }),
                (Err(source), _) if !indexed => Err(ShapeReadError::Decode {
                    source,
                    path: path.clone(),
                    index,
                }),
                (Err(source), _) => Err(ShapeReadError::from_record(source, path.clone(), index)),
                (Ok(_), Err(source)) => Err(ShapeReadError::from_record(
                    shapefile::Error::DbaseError(source),
                    path.clone(),
                    index,
                )),
            };
            finished = matches!(result, Err(ShapeReadError::Decode { .. }));
            index += 1;
            Some(result)
        })
    }
}
