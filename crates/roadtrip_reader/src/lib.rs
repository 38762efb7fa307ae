//! Reader for the line oriented road map format.
//!
//! Every line declares one place followed by the roads leaving it:
//!
//! ```text
//! V:Valence|A:20:Montelimar|N:12:Romans
//! R:Le Bistrot|D:3:Valence
//! ```
//!
//! The reader only tokenises and validates the individual records. Resolving
//! destination names into a graph is left to the consumer.
use log::info;
use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
};
use thiserror::Error;

mod categories;
pub use categories::{PlaceCategory, RoadCategory};

/// Errors raised while reading a road map. Line numbers start at 1.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("could not read road map: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: invalid place category '{code}', valid categories are V, R or L")]
    InvalidPlaceCategory { line: usize, code: String },

    #[error("line {line}: invalid road category '{code}', valid categories are A, N or D")]
    InvalidRoadCategory { line: usize, code: String },

    #[error("line {line}: distance '{value}' is not an integer")]
    InvalidDistance { line: usize, value: String },

    #[error("line {line}: negative distance {distance} is not allowed")]
    NegativeDistance { line: usize, distance: i64 },
}

/// A road leaving the place of the line it is declared on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadRecord {
    pub category: RoadCategory,
    /// Length in kilometres
    pub distance: u32,
    pub destination: String,
}

impl RoadRecord {
    pub fn new(category: RoadCategory, distance: u32, destination: impl Into<String>) -> Self {
        Self {
            category,
            distance,
            destination: destination.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceRecord {
    pub category: PlaceCategory,
    pub name: String,
    pub roads: Vec<RoadRecord>,
    /// Line of the record in the source, 0 for records built in memory
    pub line: usize,
}

impl PlaceRecord {
    pub fn new(category: PlaceCategory, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
            roads: Vec::new(),
            line: 0,
        }
    }

    pub fn with_road(mut self, road: RoadRecord) -> Self {
        self.roads.push(road);
        self
    }
}

/// All records of a road map file in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadMap {
    places: Vec<PlaceRecord>,
}

impl RoadMap {
    pub fn new() -> Self {
        RoadMap { places: Vec::new() }
    }

    pub fn add_place(&mut self, place: PlaceRecord) {
        self.places.push(place);
    }

    pub fn get_places(&self) -> &[PlaceRecord] {
        &self.places
    }

    pub fn num_roads(&self) -> usize {
        self.places.iter().map(|place| place.roads.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn from_path(path: &Path) -> Result<RoadMap, ReadError> {
        let now = std::time::Instant::now();
        info!("BEGIN reading {}", path.display());

        let file = File::open(path)?;
        let map = Self::from_reader(BufReader::new(file))?;

        info!(
            "FINISHED reading {} places and {} roads. Took {:?}",
            map.places.len(),
            map.num_roads(),
            now.elapsed()
        );
        Ok(map)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<RoadMap, ReadError> {
        let mut map = RoadMap::new();
        for (i, line) in reader.lines().enumerate() {
            if let Some(record) = parse_line(&line?, i + 1)? {
                map.add_place(record);
            }
        }
        Ok(map)
    }

    pub fn parse(text: &str) -> Result<RoadMap, ReadError> {
        let mut map = RoadMap::new();
        for (i, line) in text.lines().enumerate() {
            if let Some(record) = parse_line(line, i + 1)? {
                map.add_place(record);
            }
        }
        Ok(map)
    }

    /// Writes the map back in the format accepted by [`RoadMap::parse`].
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for place in &self.places {
            write!(writer, "{}:{}", place.category.code(), place.name)?;
            for road in &place.roads {
                write!(
                    writer,
                    "|{}:{}:{}",
                    road.category.code(),
                    road.distance,
                    road.destination
                )?;
            }
            writeln!(writer)?;
        }
        writer.flush()
    }
}

/// Parses one line. Blank lines and lines starting with `#` yield `None`.
fn parse_line(line: &str, line_no: usize) -> Result<Option<PlaceRecord>, ReadError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split('|');
    // `split` always yields at least one item
    let head = fields.next().unwrap_or_default();
    let (code, name) = head.split_once(':').ok_or(ReadError::MissingField {
        line: line_no,
        field: "place name",
    })?;

    let category = single_char(code)
        .and_then(PlaceCategory::from_code)
        .ok_or_else(|| ReadError::InvalidPlaceCategory {
            line: line_no,
            code: code.to_string(),
        })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ReadError::MissingField {
            line: line_no,
            field: "place name",
        });
    }

    let mut record = PlaceRecord::new(category, name);
    record.line = line_no;

    for descriptor in fields.map(str::trim).filter(|d| !d.is_empty()) {
        record.roads.push(parse_road(descriptor, line_no)?);
    }

    Ok(Some(record))
}

fn parse_road(descriptor: &str, line_no: usize) -> Result<RoadRecord, ReadError> {
    let mut parts = descriptor.splitn(3, ':');

    let code = parts.next().unwrap_or_default();
    let category = single_char(code)
        .and_then(RoadCategory::from_code)
        .ok_or_else(|| ReadError::InvalidRoadCategory {
            line: line_no,
            code: code.to_string(),
        })?;

    let value = parts.next().ok_or(ReadError::MissingField {
        line: line_no,
        field: "road distance",
    })?;
    let distance: i64 = value
        .trim()
        .parse()
        .map_err(|_| ReadError::InvalidDistance {
            line: line_no,
            value: value.to_string(),
        })?;
    if distance < 0 {
        return Err(ReadError::NegativeDistance {
            line: line_no,
            distance,
        });
    }
    let distance = u32::try_from(distance).map_err(|_| ReadError::InvalidDistance {
        line: line_no,
        value: value.to_string(),
    })?;

    let destination = parts
        .next()
        .map(str::trim)
        .filter(|destination| !destination.is_empty())
        .ok_or(ReadError::MissingField {
            line: line_no,
            field: "road destination",
        })?;

    Ok(RoadRecord::new(category, distance, destination))
}

fn single_char(code: &str) -> Option<char> {
    let mut chars = code.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
