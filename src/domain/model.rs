use chrono::{NaiveDateTime, Timelike};
use geo::{BoundingRect, MultiPoint, Point, Rect};
use std::fmt;

/// A single scalar in a [`GeoTable`] row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(NaiveDateTime),
}

/// How the timestamps of one CSV column are written. All timestamps of a
/// column share a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampFormat {
    DateOnly,
    #[default]
    Seconds,
    Millis,
}

impl TimestampFormat {
    /// Narrowest format that writes every timestamp in `cells` exactly:
    /// dates alone when all fall on midnight, milliseconds when any has a
    /// sub-second part.
    pub fn for_cells<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Self {
        let mut any_timestamp = false;
        let mut all_midnight = true;
        for cell in cells {
            if let Cell::Timestamp(ts) = cell {
                if ts.nanosecond() != 0 {
                    return TimestampFormat::Millis;
                }
                any_timestamp = true;
                all_midnight &= ts.num_seconds_from_midnight() == 0;
            }
        }

        if any_timestamp && all_midnight {
            TimestampFormat::DateOnly
        } else {
            TimestampFormat::Seconds
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            TimestampFormat::DateOnly => "%Y-%m-%d",
            TimestampFormat::Seconds => "%Y-%m-%d %H:%M:%S",
            TimestampFormat::Millis => "%Y-%m-%d %H:%M:%S%.3f",
        }
    }
}

impl Cell {
    /// Text form used in CSV output.
    pub fn render(&self, timestamps: TimestampFormat) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Bool(true) => "True".to_string(),
            Cell::Bool(false) => "False".to_string(),
            Cell::Int(value) => value.to_string(),
            Cell::Float(value) => format_float(*value),
            Cell::Text(value) => value.clone(),
            Cell::Timestamp(ts) => ts.format(timestamps.pattern()).to_string(),
        }
    }
}

fn format_float(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

impl From<&serde_json::Value> for Cell {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Cell::Int(i),
                None => n.as_f64().map(Cell::Float).unwrap_or(Cell::Null),
            },
            Value::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }
}

/// Coordinate reference system identified by its well-known id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crs {
    pub wkid: i64,
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.wkid)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoRow {
    pub cells: Vec<Cell>,
    pub geometry: Point<f64>,
}

/// Table of attribute columns where every row carries a point geometry and
/// the whole table shares one coordinate reference system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoTable {
    columns: Vec<String>,
    rows: Vec<GeoRow>,
    crs: Option<Crs>,
}

impl GeoTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            crs: None,
        }
    }

    /// Appends a row, padding missing trailing cells with [`Cell::Null`].
    pub fn push_row(&mut self, mut cells: Vec<Cell>, geometry: Point<f64>) {
        cells.resize(self.columns.len(), Cell::Null);
        self.rows.push(GeoRow { cells, geometry });
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[GeoRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn crs(&self) -> Option<Crs> {
        self.crs
    }

    pub fn set_crs(&mut self, crs: Crs) {
        self.crs = Some(crs);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Cell> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row.cells[idx]))
    }

    /// Sets a column computed from each row. An existing column of the same
    /// name is overwritten in place, otherwise the column is appended.
    pub fn add_column<F>(&mut self, name: &str, mut f: F)
    where
        F: FnMut(&GeoRow) -> Cell,
    {
        match self.column_index(name) {
            Some(idx) => {
                for row in &mut self.rows {
                    row.cells[idx] = f(row);
                }
            }
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    let cell = f(row);
                    row.cells.push(cell);
                }
            }
        }
    }

    /// Rewrites every cell of `name`. Returns `Ok(false)` when the column
    /// does not exist.
    pub fn map_column<F, E>(&mut self, name: &str, mut f: F) -> Result<bool, E>
    where
        F: FnMut(&Cell) -> Result<Cell, E>,
    {
        let Some(idx) = self.column_index(name) else {
            return Ok(false);
        };
        for row in &mut self.rows {
            row.cells[idx] = f(&row.cells[idx])?;
        }
        Ok(true)
    }

    pub fn geometries(&self) -> impl Iterator<Item = Point<f64>> + '_ {
        self.rows.iter().map(|row| row.geometry)
    }

    /// Bounding box of all row geometries, `None` for an empty table.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        MultiPoint::from(self.geometries().collect::<Vec<_>>()).bounding_rect()
    }
}
