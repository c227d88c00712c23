use crate::domain::model::{Cell, Crs, GeoTable, TimestampFormat};
use crate::utils::error::{EtlError, Result};
use chrono::{DateTime, NaiveDateTime};
use geo::Point;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Attribute holding the last update time as epoch milliseconds.
pub const TIMESTAMP_FIELD: &str = "DATA_ATUALIZACAO";
pub const LATITUDE_COLUMN: &str = "latitude";
pub const LONGITUDE_COLUMN: &str = "longitude";

/// Flattens an ArcGIS query response into a [`GeoTable`].
///
/// Columns are the union of all attribute keys in order of first
/// appearance, followed by `latitude` and `longitude` taken from each
/// feature's point geometry. Rows keep the order of `features`. The table is
/// tagged with the response's `spatialReference.wkid`.
pub fn build_geo_table(json: Option<&Value>) -> Result<GeoTable> {
    let json = json.ok_or(EtlError::NoData)?;

    let features = match json.get("features").and_then(Value::as_array) {
        Some(features) => features,
        None => return Err(service_error(json).unwrap_or_else(|| EtlError::missing_field("features"))),
    };

    if json
        .get("exceededTransferLimit")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        tracing::warn!(
            "Service truncated the result set at {} features; remaining records are not fetched",
            features.len()
        );
    }

    let attributes = features
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            feature
                .get("attributes")
                .and_then(Value::as_object)
                .ok_or_else(|| EtlError::missing_field(format!("features[{}].attributes", i)))
        })
        .collect::<Result<Vec<_>>>()?;

    let columns = union_of_keys(&attributes);
    tracing::debug!("{} features with {} attribute columns", features.len(), columns.len());

    let cells: Vec<Vec<Cell>> = attributes
        .iter()
        .map(|attrs| {
            columns
                .iter()
                .map(|c| attrs.get(c).map(Cell::from).unwrap_or(Cell::Null))
                .collect()
        })
        .collect();

    let geometries = features
        .iter()
        .enumerate()
        .map(|(i, feature)| point_geometry(i, feature))
        .collect::<Result<Vec<_>>>()?;

    let mut table = GeoTable::new(columns);
    for (row, geometry) in cells.into_iter().zip(geometries) {
        table.push_row(row, geometry);
    }

    // An empty result set has no columns at all, so it fails here too.
    if !table.map_column(TIMESTAMP_FIELD, millis_to_timestamp)? {
        return Err(EtlError::missing_field(TIMESTAMP_FIELD));
    }

    let crs = spatial_reference(json)?;
    table.set_crs(crs);

    table.add_column(LATITUDE_COLUMN, |row| Cell::Float(row.geometry.y()));
    table.add_column(LONGITUDE_COLUMN, |row| Cell::Float(row.geometry.x()));

    Ok(table)
}

fn union_of_keys(attributes: &[&Map<String, Value>]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for attrs in attributes {
        for key in attrs.keys() {
            if seen.insert(key.as_str()) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn point_geometry(index: usize, feature: &Value) -> Result<Point<f64>> {
    let geometry = feature
        .get("geometry")
        .ok_or_else(|| EtlError::missing_field(format!("features[{}].geometry", index)))?;

    let coordinate = |axis: &str| {
        geometry
            .get(axis)
            .and_then(Value::as_f64)
            .ok_or_else(|| EtlError::missing_field(format!("features[{}].geometry.{}", index, axis)))
    };

    Ok(Point::new(coordinate("x")?, coordinate("y")?))
}

fn spatial_reference(json: &Value) -> Result<Crs> {
    json.get("spatialReference")
        .and_then(|sr| sr.get("wkid"))
        .and_then(Value::as_i64)
        .map(|wkid| Crs { wkid })
        .ok_or_else(|| EtlError::missing_field("spatialReference.wkid"))
}

/// An ArcGIS endpoint reports query failures as `{"error": {...}}` with a
/// 200 status.
fn service_error(json: &Value) -> Option<EtlError> {
    let error = json.get("error")?;
    Some(EtlError::ServiceError {
        code: error.get("code").and_then(Value::as_i64).unwrap_or_default(),
        message: error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string(),
    })
}

/// Converts epoch milliseconds to a calendar timestamp. Nulls pass through.
pub fn millis_to_timestamp(cell: &Cell) -> Result<Cell> {
    let converted = match cell {
        Cell::Null => return Ok(Cell::Null),
        Cell::Timestamp(ts) => Some(*ts),
        Cell::Int(ms) => DateTime::from_timestamp_millis(*ms).map(|dt| dt.naive_utc()),
        Cell::Float(ms) => float_millis(*ms),
        _ => None,
    };

    converted.map(Cell::Timestamp).ok_or_else(|| EtlError::InvalidTimestamp {
        field: TIMESTAMP_FIELD.to_string(),
        value: cell.render(TimestampFormat::Seconds),
    })
}

fn float_millis(ms: f64) -> Option<NaiveDateTime> {
    let nanos = (ms * 1_000_000.0).round();
    if !nanos.is_finite() || nanos.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(DateTime::from_timestamp_nanos(nanos as i64).naive_utc())
}
