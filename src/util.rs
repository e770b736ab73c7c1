// Copyright 2018 The GeoRust Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Helpers that drain a `JsonObject` member by member while decoding.
//! Whatever is left once the known members are consumed becomes the
//! object's foreign members.

use crate::json::{JsonObject, JsonValue};
use crate::{Arc, ArcIndexes, Bbox, Error, Geometry, NamedGeometry, Position, TransformParams};

pub fn expect_type(object: &mut JsonObject) -> Result<String, Error> {
    match expect_property(object, "type")? {
        JsonValue::String(s) => Ok(s),
        _ => Err(Error::ExpectedStringValue),
    }
}

fn expect_property(object: &mut JsonObject, name: &'static str) -> Result<JsonValue, Error> {
    object
        .remove(name)
        .ok_or_else(|| Error::ExpectedProperty(name.to_string()))
}

fn expect_f64(value: &JsonValue) -> Result<f64, Error> {
    value.as_f64().ok_or(Error::ExpectedF64Value)
}

fn expect_i32(value: &JsonValue) -> Result<i32, Error> {
    match value.as_i64() {
        Some(v) => Ok(v as i32),
        None => Err(Error::ExpectedI32Value),
    }
}

fn expect_array(value: &JsonValue) -> Result<&Vec<JsonValue>, Error> {
    value.as_array().ok_or(Error::ExpectedArrayValue)
}

fn expect_owned_array(value: JsonValue) -> Result<Vec<JsonValue>, Error> {
    match value {
        JsonValue::Array(array) => Ok(array),
        _ => Err(Error::ExpectedArrayValue),
    }
}

fn expect_owned_object(value: JsonValue) -> Result<JsonObject, Error> {
    match value {
        JsonValue::Object(object) => Ok(object),
        _ => Err(Error::ExpectedObjectValue),
    }
}

/// Used by `Value::Point`.
pub fn get_position(object: &mut JsonObject) -> Result<Position, Error> {
    let coordinates = expect_property(object, "coordinates")?;
    json_to_position(&coordinates)
}

/// Used by `Value::MultiPoint`.
pub fn get_positions(object: &mut JsonObject) -> Result<Vec<Position>, Error> {
    let coordinates = expect_property(object, "coordinates")?;
    json_to_positions(&coordinates)
}

/// Used by `Value::LineString`.
pub fn get_arc_indexes(object: &mut JsonObject) -> Result<ArcIndexes, Error> {
    let arcs = expect_property(object, "arcs")?;
    json_to_arc_indexes(&arcs)
}

/// Used by `Value::MultiLineString` and `Value::Polygon`.
pub fn get_arc_indexes_1d(object: &mut JsonObject) -> Result<Vec<ArcIndexes>, Error> {
    let arcs = expect_property(object, "arcs")?;
    expect_array(&arcs)?
        .iter()
        .map(json_to_arc_indexes)
        .collect()
}

/// Used by `Value::MultiPolygon`.
pub fn get_arc_indexes_2d(object: &mut JsonObject) -> Result<Vec<Vec<ArcIndexes>>, Error> {
    let arcs = expect_property(object, "arcs")?;
    expect_array(&arcs)?
        .iter()
        .map(|polygon| -> Result<Vec<ArcIndexes>, Error> {
            expect_array(polygon)?
                .iter()
                .map(json_to_arc_indexes)
                .collect()
        })
        .collect()
}

/// Used by `Value::GeometryCollection`.
pub fn get_geometries(object: &mut JsonObject) -> Result<Vec<Geometry>, Error> {
    let geometries = expect_property(object, "geometries")?;
    expect_owned_array(geometries)?
        .into_iter()
        .map(|json| Geometry::from_json_object(expect_owned_object(json)?))
        .collect()
}

pub fn get_id(object: &mut JsonObject) -> Result<Option<JsonValue>, Error> {
    Ok(object.remove("id"))
}

pub fn get_bbox(object: &mut JsonObject) -> Result<Option<Bbox>, Error> {
    let bbox_json = match object.remove("bbox") {
        Some(value) => value,
        None => return Ok(None),
    };
    let bbox_array = match bbox_json {
        JsonValue::Array(array) => array,
        _ => return Err(Error::BboxExpectedArray),
    };
    let bbox = bbox_array
        .into_iter()
        .map(|value| value.as_f64().ok_or(Error::BboxExpectedNumericValues))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(bbox))
}

/// A `properties` member may be absent or explicitly null; both decode to
/// `None`.
pub fn get_properties(object: &mut JsonObject) -> Result<Option<JsonObject>, Error> {
    match object.remove("properties") {
        Some(JsonValue::Object(properties)) => Ok(Some(properties)),
        Some(JsonValue::Null) | None => Ok(None),
        _ => Err(Error::PropertiesExpectedObjectOrNull),
    }
}

/// Retrieves the optional `transform` member of a topology.
pub fn get_transform(object: &mut JsonObject) -> Result<Option<TransformParams>, Error> {
    match object.remove("transform") {
        Some(value) => Ok(Some(TransformParams::from_json_object(expect_owned_object(
            value,
        )?)?)),
        None => Ok(None),
    }
}

/// Reads one `[sx, sy]`-shaped member of a `transform` object.
pub(crate) fn transform_pair(
    transform: &JsonObject,
    name: &'static str,
    missing: Error,
    not_array: Error,
    not_numeric: Error,
) -> Result<[f64; 2], Error> {
    let array = match transform.get(name) {
        Some(JsonValue::Array(array)) => array,
        Some(_) => return Err(not_array),
        None => return Err(missing),
    };
    if array.len() != 2 {
        return Err(not_array);
    }
    let x = array[0].as_f64().ok_or_else(|| not_numeric.clone())?;
    let y = array[1].as_f64().ok_or(not_numeric)?;
    Ok([x, y])
}

/// Retrieves the `objects` member of a topology, keeping its order.
pub fn get_objects(object: &mut JsonObject) -> Result<Vec<NamedGeometry>, Error> {
    match object.remove("objects") {
        Some(JsonValue::Object(objects)) => objects
            .into_iter()
            .map(|(name, json)| {
                Ok(NamedGeometry {
                    name,
                    geometry: Geometry::from_json_object(expect_owned_object(json)?)?,
                })
            })
            .collect(),
        _ => Err(Error::TopologyExpectedObjects),
    }
}

/// Retrieves the `arcs` member of a topology.
pub fn get_arcs(object: &mut JsonObject) -> Result<Vec<Arc>, Error> {
    match object.remove("arcs") {
        Some(value) => expect_array(&value)?.iter().map(json_to_positions).collect(),
        None => Err(Error::TopologyExpectedArcs),
    }
}

pub fn get_foreign_members(object: JsonObject) -> Result<Option<JsonObject>, Error> {
    if object.is_empty() {
        Ok(None)
    } else {
        Ok(Some(object))
    }
}

fn json_to_position(json: &JsonValue) -> Result<Position, Error> {
    expect_array(json)?.iter().map(expect_f64).collect()
}

fn json_to_positions(json: &JsonValue) -> Result<Vec<Position>, Error> {
    expect_array(json)?.iter().map(json_to_position).collect()
}

fn json_to_arc_indexes(json: &JsonValue) -> Result<ArcIndexes, Error> {
    expect_array(json)?.iter().map(expect_i32).collect()
}
