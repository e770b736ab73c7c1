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

use geojson::{Feature, FeatureCollection, Geometry as GeoJsonGeometry, Value as GeoJsonValue};

use crate::json::JsonValue;
use crate::{Arc, ArcIndexes, Error, Geometry, Position, Topology, TransformParams, Value};

/// Expands one named object of a topology back to a GeoJSON feature
/// collection.
///
/// Arc references (ones-complemented when the arc is traversed backwards)
/// are substituted back in, delta-encoded arcs are accumulated and passed
/// through the inverse transform, and the junction point shared by
/// consecutive arcs of a line or ring is emitted only once.
pub fn to_geojson(topology: &Topology, key: &str) -> Result<FeatureCollection, Error> {
    if let Some(transform) = &topology.transform {
        if transform.scale[0] == 0.0 || transform.scale[1] == 0.0 {
            return Err(Error::TransformZeroScale);
        }
    }

    let object = topology
        .objects
        .iter()
        .find(|named| named.name == key)
        .ok_or_else(|| Error::TopoToGeoUnknownKey(key.to_owned()))?;

    let expander = Expander {
        arcs: &topology.arcs,
        transform: &topology.transform,
    };

    let features = match &object.geometry.value {
        Value::GeometryCollection(geometries) => geometries
            .iter()
            .map(|geometry| expander.feature(geometry))
            .collect::<Result<Vec<_>, Error>>()?,
        _ => vec![expander.feature(&object.geometry)?],
    };

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

struct Expander<'a> {
    arcs: &'a [Arc],
    transform: &'a Option<TransformParams>,
}

impl<'a> Expander<'a> {
    fn feature(&self, geometry: &Geometry) -> Result<Feature, Error> {
        Ok(Feature {
            bbox: geometry.bbox.clone(),
            geometry: self.geojson_geometry(&geometry.value)?,
            id: feature_id(&geometry.id),
            properties: geometry.properties.clone(),
            foreign_members: geometry.foreign_members.clone(),
        })
    }

    fn geojson_geometry(&self, value: &Value) -> Result<Option<GeoJsonGeometry>, Error> {
        let value = match value {
            Value::Point(position) => GeoJsonValue::Point(self.point(position)),
            Value::MultiPoint(positions) => GeoJsonValue::MultiPoint(
                positions
                    .iter()
                    .map(|position| self.point(position))
                    .collect(),
            ),
            Value::LineString(indexes) => GeoJsonValue::LineString(self.line(indexes)?),
            Value::MultiLineString(lines) => GeoJsonValue::MultiLineString(
                lines
                    .iter()
                    .map(|indexes| self.line(indexes))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Polygon(rings) => GeoJsonValue::Polygon(
                rings
                    .iter()
                    .map(|indexes| self.ring(indexes))
                    .collect::<Result<_, _>>()?,
            ),
            Value::MultiPolygon(polygons) => GeoJsonValue::MultiPolygon(
                polygons
                    .iter()
                    .map(|rings| -> Result<Vec<Vec<Position>>, Error> {
                        rings
                            .iter()
                            .map(|indexes| self.ring(indexes))
                            .collect()
                    })
                    .collect::<Result<_, _>>()?,
            ),
            Value::GeometryCollection(geometries) => {
                // GeoJSON geometries carry no properties, so only the
                // nested values survive; null members have no GeoJSON
                // geometry form and are skipped.
                let mut nested = Vec::with_capacity(geometries.len());
                for geometry in geometries {
                    if let Some(converted) = self.geojson_geometry(&geometry.value)? {
                        nested.push(converted);
                    }
                }
                GeoJsonValue::GeometryCollection(nested)
            }
            Value::Null => return Ok(None),
        };
        Ok(Some(GeoJsonGeometry::new(value)))
    }

    fn point(&self, position: &Position) -> Position {
        match self.transform {
            None => position.clone(),
            Some(transform) => {
                let mut position = position.clone();
                position[0] = position[0] * transform.scale[0] + transform.translate[0];
                position[1] = position[1] * transform.scale[1] + transform.translate[1];
                position
            }
        }
    }

    /// Appends one arc, reversed when `index` is complemented, dropping
    /// the junction point it shares with the previously appended arc.
    fn append_arc(&self, index: i32, points: &mut Vec<Position>) -> Result<(), Error> {
        let arc_index = (if index < 0 { !index } else { index }) as usize;
        let arc = self
            .arcs
            .get(arc_index)
            .ok_or(Error::ArcIndexOutOfBounds(index))?;

        if !points.is_empty() {
            points.pop();
        }
        let start = points.len();
        match self.transform {
            None => points.extend(arc.iter().cloned()),
            Some(transform) => {
                // Delta-encoded: accumulate, then invert the transform.
                let (mut x, mut y) = (0.0, 0.0);
                for point in arc {
                    x += point[0];
                    y += point[1];
                    let mut decoded = point.clone();
                    decoded[0] = x * transform.scale[0] + transform.translate[0];
                    decoded[1] = y * transform.scale[1] + transform.translate[1];
                    points.push(decoded);
                }
            }
        }
        if index < 0 {
            points[start..].reverse();
        }
        Ok(())
    }

    fn line(&self, indexes: &ArcIndexes) -> Result<Vec<Position>, Error> {
        let mut points = Vec::new();
        for index in indexes {
            self.append_arc(*index, &mut points)?;
        }
        if points.len() == 1 {
            let last = points[0].clone();
            points.push(last);
        }
        Ok(points)
    }

    fn ring(&self, indexes: &ArcIndexes) -> Result<Vec<Position>, Error> {
        let mut points = self.line(indexes)?;
        while !points.is_empty() && points.len() < 4 {
            points.push(points[0].clone());
        }
        Ok(points)
    }
}

fn feature_id(id: &Option<JsonValue>) -> Option<geojson::feature::Id> {
    match id {
        Some(JsonValue::String(string)) => Some(geojson::feature::Id::String(string.clone())),
        Some(JsonValue::Number(number)) => Some(geojson::feature::Id::Number(number.clone())),
        _ => None,
    }
}
