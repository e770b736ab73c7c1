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

use geojson::GeoJson;
use log::debug;

use crate::bounds::bounds;
use crate::cut::cut;
use crate::dedup::dedup;
use crate::delta::delta;
use crate::extract::extract;
use crate::json::JsonValue;
use crate::object::{ExtractedGeometry, ExtractedValue, InputGeometry, InputValue};
use crate::prequantize::prequantize;
use crate::{ArcIndexes, Error, Geometry, NamedGeometry, Position, Topology, Value};

/// Constructs a TopoJSON topology from named GeoJSON inputs.
///
/// Each entry of `objects` maps a name to a feature, feature collection or
/// geometry; the output `objects` member keeps the input order. A
/// `quantization` greater than zero snaps coordinates to a
/// `quantization × quantization` grid over the bounding box before shared
/// arcs are detected; the topology then carries the inverse `transform` and
/// delta-encoded arcs. With `quantization` zero, coordinates pass through
/// untouched and arcs stay absolute.
///
/// Shared runs of points between the inputs' lines and rings are stored
/// exactly once in `arcs`; a geometry traversing an arc backwards
/// references it by the ones-complement of its index.
pub fn topology(objects: Vec<(String, GeoJson)>, quantization: u32) -> Result<Topology, Error> {
    let mut objects = objects
        .into_iter()
        .map(|(name, geojson)| Ok((name, geomify(geojson)?)))
        .collect::<Result<Vec<_>, Error>>()?;

    let bbox = bounds(&objects);
    let transform = if quantization > 0 {
        Some(prequantize(&mut objects, &bbox, quantization))
    } else {
        None
    };

    let mut extracted = extract(objects);
    debug!(
        "extracted {} points into {} line and {} ring candidates",
        extracted.coordinates.len(),
        extracted.lines.len(),
        extracted.rings.len()
    );

    let pieces = cut(&mut extracted)?;
    let deduped = dedup(&extracted.coordinates, &pieces)?;
    debug!("interned {} arcs", deduped.arcs.len());

    let mut arcs = deduped.arcs;
    if transform.is_some() {
        delta(&mut arcs);
    }

    let objects = extracted
        .objects
        .into_iter()
        .map(|(name, geometry)| NamedGeometry {
            name,
            geometry: stitch(geometry, &deduped.lines, &deduped.rings),
        })
        .collect();

    Ok(Topology {
        bbox: Some(bbox.to_vec()),
        objects,
        transform,
        arcs: arcs
            .into_iter()
            .map(|arc| arc.into_iter().map(|point| point.to_vec()).collect())
            .collect(),
    })
}

/// Converts one input into the builder's geometry tree: features fold
/// their id and properties into the geometry, feature collections become
/// geometry collections, and a feature without a geometry becomes `Null`.
fn geomify(geojson: GeoJson) -> Result<InputGeometry, Error> {
    match geojson {
        GeoJson::FeatureCollection(collection) => {
            let geometries = collection
                .features
                .into_iter()
                .map(geomify_feature)
                .collect::<Result<Vec<_>, Error>>()?;
            Ok(InputGeometry {
                bbox: collection.bbox,
                id: None,
                properties: None,
                value: InputValue::GeometryCollection(geometries),
            })
        }
        GeoJson::Feature(feature) => geomify_feature(feature),
        GeoJson::Geometry(geometry) => geomify_geometry(geometry),
    }
}

fn geomify_feature(feature: geojson::Feature) -> Result<InputGeometry, Error> {
    let id = feature.id.map(|id| match id {
        geojson::feature::Id::String(string) => JsonValue::String(string),
        geojson::feature::Id::Number(number) => JsonValue::Number(number),
    });
    let value = match feature.geometry {
        Some(geometry) => geomify_geometry(geometry)?.value,
        None => InputValue::Null,
    };
    Ok(InputGeometry {
        bbox: feature.bbox,
        id,
        properties: feature.properties,
        value,
    })
}

fn geomify_geometry(geometry: geojson::Geometry) -> Result<InputGeometry, Error> {
    let value = match geometry.value {
        geojson::Value::Point(position) => InputValue::Point(checked_position(position)?),
        geojson::Value::MultiPoint(positions) => InputValue::MultiPoint(
            positions
                .into_iter()
                .map(checked_position)
                .collect::<Result<_, _>>()?,
        ),
        geojson::Value::LineString(line) => InputValue::LineString(checked_line(line)?),
        geojson::Value::MultiLineString(lines) => InputValue::MultiLineString(
            lines
                .into_iter()
                .map(checked_line)
                .collect::<Result<_, _>>()?,
        ),
        geojson::Value::Polygon(rings) => InputValue::Polygon(
            rings
                .into_iter()
                .map(checked_ring)
                .collect::<Result<_, _>>()?,
        ),
        geojson::Value::MultiPolygon(polygons) => InputValue::MultiPolygon(
            polygons
                .into_iter()
                .map(|rings| -> Result<Vec<Vec<Position>>, Error> {
                    rings.into_iter().map(checked_ring).collect()
                })
                .collect::<Result<_, _>>()?,
        ),
        geojson::Value::GeometryCollection(geometries) => InputValue::GeometryCollection(
            geometries
                .into_iter()
                .map(geomify_geometry)
                .collect::<Result<_, _>>()?,
        ),
    };
    Ok(InputGeometry {
        bbox: geometry.bbox,
        ..InputGeometry::new(value)
    })
}

fn checked_position(position: Position) -> Result<Position, Error> {
    if position.len() < 2 || !position[0].is_finite() || !position[1].is_finite() {
        return Err(Error::MalformedCoordinate);
    }
    Ok(position)
}

fn checked_line(line: Vec<Position>) -> Result<Vec<Position>, Error> {
    let line = line
        .into_iter()
        .map(checked_position)
        .collect::<Result<Vec<_>, _>>()?;
    if line.len() < 2 {
        return Err(Error::MalformedLineString);
    }
    Ok(line)
}

fn checked_ring(ring: Vec<Position>) -> Result<Vec<Position>, Error> {
    let ring = ring
        .into_iter()
        .map(checked_position)
        .collect::<Result<Vec<_>, _>>()?;
    if ring.len() < 4 {
        return Err(Error::MalformedRing);
    }
    let (first, last) = (&ring[0], &ring[ring.len() - 1]);
    if first[0] != last[0] || first[1] != last[1] {
        return Err(Error::MalformedRing);
    }
    Ok(ring)
}

/// Replaces candidate ids with the signed arc indexes dedup assigned,
/// producing the output geometry tree.
fn stitch(geometry: ExtractedGeometry, lines: &[ArcIndexes], rings: &[ArcIndexes]) -> Geometry {
    let value = match geometry.value {
        ExtractedValue::Point(position) => Value::Point(position),
        ExtractedValue::MultiPoint(positions) => Value::MultiPoint(positions),
        ExtractedValue::LineString(line) => Value::LineString(lines[line].clone()),
        ExtractedValue::MultiLineString(ids) => {
            Value::MultiLineString(ids.into_iter().map(|id| lines[id].clone()).collect())
        }
        ExtractedValue::Polygon(ids) => {
            Value::Polygon(ids.into_iter().map(|id| rings[id].clone()).collect())
        }
        ExtractedValue::MultiPolygon(polygons) => Value::MultiPolygon(
            polygons
                .into_iter()
                .map(|ids| ids.into_iter().map(|id| rings[id].clone()).collect())
                .collect(),
        ),
        ExtractedValue::GeometryCollection(geometries) => Value::GeometryCollection(
            geometries
                .into_iter()
                .map(|geometry| stitch(geometry, lines, rings))
                .collect(),
        ),
        ExtractedValue::Null => Value::Null,
    };
    Geometry {
        bbox: geometry.bbox,
        value,
        properties: geometry.properties,
        id: geometry.id,
        foreign_members: None,
    }
}
