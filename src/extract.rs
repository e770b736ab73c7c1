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

use crate::object::{ExtractedGeometry, ExtractedValue, InputGeometry, InputValue};
use crate::Position;

/// Half-open run of positions in the shared coordinate buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Slice {
    pub start: usize,
    pub end: usize,
}

impl Slice {
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// The intermediate topology after extraction: one flat coordinate buffer,
/// every line and ring of the input reduced to a [`Slice`] of it, and the
/// geometry trees rewritten to reference those candidates by id.
pub(crate) struct Extracted {
    pub objects: Vec<(String, ExtractedGeometry)>,
    pub coordinates: Vec<[f64; 2]>,
    pub lines: Vec<Slice>,
    pub rings: Vec<Slice>,
}

/// Moves every line and ring into the shared coordinate buffer. The
/// resulting arc candidates are still whole input lines; cutting them at
/// junctions comes later.
pub(crate) fn extract(objects: Vec<(String, InputGeometry)>) -> Extracted {
    let mut topology = Extracted {
        objects: Vec::with_capacity(objects.len()),
        coordinates: Vec::new(),
        lines: Vec::new(),
        rings: Vec::new(),
    };
    for (name, geometry) in objects {
        let geometry = extract_geometry(&mut topology, geometry);
        topology.objects.push((name, geometry));
    }
    topology
}

fn extract_geometry(topology: &mut Extracted, geometry: InputGeometry) -> ExtractedGeometry {
    ExtractedGeometry {
        bbox: geometry.bbox,
        id: geometry.id,
        properties: geometry.properties,
        value: extract_value(topology, geometry.value),
    }
}

fn extract_value(topology: &mut Extracted, value: InputValue) -> ExtractedValue {
    match value {
        InputValue::Point(position) => ExtractedValue::Point(position),
        InputValue::MultiPoint(positions) => ExtractedValue::MultiPoint(positions),
        InputValue::LineString(line) => ExtractedValue::LineString(extract_line(topology, line)),
        InputValue::MultiLineString(lines) => ExtractedValue::MultiLineString(
            lines
                .into_iter()
                .map(|line| extract_line(topology, line))
                .collect(),
        ),
        InputValue::Polygon(rings) => ExtractedValue::Polygon(
            rings
                .into_iter()
                .map(|ring| extract_ring(topology, ring))
                .collect(),
        ),
        InputValue::MultiPolygon(polygons) => ExtractedValue::MultiPolygon(
            polygons
                .into_iter()
                .map(|rings| {
                    rings
                        .into_iter()
                        .map(|ring| extract_ring(topology, ring))
                        .collect()
                })
                .collect(),
        ),
        InputValue::GeometryCollection(geometries) => ExtractedValue::GeometryCollection(
            geometries
                .into_iter()
                .map(|geometry| extract_geometry(topology, geometry))
                .collect(),
        ),
        InputValue::Null => ExtractedValue::Null,
    }
}

fn copy_points(topology: &mut Extracted, points: Vec<Position>) -> Slice {
    let start = topology.coordinates.len();
    for position in &points {
        topology.coordinates.push([position[0], position[1]]);
    }
    Slice {
        start,
        end: topology.coordinates.len(),
    }
}

fn extract_line(topology: &mut Extracted, line: Vec<Position>) -> usize {
    let slice = copy_points(topology, line);
    topology.lines.push(slice);
    topology.lines.len() - 1
}

fn extract_ring(topology: &mut Extracted, ring: Vec<Position>) -> usize {
    let slice = copy_points(topology, ring);
    topology.rings.push(slice);
    topology.rings.len() - 1
}
