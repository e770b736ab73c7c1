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

use crate::object::{InputGeometry, InputValue};
use crate::Position;

/// Computes the bounding box `[x0, y0, x1, y1]` over every point of every
/// input geometry. Every coordinate contributes, whether it belongs to a
/// point, a line or a ring.
pub(crate) fn bounds(objects: &[(String, InputGeometry)]) -> [f64; 4] {
    let mut bbox = [
        f64::INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NEG_INFINITY,
    ];
    for (_, geometry) in objects {
        bound_geometry(&mut bbox, geometry);
    }
    bbox
}

fn bound_geometry(bbox: &mut [f64; 4], geometry: &InputGeometry) {
    match &geometry.value {
        InputValue::Point(position) => bound_position(bbox, position),
        InputValue::MultiPoint(positions) | InputValue::LineString(positions) => {
            for position in positions {
                bound_position(bbox, position);
            }
        }
        InputValue::MultiLineString(lines) | InputValue::Polygon(lines) => {
            for line in lines {
                for position in line {
                    bound_position(bbox, position);
                }
            }
        }
        InputValue::MultiPolygon(polygons) => {
            for rings in polygons {
                for ring in rings {
                    for position in ring {
                        bound_position(bbox, position);
                    }
                }
            }
        }
        InputValue::GeometryCollection(geometries) => {
            for geometry in geometries {
                bound_geometry(bbox, geometry);
            }
        }
        InputValue::Null => {}
    }
}

fn bound_position(bbox: &mut [f64; 4], position: &Position) {
    let (x, y) = (position[0], position[1]);
    if x < bbox[0] {
        bbox[0] = x;
    }
    if y < bbox[1] {
        bbox[1] = y;
    }
    if x > bbox[2] {
        bbox[2] = x;
    }
    if y > bbox[3] {
        bbox[3] = y;
    }
}
