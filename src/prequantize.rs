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
use crate::{Position, TransformParams};

/// Snaps every coordinate to an integer grid of `n × n` cells over the
/// bounding box, making point equality robust for junction detection.
///
/// Consecutive points of a line or ring that collapse onto the same grid
/// cell are merged; a line or ring left degenerate by the collapse is
/// retained as-is rather than dropped. Returns the transform that inverts
/// the snapping.
pub(crate) fn prequantize(
    objects: &mut [(String, InputGeometry)],
    bbox: &[f64; 4],
    n: u32,
) -> TransformParams {
    let [x0, y0, x1, y1] = *bbox;
    let grid = Grid {
        x0,
        y0,
        kx: if x1 - x0 != 0.0 {
            (f64::from(n) - 1.0) / (x1 - x0)
        } else {
            1.0
        },
        ky: if y1 - y0 != 0.0 {
            (f64::from(n) - 1.0) / (y1 - y0)
        } else {
            1.0
        },
    };

    for (_, geometry) in objects.iter_mut() {
        quantize_geometry(geometry, &grid);
    }

    TransformParams {
        scale: [1.0 / grid.kx, 1.0 / grid.ky],
        translate: [x0, y0],
    }
}

struct Grid {
    x0: f64,
    y0: f64,
    kx: f64,
    ky: f64,
}

impl Grid {
    fn snap(&self, position: &Position) -> (f64, f64) {
        (
            ((position[0] - self.x0) * self.kx).round(),
            ((position[1] - self.y0) * self.ky).round(),
        )
    }
}

fn quantize_geometry(geometry: &mut InputGeometry, grid: &Grid) {
    match &mut geometry.value {
        InputValue::Point(position) => quantize_position(position, grid),
        InputValue::MultiPoint(positions) => {
            for position in positions {
                quantize_position(position, grid);
            }
        }
        InputValue::LineString(line) => quantize_points(line, grid),
        InputValue::MultiLineString(lines) => {
            for line in lines {
                quantize_points(line, grid);
            }
        }
        InputValue::Polygon(rings) => {
            for ring in rings {
                quantize_points(ring, grid);
            }
        }
        InputValue::MultiPolygon(polygons) => {
            for rings in polygons {
                for ring in rings {
                    quantize_points(ring, grid);
                }
            }
        }
        InputValue::GeometryCollection(geometries) => {
            for geometry in geometries {
                quantize_geometry(geometry, grid);
            }
        }
        InputValue::Null => {}
    }
}

fn quantize_position(position: &mut Position, grid: &Grid) {
    let (x, y) = grid.snap(position);
    *position = vec![x, y];
}

fn quantize_points(input: &mut Vec<Position>, grid: &Grid) {
    let mut output: Vec<Position> = Vec::with_capacity(input.len());
    for position in input.iter() {
        let (x, y) = grid.snap(position);
        // Skip consecutive duplicate points.
        if output
            .last()
            .map_or(true, |last| last[0] != x || last[1] != y)
        {
            output.push(vec![x, y]);
        }
    }
    *input = output;
}

#[cfg(test)]
mod tests {
    use super::prequantize;
    use crate::object::{InputGeometry, InputValue};

    fn line(points: &[[f64; 2]]) -> Vec<Vec<f64>> {
        points.iter().map(|p| vec![p[0], p[1]]).collect()
    }

    #[test]
    fn prequantize_returns_the_inverse_transform() {
        let mut objects = vec![(
            String::from("line"),
            InputGeometry::new(InputValue::LineString(line(&[[0.0, 0.0], [10.0, 10.0]]))),
        )];
        let transform = prequantize(&mut objects, &[0.0, 0.0, 10.0, 10.0], 10_000);
        assert_eq!(transform.translate, [0.0, 0.0]);
        assert_eq!(transform.scale, [10.0 / 9999.0, 10.0 / 9999.0]);
    }

    #[test]
    fn prequantize_snaps_to_the_grid() {
        let mut objects = vec![(
            String::from("line"),
            InputGeometry::new(InputValue::LineString(line(&[[0.0, 0.0], [10.0, 10.0]]))),
        )];
        prequantize(&mut objects, &[0.0, 0.0, 10.0, 10.0], 11);
        match &objects[0].1.value {
            InputValue::LineString(points) => {
                assert_eq!(points, &line(&[[0.0, 0.0], [10.0, 10.0]]));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn prequantize_collapses_consecutive_duplicates() {
        let mut objects = vec![(
            String::from("line"),
            InputGeometry::new(InputValue::LineString(line(&[
                [0.0, 0.0],
                [0.1, 0.1],
                [10.0, 10.0],
            ]))),
        )];
        prequantize(&mut objects, &[0.0, 0.0, 10.0, 10.0], 11);
        match &objects[0].1.value {
            InputValue::LineString(points) => {
                assert_eq!(points, &line(&[[0.0, 0.0], [10.0, 10.0]]));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn prequantize_retains_collapsed_rings_as_is() {
        // All corners collapse onto one grid cell; the degenerate ring is
        // kept with whatever points remain, not dropped or padded.
        let mut objects = vec![(
            String::from("polygon"),
            InputGeometry::new(InputValue::Polygon(vec![line(&[
                [0.0, 0.0],
                [0.1, 0.0],
                [0.1, 0.1],
                [0.0, 0.0],
            ])])),
        )];
        prequantize(&mut objects, &[0.0, 0.0, 10.0, 10.0], 11);
        match &objects[0].1.value {
            InputValue::Polygon(rings) => {
                assert_eq!(rings[0], line(&[[0.0, 0.0]]));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn prequantize_handles_a_degenerate_bounding_box() {
        let mut objects = vec![(
            String::from("point"),
            InputGeometry::new(InputValue::Point(vec![3.0, 3.0])),
        )];
        let transform = prequantize(&mut objects, &[3.0, 3.0, 3.0, 3.0], 10_000);
        assert_eq!(transform.scale, [1.0, 1.0]);
        assert_eq!(transform.translate, [3.0, 3.0]);
        match &objects[0].1.value {
            InputValue::Point(position) => assert_eq!(position, &vec![0.0, 0.0]),
            _ => unreachable!(),
        }
    }
}
