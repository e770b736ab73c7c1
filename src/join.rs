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

use crate::extract::{Extracted, Slice};
use crate::hash::{self, HashMap, PointSet};
use crate::Error;

const NONE: usize = usize::MAX;

/// Finds every junction: a point whose unordered pair of neighbors differs
/// between two occurrences across the arc candidates, plus the endpoints of
/// every open line. A ring the visits leave without any junction still gets
/// its starting point added, so cut always breaks it into a single closed
/// arc. Arcs must be cut at exactly these points for shared segments to
/// end up in exactly one arc.
pub(crate) fn join(topology: &Extracted) -> Result<PointSet, Error> {
    let coordinates = &topology.coordinates;
    let n = coordinates.len();
    let indexes = canonical_indexes(coordinates)?;
    let mut state = Neighbors {
        visited: vec![NONE; n],
        left: vec![NONE; n],
        right: vec![NONE; n],
        junction: vec![false; n],
        count: 0,
    };

    for (arc, line) in topology.lines.iter().enumerate() {
        let Slice { start, end } = *line;
        if end - start < 2 {
            if end > start {
                state.mark(indexes[start]);
            }
            continue;
        }
        // Endpoints of an open line are always junctions.
        state.mark(indexes[start]);
        for current in start + 1..end - 1 {
            state.sequence(arc, indexes[current - 1], indexes[current], indexes[current + 1]);
        }
        state.mark(indexes[end - 1]);
    }

    // The self-intersection guard is per candidate; line and ring ids
    // overlap, so reset it between the passes.
    for visited in state.visited.iter_mut() {
        *visited = NONE;
    }

    for (arc, ring) in topology.rings.iter().enumerate() {
        let Slice { start, end } = *ring;
        if end - start < 2 {
            continue;
        }
        // Rings are visited rotationally: the neighbors of the start point
        // wrap around past the closing duplicate.
        state.sequence(arc, indexes[end - 2], indexes[start], indexes[start + 1]);
        for current in start + 1..end - 1 {
            state.sequence(arc, indexes[current - 1], indexes[current], indexes[current + 1]);
        }
    }

    // A ring with no junction on any of its points gets its starting point
    // as one. Checked in ring order, so an equal later ring inherits the
    // first copy's mark instead of adding its own.
    for ring in &topology.rings {
        let Slice { start, end } = *ring;
        if start == end {
            continue;
        }
        if !(start..end - 1).any(|i| state.junction[indexes[i]]) {
            state.mark(indexes[start]);
        }
    }

    let mut junctions = PointSet::new(state.count, hash::hash_point, hash::equal_point);
    for i in 0..n {
        if state.junction[indexes[i]] {
            junctions.add(coordinates[i])?;
        }
    }
    Ok(junctions)
}

struct Neighbors {
    visited: Vec<usize>,
    left: Vec<usize>,
    right: Vec<usize>,
    junction: Vec<bool>,
    count: usize,
}

impl Neighbors {
    fn mark(&mut self, index: usize) {
        if !self.junction[index] {
            self.junction[index] = true;
            self.count += 1;
        }
    }

    /// Records one visit of `current` inside candidate `arc`, comparing the
    /// unordered neighbor pair against the pair stored by the first visit.
    fn sequence(&mut self, arc: usize, previous: usize, current: usize, next: usize) {
        if self.visited[current] == arc {
            return; // ignore self-intersection
        }
        self.visited[current] = arc;
        let left = self.left[current];
        if left != NONE {
            let right = self.right[current];
            if (left != previous || right != next) && (left != next || right != previous) {
                self.mark(current);
            }
        } else {
            self.left[current] = previous;
            self.right[current] = next;
        }
    }
}

/// Maps every buffer position to the first position holding an equal point,
/// so that coincident points can be compared by index.
fn canonical_indexes(coordinates: &[[f64; 2]]) -> Result<Vec<usize>, Error> {
    let mut index_by_point = HashMap::new(
        coordinates.len(),
        |i: &usize| hash::hash_point(&coordinates[*i]),
        |a: &usize, b: &usize| hash::equal_point(&coordinates[*a], &coordinates[*b]),
    );
    let mut indexes = Vec::with_capacity(coordinates.len());
    for i in 0..coordinates.len() {
        indexes.push(*index_by_point.maybe_set(i, i)?);
    }
    Ok(indexes)
}

#[cfg(test)]
mod tests {
    use super::join;
    use crate::extract::extract;
    use crate::object::{InputGeometry, InputValue};

    fn line(points: &[[f64; 2]]) -> Vec<Vec<f64>> {
        points.iter().map(|p| vec![p[0], p[1]]).collect()
    }

    #[test]
    fn open_line_endpoints_are_junctions() {
        let topology = extract(vec![(
            String::from("line"),
            InputGeometry::new(InputValue::LineString(line(&[
                [0.0, 0.0],
                [1.0, 0.0],
                [2.0, 0.0],
            ]))),
        )]);
        let junctions = join(&topology).unwrap();
        assert!(junctions.has(&[0.0, 0.0]));
        assert!(junctions.has(&[2.0, 0.0]));
        assert!(!junctions.has(&[1.0, 0.0]));
    }

    #[test]
    fn diverging_neighbors_make_a_junction() {
        // Two lines overlap from (0,0) to (1,0) and then fork.
        let topology = extract(vec![
            (
                String::from("a"),
                InputGeometry::new(InputValue::LineString(line(&[
                    [0.0, 0.0],
                    [1.0, 0.0],
                    [2.0, 0.0],
                ]))),
            ),
            (
                String::from("b"),
                InputGeometry::new(InputValue::LineString(line(&[
                    [0.0, 0.0],
                    [1.0, 0.0],
                    [1.0, 1.0],
                ]))),
            ),
        ]);
        let junctions = join(&topology).unwrap();
        assert!(junctions.has(&[1.0, 0.0]));
    }

    #[test]
    fn shared_ring_edge_is_bounded_by_junctions() {
        let topology = extract(vec![
            (
                String::from("a"),
                InputGeometry::new(InputValue::Polygon(vec![line(&[
                    [0.0, 0.0],
                    [1.0, 0.0],
                    [1.0, 1.0],
                    [0.0, 1.0],
                    [0.0, 0.0],
                ])])),
            ),
            (
                String::from("b"),
                InputGeometry::new(InputValue::Polygon(vec![line(&[
                    [1.0, 0.0],
                    [2.0, 0.0],
                    [2.0, 1.0],
                    [1.0, 1.0],
                    [1.0, 0.0],
                ])])),
            ),
        ]);
        let junctions = join(&topology).unwrap();
        assert!(junctions.has(&[1.0, 0.0]));
        assert!(junctions.has(&[1.0, 1.0]));
        assert!(!junctions.has(&[0.0, 0.0]));
        assert!(!junctions.has(&[2.0, 1.0]));
    }

    #[test]
    fn lone_ring_start_becomes_a_junction() {
        let topology = extract(vec![(
            String::from("a"),
            InputGeometry::new(InputValue::Polygon(vec![line(&[
                [0.0, 0.0],
                [1.0, 0.0],
                [1.0, 1.0],
                [0.0, 0.0],
            ])])),
        )]);
        let junctions = join(&topology).unwrap();
        assert!(junctions.has(&[0.0, 0.0]));
        assert!(!junctions.has(&[1.0, 0.0]));
        assert!(!junctions.has(&[1.0, 1.0]));
    }

    #[test]
    fn equal_rings_share_one_fallback_junction() {
        // The same triangle entered at two different start points; the
        // second ring inherits the first ring's fallback junction.
        let topology = extract(vec![
            (
                String::from("a"),
                InputGeometry::new(InputValue::Polygon(vec![line(&[
                    [0.0, 0.0],
                    [1.0, 0.0],
                    [1.0, 1.0],
                    [0.0, 0.0],
                ])])),
            ),
            (
                String::from("b"),
                InputGeometry::new(InputValue::Polygon(vec![line(&[
                    [1.0, 0.0],
                    [1.0, 1.0],
                    [0.0, 0.0],
                    [1.0, 0.0],
                ])])),
            ),
        ]);
        let junctions = join(&topology).unwrap();
        assert!(junctions.has(&[0.0, 0.0]));
        assert!(!junctions.has(&[1.0, 0.0]));
        assert!(!junctions.has(&[1.0, 1.0]));
    }
}
