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

/// Rewrites each arc in place so the first point stays absolute and every
/// later point becomes the difference from its predecessor. Zero deltas are
/// dropped, and an arc that collapses to a single point is kept two points
/// long with a `[0, 0]` delta. Only meaningful once coordinates are on the
/// quantization grid.
pub(crate) fn delta(arcs: &mut [Vec<[f64; 2]>]) {
    for points in arcs.iter_mut() {
        if points.is_empty() {
            continue;
        }
        let (mut x0, mut y0) = (points[0][0], points[0][1]);
        let mut length = 1;
        for i in 1..points.len() {
            let [x1, y1] = points[i];
            if x1 != x0 || y1 != y0 {
                points[length] = [x1 - x0, y1 - y0];
                x0 = x1;
                y0 = y1;
                length += 1;
            }
        }
        if length == 1 {
            if points.len() > 1 {
                points[1] = [0.0, 0.0];
            } else {
                points.push([0.0, 0.0]);
            }
            length = 2;
        }
        points.truncate(length);
    }
}

#[cfg(test)]
mod tests {
    use super::delta;

    #[test]
    fn delta_keeps_the_first_point_absolute() {
        let mut arcs = vec![vec![[100.0, 200.0], [101.0, 202.0], [103.0, 199.0]]];
        delta(&mut arcs);
        assert_eq!(
            arcs,
            vec![vec![[100.0, 200.0], [1.0, 2.0], [2.0, -3.0]]]
        );
    }

    #[test]
    fn delta_drops_zero_deltas() {
        let mut arcs = vec![vec![[5.0, 5.0], [5.0, 5.0], [6.0, 5.0]]];
        delta(&mut arcs);
        assert_eq!(arcs, vec![vec![[5.0, 5.0], [1.0, 0.0]]]);
    }

    #[test]
    fn delta_pads_a_collapsed_arc() {
        let mut arcs = vec![vec![[5.0, 5.0], [5.0, 5.0], [5.0, 5.0]]];
        delta(&mut arcs);
        assert_eq!(arcs, vec![vec![[5.0, 5.0], [0.0, 0.0]]]);
    }
}
