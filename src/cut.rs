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
use crate::join::join;
use crate::Error;

/// The arc candidates after cutting: one list of sub-slices per candidate,
/// in candidate order. Consecutive sub-slices of a chain share their
/// boundary point.
pub(crate) struct CutArcs {
    pub lines: Vec<Vec<Slice>>,
    pub rings: Vec<Vec<Slice>>,
}

/// Splits every arc candidate at junctions so that any shared run of
/// points ends up in exactly one arc. Rings that do not start at a
/// junction are first rotated in the coordinate buffer so they do; join
/// guarantees every ring has at least one junction on it, so a ring with
/// no shared boundary comes out as a single closed arc starting at its
/// fallback junction.
pub(crate) fn cut(topology: &mut Extracted) -> Result<CutArcs, Error> {
    let junctions = join(topology)?;
    let coordinates = &mut topology.coordinates;

    let mut lines = Vec::with_capacity(topology.lines.len());
    for candidate in &topology.lines {
        let mut pieces = Vec::new();
        let mut piece = *candidate;
        let mut mid = candidate.start + 1;
        while mid + 1 < candidate.end {
            if junctions.has(&coordinates[mid]) {
                pieces.push(Slice {
                    start: piece.start,
                    end: mid + 1,
                });
                piece = Slice {
                    start: mid,
                    end: piece.end,
                };
            }
            mid += 1;
        }
        pieces.push(piece);
        lines.push(pieces);
    }

    let mut rings = Vec::with_capacity(topology.rings.len());
    for candidate in &topology.rings {
        let Slice { start, end } = *candidate;
        if end - start < 2 {
            rings.push(vec![*candidate]);
            continue;
        }
        let mut fixed = junctions.has(&coordinates[start]);
        let mut pieces = Vec::new();
        let mut piece = *candidate;
        let mut mid = start + 1;
        while mid < end - 1 {
            if junctions.has(&coordinates[mid]) {
                if fixed {
                    pieces.push(Slice {
                        start: piece.start,
                        end: mid + 1,
                    });
                    piece = Slice {
                        start: mid,
                        end: piece.end,
                    };
                } else {
                    // Rotate the ring so it starts at this junction, then
                    // rescan: the rotation may have moved junctions behind
                    // the cursor.
                    coordinates[start..end - 1].rotate_right(end - 1 - mid);
                    coordinates[end - 1] = coordinates[start];
                    fixed = true;
                    mid = start;
                }
            }
            mid += 1;
        }
        pieces.push(piece);
        rings.push(pieces);
    }

    Ok(CutArcs { lines, rings })
}
