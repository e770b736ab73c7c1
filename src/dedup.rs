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

use crate::cut::CutArcs;
use crate::extract::Slice;
use crate::hash::{self, HashMap};
use crate::{ArcIndexes, Error};

/// The interned arcs and, per candidate, the signed arc indexes replacing
/// it. A reversed traversal is encoded as the ones-complement `!i` of the
/// arc index, as the TopoJSON format requires.
pub(crate) struct DedupedArcs {
    pub arcs: Vec<Vec<[f64; 2]>>,
    pub lines: Vec<ArcIndexes>,
    pub rings: Vec<ArcIndexes>,
}

/// Interns every cut piece, collapsing pieces that traverse the same point
/// run forwards or backwards onto a single arc. Line candidates are
/// processed before ring candidates, so arc numbering follows the
/// traversal order.
pub(crate) fn dedup(coordinates: &[[f64; 2]], pieces: &CutArcs) -> Result<DedupedArcs, Error> {
    let piece_count = pieces.lines.iter().map(Vec::len).sum::<usize>()
        + pieces.rings.iter().map(Vec::len).sum::<usize>();
    // Every arc is indexed under two keys.
    let mut interner = Interner {
        coordinates,
        arcs: Vec::new(),
        index: HashMap::new(2 * piece_count, hash_key, equal_key),
    };

    let mut lines = Vec::with_capacity(pieces.lines.len());
    for chain in &pieces.lines {
        let mut indexes = ArcIndexes::with_capacity(chain.len());
        for piece in chain {
            indexes.push(interner.intern(*piece)?);
        }
        lines.push(indexes);
    }

    let mut rings = Vec::with_capacity(pieces.rings.len());
    for chain in &pieces.rings {
        let mut indexes = ArcIndexes::with_capacity(chain.len());
        for piece in chain {
            indexes.push(interner.intern(*piece)?);
        }
        rings.push(indexes);
    }

    let arcs = interner
        .arcs
        .iter()
        .map(|slice| coordinates[slice.start..slice.end].to_vec())
        .collect();
    Ok(DedupedArcs { arcs, lines, rings })
}

/// Normalized arc lookup key. Arcs are indexed under both their forward
/// and reverse key; bucket collisions are resolved by comparing the point
/// sequences.
struct ArcKey {
    first: [f64; 2],
    last: [f64; 2],
    length: usize,
}

fn hash_key(key: &ArcKey) -> u64 {
    let mut hash = hash::hash_point(&key.first);
    hash = hash.wrapping_mul(31).wrapping_add(hash::hash_point(&key.last));
    hash.wrapping_mul(31).wrapping_add(key.length as u64)
}

fn equal_key(a: &ArcKey, b: &ArcKey) -> bool {
    a.length == b.length
        && hash::equal_point(&a.first, &b.first)
        && hash::equal_point(&a.last, &b.last)
}

struct Interner<'a> {
    coordinates: &'a [[f64; 2]],
    arcs: Vec<Slice>,
    index: HashMap<ArcKey, Vec<usize>, fn(&ArcKey) -> u64, fn(&ArcKey, &ArcKey) -> bool>,
}

impl<'a> Interner<'a> {
    /// Interns one cut piece, returning its signed arc index
    /// (ones-complement when the piece matches an existing arc reversed).
    fn intern(&mut self, piece: Slice) -> Result<i32, Error> {
        let key = self.key_of(piece);
        if let Some(bucket) = self.index.get(&key) {
            for &arc in bucket {
                if self.equal_forward(self.arcs[arc], piece) {
                    return Ok(arc as i32);
                }
                if self.equal_reversed(self.arcs[arc], piece) {
                    return Ok(!(arc as i32));
                }
            }
        }
        let index = self.arcs.len();
        self.arcs.push(piece);
        let reverse = ArcKey {
            first: key.last,
            last: key.first,
            length: key.length,
        };
        let distinct = !equal_key(&key, &reverse);
        self.push_key(key, index)?;
        if distinct {
            self.push_key(reverse, index)?;
        }
        Ok(index as i32)
    }

    fn push_key(&mut self, key: ArcKey, index: usize) -> Result<(), Error> {
        match self.index.get_mut(&key) {
            Some(bucket) => bucket.push(index),
            None => {
                self.index.set(key, vec![index])?;
            }
        }
        Ok(())
    }

    fn key_of(&self, piece: Slice) -> ArcKey {
        ArcKey {
            first: self.coordinates[piece.start],
            last: self.coordinates[piece.end - 1],
            length: piece.len(),
        }
    }

    fn equal_forward(&self, a: Slice, b: Slice) -> bool {
        a.len() == b.len()
            && (0..a.len()).all(|i| {
                hash::equal_point(&self.coordinates[a.start + i], &self.coordinates[b.start + i])
            })
    }

    fn equal_reversed(&self, a: Slice, b: Slice) -> bool {
        a.len() == b.len()
            && (0..a.len()).all(|i| {
                hash::equal_point(
                    &self.coordinates[a.start + i],
                    &self.coordinates[b.end - 1 - i],
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::dedup;
    use crate::cut::CutArcs;
    use crate::extract::Slice;

    #[test]
    fn forward_duplicate_lines_share_an_arc() {
        let coordinates = [[0.0, 0.0], [1.0, 0.0], [0.0, 0.0], [1.0, 0.0]];
        let pieces = CutArcs {
            lines: vec![
                vec![Slice { start: 0, end: 2 }],
                vec![Slice { start: 2, end: 4 }],
            ],
            rings: vec![],
        };
        let deduped = dedup(&coordinates, &pieces).unwrap();
        assert_eq!(deduped.arcs.len(), 1);
        assert_eq!(deduped.lines, vec![vec![0], vec![0]]);
    }

    #[test]
    fn reversed_duplicate_gets_a_complemented_index() {
        let coordinates = [[0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [0.0, 0.0]];
        let pieces = CutArcs {
            lines: vec![
                vec![Slice { start: 0, end: 2 }],
                vec![Slice { start: 2, end: 4 }],
            ],
            rings: vec![],
        };
        let deduped = dedup(&coordinates, &pieces).unwrap();
        assert_eq!(deduped.arcs.len(), 1);
        assert_eq!(deduped.lines, vec![vec![0], vec![-1]]);
    }

    #[test]
    fn distinct_lines_stay_distinct() {
        let coordinates = [[0.0, 0.0], [1.0, 0.0], [0.0, 0.0], [2.0, 0.0]];
        let pieces = CutArcs {
            lines: vec![
                vec![Slice { start: 0, end: 2 }],
                vec![Slice { start: 2, end: 4 }],
            ],
            rings: vec![],
        };
        let deduped = dedup(&coordinates, &pieces).unwrap();
        assert_eq!(deduped.arcs.len(), 2);
        assert_eq!(deduped.lines, vec![vec![0], vec![1]]);
    }

    #[test]
    fn aligned_ring_copies_share_an_arc() {
        // Cut aligns equal rings on a shared junction, so dedup sees the
        // same closed run twice.
        let coordinates = [
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 0.0],
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 0.0],
        ];
        let pieces = CutArcs {
            lines: vec![],
            rings: vec![
                vec![Slice { start: 0, end: 4 }],
                vec![Slice { start: 4, end: 8 }],
            ],
        };
        let deduped = dedup(&coordinates, &pieces).unwrap();
        assert_eq!(deduped.arcs.len(), 1);
        assert_eq!(deduped.rings, vec![vec![0], vec![0]]);
    }

    #[test]
    fn reversed_ring_copy_is_complemented() {
        let coordinates = [
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 0.0],
            [0.0, 0.0],
            [1.0, 1.0],
            [1.0, 0.0],
            [0.0, 0.0],
        ];
        let pieces = CutArcs {
            lines: vec![],
            rings: vec![
                vec![Slice { start: 0, end: 4 }],
                vec![Slice { start: 4, end: 8 }],
            ],
        };
        let deduped = dedup(&coordinates, &pieces).unwrap();
        assert_eq!(deduped.arcs.len(), 1);
        assert_eq!(deduped.rings, vec![vec![0], vec![-1]]);
    }

    #[test]
    fn cut_ring_pieces_match_like_lines() {
        // Two chains covering the same two pieces in opposite directions.
        let coordinates = [
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [1.0, 0.0],
            [0.0, 0.0],
            [1.0, 1.0],
        ];
        let pieces = CutArcs {
            lines: vec![],
            rings: vec![
                vec![Slice { start: 0, end: 2 }, Slice { start: 1, end: 4 }],
                vec![Slice { start: 4, end: 6 }, Slice { start: 5, end: 8 }],
            ],
        };
        let deduped = dedup(&coordinates, &pieces).unwrap();
        assert_eq!(deduped.arcs.len(), 2);
        assert_eq!(deduped.rings, vec![vec![0, 1], vec![-1, -2]]);
    }
}
