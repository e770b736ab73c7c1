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

//! Geometry trees private to the topology builder.
//!
//! Input GeoJSON is converted into [`InputGeometry`] before the pipeline
//! runs; extraction then swaps each line and ring for an arc-candidate id,
//! yielding the parallel [`ExtractedGeometry`] tree. The original input is
//! never mutated in place.

use crate::json::{JsonObject, JsonValue};
use crate::{Bbox, Position};

/// An input geometry with feature metadata folded in and coordinates still
/// raw.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct InputGeometry {
    pub bbox: Option<Bbox>,
    pub id: Option<JsonValue>,
    pub properties: Option<JsonObject>,
    pub value: InputValue,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum InputValue {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
    GeometryCollection(Vec<InputGeometry>),
    /// A feature without a geometry.
    Null,
}

/// A geometry whose lines and rings have been replaced by candidate ids
/// into the extractor's `lines` and `rings` tables.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ExtractedGeometry {
    pub bbox: Option<Bbox>,
    pub id: Option<JsonValue>,
    pub properties: Option<JsonObject>,
    pub value: ExtractedValue,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ExtractedValue {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(usize),
    MultiLineString(Vec<usize>),
    Polygon(Vec<usize>),
    MultiPolygon(Vec<Vec<usize>>),
    GeometryCollection(Vec<ExtractedGeometry>),
    Null,
}

impl InputGeometry {
    /// A bare geometry, without feature metadata.
    pub fn new(value: InputValue) -> Self {
        InputGeometry {
            bbox: None,
            id: None,
            properties: None,
            value,
        }
    }
}
