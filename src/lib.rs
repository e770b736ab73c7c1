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

//! Construction of TopoJSON topologies from GeoJSON, and conversion back.
//!
//! A topology stores every line segment shared between its geometries
//! exactly once, as an *arc*; geometries reference arcs by index, with the
//! ones-complement `!i` meaning "arc `i` traversed backwards". This crate
//! builds such topologies from named GeoJSON inputs, de/serializes them
//! with `serde`, and expands them back to
//! [GeoJSON](https://github.com/georust/geojson) objects.
//!
//! # Examples
//!
//! ## Building a topology
//!
//! ```rust
//! use geotopo::{topology, Value};
//! use geojson::GeoJson;
//!
//! let polygon: GeoJson = r#"{
//!     "type": "Polygon",
//!     "coordinates": [[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,1.0],[0.0,0.0]]]
//! }"#.parse().unwrap();
//!
//! let topo = topology(vec![(String::from("square"), polygon)], 0).unwrap();
//! assert_eq!(topo.arcs.len(), 1);
//! assert_eq!(topo.objects[0].geometry.value, Value::Polygon(vec![vec![0]]));
//! ```
//!
//! ## Reading
//!
//! ```rust
//! use geotopo::TopoJson;
//!
//! let topojson_str = r#"
//! {
//!     "type": "Topology",
//!     "transform": {"scale": [0.0005, 0.0001], "translate": [100.0, 0.0]},
//!     "objects": {"example": {"type": "Polygon", "arcs": [[0]]}},
//!     "arcs": [[[0, 0], [0, 9999], [2000, 0], [0, -9999], [-2000, 0]]]
//! }
//! "#;
//!
//! let topo = topojson_str.parse::<TopoJson>().unwrap();
//! ```
//!
//! ## Writing
//!
//! `Topology` is serialized by `serde_json::to_string`:
//!
//! ```rust
//! use geotopo::{Geometry, NamedGeometry, Topology, Value};
//!
//! let topo = Topology {
//!     arcs: vec![vec![vec![2.2, 2.2], vec![3.3, 3.3]]],
//!     objects: vec![NamedGeometry {
//!         name: String::from("example"),
//!         geometry: Geometry::new(Value::LineString(vec![0])),
//!     }],
//!     bbox: None,
//!     transform: None,
//! };
//!
//! let topojson_string = serde_json::to_string(&topo).unwrap();
//! ```
//!
//! ## Converting to GeoJSON
//!
//! ```rust
//! use geotopo::{to_geojson, TopoJson};
//!
//! let topojson_str = r#"
//! {
//!     "type": "Topology",
//!     "objects": {"example": {"type": "LineString", "arcs": [0]}},
//!     "arcs": [[[0.0, 0.0], [1.0, 1.0]]]
//! }
//! "#;
//!
//! let geojson = match topojson_str.parse::<TopoJson>().unwrap() {
//!     TopoJson::Topology(topo) => to_geojson(&topo, "example").unwrap(),
//!     _ => unimplemented!(),
//! };
//! assert_eq!(geojson.features.len(), 1);
//! ```

/// Bounding boxes
///
/// [TopoJSON Format Specification § 3](https://github.com/topojson/topojson-specification#3-bounding-boxes)
pub type Bbox = Vec<f64>;

/// Positions
///
/// [TopoJSON Format Specification § 2.1.1](https://github.com/topojson/topojson-specification#211-positions)
pub type Position = Vec<f64>;

/// Arcs (an array of positions which may have been quantized and
/// delta-encoded)
///
/// [TopoJSON Format Specification § 2.1.3](https://github.com/topojson/topojson-specification#213-arcs)
///
/// Warning: this has a completely different meaning from the
/// [`Arc`](https://doc.rust-lang.org/std/sync/struct.Arc.html) term in the
/// standard library. It is used here to describe what could also be
/// commonly called an *edge*.
pub type Arc = Vec<Position>;

/// Arc indexes (an array of indexes)
///
/// [TopoJSON Format Specification § 2.1.4](https://github.com/topojson/topojson-specification#214-arc-indexes)
pub type ArcIndexes = Vec<i32>;

pub(crate) mod util;

mod topojson;
pub use crate::topojson::TopoJson;

mod geometry;
pub use crate::geometry::{Geometry, NamedGeometry, Value};

mod topology;
pub use crate::topology::{Topology, TransformParams};

mod error;
pub use crate::error::Error;

pub mod hash;

mod object;

mod bounds;
mod cut;
mod dedup;
mod delta;
mod extract;
mod join;
mod prequantize;

mod from_geojson;
pub use crate::from_geojson::topology;

mod to_geojson;
pub use crate::to_geojson::to_geojson;

mod json {
    pub use serde::{Deserialize, Deserializer, Serialize, Serializer};
    pub use serde_json::{Map, Value as JsonValue};
    pub type JsonObject = Map<String, JsonValue>;
}
