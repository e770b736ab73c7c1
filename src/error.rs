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

use std::fmt;

/// Errors which can occur while reading or writing TopoJSON, building a
/// topology from GeoJSON, or expanding a topology back to GeoJSON.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The input string is not a JSON object.
    MalformedJson,
    /// A required member is missing.
    ExpectedProperty(String),
    ExpectedStringValue,
    ExpectedF64Value,
    ExpectedI32Value,
    ExpectedArrayValue,
    ExpectedObjectValue,
    /// The `type` member names neither a geometry type nor `Topology`.
    TopoJsonUnknownType,
    /// The `type` member of a geometry object is not a known geometry type.
    GeometryUnknownType,
    ExpectedType { expected: String, actual: String },
    BboxExpectedArray,
    BboxExpectedNumericValues,
    TransformExpectedScale,
    TransformExpectedTranslate,
    ScaleExpectedArray,
    ScaleExpectedNumericValues,
    TranslateExpectedArray,
    TranslateExpectedNumericValues,
    PropertiesExpectedObjectOrNull,
    TopologyExpectedObjects,
    TopologyExpectedArcs,
    /// A position has fewer than two coordinates, or a non-finite one.
    MalformedCoordinate,
    /// A LineString has fewer than two positions.
    MalformedLineString,
    /// A polygon ring has fewer than four positions, or is not closed.
    MalformedRing,
    /// An open-addressed table ran out of slots. The builder sizes its
    /// tables from an upper bound on the key population, so this is a
    /// sizing bug rather than an input error.
    HashTableFull,
    /// A geometry references an arc the topology does not contain.
    ArcIndexOutOfBounds(i32),
    /// The topology transform has a zero scale factor and cannot be
    /// inverted.
    TransformZeroScale,
    /// The requested object is not present in the topology.
    TopoToGeoUnknownKey(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedJson => write!(f, "expected a JSON object"),
            Error::ExpectedProperty(name) => write!(f, "expected a \"{}\" member", name),
            Error::ExpectedStringValue => write!(f, "expected a string value"),
            Error::ExpectedF64Value => write!(f, "expected a floating-point value"),
            Error::ExpectedI32Value => write!(f, "expected an integer value"),
            Error::ExpectedArrayValue => write!(f, "expected an array value"),
            Error::ExpectedObjectValue => write!(f, "expected an object value"),
            Error::TopoJsonUnknownType => write!(f, "unknown TopoJSON object type"),
            Error::GeometryUnknownType => write!(f, "unknown geometry type"),
            Error::ExpectedType { expected, actual } => {
                write!(f, "expected type \"{}\", found \"{}\"", expected, actual)
            }
            Error::BboxExpectedArray => write!(f, "\"bbox\" must be an array"),
            Error::BboxExpectedNumericValues => write!(f, "\"bbox\" must contain numbers"),
            Error::TransformExpectedScale => write!(f, "\"transform\" must have a \"scale\" member"),
            Error::TransformExpectedTranslate => {
                write!(f, "\"transform\" must have a \"translate\" member")
            }
            Error::ScaleExpectedArray => write!(f, "\"scale\" must be an array"),
            Error::ScaleExpectedNumericValues => write!(f, "\"scale\" must contain numbers"),
            Error::TranslateExpectedArray => write!(f, "\"translate\" must be an array"),
            Error::TranslateExpectedNumericValues => {
                write!(f, "\"translate\" must contain numbers")
            }
            Error::PropertiesExpectedObjectOrNull => {
                write!(f, "\"properties\" must be an object or null")
            }
            Error::TopologyExpectedObjects => write!(f, "topology must have an \"objects\" member"),
            Error::TopologyExpectedArcs => write!(f, "topology must have an \"arcs\" member"),
            Error::MalformedCoordinate => {
                write!(f, "positions must have at least two finite coordinates")
            }
            Error::MalformedLineString => {
                write!(f, "line strings must have at least two positions")
            }
            Error::MalformedRing => {
                write!(f, "rings must be closed and have at least four positions")
            }
            Error::HashTableFull => write!(f, "hash table is full"),
            Error::ArcIndexOutOfBounds(index) => {
                write!(f, "arc index {} is out of bounds", index)
            }
            Error::TransformZeroScale => write!(f, "transform scale must be nonzero"),
            Error::TopoToGeoUnknownKey(key) => {
                write!(f, "no object named \"{}\" in the topology", key)
            }
        }
    }
}

impl std::error::Error for Error {}
