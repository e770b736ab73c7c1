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
use std::str::FromStr;

use crate::json::{self, Deserialize, Deserializer, JsonObject, Serialize, Serializer};
use crate::{Error, Geometry, Topology};

/// A TopoJSON object: either a topology or a bare geometry.
///
/// [TopoJSON Format Specification § 2](https://github.com/topojson/topojson-specification#2-topojson-objects)
#[derive(Clone, Debug, PartialEq)]
pub enum TopoJson {
    /// [TopoJSON Format Specification § 2.2](https://github.com/topojson/topojson-specification#22-geometry-objects)
    Geometry(Geometry),
    /// [TopoJSON Format Specification § 2.1](https://github.com/topojson/topojson-specification#21-topology-objects)
    Topology(Topology),
}

impl<'a> From<&'a TopoJson> for JsonObject {
    fn from(topo: &'a TopoJson) -> JsonObject {
        match topo {
            TopoJson::Geometry(geometry) => geometry.into(),
            TopoJson::Topology(topology) => topology.into(),
        }
    }
}

impl From<Geometry> for TopoJson {
    fn from(geometry: Geometry) -> Self {
        TopoJson::Geometry(geometry)
    }
}

impl From<Topology> for TopoJson {
    fn from(topology: Topology) -> Self {
        TopoJson::Topology(topology)
    }
}

impl TopoJson {
    pub fn from_json_object(object: JsonObject) -> Result<Self, Error> {
        match object.get("type") {
            // A null type is a geometry placeholder for a feature without
            // a geometry.
            Some(json::JsonValue::Null) => {
                Geometry::from_json_object(object).map(TopoJson::Geometry)
            }
            Some(json::JsonValue::String(t)) => match Type::from_str(t) {
                Some(Type::Topology) => {
                    Topology::from_json_object(object).map(TopoJson::Topology)
                }
                Some(_) => Geometry::from_json_object(object).map(TopoJson::Geometry),
                None => Err(Error::TopoJsonUnknownType),
            },
            _ => Err(Error::ExpectedProperty("type".to_owned())),
        }
    }
}

#[derive(PartialEq, Clone, Copy)]
pub(crate) enum Type {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
    Topology,
}

impl Type {
    pub(crate) fn from_str(s: &str) -> Option<Self> {
        match s {
            "Point" => Some(Type::Point),
            "MultiPoint" => Some(Type::MultiPoint),
            "LineString" => Some(Type::LineString),
            "MultiLineString" => Some(Type::MultiLineString),
            "Polygon" => Some(Type::Polygon),
            "MultiPolygon" => Some(Type::MultiPolygon),
            "GeometryCollection" => Some(Type::GeometryCollection),
            "Topology" => Some(Type::Topology),
            _ => None,
        }
    }
}

impl Serialize for TopoJson {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        JsonObject::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TopoJson {
    fn deserialize<D>(deserializer: D) -> Result<TopoJson, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as SerdeError;

        let object = JsonObject::deserialize(deserializer)?;
        TopoJson::from_json_object(object).map_err(|e| D::Error::custom(e.to_string()))
    }
}

impl FromStr for TopoJson {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let object = get_object(s)?;
        TopoJson::from_json_object(object)
    }
}

fn get_object(s: &str) -> Result<JsonObject, Error> {
    match ::serde_json::from_str(s) {
        Ok(json::JsonValue::Object(object)) => Ok(object),
        _ => Err(Error::MalformedJson),
    }
}

impl fmt::Display for TopoJson {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        ::serde_json::to_string(self)
            .map_err(|_| fmt::Error)
            .and_then(|s| f.write_str(&s))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, TopoJson};

    #[test]
    fn decode_rejects_non_object_json() {
        assert_eq!(
            "[1,2,3]".parse::<TopoJson>().unwrap_err(),
            Error::MalformedJson
        );
    }

    #[test]
    fn decode_rejects_missing_type() {
        assert_eq!(
            "{\"arcs\":[]}".parse::<TopoJson>().unwrap_err(),
            Error::ExpectedProperty(String::from("type"))
        );
    }

    #[test]
    fn decode_rejects_unknown_type() {
        assert_eq!(
            "{\"type\":\"Polyhedron\"}".parse::<TopoJson>().unwrap_err(),
            Error::TopoJsonUnknownType
        );
    }

    #[test]
    fn decode_dispatches_on_type() {
        let geometry = "{\"type\":\"Point\",\"coordinates\":[0.0,0.0]}"
            .parse::<TopoJson>()
            .unwrap();
        assert!(matches!(geometry, TopoJson::Geometry(_)));

        let topology = "{\"type\":\"Topology\",\"objects\":{},\"arcs\":[]}"
            .parse::<TopoJson>()
            .unwrap();
        assert!(matches!(topology, TopoJson::Topology(_)));
    }
}
