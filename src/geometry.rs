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

use crate::json::{Deserialize, Deserializer, JsonObject, JsonValue, Serialize, Serializer};
use crate::topojson::Type;
use crate::{util, ArcIndexes, Bbox, Error, Position};

/// The underlying geometry value: raw positions for points, arc indexes for
/// everything built from lines.
///
/// [TopoJSON Format Specification § 2.2](https://github.com/topojson/topojson-specification#22-geometry-objects)
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// [TopoJSON Format Specification § 2.2.1](https://github.com/topojson/topojson-specification#221-point)
    Point(Position),

    /// [TopoJSON Format Specification § 2.2.2](https://github.com/topojson/topojson-specification#222-multipoint)
    MultiPoint(Vec<Position>),

    /// [TopoJSON Format Specification § 2.2.3](https://github.com/topojson/topojson-specification#223-linestring)
    LineString(ArcIndexes),

    /// [TopoJSON Format Specification § 2.2.4](https://github.com/topojson/topojson-specification#224-multilinestring)
    MultiLineString(Vec<ArcIndexes>),

    /// [TopoJSON Format Specification § 2.2.5](https://github.com/topojson/topojson-specification#225-polygon)
    Polygon(Vec<ArcIndexes>),

    /// [TopoJSON Format Specification § 2.2.6](https://github.com/topojson/topojson-specification#226-multipolygon)
    MultiPolygon(Vec<Vec<ArcIndexes>>),

    /// [TopoJSON Format Specification § 2.2.7](https://github.com/topojson/topojson-specification#227-geometry-collection)
    GeometryCollection(Vec<Geometry>),

    /// A geometry with a `null` type, produced for input features that
    /// carry no geometry.
    Null,
}

impl Value {
    pub fn to_json_value(&self) -> JsonValue {
        match self {
            Value::Point(x) => ::serde_json::to_value(x),
            Value::MultiPoint(x) => ::serde_json::to_value(x),
            Value::LineString(x) => ::serde_json::to_value(x),
            Value::MultiLineString(x) => ::serde_json::to_value(x),
            Value::Polygon(x) => ::serde_json::to_value(x),
            Value::MultiPolygon(x) => ::serde_json::to_value(x),
            Value::GeometryCollection(x) => ::serde_json::to_value(x),
            Value::Null => Ok(JsonValue::Null),
        }
        .unwrap()
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json_value().serialize(serializer)
    }
}

/// Geometry objects.
///
/// [TopoJSON Format Specification § 2.2](https://github.com/topojson/topojson-specification#22-geometry-objects)
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    pub bbox: Option<Bbox>,
    pub value: Value,
    pub properties: Option<JsonObject>,
    pub id: Option<JsonValue>,
    pub foreign_members: Option<JsonObject>,
}

impl Geometry {
    /// Returns a new `Geometry` with the specified `value` and everything
    /// else unset.
    pub fn new(value: Value) -> Self {
        Geometry {
            bbox: None,
            value,
            properties: None,
            id: None,
            foreign_members: None,
        }
    }

    pub fn from_json_object(mut object: JsonObject) -> Result<Self, Error> {
        let value = if let Some(JsonValue::Null) = object.get("type") {
            object.remove("type");
            Value::Null
        } else {
            let type_name = util::expect_type(&mut object)?;
            match Type::from_str(&type_name).ok_or(Error::TopoJsonUnknownType)? {
                Type::Point => Value::Point(util::get_position(&mut object)?),
                Type::MultiPoint => Value::MultiPoint(util::get_positions(&mut object)?),
                Type::LineString => Value::LineString(util::get_arc_indexes(&mut object)?),
                Type::MultiLineString => {
                    Value::MultiLineString(util::get_arc_indexes_1d(&mut object)?)
                }
                Type::Polygon => Value::Polygon(util::get_arc_indexes_1d(&mut object)?),
                Type::MultiPolygon => Value::MultiPolygon(util::get_arc_indexes_2d(&mut object)?),
                Type::GeometryCollection => {
                    Value::GeometryCollection(util::get_geometries(&mut object)?)
                }
                Type::Topology => return Err(Error::GeometryUnknownType),
            }
        };
        Ok(Geometry {
            value,
            bbox: util::get_bbox(&mut object)?,
            id: util::get_id(&mut object)?,
            properties: util::get_properties(&mut object)?,
            foreign_members: util::get_foreign_members(object)?,
        })
    }
}

impl<'a> From<&'a Geometry> for JsonObject {
    fn from(geometry: &'a Geometry) -> JsonObject {
        let mut map = JsonObject::new();

        let type_name = match geometry.value {
            Value::Point(..) => JsonValue::from("Point"),
            Value::MultiPoint(..) => JsonValue::from("MultiPoint"),
            Value::LineString(..) => JsonValue::from("LineString"),
            Value::MultiLineString(..) => JsonValue::from("MultiLineString"),
            Value::Polygon(..) => JsonValue::from("Polygon"),
            Value::MultiPolygon(..) => JsonValue::from("MultiPolygon"),
            Value::GeometryCollection(..) => JsonValue::from("GeometryCollection"),
            Value::Null => JsonValue::Null,
        };
        map.insert(String::from("type"), type_name);

        let payload = match geometry.value {
            Value::GeometryCollection(..) => Some("geometries"),
            Value::LineString(..)
            | Value::MultiLineString(..)
            | Value::Polygon(..)
            | Value::MultiPolygon(..) => Some("arcs"),
            Value::Point(..) | Value::MultiPoint(..) => Some("coordinates"),
            Value::Null => None,
        };
        if let Some(key) = payload {
            map.insert(String::from(key), geometry.value.to_json_value());
        }

        if let Some(ref id) = geometry.id {
            map.insert(String::from("id"), id.clone());
        }
        if let Some(ref properties) = geometry.properties {
            map.insert(
                String::from("properties"),
                JsonValue::Object(properties.clone()),
            );
        }
        if let Some(ref bbox) = geometry.bbox {
            map.insert(String::from("bbox"), ::serde_json::to_value(bbox).unwrap());
        }
        if let Some(ref foreign_members) = geometry.foreign_members {
            for (key, value) in foreign_members {
                map.insert(key.to_owned(), value.to_owned());
            }
        }
        map
    }
}

impl Serialize for Geometry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        JsonObject::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D>(deserializer: D) -> Result<Geometry, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as SerdeError;

        let object = JsonObject::deserialize(deserializer)?;
        Geometry::from_json_object(object).map_err(|e| D::Error::custom(e.to_string()))
    }
}

/// One member of the `objects` member of a topology.
///
/// [TopoJSON Format Specification § 2.1.5](https://github.com/topojson/topojson-specification#215-objects)
#[derive(Clone, Debug, PartialEq)]
pub struct NamedGeometry {
    pub name: String,
    pub geometry: Geometry,
}
