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

use crate::json::{Deserialize, Deserializer, JsonObject, Serialize, Serializer};
use crate::{util, Arc, Bbox, Error, NamedGeometry, TopoJson};

/// The transform that inverts quantization: a quantized point `(x, y)`
/// maps back to `(x * scale[0] + translate[0], y * scale[1] + translate[1])`.
///
/// [TopoJSON Format Specification § 2.1.2](https://github.com/topojson/topojson-specification#212-transforms)
#[derive(Clone, Debug, PartialEq)]
pub struct TransformParams {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

impl<'a> From<&'a TransformParams> for JsonObject {
    fn from(transform: &'a TransformParams) -> JsonObject {
        let mut map = JsonObject::new();
        map.insert(
            String::from("scale"),
            ::serde_json::to_value(transform.scale).unwrap(),
        );
        map.insert(
            String::from("translate"),
            ::serde_json::to_value(transform.translate).unwrap(),
        );
        map
    }
}

impl TransformParams {
    pub fn from_json_object(object: JsonObject) -> Result<Self, Error> {
        let scale = util::transform_pair(
            &object,
            "scale",
            Error::TransformExpectedScale,
            Error::ScaleExpectedArray,
            Error::ScaleExpectedNumericValues,
        )?;
        let translate = util::transform_pair(
            &object,
            "translate",
            Error::TransformExpectedTranslate,
            Error::TranslateExpectedArray,
            Error::TranslateExpectedNumericValues,
        )?;
        Ok(TransformParams { scale, translate })
    }
}

impl Serialize for TransformParams {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        JsonObject::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TransformParams {
    fn deserialize<D>(deserializer: D) -> Result<TransformParams, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as SerdeError;

        let object = JsonObject::deserialize(deserializer)?;
        TransformParams::from_json_object(object).map_err(|e| D::Error::custom(e.to_string()))
    }
}

/// A topology: named geometry objects sharing one arc pool.
///
/// [TopoJSON Format Specification § 2.1](https://github.com/topojson/topojson-specification#21-topology-objects)
#[derive(Clone, Debug, PartialEq)]
pub struct Topology {
    pub bbox: Option<Bbox>,
    /// Kept as a vector so objects stay in insertion order.
    pub objects: Vec<NamedGeometry>,
    pub transform: Option<TransformParams>,
    pub arcs: Vec<Arc>,
}

impl<'a> From<&'a Topology> for JsonObject {
    fn from(topology: &'a Topology) -> JsonObject {
        let mut map = JsonObject::new();
        map.insert(String::from("type"), serde_json::json!("Topology"));

        if let Some(ref bbox) = topology.bbox {
            map.insert(String::from("bbox"), ::serde_json::to_value(bbox).unwrap());
        }
        if let Some(ref transform) = topology.transform {
            map.insert(
                String::from("transform"),
                ::serde_json::to_value(transform).unwrap(),
            );
        }

        let mut objects = JsonObject::new();
        for named in &topology.objects {
            objects.insert(named.name.clone(), JsonObject::from(&named.geometry).into());
        }
        map.insert(String::from("objects"), ::serde_json::Value::Object(objects));
        map.insert(
            String::from("arcs"),
            ::serde_json::to_value(&topology.arcs).unwrap(),
        );
        map
    }
}

impl Topology {
    pub fn from_json_object(mut object: JsonObject) -> Result<Self, Error> {
        match util::expect_type(&mut object)? {
            ref type_ if type_ == "Topology" => Ok(Topology {
                bbox: util::get_bbox(&mut object)?,
                objects: util::get_objects(&mut object)?,
                transform: util::get_transform(&mut object)?,
                arcs: util::get_arcs(&mut object)?,
            }),
            type_ => Err(Error::ExpectedType {
                expected: "Topology".to_owned(),
                actual: type_,
            }),
        }
    }

    /// The names of the topology's objects, in order.
    pub fn list_names(&self) -> Vec<String> {
        self.objects.iter().map(|named| named.name.clone()).collect()
    }
}

impl Serialize for Topology {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        JsonObject::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Topology {
    fn deserialize<D>(deserializer: D) -> Result<Topology, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as SerdeError;

        let object = JsonObject::deserialize(deserializer)?;
        Topology::from_json_object(object).map_err(|e| D::Error::custom(e.to_string()))
    }
}

impl From<TopoJson> for Option<Topology> {
    fn from(topo: TopoJson) -> Self {
        match topo {
            TopoJson::Topology(topology) => Some(topology),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error, Geometry, NamedGeometry, TopoJson, Topology, TransformParams, Value,
    };

    fn encode(topology: &Topology) -> String {
        serde_json::to_string(&topology).unwrap()
    }

    fn decode(json_string: &str) -> Topology {
        match json_string.parse().unwrap() {
            TopoJson::Topology(t) => t,
            _ => unreachable!(),
        }
    }

    fn example_line_topology() -> Topology {
        Topology {
            arcs: vec![vec![vec![2.2, 2.2], vec![3.3, 3.3]]],
            objects: vec![NamedGeometry {
                name: String::from("example"),
                geometry: Geometry::new(Value::LineString(vec![0])),
            }],
            bbox: None,
            transform: None,
        }
    }

    #[test]
    fn encode_decode_topology_arcs() {
        let json = "{\"type\":\"Topology\",\"objects\":{},\"arcs\":[[[2.2,2.2],[3.3,3.3]]]}";
        let topology = Topology {
            arcs: vec![vec![vec![2.2, 2.2], vec![3.3, 3.3]]],
            objects: vec![],
            bbox: None,
            transform: None,
        };

        assert_eq!(encode(&topology), json);
        assert_eq!(decode(json), topology);
    }

    #[test]
    fn encode_decode_topology_with_object() {
        let json = "{\"type\":\"Topology\",\"objects\":{\"example\":{\"type\":\"LineString\",\"arcs\":[0]}},\"arcs\":[[[2.2,2.2],[3.3,3.3]]]}";
        let topology = example_line_topology();

        assert_eq!(encode(&topology), json);
        assert_eq!(decode(json), topology);
    }

    #[test]
    fn encode_decode_topology_with_transform() {
        let json = "{\"type\":\"Topology\",\"transform\":{\"scale\":[0.12,0.12],\"translate\":[1.1,1.1]},\"objects\":{},\"arcs\":[[[2.2,2.2],[3.3,3.3]]]}";
        let topology = Topology {
            arcs: vec![vec![vec![2.2, 2.2], vec![3.3, 3.3]]],
            objects: vec![],
            bbox: None,
            transform: Some(TransformParams {
                scale: [0.12, 0.12],
                translate: [1.1, 1.1],
            }),
        };

        assert_eq!(encode(&topology), json);
        assert_eq!(decode(json), topology);
    }

    #[test]
    fn encode_decode_topology_with_bbox() {
        let json =
            "{\"type\":\"Topology\",\"bbox\":[0.0,0.0,1.0,1.0],\"objects\":{},\"arcs\":[]}";
        let topology = Topology {
            arcs: vec![],
            objects: vec![],
            bbox: Some(vec![0.0, 0.0, 1.0, 1.0]),
            transform: None,
        };

        assert_eq!(encode(&topology), json);
        assert_eq!(decode(json), topology);
    }

    #[test]
    fn decode_topology_without_objects_fails() {
        let result = "{\"arcs\":[[[2.2,2.2],[3.3,3.3]]],\"type\":\"Topology\"}"
            .parse::<TopoJson>();
        assert_eq!(result.unwrap_err(), Error::TopologyExpectedObjects);
    }

    #[test]
    fn decode_topology_without_arcs_fails() {
        let result = "{\"objects\":{},\"type\":\"Topology\"}".parse::<TopoJson>();
        assert_eq!(result.unwrap_err(), Error::TopologyExpectedArcs);
    }

    #[test]
    fn decode_topology_with_bad_type_fails() {
        let result = "{\"arcs\":[],\"type\":\"foo\",\"objects\":{}}".parse::<TopoJson>();
        assert_eq!(result.unwrap_err(), Error::TopoJsonUnknownType);
    }

    #[test]
    fn list_names_returns_object_names_in_order() {
        let topology = example_line_topology();
        assert_eq!(topology.list_names(), vec![String::from("example")]);
    }

    #[test]
    fn decode_preserves_object_order() {
        let json = "{\"type\":\"Topology\",\"objects\":{\"zebra\":{\"type\":\"LineString\",\"arcs\":[0]},\"aardvark\":{\"type\":\"LineString\",\"arcs\":[0]}},\"arcs\":[[[0.0,0.0],[1.0,1.0]]]}";
        let topology = decode(json);
        assert_eq!(
            topology.list_names(),
            vec![String::from("zebra"), String::from("aardvark")]
        );
        // Round-trips in the same order.
        assert_eq!(encode(&topology), json);
    }
}
