use crate::schema::{ArraySchema, ObjectSchema, ScalarSchema, SchemaNode};
use serde::ser::{Serialize, SerializeMap, Serializer};

impl Serialize for SchemaNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SchemaNode::Object(object) => object.serialize(serializer),
            SchemaNode::Array(array) => array.serialize(serializer),
            SchemaNode::Scalar(scalar) => scalar.serialize(serializer),
        }
    }
}

impl Serialize for ObjectSchema {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "object")?;
        if !self.properties.is_empty() {
            map.serialize_entry("properties", &PropertyMap(&self.properties))?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        map.end()
    }
}

/// Keeps properties in declaration order, unlike a name-sorted map.
struct PropertyMap<'a>(&'a [(String, SchemaNode)]);

impl Serialize for PropertyMap<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, node) in self.0 {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

impl Serialize for ArraySchema {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "array")?;
        map.serialize_entry("items", self.items.as_ref())?;
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        map.end()
    }
}

impl Serialize for ScalarSchema {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind.as_str())?;
        if let Some(format) = self.format {
            map.serialize_entry("format", format)?;
        }
        if let Some(minimum) = self.minimum {
            map.serialize_entry("minimum", &minimum)?;
        }
        if let Some(maximum) = self.maximum {
            map.serialize_entry("maximum", &maximum)?;
        }
        if let Some(min_length) = self.min_length {
            map.serialize_entry("minLength", &min_length)?;
        }
        if let Some(max_length) = self.max_length {
            map.serialize_entry("maxLength", &max_length)?;
        }
        if let Some(pattern) = &self.pattern {
            map.serialize_entry("pattern", pattern)?;
        }
        if let Some(enumeration) = &self.enumeration {
            map.serialize_entry("enum", enumeration)?;
        }
        if let Some(default) = &self.default {
            map.serialize_entry("default", default)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ScalarKind;

    #[test]
    fn test_scalar_shape() {
        let scalar = ScalarSchema {
            kind: ScalarKind::Integer,
            minimum: Some(0),
            maximum: Some(255),
            ..ScalarSchema::default()
        };
        let json = serde_json::to_value(SchemaNode::Scalar(scalar)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "integer", "minimum": 0, "maximum": 255})
        );
    }

    #[test]
    fn test_object_preserves_property_order() {
        let mut object = ObjectSchema::default();
        object.insert("zebra", SchemaNode::Scalar(ScalarSchema::default()));
        object.insert("alpha", SchemaNode::Scalar(ScalarSchema::default()));
        let json = serde_json::to_string(&SchemaNode::Object(object)).unwrap();
        assert!(json.find("zebra").unwrap() < json.find("alpha").unwrap());
    }

    #[test]
    fn test_array_shape() {
        let array = ArraySchema::of(SchemaNode::Scalar(ScalarSchema::default()));
        let json = serde_json::to_value(SchemaNode::Array(array)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "array", "items": {"type": "string"}})
        );
    }

    #[test]
    fn test_empty_object_has_no_properties_key() {
        let json = serde_json::to_value(SchemaNode::empty_object()).unwrap();
        assert_eq!(json, serde_json::json!({"type": "object"}));
    }
}
