use crate::ast::{local_name, Statement};

/// Longest free-text description carried into generated documents. Longer
/// texts are cut at this many characters to bound output size.
pub const DESCRIPTION_LIMIT: usize = 300;

/// A generic schema descriptor assembled from extracted YANG constructs and
/// serialized in OpenAPI shape (see the crate's `serialization` module).
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Object(ObjectSchema),
    Array(ArraySchema),
    Scalar(ScalarSchema),
}

impl SchemaNode {
    pub fn empty_object() -> SchemaNode {
        SchemaNode::Object(ObjectSchema::default())
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            SchemaNode::Object(o) => o.description.as_deref(),
            SchemaNode::Array(a) => a.description.as_deref(),
            SchemaNode::Scalar(s) => s.description.as_deref(),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            SchemaNode::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArraySchema> {
        match self {
            SchemaNode::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarSchema> {
        match self {
            SchemaNode::Scalar(s) => Some(s),
            _ => None,
        }
    }
}

/// Nested object: an ordered field-name → schema mapping, preserving source
/// declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    pub properties: Vec<(String, SchemaNode)>,
    pub description: Option<String>,
}

impl ObjectSchema {
    /// Inserts a property, replacing any earlier one with the same name
    /// in place (last write wins).
    pub fn insert(&mut self, name: &str, node: SchemaNode) {
        if let Some(slot) = self.properties.iter_mut().find(|(n, _)| n == name) {
            slot.1 = node;
        } else {
            self.properties.push((name.to_string(), node));
        }
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    pub items: Box<SchemaNode>,
    pub description: Option<String>,
}

impl ArraySchema {
    pub fn of(items: SchemaNode) -> ArraySchema {
        ArraySchema {
            items: Box::new(items),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalarKind {
    #[default]
    String,
    Integer,
    Boolean,
    Number,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Number => "number",
        }
    }
}

/// Scalar descriptor for a leaf or leaf-list item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScalarSchema {
    pub kind: ScalarKind,
    pub format: Option<&'static str>,
    pub pattern: Option<String>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub enumeration: Option<Vec<String>>,
    pub default: Option<String>,
    pub description: Option<String>,
}

impl ScalarSchema {
    fn integer(minimum: Option<i64>, maximum: Option<i64>) -> ScalarSchema {
        ScalarSchema {
            kind: ScalarKind::Integer,
            minimum,
            maximum,
            ..ScalarSchema::default()
        }
    }

    fn string_with_pattern(pattern: &str) -> ScalarSchema {
        ScalarSchema {
            pattern: Some(pattern.to_string()),
            ..ScalarSchema::default()
        }
    }

    fn described(kind: ScalarKind, description: &str) -> ScalarSchema {
        ScalarSchema {
            kind,
            description: Some(description.to_string()),
            ..ScalarSchema::default()
        }
    }
}

/// Cuts a description at [`DESCRIPTION_LIMIT`] characters.
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_LIMIT {
        text.to_string()
    } else {
        text.chars().take(DESCRIPTION_LIMIT).collect()
    }
}

/// Maps one `leaf` (or `leaf-list`) statement to a scalar schema: the fixed
/// built-in type table, inline range/length/pattern constraints, enumeration
/// values, default, and the truncated description.
pub fn map_leaf_type(leaf: &Statement) -> ScalarSchema {
    let mut schema = match leaf.child("type") {
        Some(type_stmt) => map_type(type_stmt),
        None => ScalarSchema::default(),
    };

    if let Some(text) = leaf.description() {
        let text = truncate_description(text);
        // Table entries for `empty`/`union` carry a fixed note; keep it.
        schema.description = Some(match schema.description.take() {
            Some(note) => format!("{note}. {text}"),
            None => text,
        });
    }

    if let Some(default) = leaf.child("default").and_then(|d| d.arg.clone()) {
        schema.default = Some(default);
    }

    schema
}

fn map_type(type_stmt: &Statement) -> ScalarSchema {
    let mut schema = match local_name(type_stmt.arg_str()) {
        "uint8" => ScalarSchema::integer(Some(0), Some(255)),
        "uint16" => ScalarSchema::integer(Some(0), Some(65535)),
        "uint32" => ScalarSchema::integer(Some(0), Some(4_294_967_295)),
        "uint64" => ScalarSchema::integer(Some(0), None),
        "int8" => ScalarSchema::integer(Some(-128), Some(127)),
        "int16" => ScalarSchema::integer(Some(-32768), Some(32767)),
        "int32" => ScalarSchema::integer(Some(-2_147_483_648), Some(2_147_483_647)),
        "int64" => ScalarSchema::integer(None, None),
        "boolean" => ScalarSchema {
            kind: ScalarKind::Boolean,
            ..ScalarSchema::default()
        },
        "empty" => ScalarSchema::described(ScalarKind::Boolean, "Presence marker"),
        "decimal64" => ScalarSchema {
            kind: ScalarKind::Number,
            ..ScalarSchema::default()
        },
        "binary" => ScalarSchema {
            format: Some("byte"),
            ..ScalarSchema::default()
        },
        "union" => ScalarSchema::described(ScalarKind::String, "Union type"),
        "enumeration" => ScalarSchema {
            enumeration: Some(
                type_stmt
                    .children("enum")
                    .filter_map(|e| e.arg.clone())
                    .collect(),
            ),
            ..ScalarSchema::default()
        },
        "ipv4-address" => ScalarSchema {
            format: Some("ipv4"),
            ..ScalarSchema::default()
        },
        "ipv6-address" => ScalarSchema {
            format: Some("ipv6"),
            ..ScalarSchema::default()
        },
        "ip-address" => ScalarSchema::described(ScalarKind::String, "IPv4 or IPv6 address"),
        "ipv4-prefix" => ScalarSchema::string_with_pattern(r"^[\d.]+/\d+$"),
        "ipv6-prefix" => ScalarSchema::described(ScalarKind::String, "IPv6 prefix"),
        "ip-prefix" => ScalarSchema::described(ScalarKind::String, "IPv4 or IPv6 prefix"),
        "mac-address" => {
            ScalarSchema::string_with_pattern(r"^([0-9A-Fa-f]{2}:){5}[0-9A-Fa-f]{2}$")
        }
        // `string` and every custom/derived type name fall back to a bare string.
        _ => ScalarSchema::default(),
    };

    if let Some(spec) = type_stmt.child("range").and_then(|r| r.arg.as_deref()) {
        apply_numeric_bounds(&mut schema.minimum, &mut schema.maximum, spec);
    }
    if let Some(spec) = type_stmt.child("length").and_then(|l| l.arg.as_deref()) {
        let (mut low, mut high) = (None, None);
        apply_numeric_bounds(&mut low, &mut high, spec);
        schema.min_length = low.and_then(|v| u64::try_from(v).ok());
        schema.max_length = high.and_then(|v| u64::try_from(v).ok());
    }
    if schema.pattern.is_none() {
        if let Some(pattern) = type_stmt.child("pattern").and_then(|p| p.arg.clone()) {
            schema.pattern = Some(pattern);
        }
    }

    schema
}

/// Applies the first pipe-separated sub-range of a `range`/`length` argument.
/// A `max` (or otherwise non-numeric) upper bound leaves the maximum unset;
/// a non-numeric lower bound is silently dropped.
fn apply_numeric_bounds(minimum: &mut Option<i64>, maximum: &mut Option<i64>, spec: &str) {
    let first = spec.split('|').next().unwrap_or("").trim();
    if let Some((low, high)) = first.split_once("..") {
        if let Ok(value) = low.trim().parse::<i64>() {
            *minimum = Some(value);
        }
        let high = high.trim();
        if high.eq_ignore_ascii_case("max") {
            *maximum = None;
        } else if let Ok(value) = high.parse::<i64>() {
            *maximum = Some(value);
        }
    } else if let Ok(value) = first.parse::<i64>() {
        // A single-value range pins both bounds.
        *minimum = Some(value);
        *maximum = Some(value);
    }
}
