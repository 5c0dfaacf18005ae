use crate::ast::{Module, Statement};
use crate::extract::Extractor;
use crate::schema::{truncate_description, ArraySchema, SchemaNode};

/// Nesting ceiling for path derivation, independent of the schema extractor's.
pub const MAX_PATH_DEPTH: usize = 10;

/// One synthesized addressable resource path plus its schema and metadata.
#[derive(Debug, Clone)]
pub struct PathEntry {
    /// Slash-separated segments; list item paths end in a `={key}` placeholder.
    pub path: String,
    pub name: String,
    pub description: String,
    pub schema: SchemaNode,
    pub is_list: bool,
    pub is_collection: bool,
    /// Key field of a keyed list item entry.
    pub key: Option<String>,
    pub depth: usize,
}

/// One `rpc` statement's derived operation: input and output bodies lowered
/// to object schemas.
#[derive(Debug, Clone)]
pub struct RpcEntry {
    pub name: String,
    pub description: String,
    pub input: SchemaNode,
    pub output: SchemaNode,
}

/// Walks an anchor block depth-first and synthesizes the flat path list:
/// one entry per container, a collection/item pair per list, and one entry
/// per top-level leaf (nested leaves stay schema properties only).
pub fn derive_paths(extractor: &Extractor, anchor: &Statement, root_path: &str) -> Vec<PathEntry> {
    let mut entries = Vec::new();
    walk(extractor, anchor, root_path, 0, &mut entries);
    entries
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else if parent.ends_with(':') {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}

fn walk(
    extractor: &Extractor,
    block: &Statement,
    parent_path: &str,
    depth: usize,
    out: &mut Vec<PathEntry>,
) {
    if depth > MAX_PATH_DEPTH {
        return;
    }

    for container in block.children("container") {
        let Some(name) = container.arg.as_deref() else {
            continue;
        };
        let path = join(parent_path, name);
        let description = container
            .description()
            .map(truncate_description)
            .unwrap_or_else(|| format!("{name} configuration"));
        out.push(PathEntry {
            path: path.clone(),
            name: name.to_string(),
            description,
            schema: SchemaNode::Object(extractor.extract(container, 0)),
            is_list: false,
            is_collection: false,
            key: None,
            depth,
        });
        walk(extractor, container, &path, depth + 1, out);
    }

    for list in block.children("list") {
        let Some(name) = list.arg.as_deref() else {
            continue;
        };
        let key = list
            .child("key")
            .and_then(|k| k.arg.as_deref())
            .and_then(|k| k.split_whitespace().next())
            .unwrap_or("id")
            .to_string();
        let description = list
            .description()
            .map(truncate_description)
            .unwrap_or_else(|| format!("{name} list"));
        let item_schema = SchemaNode::Object(extractor.extract(list, 0));

        let collection_path = join(parent_path, name);
        let item_path = format!("{collection_path}={{{key}}}");

        out.push(PathEntry {
            path: collection_path,
            name: name.to_string(),
            description: format!("{description} (collection)"),
            schema: SchemaNode::Array(ArraySchema::of(item_schema.clone())),
            is_list: true,
            is_collection: true,
            key: None,
            depth,
        });
        out.push(PathEntry {
            path: item_path.clone(),
            name: format!("{name}-item"),
            description,
            schema: item_schema,
            is_list: true,
            is_collection: false,
            key: Some(key),
            depth,
        });

        // Constructs inside a list item nest under the keyed item path.
        walk(extractor, list, &item_path, depth + 1, out);
    }

    // Only leaves directly under the anchor become addressable on their own.
    if depth == 0 {
        for leaf in block.children("leaf") {
            let Some(name) = leaf.arg.as_deref() else {
                continue;
            };
            let description = leaf
                .description()
                .map(truncate_description)
                .unwrap_or_else(|| format!("{name} configuration"));
            out.push(PathEntry {
                path: join(parent_path, name),
                name: name.to_string(),
                description,
                schema: SchemaNode::Scalar(crate::schema::map_leaf_type(leaf)),
                is_list: false,
                is_collection: false,
                key: None,
                depth,
            });
        }
    }
}

/// Derives one [`RpcEntry`] per `rpc` statement under the module root.
pub fn derive_rpcs(extractor: &Extractor, module: &Module) -> Vec<RpcEntry> {
    module
        .root
        .children("rpc")
        .filter_map(|rpc| {
            let name = rpc.arg.as_deref()?;
            let description = rpc
                .description()
                .map(truncate_description)
                .unwrap_or_else(|| format!("{name} operation"));
            let input = rpc
                .child("input")
                .map(|i| SchemaNode::Object(extractor.extract(i, 0)))
                .unwrap_or_else(SchemaNode::empty_object);
            let output = rpc
                .child("output")
                .map(|o| SchemaNode::Object(extractor.extract(o, 0)))
                .unwrap_or_else(SchemaNode::empty_object);
            Some(RpcEntry {
                name: name.to_string(),
                description,
                input,
                output,
            })
        })
        .collect()
}
