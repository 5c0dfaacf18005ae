use crate::ast::{local_name, Statement};
use crate::schema::{map_leaf_type, truncate_description, ArraySchema, ObjectSchema, SchemaNode};
use std::collections::HashMap;

/// Recursion ceiling for schema extraction. Beyond it, extraction
/// short-circuits to a placeholder object instead of recursing further.
pub const MAX_DEPTH: usize = 15;

/// Flat grouping-name → grouping-statement lookup, built once per module in a
/// pre-pass over the whole statement tree. The scan is global, not scoped, so
/// groupings defined lexically inside other constructs are captured too.
///
/// Lookups tolerate a `prefix:name` qualified reference by stripping the
/// prefix; references within one module resolve against local names.
#[derive(Debug)]
pub struct GroupingTable<'a> {
    groupings: HashMap<&'a str, &'a Statement>,
}

impl<'a> GroupingTable<'a> {
    pub fn build(root: &'a Statement) -> GroupingTable<'a> {
        let mut groupings = HashMap::new();
        collect_groupings(root, &mut groupings);
        GroupingTable { groupings }
    }

    pub fn get(&self, reference: &str) -> Option<&'a Statement> {
        self.groupings.get(local_name(reference)).copied()
    }

    pub fn len(&self) -> usize {
        self.groupings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groupings.is_empty()
    }
}

fn collect_groupings<'a>(stmt: &'a Statement, out: &mut HashMap<&'a str, &'a Statement>) {
    for sub in &stmt.substatements {
        if sub.keyword == "grouping" {
            if let Some(name) = sub.arg.as_deref() {
                out.insert(name, sub);
            }
        }
        collect_groupings(sub, out);
    }
}

/// Lowers container/list/grouping/rpc-io statement bodies into [`SchemaNode`]
/// trees, inlining `uses` references against a [`GroupingTable`].
#[derive(Debug)]
pub struct Extractor<'a> {
    groupings: &'a GroupingTable<'a>,
}

impl<'a> Extractor<'a> {
    pub fn new(groupings: &'a GroupingTable<'a>) -> Extractor<'a> {
        Extractor { groupings }
    }

    /// Converts one block's body into an object schema.
    ///
    /// Passes run in a fixed order over the block's substatements, each merging
    /// into one properties mapping: `uses` inlining first, then leaves,
    /// leaf-lists, containers, lists, and finally choice/case flattening. A
    /// name claimed by more than one construct resolves last-write-wins.
    pub fn extract(&self, block: &Statement, depth: usize) -> ObjectSchema {
        if depth > MAX_DEPTH {
            return ObjectSchema {
                properties: Vec::new(),
                description: Some(format!("{} (depth limit)", block.arg_str())),
            };
        }

        let mut object = ObjectSchema::default();

        for uses in block.children("uses") {
            let Some(reference) = uses.arg.as_deref() else {
                continue;
            };
            // A reference with no matching grouping is skipped, not reported.
            if let Some(grouping) = self.groupings.get(reference) {
                let inlined = self.extract(grouping, depth + 1);
                for (name, node) in inlined.properties {
                    object.insert(&name, node);
                }
            }
        }

        for leaf in block.children("leaf") {
            if let Some(name) = leaf.arg.as_deref() {
                object.insert(name, SchemaNode::Scalar(map_leaf_type(leaf)));
            }
        }

        for leaf_list in block.children("leaf-list") {
            if let Some(name) = leaf_list.arg.as_deref() {
                let items = SchemaNode::Scalar(map_leaf_type(leaf_list));
                object.insert(name, SchemaNode::Array(ArraySchema::of(items)));
            }
        }

        for container in block.children("container") {
            if let Some(name) = container.arg.as_deref() {
                let mut nested = self.extract(container, depth + 1);
                if let Some(text) = container.description() {
                    nested.description = Some(truncate_description(text));
                }
                object.insert(name, SchemaNode::Object(nested));
            }
        }

        for list in block.children("list") {
            if let Some(name) = list.arg.as_deref() {
                let items = SchemaNode::Object(self.extract(list, depth + 1));
                object.insert(name, SchemaNode::Array(ArraySchema::of(items)));
            }
        }

        // choice/case mutual exclusivity is flattened into plain optional
        // fields; the output format has no concept of exclusive groups.
        for choice in block.children("choice") {
            for case in choice.children("case") {
                let flattened = self.extract(case, depth + 1);
                for (name, node) in flattened.properties {
                    object.insert(&name, node);
                }
            }
        }

        object
    }
}
