use std::collections::btree_map::Entry;

use crate::document::{Document, Operation, Tag};

/// How schema-name collisions between merged documents are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Keep the first definition seen; later duplicates are dropped.
    FirstWins,
    /// Qualify every incoming schema with its source name, so nothing
    /// collides and every source keeps its own definitions.
    PrefixSchemas,
}

/// Combines several generated documents into one. Paths merge per verb,
/// schemas merge per the chosen strategy, tags deduplicate by name.
pub struct Merger {
    merged: Document,
    strategy: MergeStrategy,
}

impl Merger {
    pub fn new(title: &str, description: &str, version: &str, strategy: MergeStrategy) -> Merger {
        let mut base = crate::document::assemble(
            &crate::document::AssembleOptions::new(title, "merged", false),
            &[],
        );
        base.info.description = description.to_string();
        base.info.version = version.to_string();
        base.tags.clear();
        Merger {
            merged: base,
            strategy,
        }
    }

    pub fn add(&mut self, source_name: &str, doc: Document) {
        let prefixing = self.strategy == MergeStrategy::PrefixSchemas;

        for (name, schema) in doc.components.schemas {
            match self.strategy {
                MergeStrategy::FirstWins => {
                    self.merged.components.schemas.entry(name).or_insert(schema);
                }
                MergeStrategy::PrefixSchemas => {
                    self.merged
                        .components
                        .schemas
                        .insert(format!("{source_name}-{name}"), schema);
                }
            }
        }

        for (path, mut item) in doc.paths {
            if prefixing {
                for op in item.values_mut() {
                    prefix_refs(op, source_name);
                }
            }
            match self.merged.paths.entry(path) {
                Entry::Vacant(slot) => {
                    slot.insert(item);
                }
                // Same path from two sources: fill in verbs the existing
                // item lacks, keep the ones it already has.
                Entry::Occupied(mut slot) => {
                    for (verb, op) in item {
                        slot.get_mut().entry(verb).or_insert(op);
                    }
                }
            }
        }

        for tag in doc.tags {
            if !self.merged.tags.iter().any(|t| t.name == tag.name) {
                self.merged.tags.push(Tag {
                    name: tag.name,
                    description: tag.description,
                });
            }
        }
    }

    pub fn finish(self) -> Document {
        self.merged
    }
}

fn prefix_refs(op: &mut Operation, source_name: &str) {
    if let Some(body) = &mut op.request_body {
        let schema_ref = &mut body.content.yang_json.schema;
        schema_ref.0 = format!("{source_name}-{}", schema_ref.0);
    }
    for response in op.responses.values_mut() {
        if let Some(content) = &mut response.content {
            let schema_ref = &mut content.yang_json.schema;
            schema_ref.0 = format!("{source_name}-{}", schema_ref.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{assemble, AssembleOptions};
    use crate::paths::PathEntry;
    use crate::schema::SchemaNode;

    fn entry(path: &str) -> PathEntry {
        PathEntry {
            path: path.to_string(),
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            description: String::new(),
            schema: SchemaNode::empty_object(),
            is_list: false,
            is_collection: false,
            key: None,
            depth: 1,
        }
    }

    fn doc(category: &str, writable: bool, paths: &[&str]) -> Document {
        let options = AssembleOptions::new("Source", category, writable);
        let entries: Vec<PathEntry> = paths.iter().map(|p| entry(p)).collect();
        assemble(&options, &entries)
    }

    #[test]
    fn test_distinct_paths_all_survive() {
        let mut merger = Merger::new("All", "", "1.0.0", MergeStrategy::FirstWins);
        merger.add("a", doc("system", true, &["m:native/clock"]));
        merger.add("b", doc("interfaces", true, &["m:native/interface"]));
        let merged = merger.finish();
        assert_eq!(merged.paths.len(), 2);
        assert_eq!(merged.tags.len(), 2);
    }

    #[test]
    fn test_same_path_merges_per_verb() {
        // Read-only doc contributes only GET; writable doc fills in the rest.
        let mut merger = Merger::new("All", "", "1.0.0", MergeStrategy::FirstWins);
        merger.add("ro", doc("system", false, &["m:native/clock"]));
        merger.add("rw", doc("system", true, &["m:native/clock"]));
        let merged = merger.finish();
        let item = &merged.paths["/data/m:native/clock"];
        assert!(item.contains_key("get"));
        assert!(item.contains_key("put"));
        // The first source's GET wins; its operation carries no request body.
        assert!(item["get"].request_body.is_none());
    }

    #[test]
    fn test_first_wins_keeps_first_schema() {
        let mut merger = Merger::new("All", "", "1.0.0", MergeStrategy::FirstWins);

        let mut first = doc("system", false, &["m:native/clock"]);
        let name = "system-m-native-clock".to_string();
        let mut marked = SchemaNode::empty_object();
        if let SchemaNode::Object(o) = &mut marked {
            o.description = Some("first".to_string());
        }
        first.components.schemas.insert(name.clone(), marked);

        merger.add("a", first);
        merger.add("b", doc("system", false, &["m:native/clock"]));
        let merged = merger.finish();
        assert_eq!(
            merged.components.schemas[&name].description(),
            Some("first")
        );
    }

    #[test]
    fn test_prefixing_keeps_references_resolvable() {
        let mut merger = Merger::new("All", "", "1.0.0", MergeStrategy::PrefixSchemas);
        merger.add("cfg", doc("system", true, &["m:native/clock"]));
        merger.add("oper", doc("system", false, &["m:clock-state"]));
        let merged = merger.finish();
        assert!(merged
            .components
            .schemas
            .contains_key("cfg-system-m-native-clock"));
        assert!(merged.unresolved_references().is_empty());
    }

    #[test]
    fn test_tags_deduplicate_by_name() {
        let mut merger = Merger::new("All", "", "1.0.0", MergeStrategy::FirstWins);
        merger.add("a", doc("system", false, &["m:a"]));
        merger.add("b", doc("system", false, &["m:b"]));
        let merged = merger.finish();
        assert_eq!(merged.tags.len(), 1);
    }
}
