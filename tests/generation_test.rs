// End-to-end document generation from module source text: analyze,
// categorize, assemble, and merge, checking the emitted OpenAPI shape.

use yangdoc::api::{analyze, Family};
use yangdoc::category::bucketize;
use yangdoc::document::{assemble, assemble_sized_with_limit, AssembleOptions};
use yangdoc::merge::{MergeStrategy, Merger};

const CONFIG_MODULE: &str = r#"
    module example-native {
      namespace "urn:example:native";
      prefix ex;
      revision 2026-03-14 { description "Current."; }

      container native {
        leaf hostname {
          type string;
          description "System host name";
        }
        container interface {
          list GigabitEthernet {
            key "name";
            leaf name { type string; }
            leaf mtu { type uint16 { range "68..9216"; } }
          }
        }
        container router {
          container bgp {
            leaf as-number { type uint32; }
          }
        }
      }
    }
"#;

const OPER_MODULE: &str = r#"
    module example-interfaces-oper {
      container interfaces {
        list interface {
          key "name";
          leaf name { type string; }
          leaf in-octets { type uint64; }
        }
      }
    }
"#;

#[test]
fn test_config_generation_full_shape() {
    let family = Family::native_config();
    let analysis = analyze(CONFIG_MODULE, "example-native.yang", &family).unwrap();
    assert_eq!(analysis.module.revision.as_deref(), Some("2026-03-14"));

    let buckets = bucketize(&family.categories, analysis.paths);
    let bucket_names: Vec<&str> = buckets.iter().map(|(n, _)| n.as_str()).collect();
    assert!(bucket_names.contains(&"interfaces"));
    assert!(bucket_names.contains(&"routing"));

    for (category, entries) in buckets {
        let options = AssembleOptions::new("Device Configuration", &category, true);
        let doc = assemble(&options, &entries);
        assert_eq!(doc.openapi, "3.0.0");
        assert!(
            doc.unresolved_references().is_empty(),
            "category {category} must be self-contained"
        );
        for path in doc.paths.keys() {
            assert!(path.starts_with("/data/example-native:native"));
        }

        let json: serde_json::Value =
            serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert!(json["components"]["securitySchemes"]["basicAuth"].is_object());
        assert_eq!(json["components"]["securitySchemes"]["basicAuth"]["scheme"], "basic");
    }
}

#[test]
fn test_list_paths_get_collection_and_item() {
    let family = Family::native_config();
    let analysis = analyze(CONFIG_MODULE, "example-native.yang", &family).unwrap();
    let buckets = bucketize(&family.categories, analysis.paths);
    let (_, entries) = buckets
        .into_iter()
        .find(|(name, _)| name == "interfaces")
        .unwrap();

    let options = AssembleOptions::new("Ifaces", "interfaces", true);
    let doc = assemble(&options, &entries);

    let collection =
        &doc.paths["/data/example-native:native/interface/GigabitEthernet"];
    assert!(collection.contains_key("post"));
    assert!(!collection.contains_key("delete"));

    let item =
        &doc.paths["/data/example-native:native/interface/GigabitEthernet={name}"];
    assert!(item.contains_key("delete"));
    assert!(!item.contains_key("post"));
}

#[test]
fn test_constraints_survive_into_json() {
    let family = Family::native_config();
    let analysis = analyze(CONFIG_MODULE, "example-native.yang", &family).unwrap();
    let entry = analysis
        .paths
        .iter()
        .find(|e| e.path.ends_with("GigabitEthernet={name}"))
        .unwrap();
    let json = serde_json::to_value(&entry.schema).unwrap();
    assert_eq!(json["properties"]["mtu"]["type"], "integer");
    assert_eq!(json["properties"]["mtu"]["minimum"], 68);
    assert_eq!(json["properties"]["mtu"]["maximum"], 9216);
}

#[test]
fn test_operational_documents_are_read_only() {
    let family = Family::operational();
    let analysis = analyze(OPER_MODULE, "example-interfaces-oper.yang", &family).unwrap();
    let buckets = bucketize(&family.categories, analysis.paths);

    for (category, entries) in buckets {
        let options = AssembleOptions::new("Operational Data", &category, family.writable());
        let doc = assemble(&options, &entries);
        for (path, item) in &doc.paths {
            let verbs: Vec<&str> = item.keys().map(String::as_str).collect();
            assert_eq!(verbs, vec!["get"], "{path} must be GET-only");
        }
    }
}

#[test]
fn test_split_documents_partition_the_paths() {
    let family = Family::native_config();
    let analysis = analyze(CONFIG_MODULE, "example-native.yang", &family).unwrap();
    let total = analysis.paths.len();

    let options = AssembleOptions::new("Split", "system", true);
    let docs = assemble_sized_with_limit(&options, analysis.paths, 4 * 1024).unwrap();
    assert!(docs.len() > 1);

    let mut all_paths: Vec<String> = docs
        .iter()
        .flat_map(|(_, doc)| doc.paths.keys().cloned())
        .collect();
    all_paths.sort();
    all_paths.dedup();
    assert_eq!(all_paths.len(), total, "chunks must partition the path set");

    for (_, doc) in &docs {
        assert!(doc.unresolved_references().is_empty());
    }
}

#[test]
fn test_merged_portal_document() {
    let config_family = Family::native_config();
    let oper_family = Family::operational();

    let config = analyze(CONFIG_MODULE, "example-native.yang", &config_family).unwrap();
    let oper = analyze(OPER_MODULE, "example-interfaces-oper.yang", &oper_family).unwrap();

    let mut merger = Merger::new(
        "Device API",
        "Combined configuration and state",
        "1.0.0",
        MergeStrategy::PrefixSchemas,
    );
    for (category, entries) in bucketize(&config_family.categories, config.paths) {
        let options = AssembleOptions::new("Config", &category, true);
        merger.add("config", assemble(&options, &entries));
    }
    for (category, entries) in bucketize(&oper_family.categories, oper.paths) {
        let options = AssembleOptions::new("Oper", &category, false);
        merger.add("oper", assemble(&options, &entries));
    }
    let merged = merger.finish();

    assert!(merged
        .paths
        .keys()
        .any(|p| p.starts_with("/data/example-native:")));
    assert!(merged
        .paths
        .keys()
        .any(|p| p.starts_with("/data/example-interfaces-oper:")));
    assert!(merged.unresolved_references().is_empty());
}
