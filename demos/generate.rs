use yangdoc::api::{analyze, Family};
use yangdoc::category::bucketize;
use yangdoc::document::{assemble, AssembleOptions};

fn main() {
    let yang_source = r#"
        module demo-native {
          namespace "urn:demo:native";
          prefix demo;

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
          }
        }
    "#;

    let family = Family::native_config();
    match analyze(yang_source, "demo-native.yang", &family) {
        Ok(analysis) => {
            for note in &analysis.recoveries {
                eprintln!(
                    "recovered at {}:{}: {}",
                    note.line, note.column, note.message
                );
            }
            for (category, entries) in bucketize(&family.categories, analysis.paths) {
                let options = AssembleOptions::new("Demo Device API", &category, true);
                let doc = assemble(&options, &entries);
                println!("=== {category} ===\n{}\n", doc.to_json().unwrap());
            }
        }
        Err(e) => {
            eprintln!("Failed to analyze module: {e:?}");
        }
    }
}
