use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use yangdoc::api::{analyze, Family};
use yangdoc::{lexer::Lexer, parser::Parser};

// ============================================================================
// Test Data: Varying Complexity and Size
// ============================================================================

const TINY_YANG: &str = r#"module tiny { container native { leaf x { type string; } } }"#;

const SMALL_YANG: &str = r#"module small {
    namespace "urn:bench:small";
    prefix sm;
    container native {
        leaf hostname { type string; }
        container clock {
            leaf timezone { type string; }
        }
    }
}"#;

const MEDIUM_YANG: &str = r#"module medium {
    namespace "urn:bench:medium";
    prefix md;

    grouping endpoint {
        leaf address { type string; }
        leaf port { type uint16 { range "1..65535"; } }
    }

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
                leaf enabled { type boolean; default "true"; }
            }
        }
        container ntp {
            list server {
                key "address";
                uses endpoint;
            }
        }
        container router {
            container bgp {
                leaf as-number { type uint32; }
                list neighbor {
                    key "id";
                    leaf id { type string; }
                    leaf remote-as { type uint32; }
                    leaf state {
                        type enumeration {
                            enum idle;
                            enum connect;
                            enum established;
                        }
                    }
                }
            }
        }
    }
}"#;

const LARGE_YANG: &str = r#"module large {
    namespace "urn:bench:large";
    prefix lg;

    grouping addr-pair {
        leaf local-address { type string; }
        leaf remote-address { type string; }
    }

    grouping counters {
        leaf in-octets { type uint64; }
        leaf out-octets { type uint64; }
        leaf in-errors { type uint32; }
        leaf out-errors { type uint32; }
    }

    container native {
        leaf hostname { type string; }
        leaf version { type string; }
        container interface {
            list GigabitEthernet {
                key "name";
                leaf name { type string; }
                leaf description-text { type string { length "1..200"; } }
                leaf mtu { type uint16 { range "68..9216"; } }
                container statistics { uses counters; }
            }
            list Loopback {
                key "name";
                leaf name { type string; }
                container statistics { uses counters; }
            }
            list Tunnel {
                key "name";
                leaf name { type string; }
                uses addr-pair;
            }
        }
        container router {
            container bgp {
                leaf as-number { type uint32; }
                list neighbor {
                    key "id";
                    leaf id { type string; }
                    uses addr-pair;
                    container statistics { uses counters; }
                }
            }
            container ospf {
                list area {
                    key "id";
                    leaf id { type uint32; }
                    list network {
                        key "prefix";
                        leaf prefix { type string; }
                    }
                }
            }
        }
        container security {
            list access-list {
                key "name";
                leaf name { type string; }
                list rule {
                    key "sequence";
                    leaf sequence { type uint32; }
                    leaf action {
                        type enumeration {
                            enum permit;
                            enum deny;
                        }
                    }
                    uses addr-pair;
                }
            }
        }
    }
}"#;

// Generate a wide module for stress testing
fn generate_xlarge_yang(container_count: usize) -> String {
    let mut source = String::from("module xlarge {\n  container native {\n");
    for i in 0..container_count {
        source.push_str(&format!(
            "    container feature-{i} {{\n      leaf enabled {{ type boolean; }}\n      leaf threshold {{ type uint32 {{ range \"0..{}\"; }} }}\n      list entry {{\n        key \"id\";\n        leaf id {{ type string; }}\n        leaf value {{ type uint64; }}\n      }}\n    }}\n",
            i * 100
        ));
    }
    source.push_str("  }\n}\n");
    source
}

// ============================================================================
// Lexer Benchmarks
// ============================================================================

fn bench_lexer_tiny(c: &mut Criterion) {
    c.bench_function("lexer_tiny", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new(black_box(TINY_YANG));
            lexer.lex()
        })
    });
}

fn bench_lexer_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_by_size");

    for (name, source) in [
        ("tiny", TINY_YANG),
        ("small", SMALL_YANG),
        ("medium", MEDIUM_YANG),
        ("large", LARGE_YANG),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| {
                let mut lexer = Lexer::new(black_box(src));
                lexer.lex()
            })
        });
    }

    group.finish();
}

fn bench_lexer_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_module_scaling");

    for size in [10, 50, 100, 500] {
        let source = generate_xlarge_yang(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, src| {
            b.iter(|| {
                let mut lexer = Lexer::new(black_box(src));
                lexer.lex()
            })
        });
    }

    group.finish();
}

// ============================================================================
// Parser Benchmarks
// ============================================================================

fn bench_parser_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_by_size");

    for (name, source) in [
        ("tiny", TINY_YANG),
        ("small", SMALL_YANG),
        ("medium", MEDIUM_YANG),
        ("large", LARGE_YANG),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| {
                let mut parser = Parser::new(black_box(src));
                parser.parse_module()
            })
        });
    }

    group.finish();
}

fn bench_parser_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_module_scaling");

    for size in [10, 50, 100, 500] {
        let source = generate_xlarge_yang(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, src| {
            b.iter(|| {
                let mut parser = Parser::new(black_box(src));
                parser.parse_module()
            })
        });
    }

    group.finish();
}

// ============================================================================
// End-to-End Analysis Benchmarks
// ============================================================================

fn bench_e2e_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("e2e_analysis");
    let family = Family::native_config();

    for (name, source) in [
        ("tiny", TINY_YANG),
        ("small", SMALL_YANG),
        ("medium", MEDIUM_YANG),
        ("large", LARGE_YANG),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| analyze(black_box(src), "benchmark.yang", &family))
        });
    }

    group.finish();
}

fn bench_e2e_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("e2e_module_scaling");
    let family = Family::native_config();

    for size in [10, 50, 100, 500] {
        let source = generate_xlarge_yang(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, src| {
            b.iter(|| analyze(black_box(src), "benchmark.yang", &family))
        });
    }

    group.finish();
}

fn bench_e2e_with_assembly(c: &mut Criterion) {
    use yangdoc::category::bucketize;
    use yangdoc::document::{assemble, AssembleOptions};

    let family = Family::native_config();
    c.bench_function("e2e_with_document_assembly", |b| {
        b.iter(|| {
            let analysis =
                analyze(black_box(LARGE_YANG), "benchmark.yang", &family).unwrap();
            let mut documents = Vec::new();
            for (category, entries) in bucketize(&family.categories, analysis.paths) {
                let options = AssembleOptions::new("Benchmark", &category, true);
                documents.push(assemble(&options, &entries).to_json());
            }
            documents
        })
    });
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    lexer_benches,
    bench_lexer_tiny,
    bench_lexer_sizes,
    bench_lexer_scaling
);

criterion_group!(parser_benches, bench_parser_sizes, bench_parser_scaling);

criterion_group!(
    e2e_benches,
    bench_e2e_analysis,
    bench_e2e_scaling,
    bench_e2e_with_assembly
);

criterion_main!(lexer_benches, parser_benches, e2e_benches);
