use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::ast::Module;
use crate::category::{bucketize, CategoryTable};
use crate::document::{assemble_rpc, assemble_sized, AssembleOptions};
use crate::error::YangError;
use crate::extract::{Extractor, GroupingTable};
use crate::parser::{Parser, Recovery};
use crate::paths::{derive_paths, derive_rpcs, PathEntry, RpcEntry};

/// The kind of documents a family produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Writable configuration data, full verb set.
    Config,
    /// Read-only state data, GET only.
    Operational,
    /// Actions invoked via POST under `/operations/`.
    Rpc,
}

/// A model family: which modules it covers, where their data tree is
/// anchored, and how the output is titled, categorized, and filed.
#[derive(Debug, Clone)]
pub struct Family {
    pub name: String,
    pub title_prefix: String,
    pub file_prefix: String,
    pub flavor: Flavor,
    /// Name of the top-level container holding the data tree. `None` anchors
    /// at the module root, which is where operational modules put state.
    pub anchor: Option<String>,
    pub categories: CategoryTable,
    pub version: String,
    pub server_url: String,
}

impl Family {
    /// Writable device configuration anchored under a `native` container.
    pub fn native_config() -> Family {
        Family {
            name: "native-config".to_string(),
            title_prefix: "Device Configuration".to_string(),
            file_prefix: "config".to_string(),
            flavor: Flavor::Config,
            anchor: Some("native".to_string()),
            categories: CategoryTable::native_config(),
            version: "1.0.0".to_string(),
            server_url: "https://{device}/restconf".to_string(),
        }
    }

    /// Read-only operational state, one data tree per module root.
    pub fn operational() -> Family {
        Family {
            name: "operational".to_string(),
            title_prefix: "Operational Data".to_string(),
            file_prefix: "oper".to_string(),
            flavor: Flavor::Operational,
            anchor: None,
            categories: CategoryTable::operational(),
            version: "1.0.0".to_string(),
            server_url: "https://{device}/restconf".to_string(),
        }
    }

    /// RPC action modules, one document per module.
    pub fn rpc() -> Family {
        Family {
            name: "rpc".to_string(),
            title_prefix: "Device Actions".to_string(),
            file_prefix: "rpc".to_string(),
            flavor: Flavor::Rpc,
            anchor: None,
            categories: CategoryTable::operational(),
            version: "1.0.0".to_string(),
            server_url: "https://{device}/restconf".to_string(),
        }
    }

    pub fn writable(&self) -> bool {
        self.flavor == Flavor::Config
    }
}

/// Everything extracted from one module source.
#[derive(Debug)]
pub struct ModuleAnalysis {
    pub module: Module,
    pub paths: Vec<PathEntry>,
    pub rpcs: Vec<RpcEntry>,
    pub recoveries: Vec<Recovery>,
}

/// Parses one module source and derives its path and RPC entries for the
/// given family. Parse recoveries are reported, not fatal; only an
/// unparseable module statement is an error.
pub fn analyze(source: &str, file_name: &str, family: &Family) -> Result<ModuleAnalysis, YangError> {
    let mut parser = Parser::new_with_name(source, file_name.to_string());
    let module = parser.parse_module()?;
    let recoveries = parser.recoveries().to_vec();
    let (paths, rpcs) = analyze_module(&module, family);
    Ok(ModuleAnalysis {
        module,
        paths,
        rpcs,
        recoveries,
    })
}

fn analyze_module(module: &Module, family: &Family) -> (Vec<PathEntry>, Vec<RpcEntry>) {
    let groupings = GroupingTable::build(&module.root);
    let extractor = Extractor::new(&groupings);

    let paths = match &family.anchor {
        Some(anchor) => match module
            .root
            .children("container")
            .find(|c| c.arg.as_deref() == Some(anchor))
        {
            Some(block) => {
                let root_path = format!("{}:{}", module.name, anchor);
                derive_paths(&extractor, block, &root_path)
            }
            // A family module without the anchor contributes nothing.
            None => Vec::new(),
        },
        None => {
            let root_path = format!("{}:", module.name);
            derive_paths(&extractor, &module.root, &root_path)
        }
    };

    let rpcs = derive_rpcs(&extractor, module);
    (paths, rpcs)
}

/// One failed input file and why it was skipped.
#[derive(Debug, Serialize)]
pub struct FileFailure {
    pub file: String,
    pub message: String,
}

/// Summary of one generation run.
#[derive(Debug, Default, Serialize)]
pub struct GenerationReport {
    /// Modules parsed and included in the output.
    pub processed: usize,
    /// Input files skipped because they could not be read or parsed.
    pub skipped: usize,
    pub failed: Vec<FileFailure>,
    /// Modules that parsed but yielded no paths (or RPCs, for the RPC family).
    pub empty: usize,
    pub total_paths: usize,
    pub total_schemas: usize,
    /// Output file names, manifest included.
    pub documents: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Manifest {
    total_modules: usize,
    total_paths: usize,
    /// Generated document identifiers; each one names a `<id>.json` file
    /// written next to the manifest.
    modules: Vec<String>,
    /// Source modules the documents were derived from.
    sources: Vec<ManifestSource>,
    generator: &'static str,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_at: Option<String>,
}

#[derive(Debug, Serialize)]
struct ManifestSource {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    revision: Option<String>,
    paths: usize,
    recoveries: usize,
}

/// Batch generator: reads a directory of `.yang` modules and writes one
/// document set plus a `manifest.json` for a family.
pub struct Pipeline {
    family: Family,
}

impl Pipeline {
    pub fn new(family: Family) -> Pipeline {
        Pipeline { family }
    }

    pub fn generate(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        generated_at: Option<String>,
    ) -> Result<GenerationReport, YangError> {
        if !input_dir.is_dir() {
            return Err(YangError::DirectoryNotFound {
                path: input_dir.display().to_string(),
            });
        }
        fs::create_dir_all(output_dir).map_err(|source| YangError::Io {
            action: "create directory",
            path: output_dir.display().to_string(),
            source,
        })?;

        let mut report = GenerationReport::default();
        let mut analyses = Vec::new();
        for path in module_files(input_dir)? {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let source = match fs::read_to_string(&path) {
                Ok(source) => source,
                Err(err) => {
                    log::warn!("skipping {file_name}: {err}");
                    report.skipped += 1;
                    report.failed.push(FileFailure {
                        file: file_name,
                        message: err.to_string(),
                    });
                    continue;
                }
            };
            let mut parser = Parser::new_with_name(&source, file_name.clone());
            match parser.parse_module() {
                Ok(module) => {
                    let recoveries = parser.recoveries().to_vec();
                    if !recoveries.is_empty() {
                        log::debug!(
                            "{file_name}: recovered from {} malformed construct(s)",
                            recoveries.len()
                        );
                    }
                    analyses.push((module, recoveries));
                }
                Err(err) => {
                    log::warn!("skipping {file_name}: {err}");
                    report.skipped += 1;
                    report.failed.push(FileFailure {
                        file: file_name,
                        message: err.to_string(),
                    });
                }
            }
        }

        let modules = resolve_includes(analyses);
        log::info!(
            "family {}: {} module(s) after include resolution",
            self.family.name,
            modules.len()
        );

        match self.family.flavor {
            Flavor::Rpc => self.generate_rpc_documents(modules, output_dir, generated_at, &mut report),
            _ => self.generate_category_documents(modules, output_dir, generated_at, &mut report),
        }?;

        Ok(report)
    }

    fn generate_rpc_documents(
        &self,
        modules: Vec<(Module, Vec<Recovery>)>,
        output_dir: &Path,
        generated_at: Option<String>,
        report: &mut GenerationReport,
    ) -> Result<(), YangError> {
        let mut sources = Vec::new();
        for (module, recoveries) in modules {
            let (_, rpcs) = analyze_module(&module, &self.family);
            report.processed += 1;
            if rpcs.is_empty() {
                report.empty += 1;
                continue;
            }
            let title = format!("{} - {}", self.family.title_prefix, module.name);
            let doc = assemble_rpc(
                &title,
                module.description.as_deref().unwrap_or(""),
                &self.family.version,
                &module.name,
                &rpcs,
            );
            report.total_paths += doc.paths.len();
            report.total_schemas += doc.components.schemas.len();
            let file = format!("{}-{}.json", self.family.file_prefix, module.name);
            write_document(output_dir, &file, &doc.to_json()?)?;
            report.documents.push(file);
            sources.push(ManifestSource {
                name: module.name,
                revision: module.revision,
                paths: rpcs.len(),
                recoveries: recoveries.len(),
            });
        }
        self.write_manifest(output_dir, generated_at, sources, report)
    }

    fn generate_category_documents(
        &self,
        modules: Vec<(Module, Vec<Recovery>)>,
        output_dir: &Path,
        generated_at: Option<String>,
        report: &mut GenerationReport,
    ) -> Result<(), YangError> {
        let mut sources = Vec::new();
        let mut entries = Vec::new();
        for (module, recoveries) in modules {
            let (paths, _) = analyze_module(&module, &self.family);
            report.processed += 1;
            if paths.is_empty() {
                log::debug!("{}: no addressable paths", module.name);
                report.empty += 1;
            }
            sources.push(ManifestSource {
                name: module.name,
                revision: module.revision,
                paths: paths.len(),
                recoveries: recoveries.len(),
            });
            entries.extend(paths);
        }
        report.total_paths = entries.len();

        for (category, bucket) in bucketize(&self.family.categories, entries) {
            let title = format!(
                "{} - {}",
                self.family.title_prefix,
                self.family.categories.title_of(&category)
            );
            let mut options = AssembleOptions::new(&title, &category, self.family.writable());
            options.version = self.family.version.clone();
            options.server_url = self.family.server_url.clone();
            for (id, doc) in assemble_sized(&options, bucket)? {
                report.total_schemas += doc.components.schemas.len();
                let file = format!("{}-{}.json", self.family.file_prefix, id);
                write_document(output_dir, &file, &doc.to_json()?)?;
                report.documents.push(file);
            }
        }
        self.write_manifest(output_dir, generated_at, sources, report)
    }

    fn write_manifest(
        &self,
        output_dir: &Path,
        generated_at: Option<String>,
        sources: Vec<ManifestSource>,
        report: &mut GenerationReport,
    ) -> Result<(), YangError> {
        let modules: Vec<String> = report
            .documents
            .iter()
            .filter_map(|file| file.strip_suffix(".json"))
            .map(str::to_string)
            .collect();
        let manifest = Manifest {
            total_modules: modules.len(),
            total_paths: sources.iter().map(|m| m.paths).sum(),
            modules,
            sources,
            generator: "yangdoc",
            version: self.family.version.clone(),
            generated_at,
        };
        let text = serde_json::to_string_pretty(&manifest)?;
        write_document(output_dir, "manifest.json", &text)?;
        report.documents.push("manifest.json".to_string());
        Ok(())
    }
}

fn module_files(input_dir: &Path) -> Result<Vec<PathBuf>, YangError> {
    let reader = fs::read_dir(input_dir).map_err(|source| YangError::Io {
        action: "read directory",
        path: input_dir.display().to_string(),
        source,
    })?;
    let mut files: Vec<PathBuf> = reader
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "yang"))
        .collect();
    files.sort();
    Ok(files)
}

fn write_document(output_dir: &Path, file: &str, text: &str) -> Result<(), YangError> {
    let path = output_dir.join(file);
    fs::write(&path, text).map_err(|source| YangError::Io {
        action: "write",
        path: path.display().to_string(),
        source,
    })
}

/// Splices each `include`d submodule's body into its parent module and drops
/// the submodules from further processing. An include naming a submodule
/// that was not parsed is left unresolved; the parent still generates from
/// what it has.
fn resolve_includes(analyses: Vec<(Module, Vec<Recovery>)>) -> Vec<(Module, Vec<Recovery>)> {
    let mut submodules: BTreeMap<String, Module> = BTreeMap::new();
    let mut parents = Vec::new();
    for (module, recoveries) in analyses {
        if module.root.keyword == "submodule" {
            submodules.insert(module.name.clone(), module);
        } else {
            parents.push((module, recoveries));
        }
    }

    for (module, _) in &mut parents {
        for include in module.includes.clone() {
            match submodules.get(&include) {
                Some(sub) => {
                    module
                        .root
                        .substatements
                        .extend(sub.root.substatements.iter().cloned());
                }
                None => log::warn!(
                    "{}: included submodule `{include}` not found",
                    module.name
                ),
            }
        }
    }
    parents
}
