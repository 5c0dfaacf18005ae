use std::collections::BTreeMap;

use serde::Serialize;

/// One module entry in the cross-family search index.
#[derive(Debug, Clone, Serialize)]
pub struct SearchEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub category: String,
    #[serde(rename = "displayCategory")]
    pub display_category: String,
    pub description: String,
    /// Deep link into the rendered viewer, selecting this module's document.
    #[serde(rename = "swaggerUrl")]
    pub swagger_url: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct SearchStats {
    pub total_modules: usize,
    pub by_category: BTreeMap<String, usize>,
}

/// The search index consumed by the documentation portal's search box.
#[derive(Debug, Serialize)]
pub struct SearchIndex {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<String>,
    pub stats: SearchStats,
    pub modules: Vec<SearchEntry>,
}

/// One generated family feeding the index.
#[derive(Debug, Clone)]
pub struct FamilySource {
    /// Output directory name, relative to the portal root.
    pub directory: String,
    pub entry_type: String,
    pub display_name: String,
    pub description: String,
    pub modules: Vec<String>,
}

/// Search keywords for a module name: the full lowercased name plus its
/// hyphen/underscore-separated parts longer than two characters, deduplicated
/// in order of first appearance.
pub fn extract_keywords(module_name: &str) -> Vec<String> {
    let lowered = module_name.to_lowercase();
    let mut keywords = vec![lowered.clone()];
    for part in lowered.split(['-', '_']) {
        if part.len() > 2 && !keywords.iter().any(|k| k == part) {
            keywords.push(part.to_string());
        }
    }
    keywords
}

/// Builds the portal search index from the generated families.
pub fn build_index(sources: &[FamilySource], generated: Option<String>) -> SearchIndex {
    let mut stats = SearchStats::default();
    let mut modules = Vec::new();
    for source in sources {
        for module in &source.modules {
            modules.push(SearchEntry {
                name: module.clone(),
                entry_type: source.entry_type.clone(),
                category: source.entry_type.clone(),
                display_category: source.display_name.clone(),
                description: source.description.clone(),
                swagger_url: format!("{}/index.html#spec={}", source.directory, module),
                keywords: extract_keywords(module),
            });
        }
        *stats.by_category.entry(source.entry_type.clone()).or_insert(0) +=
            source.modules.len();
    }
    modules.sort_by(|a, b| a.name.cmp(&b.name));
    stats.total_modules = modules.len();
    SearchIndex {
        version: "1.0".to_string(),
        generated,
        stats,
        modules,
    }
}
