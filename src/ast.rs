/// A parsed YANG statement: `keyword [argument] (";" | "{" substatements "}")`.
///
/// The tree is deliberately generic. Statement keywords the generator does not
/// understand are still parsed and kept, so the extractor can walk a module
/// without the parser needing to know the full RFC 7950 grammar.
#[derive(Debug, PartialEq, Clone)]
pub struct Statement {
    pub keyword: String,
    pub arg: Option<String>,
    pub substatements: Vec<Statement>,
    pub pos_start: usize,
    pub pos_end: usize,
}

impl Statement {
    /// Returns the first substatement with the given keyword.
    pub fn child(&self, keyword: &str) -> Option<&Statement> {
        self.substatements.iter().find(|s| s.keyword == keyword)
    }

    /// Returns all substatements with the given keyword, in source order.
    pub fn children<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a Statement> {
        self.substatements.iter().filter(move |s| s.keyword == keyword)
    }

    /// The statement's argument, or an empty string if it has none.
    pub fn arg_str(&self) -> &str {
        self.arg.as_deref().unwrap_or("")
    }

    /// The `description` substatement's text, if present.
    pub fn description(&self) -> Option<&str> {
        self.child("description").and_then(|d| d.arg.as_deref())
    }
}

/// One parsed source-text unit: the `module` (or `submodule`) statement plus
/// the metadata the pipeline needs without re-walking the tree.
#[derive(Debug, Clone)]
pub struct Module {
    /// Declared module name (the argument of the `module` keyword).
    pub name: String,
    /// First description found directly under the module statement.
    pub description: Option<String>,
    /// Revision date of the newest `revision` statement, if any.
    pub revision: Option<String>,
    /// Names of `include`d submodules, in declaration order.
    pub includes: Vec<String>,
    /// The module statement itself; its substatements are the module body.
    pub root: Statement,
}

impl Module {
    pub fn from_root(root: Statement) -> Module {
        let name = root.arg_str().to_string();
        let description = root.description().map(str::to_string);
        // Revisions are declared newest-first by convention, but don't rely
        // on it: take the lexicographic maximum of the date arguments.
        let revision = root
            .children("revision")
            .filter_map(|r| r.arg.clone())
            .max();
        let includes = root
            .children("include")
            .filter_map(|i| i.arg.clone())
            .collect();
        Module {
            name,
            description,
            revision,
            includes,
            root,
        }
    }
}

/// Strips a `prefix:` qualifier from a YANG reference, leaving the local name.
pub fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmt(keyword: &str, arg: Option<&str>, subs: Vec<Statement>) -> Statement {
        Statement {
            keyword: keyword.to_string(),
            arg: arg.map(str::to_string),
            substatements: subs,
            pos_start: 0,
            pos_end: 0,
        }
    }

    #[test]
    fn test_child_lookup() {
        let leaf = stmt(
            "leaf",
            Some("mtu"),
            vec![
                stmt("type", Some("uint16"), vec![]),
                stmt("description", Some("Interface MTU"), vec![]),
            ],
        );
        assert_eq!(leaf.child("type").unwrap().arg_str(), "uint16");
        assert_eq!(leaf.description(), Some("Interface MTU"));
        assert!(leaf.child("key").is_none());
    }

    #[test]
    fn test_module_metadata() {
        let root = stmt(
            "module",
            Some("example-device"),
            vec![
                stmt("description", Some("Example device model"), vec![]),
                stmt("revision", Some("2023-03-01"), vec![]),
                stmt("revision", Some("2024-07-01"), vec![]),
                stmt("include", Some("example-device-part1"), vec![]),
            ],
        );
        let module = Module::from_root(root);
        assert_eq!(module.name, "example-device");
        assert_eq!(module.description.as_deref(), Some("Example device model"));
        assert_eq!(module.revision.as_deref(), Some("2024-07-01"));
        assert_eq!(module.includes, vec!["example-device-part1".to_string()]);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("inet:ipv4-address"), "ipv4-address");
        assert_eq!(local_name("plain-name"), "plain-name");
    }
}
