use std::collections::BTreeMap;

use serde::Serialize;

use crate::paths::{PathEntry, RpcEntry};
use crate::schema::SchemaNode;

/// Hard output ceiling per document file.
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;
/// Chunks aim below this fraction of the ceiling so late additions
/// (info block, shared schemas) do not push a chunk over it.
pub const SPLIT_TARGET: f64 = 0.8;

/// A static OpenAPI 3.0 document.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub openapi: String,
    pub info: Info,
    pub servers: Vec<Server>,
    pub paths: BTreeMap<String, PathItem>,
    pub components: Components,
    pub security: Vec<BTreeMap<String, Vec<String>>>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Info {
    pub title: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Server {
    pub url: String,
    pub variables: BTreeMap<String, ServerVariable>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerVariable {
    pub default: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub name: String,
    pub description: String,
}

/// Verb map for one path. Keys are lowercase HTTP methods; BTreeMap keeps
/// serialization order stable.
pub type PathItem = BTreeMap<String, Operation>;

#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "operationId")]
    pub operation_id: String,
    pub tags: Vec<String>,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    pub responses: BTreeMap<String, Response>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestBody {
    pub required: bool,
    pub content: Content,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    #[serde(rename = "application/yang-data+json")]
    pub yang_json: MediaType,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaType {
    pub schema: SchemaRef,
}

/// Reference to a named component schema. Holds the bare name; serialization
/// expands it to a `$ref` object.
#[derive(Debug, Clone)]
pub struct SchemaRef(pub String);

impl Serialize for SchemaRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("$ref", &format!("#/components/schemas/{}", self.0))?;
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Components {
    #[serde(rename = "securitySchemes")]
    pub security_schemes: BTreeMap<String, SecurityScheme>,
    pub schemas: BTreeMap<String, SchemaNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,
    pub scheme: String,
}

impl Document {
    fn shell(title: &str, description: &str, version: &str, server_url: &str) -> Document {
        let mut variables = BTreeMap::new();
        variables.insert(
            "device".to_string(),
            ServerVariable {
                default: "device.example.com".to_string(),
                description: "Device hostname or IP address".to_string(),
            },
        );
        let mut security_schemes = BTreeMap::new();
        security_schemes.insert(
            "basicAuth".to_string(),
            SecurityScheme {
                scheme_type: "http".to_string(),
                scheme: "basic".to_string(),
            },
        );
        let mut security = BTreeMap::new();
        security.insert("basicAuth".to_string(), Vec::new());
        Document {
            openapi: "3.0.0".to_string(),
            info: Info {
                title: title.to_string(),
                description: description.to_string(),
                version: version.to_string(),
            },
            servers: vec![Server {
                url: server_url.to_string(),
                variables,
            }],
            paths: BTreeMap::new(),
            components: Components {
                security_schemes,
                schemas: BTreeMap::new(),
            },
            security: vec![security],
            tags: Vec::new(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Schema names referenced by any operation but absent from components.
    /// An assembled document always returns an empty list.
    pub fn unresolved_references(&self) -> Vec<String> {
        let mut missing = Vec::new();
        for item in self.paths.values() {
            for op in item.values() {
                if let Some(body) = &op.request_body {
                    self.check_ref(&body.content.yang_json.schema, &mut missing);
                }
                for response in op.responses.values() {
                    if let Some(content) = &response.content {
                        self.check_ref(&content.yang_json.schema, &mut missing);
                    }
                }
            }
        }
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    fn check_ref(&self, schema_ref: &SchemaRef, missing: &mut Vec<String>) {
        if !self.components.schemas.contains_key(&schema_ref.0) {
            missing.push(schema_ref.0.clone());
        }
    }
}

/// Settings for assembling one category document.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    pub title: String,
    pub description: String,
    pub version: String,
    pub category: String,
    /// Config families get the full verb set; read-only families get GET only.
    pub writable: bool,
    pub path_prefix: String,
    pub server_url: String,
}

impl AssembleOptions {
    pub fn new(title: &str, category: &str, writable: bool) -> AssembleOptions {
        AssembleOptions {
            title: title.to_string(),
            description: String::new(),
            version: "1.0.0".to_string(),
            category: category.to_string(),
            writable,
            path_prefix: "/data/".to_string(),
            server_url: "https://{device}/restconf".to_string(),
        }
    }
}

fn schema_name(category: &str, path: &str) -> String {
    format!("{}-{}", category, path.replace([':', '/'], "-"))
}

fn ref_content(name: &str) -> Content {
    Content {
        yang_json: MediaType {
            schema: SchemaRef(name.to_string()),
        },
    }
}

fn response(description: &str, content: Option<Content>) -> Response {
    Response {
        description: description.to_string(),
        content,
    }
}

fn build_operations(options: &AssembleOptions, entry: &PathEntry, name: &str) -> PathItem {
    let tags = vec![options.category.clone()];
    let mut item = PathItem::new();

    let mut get_responses = BTreeMap::new();
    get_responses.insert(
        "200".to_string(),
        response("OK", Some(ref_content(name))),
    );
    get_responses.insert("401".to_string(), response("Unauthorized", None));
    get_responses.insert("404".to_string(), response("Not found", None));
    item.insert(
        "get".to_string(),
        Operation {
            summary: format!("Retrieve {}", entry.name),
            description: entry.description.clone(),
            operation_id: format!("get-{}", name),
            tags: tags.clone(),
            request_body: None,
            responses: get_responses,
        },
    );

    if !options.writable {
        return item;
    }

    let body = Some(RequestBody {
        required: true,
        content: ref_content(name),
    });

    let mut put_responses = BTreeMap::new();
    put_responses.insert("201".to_string(), response("Created", None));
    put_responses.insert("204".to_string(), response("Updated", None));
    put_responses.insert("400".to_string(), response("Bad request", None));
    put_responses.insert("401".to_string(), response("Unauthorized", None));
    item.insert(
        "put".to_string(),
        Operation {
            summary: format!("Create or replace {}", entry.name),
            description: String::new(),
            operation_id: format!("put-{}", name),
            tags: tags.clone(),
            request_body: body.clone(),
            responses: put_responses,
        },
    );

    let mut patch_responses = BTreeMap::new();
    patch_responses.insert("204".to_string(), response("Updated", None));
    patch_responses.insert("400".to_string(), response("Bad request", None));
    patch_responses.insert("401".to_string(), response("Unauthorized", None));
    item.insert(
        "patch".to_string(),
        Operation {
            summary: format!("Merge changes into {}", entry.name),
            description: String::new(),
            operation_id: format!("patch-{}", name),
            tags: tags.clone(),
            request_body: body.clone(),
            responses: patch_responses,
        },
    );

    if entry.is_collection {
        let mut post_responses = BTreeMap::new();
        post_responses.insert("201".to_string(), response("Created", None));
        post_responses.insert("400".to_string(), response("Bad request", None));
        post_responses.insert("401".to_string(), response("Unauthorized", None));
        item.insert(
            "post".to_string(),
            Operation {
                summary: format!("Append to {}", entry.name),
                description: String::new(),
                operation_id: format!("post-{}", name),
                tags,
                request_body: body,
                responses: post_responses,
            },
        );
    } else {
        let mut delete_responses = BTreeMap::new();
        delete_responses.insert("204".to_string(), response("Deleted", None));
        delete_responses.insert("400".to_string(), response("Bad request", None));
        delete_responses.insert("401".to_string(), response("Unauthorized", None));
        delete_responses.insert("404".to_string(), response("Not found", None));
        item.insert(
            "delete".to_string(),
            Operation {
                summary: format!("Delete {}", entry.name),
                description: String::new(),
                operation_id: format!("delete-{}", name),
                tags,
                request_body: None,
                responses: delete_responses,
            },
        );
    }

    item
}

/// Assembles one category's entries into a single document. Every operation's
/// schema reference resolves within the document's own components.
pub fn assemble(options: &AssembleOptions, entries: &[PathEntry]) -> Document {
    let mut doc = Document::shell(
        &options.title,
        &options.description,
        &options.version,
        &options.server_url,
    );
    doc.tags.push(Tag {
        name: options.category.clone(),
        description: options.title.clone(),
    });
    for entry in entries {
        let name = schema_name(&options.category, &entry.path);
        let document_path = format!("{}{}", options.path_prefix, entry.path);
        doc.components.schemas.insert(name.clone(), entry.schema.clone());
        doc.paths
            .insert(document_path, build_operations(options, entry, &name));
    }
    doc
}

/// Assembles entries into as few documents as fit under the size ceiling.
pub fn assemble_sized(
    options: &AssembleOptions,
    entries: Vec<PathEntry>,
) -> Result<Vec<(String, Document)>, serde_json::Error> {
    assemble_sized_with_limit(options, entries, MAX_DOCUMENT_BYTES)
}

/// As [`assemble_sized`] with an explicit byte ceiling.
pub fn assemble_sized_with_limit(
    options: &AssembleOptions,
    mut entries: Vec<PathEntry>,
    limit: usize,
) -> Result<Vec<(String, Document)>, serde_json::Error> {
    entries.sort_by_key(|e| e.path.to_lowercase());
    let target = (limit as f64 * SPLIT_TARGET) as usize;

    let mut num_chunks = 1usize;
    loop {
        let chunks = split_even(&entries, num_chunks);
        let mut documents = Vec::with_capacity(chunks.len());
        let mut all_fit = true;
        for (index, chunk) in chunks.iter().enumerate() {
            let mut chunk_options = options.clone();
            let id = if chunks.len() == 1 {
                options.category.clone()
            } else {
                chunk_options.title = format!("{} (Part {})", options.title, index + 1);
                format!("{}-{}", options.category, index + 1)
            };
            let doc = assemble(&chunk_options, chunk);
            if chunks.len() < entries.len() && doc.to_json()?.len() > target {
                all_fit = false;
                break;
            }
            documents.push((id, doc));
        }
        if all_fit || num_chunks >= entries.len() {
            return Ok(documents);
        }
        num_chunks += 1;
    }
}

fn split_even<'a>(entries: &'a [PathEntry], num_chunks: usize) -> Vec<&'a [PathEntry]> {
    if entries.is_empty() {
        return vec![entries];
    }
    let num_chunks = num_chunks.clamp(1, entries.len());
    let size = entries.len().div_ceil(num_chunks);
    entries.chunks(size).collect()
}

/// Assembles a module's RPC operations into an actions document. Each RPC
/// maps to a POST under `/operations/` with the input payload wrapped in a
/// module-qualified property.
pub fn assemble_rpc(
    title: &str,
    description: &str,
    version: &str,
    module_name: &str,
    rpcs: &[RpcEntry],
) -> Document {
    let mut doc = Document::shell(title, description, version, "https://{device}/restconf");
    doc.tags.push(Tag {
        name: "operations".to_string(),
        description: title.to_string(),
    });
    for rpc in rpcs {
        let input_name = format!("{}-input", rpc.name);
        let output_name = format!("{}-output", rpc.name);

        let mut wrapper = crate::schema::ObjectSchema::default();
        wrapper.insert(&format!("{}:{}", module_name, rpc.name), rpc.input.clone());
        doc.components
            .schemas
            .insert(input_name.clone(), SchemaNode::Object(wrapper));
        doc.components
            .schemas
            .insert(output_name.clone(), rpc.output.clone());

        let mut responses = BTreeMap::new();
        responses.insert(
            "200".to_string(),
            response("OK", Some(ref_content(&output_name))),
        );
        responses.insert("400".to_string(), response("Bad request", None));
        responses.insert("401".to_string(), response("Unauthorized", None));
        responses.insert("500".to_string(), response("Internal error", None));

        let mut item = PathItem::new();
        item.insert(
            "post".to_string(),
            Operation {
                summary: format!("Invoke {}", rpc.name),
                description: rpc.description.clone(),
                operation_id: format!("invoke-{}-{}", module_name, rpc.name),
                tags: vec!["operations".to_string()],
                request_body: Some(RequestBody {
                    required: true,
                    content: ref_content(&input_name),
                }),
                responses,
            },
        );
        doc.paths
            .insert(format!("/operations/{}:{}", module_name, rpc.name), item);
    }
    doc
}
