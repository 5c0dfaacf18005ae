use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum YangError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parser(#[from] ParserError),

    #[error("Model directory not found: {path}")]
    #[diagnostic(
        code(pipeline::directory_not_found),
        help("The input directory must exist and contain .yang module files.")
    )]
    DirectoryNotFound { path: String },

    #[error("Failed to {action} {path}")]
    #[diagnostic(code(pipeline::io))]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize generated document")]
    #[diagnostic(code(pipeline::serialize))]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParserError {
    #[error("Unexpected token")]
    #[diagnostic(
        code(parser::unexpected_token),
        help("The parser found a token it did not expect in this position.")
    )]
    UnexpectedToken {
        #[source_code]
        src: NamedSource<String>,
        #[label("Expected {expected}, but found this")]
        span: SourceSpan,
        expected: String,
    },

    #[error("Unexpected end of file")]
    #[diagnostic(
        code(parser::unexpected_eof),
        help("The file ended unexpectedly. The parser expected more tokens.")
    )]
    UnexpectedEof {
        #[source_code]
        src: NamedSource<String>,
        #[label("File ended unexpectedly here")]
        span: SourceSpan,
    },

    #[error("Not a YANG module")]
    #[diagnostic(
        code(parser::not_a_module),
        help("A YANG source file must start with a `module` or `submodule` statement.")
    )]
    NotAModule {
        #[source_code]
        src: NamedSource<String>,
        #[label("Expected `module` or `submodule`, found `{keyword}`")]
        span: SourceSpan,
        keyword: String,
    },
}
