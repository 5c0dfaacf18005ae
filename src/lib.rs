pub mod ast;
pub mod category;
pub mod document;
pub mod error;
pub mod extract;
pub mod lexer;
pub mod merge;
pub mod parser;
pub mod paths;
pub mod schema;
pub mod search;
pub mod utils;
pub mod api;
mod serialization;
