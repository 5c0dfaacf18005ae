use crate::ast::{Module, Statement};
use crate::error::{ParserError, YangError};
use crate::lexer::{Lexer, Token, TokenType};
use crate::utils::get_line_and_column;
use miette::NamedSource;
use std::sync::Arc;

/// A note recorded when the parser skipped a malformed construct and kept
/// going instead of failing the whole module.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovery {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// A recursive descent parser for YANG statements.
///
/// The grammar is the generic statement form of RFC 7950 section 6.3:
/// `statement = keyword [argument] (";" / "{" *statement "}")`. Keywords the
/// generator does not understand are parsed and kept in the tree anyway.
///
/// A malformed substatement inside a block is skipped to its balancing `;` or
/// `}` and recorded as a [`Recovery`], so one bad construct never aborts the
/// module. Only a broken top-level `module` statement is a hard error.
#[derive(Debug)]
pub struct Parser<'a> {
    source: Arc<NamedSource<String>>,
    tokens: Vec<Token>,
    position: usize,
    source_text: &'a str,
    recoveries: Vec<Recovery>,
}

impl<'a> Parser<'a> {
    pub fn new(source_text: &'a str) -> Self {
        Self::new_with_name(source_text, "source.yang".to_string())
    }

    pub fn new_with_name(source_text: &'a str, name: String) -> Self {
        let source = Arc::new(NamedSource::new(name, source_text.to_string()));
        let mut lexer = Lexer::new(source_text);
        let tokens: Vec<Token> = lexer
            .lex()
            .into_iter()
            .filter(|t| !matches!(t.ttype, TokenType::Whitespace | TokenType::Comment(_)))
            .collect();

        Self {
            source,
            tokens,
            position: 0,
            source_text,
            recoveries: Vec::new(),
        }
    }

    /// Module ::= ( "module" | "submodule" ) Identifier "{" { Statement } "}"
    pub fn parse_module(&mut self) -> Result<Module, YangError> {
        let root = self.parse_statement()?;
        if root.keyword != "module" && root.keyword != "submodule" {
            return Err(ParserError::NotAModule {
                src: (*self.source).clone(),
                span: (root.pos_start, root.pos_end - root.pos_start).into(),
                keyword: root.keyword,
            }
            .into());
        }

        // Anything after the closing brace is ignored, not fatal.
        if let Ok(token) = self.current_token() {
            if token.ttype != TokenType::Eof {
                let pos = token.pos_start;
                self.record_recovery("trailing content after module statement", pos);
            }
        }

        Ok(Module::from_root(root))
    }

    /// Notes recorded while skipping malformed constructs, in source order.
    pub fn recoveries(&self) -> &[Recovery] {
        &self.recoveries
    }

    /// Statement ::= Keyword [ Argument ] ( ";" | "{" { Statement } "}" )
    fn parse_statement(&mut self) -> Result<Statement, YangError> {
        let start_token = self.current_token()?.clone();
        let keyword = match &start_token.ttype {
            TokenType::Identifier(word) => word.clone(),
            _ => return self.err_unexpected("a statement keyword"),
        };
        self.advance();

        let arg = self.parse_optional_argument()?;

        let token = self.current_token()?.clone();
        match token.ttype {
            TokenType::Semicolon => {
                self.advance();
                Ok(Statement {
                    keyword,
                    arg,
                    substatements: Vec::new(),
                    pos_start: start_token.pos_start,
                    pos_end: token.pos_end,
                })
            }
            TokenType::LBrace => {
                self.advance();
                let substatements = self.parse_block();
                let end_pos = match self.current_token() {
                    Ok(end) if end.ttype == TokenType::RBrace => {
                        let pos = end.pos_end;
                        self.advance();
                        pos
                    }
                    // Truncated input: accept what was parsed and note it.
                    _ => {
                        let pos = self.source_text.len();
                        self.record_recovery(&format!("unclosed `{keyword}` block"), pos);
                        pos
                    }
                };
                Ok(Statement {
                    keyword,
                    arg,
                    substatements,
                    pos_start: start_token.pos_start,
                    pos_end: end_pos,
                })
            }
            _ => self.err_unexpected("';' or '{' after statement argument"),
        }
    }

    /// Argument ::= Identifier | QuotedString { "+" QuotedString }
    fn parse_optional_argument(&mut self) -> Result<Option<String>, YangError> {
        let token = self.current_token()?.clone();
        match token.ttype {
            TokenType::Identifier(word) => {
                self.advance();
                Ok(Some(word))
            }
            TokenType::QuotedString(first) => {
                self.advance();
                let mut value = first;
                while self.match_token(TokenType::Plus) {
                    let next = self.current_token()?.clone();
                    if let TokenType::QuotedString(part) = next.ttype {
                        self.advance();
                        value.push_str(&part);
                    } else {
                        return self.err_unexpected("a quoted string after '+'");
                    }
                }
                Ok(Some(value))
            }
            _ => Ok(None),
        }
    }

    /// Parses substatements until the enclosing `}` (or end of input).
    fn parse_block(&mut self) -> Vec<Statement> {
        let mut statements = Vec::new();
        loop {
            match self.current_token() {
                Ok(token) if token.ttype == TokenType::RBrace => break,
                Ok(token) if token.ttype == TokenType::Eof => break,
                Err(_) => break,
                Ok(_) => {}
            }
            let checkpoint = self.position;
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    self.position = checkpoint;
                    let pos = self
                        .tokens
                        .get(self.position)
                        .map(|t| t.pos_start)
                        .unwrap_or(self.source_text.len());
                    self.record_recovery(&err.to_string(), pos);
                    self.skip_statement();
                }
            }
        }
        statements
    }

    /// Skips tokens to the end of the current (malformed) statement: past a
    /// `;` at depth zero or a `}` balancing a brace opened during the skip.
    /// Never consumes the `}` closing the enclosing block.
    fn skip_statement(&mut self) {
        let mut depth = 0usize;
        while let Ok(token) = self.current_token() {
            match token.ttype {
                TokenType::Eof => break,
                TokenType::LBrace => {
                    depth += 1;
                    self.advance();
                }
                TokenType::RBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        break;
                    }
                }
                TokenType::Semicolon => {
                    self.advance();
                    if depth == 0 {
                        break;
                    }
                }
                _ => self.advance(),
            }
        }
    }

    fn record_recovery(&mut self, message: &str, position: usize) {
        let (line, column) = get_line_and_column(self.source_text, position);
        self.recoveries.push(Recovery {
            message: message.to_string(),
            line,
            column,
        });
    }

    // === Tokenizer Helper Methods ===

    fn current_token(&self) -> Result<&Token, YangError> {
        self.tokens.get(self.position).ok_or_else(|| {
            let pos = self.source_text.len().saturating_sub(1);
            ParserError::UnexpectedEof {
                src: (*self.source).clone(),
                span: (pos, 0).into(),
            }
            .into()
        })
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn match_token(&mut self, ttype: TokenType) -> bool {
        if self.check(ttype) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, ttype: TokenType) -> bool {
        if let Ok(token) = self.current_token() {
            std::mem::discriminant(&token.ttype) == std::mem::discriminant(&ttype)
        } else {
            false
        }
    }

    fn err_unexpected<T>(&self, expected: &str) -> Result<T, YangError> {
        let token = self.current_token()?;
        Err(ParserError::UnexpectedToken {
            src: (*self.source).clone(),
            span: (token.pos_start, token.pos_end - token.pos_start).into(),
            expected: expected.to_string(),
        }
        .into())
    }
}
