/// Represents the different kinds of tokens the lexer can produce.
/// YANG has a deliberately small lexical surface: statements are a keyword,
/// an optional argument, and either a `;` or a `{ ... }` block.
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    // == Special Tokens ==
    /// Represents the end of the input file.
    Eof,
    /// A sequence of one or more whitespace characters (spaces, tabs, newlines).
    Whitespace,
    /// A comment, either `// ...` to end of line or a `/* ... */` block.
    /// The associated `String` contains the comment text.
    Comment(String),
    /// A token that could not be recognized by the lexer.
    Unknown,

    // == Words ==
    /// An unquoted word: a statement keyword (`container`, `leaf`, ...) or an
    /// unquoted argument (`hostname`, `inet:ipv4-address`, `0..255`).
    Identifier(String),
    /// A quoted string argument, single or double quoted. Escapes are only
    /// processed inside double quotes, per RFC 7950.
    QuotedString(String),

    // == Punctuation ==
    /// Left Brace: `{`
    LBrace,
    /// Right Brace: `}`
    RBrace,
    /// Semicolon: `;`
    Semicolon,
    /// Plus: `+` (quoted-string concatenation)
    Plus,
}

/// A token with its type and byte position in the source.
#[derive(Debug, Clone)]
pub struct Token {
    pub ttype: TokenType,
    pub pos_start: usize,
    pub pos_end: usize,
}

impl Token {
    pub fn new(ttype: TokenType, pos_start: usize, pos_end: usize) -> Token {
        Token {
            ttype,
            pos_start,
            pos_end,
        }
    }
}

pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    pub fn lex(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if token.ttype == TokenType::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    pub fn next_token(&mut self) -> Token {
        let start_pos = self.position;

        let ttype = if let Some(char) = self.advance() {
            match char {
                '{' => TokenType::LBrace,
                '}' => TokenType::RBrace,
                ';' => TokenType::Semicolon,
                '+' => TokenType::Plus,
                '/' => {
                    if self.peek() == Some(&'/') {
                        self.read_line_comment()
                    } else if self.peek() == Some(&'*') {
                        self.read_block_comment()
                    } else {
                        // A bare '/' can start an unquoted path argument.
                        self.read_identifier(char)
                    }
                }
                '"' => self.read_string('"'),
                '\'' => self.read_string('\''),
                c if c.is_whitespace() => self.read_whitespace(),
                c => self.read_identifier(c),
            }
        } else {
            TokenType::Eof
        };

        Token::new(ttype, start_pos, self.position)
    }

    fn advance(&mut self) -> Option<char> {
        let char = self.chars.next();
        if let Some(c) = char {
            self.position += c.len_utf8();
        }
        char
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    fn read_whitespace(&mut self) -> TokenType {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
        TokenType::Whitespace
    }

    fn read_line_comment(&mut self) -> TokenType {
        self.advance(); // Consume the second '/'
        let mut comment_text = String::new();
        while let Some(c) = self.peek() {
            if *c == '\n' {
                break;
            }
            comment_text.push(self.advance().unwrap());
        }
        TokenType::Comment(comment_text.trim().to_string())
    }

    fn read_block_comment(&mut self) -> TokenType {
        self.advance(); // Consume the '*'
        let mut comment_text = String::new();
        while let Some(c) = self.advance() {
            if c == '*' && self.peek() == Some(&'/') {
                self.advance(); // Consume the '/'
                return TokenType::Comment(comment_text.trim().to_string());
            }
            comment_text.push(c);
        }
        TokenType::Unknown // Unclosed block comment
    }

    fn read_string(&mut self, quote: char) -> TokenType {
        let mut value = String::new();
        while let Some(c) = self.peek() {
            if *c == quote {
                self.advance(); // Consume the closing quote
                return TokenType::QuotedString(value);
            }

            if *c == '\\' && quote == '"' {
                self.advance(); // Consume the backslash
                if let Some(escaped_char) = self.advance() {
                    match escaped_char {
                        '"' => value.push('"'),
                        '\\' => value.push('\\'),
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        _ => {
                            value.push('\\');
                            value.push(escaped_char);
                        }
                    }
                } else {
                    return TokenType::Unknown; // Unclosed escape sequence
                }
            } else {
                value.push(self.advance().unwrap());
            }
        }
        TokenType::Unknown // Unclosed string
    }

    fn read_identifier(&mut self, first_char: char) -> TokenType {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(c) = self.peek() {
            if Self::is_word_char(*c) {
                ident.push(self.advance().unwrap());
            } else {
                break;
            }
        }

        TokenType::Identifier(ident)
    }

    // Unquoted YANG strings run until whitespace or structural punctuation.
    fn is_word_char(c: char) -> bool {
        !c.is_whitespace() && !matches!(c, '{' | '}' | ';' | '"' | '\'' | '/' | '+')
    }
}
