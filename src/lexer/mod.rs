pub mod token;

use anyhow::Result;
use thin_vec::ThinVec;

use crate::{
    errors::builders,
    lexer::token::{lookup_reserved, Token, TokenKind},
};

/// Hand-written scanner over the source text. Keeps a cursor plus the
/// current line and column; all lookahead is one or two characters.
#[derive(Debug, Clone)]
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> char {
        self.chars.get(self.pos).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.chars.get(self.pos + 1).copied().unwrap_or('\0')
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.at_eof() || self.peek() != expected {
            return false;
        }
        self.advance();
        true
    }

    fn skip_whitespace(&mut self) {
        while !self.at_eof() {
            match self.peek() {
                ' ' | '\r' | '\t' | '\n' => {
                    self.advance();
                }
                '/' if self.peek_next() == '/' => {
                    while !self.at_eof() && self.peek() != '\n' {
                        self.advance();
                    }
                }
                _ => return,
            }
        }
    }

    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    fn is_alpha(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_'
    }

    fn is_alphanumeric(c: char) -> bool {
        Self::is_alpha(c) || Self::is_digit(c)
    }

    fn scan_string(&mut self) -> Token {
        let start_line = self.line;
        let start_col = self.column;
        let mut value = String::new();

        // Opening quote
        self.advance();

        while self.peek() != '"' && !self.at_eof() {
            if self.peek() == '\n' {
                return Token::new(TokenKind::Unknown, "Unterminated string", start_line, start_col);
            }
            if self.peek() == '\\' {
                self.advance();
                match self.peek() {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    _ => {
                        return Token::new(
                            TokenKind::Unknown,
                            "Invalid escape sequence",
                            start_line,
                            start_col,
                        );
                    }
                }
                self.advance();
            } else {
                value.push(self.advance());
            }
        }

        if self.at_eof() {
            return Token::new(TokenKind::Unknown, "Unterminated string", start_line, start_col);
        }

        // Closing quote
        self.advance();

        Token::new(TokenKind::StringLiteral, value, start_line, start_col)
    }

    fn scan_number(&mut self) -> Token {
        let start_line = self.line;
        let start_col = self.column;
        let mut value = String::new();
        let mut is_float = false;

        while Self::is_digit(self.peek()) {
            value.push(self.advance());
        }

        if self.peek() == '.' && Self::is_digit(self.peek_next()) {
            is_float = true;
            value.push(self.advance());
            while Self::is_digit(self.peek()) {
                value.push(self.advance());
            }
        }

        // Suffixes pick the literal kind; the lexeme keeps the digits only.
        match self.peek() {
            'L' | 'l' => {
                self.advance();
                return Token::new(TokenKind::LongLiteral, value, start_line, start_col);
            }
            'f' | 'F' => {
                self.advance();
                return Token::new(TokenKind::FloatLiteral, value, start_line, start_col);
            }
            'd' | 'D' => {
                self.advance();
                return Token::new(TokenKind::DoubleLiteral, value, start_line, start_col);
            }
            _ => {}
        }

        if is_float {
            Token::new(TokenKind::FloatLiteral, value, start_line, start_col)
        } else {
            Token::new(TokenKind::IntLiteral, value, start_line, start_col)
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let start_line = self.line;
        let start_col = self.column;
        let mut value = String::new();

        while Self::is_alphanumeric(self.peek()) {
            value.push(self.advance());
        }

        let kind = lookup_reserved(&value).unwrap_or(TokenKind::Identifier);
        Token::new(kind, value, start_line, start_col)
    }

    fn scan_token(&mut self) -> Token {
        self.skip_whitespace();

        if self.at_eof() {
            return Token::new(TokenKind::Eof, "", self.line, self.column);
        }

        if Self::is_alpha(self.peek()) {
            return self.scan_identifier();
        }
        if Self::is_digit(self.peek()) {
            return self.scan_number();
        }
        if self.peek() == '"' {
            return self.scan_string();
        }

        let line = self.line;
        let column = self.column;
        let c = self.advance();

        use TokenKind as T;
        let simple = |kind: TokenKind, lexeme: &str| Token::new(kind, lexeme, line, column);

        match c {
            '(' => simple(T::LParen, "("),
            ')' => simple(T::RParen, ")"),
            '{' => simple(T::LBrace, "{"),
            '}' => simple(T::RBrace, "}"),
            '[' => simple(T::LBracket, "["),
            ']' => simple(T::RBracket, "]"),
            ';' => simple(T::Semicolon, ";"),
            ',' => simple(T::Comma, ","),
            ':' => simple(T::Colon, ":"),
            '.' => simple(T::Dot, "."),
            '+' => simple(T::Plus, "+"),
            '*' => simple(T::Star, "*"),
            '/' => simple(T::Slash, "/"),
            '%' => simple(T::Percent, "%"),
            '-' => {
                if self.match_char('>') {
                    simple(T::Arrow, "->")
                } else {
                    simple(T::Minus, "-")
                }
            }
            '&' => {
                if self.match_char('&') {
                    simple(T::And, "&&")
                } else {
                    simple(T::Ampersand, "&")
                }
            }
            '|' => {
                if self.match_char('|') {
                    simple(T::Or, "||")
                } else {
                    Token::new(T::Unknown, "Unexpected character '|'", line, column)
                }
            }
            '!' => {
                if self.match_char('=') {
                    simple(T::Ne, "!=")
                } else {
                    simple(T::Not, "!")
                }
            }
            '=' => {
                if self.match_char('=') {
                    simple(T::Eq, "==")
                } else {
                    simple(T::Assign, "=")
                }
            }
            '<' => {
                if self.match_char('=') {
                    simple(T::Le, "<=")
                } else if self.match_char('-') {
                    simple(T::LeftArrow, "<-")
                } else {
                    simple(T::Lt, "<")
                }
            }
            '>' => {
                if self.match_char('=') {
                    simple(T::Ge, ">=")
                } else {
                    simple(T::Gt, ">")
                }
            }
            _ => Token::new(T::Unknown, format!("Unexpected character '{c}'"), line, column),
        }
    }

    pub fn tokenize(&mut self) -> Result<ThinVec<Token>> {
        let mut tokens: ThinVec<Token> = ThinVec::new();

        loop {
            let token = self.scan_token();
            if token.kind == TokenKind::Unknown {
                return Err(builders::lexical(token.lexeme.clone())
                    .at(token.line, token.column)
                    .into());
            }
            let at_end = token.kind == TokenKind::Eof;
            tokens.push(token);
            if at_end {
                break;
            }
        }

        Ok(tokens)
    }
}

pub fn tokenize(source: &str) -> Result<ThinVec<Token>> {
    Lexer::new(source).tokenize()
}
