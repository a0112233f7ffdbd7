use crate::core::expression::errors::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    EqualEqual,
    NotEqual,
    AndAnd,
    OrOr,
    Bang,
    End,
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number {n}"),
            Self::Ident(name) => format!("'{name}'"),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::Caret => "'^'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::Comma => "','".to_string(),
            Self::Greater => "'>'".to_string(),
            Self::GreaterEqual => "'>='".to_string(),
            Self::Less => "'<'".to_string(),
            Self::LessEqual => "'<='".to_string(),
            Self::EqualEqual => "'=='".to_string(),
            Self::NotEqual => "'!='".to_string(),
            Self::AndAnd => "'&&'".to_string(),
            Self::OrOr => "'||'".to_string(),
            Self::Bang => "'!'".to_string(),
            Self::End => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub position: usize,
}

struct Lexer<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.source[self.position..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    fn number(&mut self, start: usize) -> Result<Token, ParseError> {
        self.eat_digits();

        if self.peek() == Some('.') {
            self.bump();
            self.eat_digits();
        }

        // Only an exponent when digits follow, so `2e` stays a number then the constant `e`.
        if matches!(self.peek(), Some('e' | 'E')) {
            let rest = &self.source[self.position + 1..];
            let mut chars = rest.chars();
            let has_exponent = match chars.next() {
                Some('+' | '-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };

            if has_exponent {
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
                self.eat_digits();
            }
        }

        let text = &self.source[start..self.position];
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| ParseError::InvalidNumber {
                position: start,
                text: text.to_string(),
            })
    }

    fn ident(&mut self, start: usize) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.bump();
        }

        Token::Ident(self.source[start..self.position].to_string())
    }

    /// Consumes `second` if it follows, returning `double`, otherwise `single`.
    fn either(&mut self, second: char, double: Token, single: Token) -> Token {
        if self.peek() == Some(second) {
            self.bump();
            double
        } else {
            single
        }
    }

    fn next_token(&mut self) -> Result<Spanned, ParseError> {
        self.skip_whitespace();
        let position = self.position;

        let Some(c) = self.peek() else {
            return Ok(Spanned {
                token: Token::End,
                position,
            });
        };

        let token = if c.is_ascii_digit()
            || (c == '.' && self.peek_second().is_some_and(|d| d.is_ascii_digit()))
        {
            self.number(position)?
        } else if c.is_alphabetic() || c == '_' {
            self.ident(position)
        } else {
            self.bump();
            match c {
                '+' => Token::Plus,
                '-' => Token::Minus,
                '*' => Token::Star,
                '/' => Token::Slash,
                '^' => Token::Caret,
                '(' => Token::LParen,
                ')' => Token::RParen,
                ',' => Token::Comma,
                '>' => self.either('=', Token::GreaterEqual, Token::Greater),
                '<' => self.either('=', Token::LessEqual, Token::Less),
                '!' => self.either('=', Token::NotEqual, Token::Bang),
                '=' if self.peek() == Some('=') => {
                    self.bump();
                    Token::EqualEqual
                }
                '&' if self.peek() == Some('&') => {
                    self.bump();
                    Token::AndAnd
                }
                '|' if self.peek() == Some('|') => {
                    self.bump();
                    Token::OrOr
                }
                other => {
                    return Err(ParseError::UnexpectedCharacter {
                        position,
                        character: other,
                    });
                }
            }
        };

        Ok(Spanned { token, position })
    }
}

/// Splits a formula into tokens. The last token is always [`Token::End`].
pub(crate) fn tokenize(source: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let spanned = lexer.next_token()?;
        let done = spanned.token == Token::End;
        tokens.push(spanned);

        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|spanned| spanned.token)
            .collect()
    }

    #[test]
    fn test_tokenizes_mandelbrot_formula() {
        assert_eq!(
            kinds("z^2 + c"),
            vec![
                Token::Ident("z".to_string()),
                Token::Caret,
                Token::Number(2.0),
                Token::Plus,
                Token::Ident("c".to_string()),
                Token::End,
            ]
        );
    }

    #[test]
    fn test_numbers_with_fraction_and_exponent() {
        assert_eq!(
            kinds("0.5 .25 1e3 2.5E-2"),
            vec![
                Token::Number(0.5),
                Token::Number(0.25),
                Token::Number(1000.0),
                Token::Number(0.025),
                Token::End,
            ]
        );
    }

    #[test]
    fn test_trailing_e_is_not_an_exponent() {
        assert_eq!(
            kinds("2e"),
            vec![Token::Number(2.0), Token::Ident("e".to_string()), Token::End]
        );
    }

    #[test]
    fn test_two_character_operators() {
        assert_eq!(
            kinds(">= <= == != && || > < !"),
            vec![
                Token::GreaterEqual,
                Token::LessEqual,
                Token::EqualEqual,
                Token::NotEqual,
                Token::AndAnd,
                Token::OrOr,
                Token::Greater,
                Token::Less,
                Token::Bang,
                Token::End,
            ]
        );
    }

    #[test]
    fn test_positions_are_byte_offsets() {
        let tokens = tokenize("ab +  c").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();

        assert_eq!(positions, vec![0, 3, 6, 7]);
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            tokenize("z # c"),
            Err(ParseError::UnexpectedCharacter {
                position: 2,
                character: '#'
            })
        );
    }

    #[test]
    fn test_single_equals_is_rejected() {
        assert!(matches!(
            tokenize("x = 1"),
            Err(ParseError::UnexpectedCharacter { character: '=', .. })
        ));
    }
}
