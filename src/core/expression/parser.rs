use crate::core::expression::ast::{BinaryOp, Node, UnaryOp};
use crate::core::expression::errors::ParseError;
use crate::core::expression::functions::Function;
use crate::core::expression::lexer::{Spanned, Token, tokenize};

/// Deepest nesting of brackets, calls, signs and exponents.
pub(crate) const MAX_NESTING: usize = 128;

/// Most operator and call nodes in one formula. Bounds the depth of operator
/// chains, which are evaluated recursively.
pub(crate) const MAX_OPERATORS: usize = 1024;

/// Recursive-descent parser, lowest precedence first:
/// `or`, `and`, `not`, comparison, `+ -`, `* /`, unary sign, `^`.
struct Parser {
    tokens: Vec<Spanned>,
    index: usize,
    nesting: usize,
    operators: usize,
}

impl Parser {
    fn current(&self) -> &Spanned {
        // `tokenize` always ends with `Token::End`, which is never consumed.
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    fn bump(&mut self) {
        if self.current().token != Token::End {
            self.index += 1;
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let current = self.current();
        ParseError::UnexpectedToken {
            position: current.position,
            expected,
            found: current.token.describe(),
        }
    }

    fn is_keyword(&self, keyword: &str) -> bool {
        matches!(&self.current().token, Token::Ident(name) if name == keyword)
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        self.nesting += 1;
        if self.nesting > MAX_NESTING {
            return Err(ParseError::TooDeep {
                position: self.current().position,
                limit: MAX_NESTING,
            });
        }

        Ok(())
    }

    fn ascend(&mut self) {
        self.nesting -= 1;
    }

    fn count_operator(&mut self) -> Result<(), ParseError> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(ParseError::TooComplex {
                position: self.current().position,
                limit: MAX_OPERATORS,
            });
        }

        Ok(())
    }

    fn parse_or(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_and()?;

        while self.current().token == Token::OrOr || self.is_keyword("or") {
            self.count_operator()?;
            self.bump();
            let right = self.parse_and()?;
            left = binary(BinaryOp::Or, left, right);
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_not()?;

        while self.current().token == Token::AndAnd || self.is_keyword("and") {
            self.count_operator()?;
            self.bump();
            let right = self.parse_not()?;
            left = binary(BinaryOp::And, left, right);
        }

        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Node, ParseError> {
        if self.current().token == Token::Bang || self.is_keyword("not") {
            self.count_operator()?;
            self.descend()?;
            self.bump();
            let operand = self.parse_not()?;
            self.ascend();
            return Ok(Node::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }

        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Node, ParseError> {
        let left = self.parse_additive()?;

        let op = match self.current().token {
            Token::Greater => BinaryOp::Greater,
            Token::GreaterEqual => BinaryOp::GreaterEqual,
            Token::Less => BinaryOp::Less,
            Token::LessEqual => BinaryOp::LessEqual,
            Token::EqualEqual => BinaryOp::Equal,
            Token::NotEqual => BinaryOp::NotEqual,
            _ => return Ok(left),
        };

        self.count_operator()?;
        self.bump();
        let right = self.parse_additive()?;

        Ok(binary(op, left, right))
    }

    fn parse_additive(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.current().token {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.count_operator()?;
            self.bump();
            let right = self.parse_term()?;
            left = binary(op, left, right);
        }
    }

    fn parse_term(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current().token {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                _ => return Ok(left),
            };
            self.count_operator()?;
            self.bump();
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
    }

    /// Every recursive path back into the grammar passes through here, so
    /// this is where nesting is counted.
    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        self.descend()?;
        let node = self.parse_signed()?;
        self.ascend();

        Ok(node)
    }

    fn parse_signed(&mut self) -> Result<Node, ParseError> {
        let op = match self.current().token {
            Token::Minus => UnaryOp::Negate,
            Token::Plus => UnaryOp::Plus,
            _ => return self.parse_power(),
        };

        self.count_operator()?;
        self.bump();
        let operand = self.parse_unary()?;

        Ok(Node::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// Right-associative; the exponent may carry its own sign (`2^-1`).
    fn parse_power(&mut self) -> Result<Node, ParseError> {
        let base = self.parse_primary()?;

        if self.current().token != Token::Caret {
            return Ok(base);
        }

        self.count_operator()?;
        self.bump();
        let exponent = self.parse_unary()?;

        Ok(binary(BinaryOp::Pow, base, exponent))
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let Spanned { token, position } = self.current().clone();

        match token {
            Token::Number(n) => {
                self.bump();
                Ok(Node::Number(n))
            }
            Token::Ident(name) => {
                self.bump();
                if self.current().token == Token::LParen {
                    self.parse_call(name, position)
                } else {
                    Ok(Node::Identifier(name))
                }
            }
            Token::LParen => {
                self.bump();
                let inner = self.parse_or()?;
                self.expect(Token::RParen, "')'")?;
                Ok(inner)
            }
            _ => Err(self.unexpected("a number, variable or '('")),
        }
    }

    fn parse_call(&mut self, name: String, position: usize) -> Result<Node, ParseError> {
        let function = Function::lookup(&name)
            .ok_or_else(|| ParseError::UnknownFunction { position, name: name.clone() })?;
        self.count_operator()?;

        self.expect(Token::LParen, "'('")?;

        let mut args = Vec::new();
        if self.current().token != Token::RParen {
            loop {
                args.push(self.parse_or()?);
                match self.current().token {
                    Token::Comma => self.bump(),
                    Token::RParen => break,
                    _ => return Err(self.unexpected("',' or ')'")),
                }
            }
        }
        self.expect(Token::RParen, "')'")?;

        if args.len() != function.arity() {
            return Err(ParseError::WrongArity {
                position,
                name,
                expected: function.arity(),
                found: args.len(),
            });
        }

        Ok(Node::Call { function, args })
    }

    fn expect(&mut self, token: Token, expected: &'static str) -> Result<(), ParseError> {
        if self.current().token != token {
            return Err(self.unexpected(expected));
        }

        self.bump();
        Ok(())
    }
}

fn binary(op: BinaryOp, lhs: Node, rhs: Node) -> Node {
    Node::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

pub(crate) fn parse(source: &str) -> Result<Node, ParseError> {
    let mut parser = Parser {
        tokens: tokenize(source)?,
        index: 0,
        nesting: 0,
        operators: 0,
    };

    let root = parser.parse_or()?;

    if parser.current().token != Token::End {
        return Err(parser.unexpected("an operator or end of input"));
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Node {
        Node::Identifier(name.to_string())
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parse("a + b * c").unwrap(),
            binary(
                BinaryOp::Add,
                ident("a"),
                binary(BinaryOp::Mul, ident("b"), ident("c"))
            )
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(
            parse("a ^ b ^ c").unwrap(),
            binary(
                BinaryOp::Pow,
                ident("a"),
                binary(BinaryOp::Pow, ident("b"), ident("c"))
            )
        );
    }

    #[test]
    fn test_unary_minus_applies_after_power() {
        assert_eq!(
            parse("-z^2").unwrap(),
            Node::Unary {
                op: UnaryOp::Negate,
                operand: Box::new(binary(BinaryOp::Pow, ident("z"), Node::Number(2.0))),
            }
        );
    }

    #[test]
    fn test_negative_exponent() {
        assert_eq!(
            parse("2^-1").unwrap(),
            binary(
                BinaryOp::Pow,
                Node::Number(2.0),
                Node::Unary {
                    op: UnaryOp::Negate,
                    operand: Box::new(Node::Number(1.0)),
                }
            )
        );
    }

    #[test]
    fn test_keyword_and_symbol_logic_parse_alike() {
        assert_eq!(parse("a > 1 and b < 2"), parse("a > 1 && b < 2"));
        assert_eq!(parse("not a or b"), parse("!a || b"));
    }

    #[test]
    fn test_function_call() {
        assert_eq!(
            parse("abs(z) > 2").unwrap(),
            binary(
                BinaryOp::Greater,
                Node::Call {
                    function: Function::Abs,
                    args: vec![ident("z")],
                },
                Node::Number(2.0)
            )
        );
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            parse("1 + gamma(z)"),
            Err(ParseError::UnknownFunction {
                position: 4,
                name: "gamma".to_string()
            })
        );
    }

    #[test]
    fn test_wrong_arity() {
        assert_eq!(
            parse("pow(z)"),
            Err(ParseError::WrongArity {
                position: 0,
                name: "pow".to_string(),
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_missing_closing_paren() {
        assert!(matches!(
            parse("(z + c"),
            Err(ParseError::UnexpectedToken {
                position: 6,
                expected: "')'",
                ..
            })
        ));
    }

    #[test]
    fn test_trailing_tokens_are_rejected() {
        assert!(matches!(
            parse("z c"),
            Err(ParseError::UnexpectedToken { position: 2, .. })
        ));
    }

    #[test]
    fn test_reasonable_nesting_parses() {
        let source = format!("{}z{}", "(".repeat(40), ")".repeat(40));

        assert_eq!(parse(&source), Ok(ident("z")));
    }

    #[test]
    fn test_deep_brackets_are_rejected() {
        let source = format!("{}z{}", "(".repeat(10_000), ")".repeat(10_000));

        assert!(matches!(
            parse(&source),
            Err(ParseError::TooDeep {
                limit: MAX_NESTING,
                ..
            })
        ));
    }

    #[test]
    fn test_deep_signs_and_negations_are_rejected() {
        let signs = format!("{}z", "-".repeat(10_000));
        let negations = format!("{}true", "!".repeat(10_000));
        let exponents = format!("z{}", "^z".repeat(10_000));

        assert!(matches!(parse(&signs), Err(ParseError::TooDeep { .. })));
        assert!(matches!(parse(&negations), Err(ParseError::TooDeep { .. })));
        assert!(matches!(parse(&exponents), Err(ParseError::TooDeep { .. })));
    }

    #[test]
    fn test_deep_function_calls_are_rejected() {
        let source = format!("{}z{}", "abs(".repeat(10_000), ")".repeat(10_000));

        assert!(matches!(parse(&source), Err(ParseError::TooDeep { .. })));
    }

    #[test]
    fn test_long_operator_chain_is_rejected() {
        let source = format!("z{}", " + z".repeat(100_000));

        assert!(matches!(
            parse(&source),
            Err(ParseError::TooComplex {
                limit: MAX_OPERATORS,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_formula_is_rejected() {
        assert!(matches!(
            parse("   "),
            Err(ParseError::UnexpectedToken { position: 3, .. })
        ));
    }
}
