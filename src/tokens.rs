use lazy_static::lazy_static;
use regex::Regex;

use crate::symbols::CONSTANTS;

pub mod errors {
    use error_chain::error_chain;
    error_chain! {
        errors {
            UnknownCharacter(c: char) {
                description("Unknown character"),
                display("Unknown character: {}", c),
            }

            NumberParseError(s: String) {
                description("Error parsing number"),
                display("Error parsing number: {}", s),
            }
        }
    }
}

use errors::*;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Number(f64),
    Operator(String),
    Ident(String),
    LeftParen,
    RightParen,
}

lazy_static! {
    // Alternative order is the lexical priority: number, two-character
    // operator, one-character operator, parenthesis, identifier.
    static ref TOKEN_PATTERN: Regex = Regex::new(
        r"^(?:(?P<num>\d+\.?\d*)|(?P<op>\*\*|//|[+\-*/^%])|(?P<paren>[()])|(?P<ident>[A-Za-z_]\w*))"
    )
    .unwrap();
}

pub struct TokenStream {
    src: String,
    pos: usize,
}

impl TokenStream {
    pub fn from_str(source: &str) -> TokenStream {
        // Constants are substituted textually, so they reach the scanner as
        // ordinary number literals.
        let mut src = source.to_string();
        for (name, value) in CONSTANTS.iter() {
            src = src.replace(name, value);
        }
        src.retain(|c| !c.is_whitespace());
        TokenStream { src, pos: 0 }
    }
}

impl Iterator for TokenStream {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.src.len() {
            return None;
        }
        let rest = &self.src[self.pos..];

        let caps = match TOKEN_PATTERN.captures(rest) {
            Some(caps) => caps,
            None => {
                let c = rest.chars().next()?;
                self.pos += c.len_utf8();
                return Some(Err(ErrorKind::UnknownCharacter(c).into()));
            }
        };
        self.pos += caps.get(0).map_or(0, |m| m.end());

        if let Some(num) = caps.name("num") {
            let text = num.as_str();
            return Some(
                text.parse::<f64>()
                    .chain_err(|| ErrorKind::NumberParseError(text.to_string()))
                    .map(Token::Number),
            );
        }
        if let Some(op) = caps.name("op") {
            return Some(Ok(Token::Operator(op.as_str().to_string())));
        }
        if let Some(paren) = caps.name("paren") {
            return Some(Ok(match paren.as_str() {
                "(" => Token::LeftParen,
                _ => Token::RightParen,
            }));
        }
        if let Some(ident) = caps.name("ident") {
            return Some(Ok(Token::Ident(ident.as_str().to_string())));
        }
        unreachable!("every pattern alternative is captured by a named group")
    }
}

pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    TokenStream::from_str(source).collect()
}
