use error_chain::bail;
use log::debug;

use crate::postfix::to_postfix;
use crate::symbols::{FUNCTIONS, OPERATORS};
use crate::tokens::{self, Token};

pub mod errors {
    use error_chain::error_chain;
    error_chain! {
        errors {
            EmptyExpression {
                description("Empty expression"),
                display("Empty expression"),
            }

            NotEnoughOperands(op: String) {
                description("Not enough operands"),
                display("Invalid expression: not enough operands for '{}'", op),
            }

            NotEnoughArguments(func: String) {
                description("Not enough arguments"),
                display("Invalid expression: not enough arguments for '{}'", func),
            }

            UnknownFunction(name: String) {
                description("Unknown function"),
                display("Unknown function: {}", name),
            }

            UnknownOperator(symbol: String) {
                description("Unknown operator"),
                display("Unknown operator: {}", symbol),
            }

            UnexpectedToken(symbol: String) {
                description("Unexpected token"),
                display("Invalid expression: unexpected '{}'", symbol),
            }

            UnbalancedExpression {
                description("Invalid expression"),
                display("Invalid expression"),
            }
        }

        foreign_links {
            Tokenizer(crate::tokens::errors::Error);
            Arithmetic(crate::symbols::errors::Error);
        }
    }
}

use errors::*;

pub fn eval_postfix(postfix: &[Token]) -> Result<f64> {
    let mut stack: Vec<f64> = Vec::new();

    for token in postfix {
        match token {
            Token::Number(x) => stack.push(*x),
            Token::Operator(symbol) => {
                let op = OPERATORS
                    .get(symbol.as_str())
                    .chain_err(|| ErrorKind::UnknownOperator(symbol.clone()))?;
                // The more recently pushed value is the right operand.
                let (b, a) = match (stack.pop(), stack.pop()) {
                    (Some(b), Some(a)) => (b, a),
                    _ => bail!(ErrorKind::NotEnoughOperands(symbol.clone())),
                };
                stack.push((op.apply)(a, b)?);
            }
            Token::Ident(name) => {
                let func = FUNCTIONS
                    .get(name.as_str())
                    .chain_err(|| ErrorKind::UnknownFunction(name.clone()))?;
                let arg = match stack.pop() {
                    Some(arg) => arg,
                    None => bail!(ErrorKind::NotEnoughArguments(name.clone())),
                };
                stack.push(func(arg));
            }
            // Leftovers of an unbalanced expression.
            Token::LeftParen => bail!(ErrorKind::UnexpectedToken("(".to_string())),
            Token::RightParen => bail!(ErrorKind::UnexpectedToken(")".to_string())),
        }
    }

    match (stack.pop(), stack.pop()) {
        (Some(result), None) => Ok(result),
        _ => Err(ErrorKind::UnbalancedExpression.into()),
    }
}

/// Sole entry point for the surrounding shell. Every fault from any stage
/// comes back as a typed error; nothing panics past this boundary.
pub fn calculate(input: &str) -> Result<f64> {
    if input.trim().is_empty() {
        bail!(ErrorKind::EmptyExpression);
    }
    let tokens = tokens::tokenize(input)?;
    debug!("tokens: {:?}", tokens);
    let postfix = to_postfix(&tokens);
    debug!("postfix: {:?}", postfix);
    eval_postfix(&postfix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_value;

    fn init_log() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_precedence() {
        init_log();
        assert_eq!(calculate("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(calculate("(2 + 3) * 4").unwrap(), 20.0);
    }

    #[test]
    fn test_left_associative_exponentiation() {
        init_log();
        // (2^3)^2, not 2^(3^2)
        assert_eq!(calculate("2^3^2").unwrap(), 64.0);
        assert_eq!(calculate("2**3").unwrap(), 8.0);
    }

    #[test]
    fn test_functions_bind_to_preceding_group() {
        init_log();
        assert_eq!(calculate("sqrt(16)").unwrap(), 4.0);
        assert_eq!(calculate("sin(0)").unwrap(), 0.0);
        assert_eq!(calculate("abs(0 - 3)").unwrap(), 3.0);
        assert_eq!(calculate("round(2.4)").unwrap(), 2.0);
        assert_eq!(calculate("sqrt(sqrt(16))").unwrap(), 2.0);
    }

    #[test]
    fn test_constants() {
        init_log();
        assert_eq!(calculate("pi/2").unwrap(), std::f64::consts::PI / 2.0);
        assert_eq!(format_value(calculate("sin(pi/2)").unwrap()), "1");
        assert_eq!(format_value(calculate("ln(e)").unwrap()), "1");
        assert_eq!(format_value(calculate("log(1000)").unwrap()), "3");
    }

    #[test]
    fn test_division_always_floats() {
        init_log();
        assert_eq!(calculate("4/2").unwrap(), 2.0);
        assert_eq!(calculate("1/2").unwrap(), 0.5);
        // Integer-valued results present without a fractional part.
        assert_eq!(format_value(calculate("2+2").unwrap()), "4");
        assert_eq!(format_value(calculate("4/2").unwrap()), "2");
    }

    #[test]
    fn test_floor_division_and_modulo() {
        init_log();
        assert_eq!(calculate("7//2").unwrap(), 3.0);
        assert_eq!(calculate("10 % 3").unwrap(), 1.0);
        assert_eq!(calculate("(0-7)//2").unwrap(), -4.0);
        assert_eq!(calculate("(0-7)%3").unwrap(), 2.0);
    }

    #[test]
    fn test_division_by_zero_is_distinct() {
        init_log();
        for case in &["5/0", "5//0", "5%0"] {
            let err = calculate(case).unwrap_err();
            assert!(
                err.to_string().contains("Division by zero"),
                "{}: {}",
                case,
                err
            );
        }
    }

    #[test]
    fn test_empty_expression_is_distinct() {
        init_log();
        assert_eq!(calculate("").unwrap_err().to_string(), "Empty expression");
        assert_eq!(calculate("   ").unwrap_err().to_string(), "Empty expression");
    }

    #[test]
    fn test_malformed_expressions() {
        init_log();
        let err = calculate("+").unwrap_err();
        assert!(err.to_string().contains("not enough operands"));

        let err = calculate("2+").unwrap_err();
        assert!(err.to_string().contains("not enough operands"));

        let err = calculate("sqrt()").unwrap_err();
        assert!(err.to_string().contains("not enough arguments"));

        let err = calculate("2 3").unwrap_err();
        assert_eq!(err.to_string(), "Invalid expression");

        let err = calculate("(2+3").unwrap_err();
        assert!(err.to_string().contains("unexpected"));
    }

    #[test]
    fn test_unknown_function() {
        init_log();
        let err = calculate("foo(2)").unwrap_err();
        assert!(err.to_string().contains("Unknown function"));
    }

    #[test]
    fn test_unknown_character() {
        init_log();
        let err = calculate("2 & 3").unwrap_err();
        assert!(err.to_string().contains("Unknown character"));
    }

    #[test]
    fn test_idempotence() {
        init_log();
        let first = calculate("2 + 3 * 4").unwrap();
        let second = calculate("2 + 3 * 4").unwrap();
        assert_eq!(first, second);

        let first = calculate("sin(pi/2)").unwrap();
        let second = calculate("sin(pi/2)").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_power_edge_cases() {
        init_log();
        assert_eq!(format_value(calculate("4^0.5").unwrap()), "2");
        // Whatever powf yields is propagated, NaN included.
        assert!(calculate("(0-8)^0.5").unwrap().is_nan());
    }
}
