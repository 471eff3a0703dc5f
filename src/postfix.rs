use crate::symbols::OPERATORS;
use crate::tokens::Token;

fn precedence(symbol: &str) -> u8 {
    OPERATORS.get(symbol).map_or(0, |op| op.precedence)
}

// Equal precedence pops, which makes every operator left-associative,
// exponentiation included.
fn outranks(top: &Token, incoming: &str) -> bool {
    match top {
        Token::Operator(symbol) => precedence(symbol) >= precedence(incoming),
        _ => false,
    }
}

/// Shunting-yard conversion to postfix order. Structural problems in the
/// input (unbalanced parentheses, misplaced operators) are not detected
/// here; they surface during evaluation.
pub fn to_postfix(tokens: &[Token]) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) => output.push(token.clone()),
            // A function name waits on the stack for its argument group.
            Token::Ident(_) => stack.push(token.clone()),
            Token::Operator(symbol) => {
                while stack.last().map_or(false, |top| outranks(top, symbol)) {
                    if let Some(top) = stack.pop() {
                        output.push(top);
                    }
                }
                stack.push(token.clone());
            }
            Token::LeftParen => stack.push(Token::LeftParen),
            Token::RightParen => {
                while let Some(top) = stack.pop() {
                    if top == Token::LeftParen {
                        break;
                    }
                    output.push(top);
                }
                // sqrt(16) comes out as `16 sqrt`.
                if matches!(stack.last(), Some(Token::Ident(_))) {
                    if let Some(func) = stack.pop() {
                        output.push(func);
                    }
                }
            }
        }
    }

    while let Some(top) = stack.pop() {
        output.push(top);
    }

    output
}
