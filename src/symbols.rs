use std::collections::HashMap;
use std::f64::consts;

use lazy_static::lazy_static;

pub mod errors {
    use error_chain::error_chain;
    error_chain! {
        errors {
            DivisionByZero {
                description("Division by zero"),
                display("Division by zero"),
            }
        }
    }
}

use errors::*;

/// A binary operator: how tightly it binds and the function applied as `a OP b`.
pub struct Operator {
    pub precedence: u8,
    pub apply: fn(f64, f64) -> Result<f64>,
}

fn add(a: f64, b: f64) -> Result<f64> {
    Ok(a + b)
}

fn sub(a: f64, b: f64) -> Result<f64> {
    Ok(a - b)
}

fn mul(a: f64, b: f64) -> Result<f64> {
    Ok(a * b)
}

fn div(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        Err(ErrorKind::DivisionByZero.into())
    } else {
        Ok(a / b)
    }
}

fn floor_div(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        Err(ErrorKind::DivisionByZero.into())
    } else {
        Ok((a / b).floor())
    }
}

// Follows the floor-division sign convention, so the result takes the
// divisor's sign.
fn modulo(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        Err(ErrorKind::DivisionByZero.into())
    } else {
        Ok(a - (a / b).floor() * b)
    }
}

fn pow(a: f64, b: f64) -> Result<f64> {
    Ok(a.powf(b))
}

lazy_static! {
    pub static ref OPERATORS: HashMap<&'static str, Operator> = {
        let mut m = HashMap::new();
        m.insert("+", Operator { precedence: 1, apply: add });
        m.insert("-", Operator { precedence: 1, apply: sub });
        m.insert("*", Operator { precedence: 2, apply: mul });
        m.insert("/", Operator { precedence: 2, apply: div });
        m.insert("//", Operator { precedence: 2, apply: floor_div });
        m.insert("%", Operator { precedence: 2, apply: modulo });
        m.insert("^", Operator { precedence: 3, apply: pow });
        m.insert("**", Operator { precedence: 3, apply: pow });
        m
    };

    pub static ref FUNCTIONS: HashMap<&'static str, fn(f64) -> f64> = {
        let mut m: HashMap<&'static str, fn(f64) -> f64> = HashMap::new();
        m.insert("sin", f64::sin);
        m.insert("cos", f64::cos);
        m.insert("tan", f64::tan);
        m.insert("sqrt", f64::sqrt);
        m.insert("log", f64::log10);
        m.insert("ln", f64::ln);
        m.insert("abs", f64::abs);
        m.insert("round", f64::round);
        m
    };

    // Substitution text is the shortest round-trip form, so the value
    // survives the trip through the tokenizer unchanged.
    pub static ref CONSTANTS: Vec<(&'static str, String)> = vec![
        ("pi", consts::PI.to_string()),
        ("e", consts::E.to_string()),
    ];
}
