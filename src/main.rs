use std::env;
use std::io::prelude::*;

use error_chain::ChainedError;
use rustyline::error::ReadlineError;
use rustyline::Editor;

use termcalc::{calculate, format_value};

const HELP: &str = "\
Terminal Calculator
===================

Basic operations:
  +, -, *, /        basic arithmetic
  **, ^             exponentiation
  //, %             floor division, modulo
  ( )               parentheses for grouping

Functions:
  sin(x), cos(x), tan(x)    trigonometric functions
  sqrt(x)                   square root
  log(x), ln(x)             logarithms (base 10 and natural)
  abs(x)                    absolute value
  round(x)                  round to nearest integer

Constants:
  pi                3.14159...
  e                 2.71828...

Commands:
  help              show this help
  quit, exit, q     exit the calculator
  clear             clear the screen

Examples:
  2 + 3 * 4         = 14
  (2 + 3) * 4       = 20
  sqrt(16)          = 4
  sin(pi/2)         = 1
  2^3               = 8
  10 % 3            = 1
";

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        interactive();
    } else if args.len() == 1 && (args[0] == "-h" || args[0] == "--help") {
        print!("{}", HELP);
    } else {
        // All arguments joined form one expression.
        let expression = args.join(" ");
        match calculate(&expression) {
            Ok(x) => println!("{}", format_value(x)),
            Err(e) => println!("{}", e.display_chain()),
        }
    }
}

fn interactive() {
    let mut rl = Editor::<()>::new();
    println!("Terminal Calculator");
    println!("Type 'help' for commands, 'quit' to exit");
    println!("{}", "-".repeat(40));

    loop {
        match rl.readline("calc> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                rl.add_history_entry(input);

                match input.to_lowercase().as_str() {
                    "quit" | "exit" | "q" => {
                        println!("Goodbye!");
                        break;
                    }
                    "help" => {
                        print!("{}", HELP);
                        continue;
                    }
                    "clear" => {
                        print!("\x1B[2J\x1B[1;1H");
                        let _ = std::io::stdout().flush();
                        continue;
                    }
                    _ => {}
                }

                match calculate(input) {
                    Ok(x) => println!("  = {}", format_value(x)),
                    Err(e) => println!("{}", e.display_chain()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => {
                println!("Error reading input: {}", e);
                break;
            }
        }
    }
}
