// src/commands/echo/mod.rs
use std::io::Write;

use crate::commands::{Builtin, CommandResult};
use crate::interpreter::context::Context;
use crate::interpreter::types::ExecutionMode;

pub struct EchoCommand;

impl Builtin for EchoCommand {
    fn name(&self) -> &str {
        "echo"
    }

    fn execute(&self, _name: &str, args: &[String], ctx: Context) -> Context {
        let mut no_newline = false;
        let mut interpret_escapes = false;
        let mut start_index = 0;

        // Parse flags
        while start_index < args.len() {
            match args[start_index].as_str() {
                "-n" => no_newline = true,
                "-e" => interpret_escapes = true,
                "-E" => interpret_escapes = false,
                "-ne" | "-en" => {
                    no_newline = true;
                    interpret_escapes = true;
                }
                _ => break,
            }
            start_index += 1;
        }

        let mut output = args[start_index..].join(" ");

        if interpret_escapes {
            let result = process_escapes(&output);
            output = result.output;
            // \c suppresses the newline too
            no_newline |= result.stop;
        }

        if ctx.mode() == ExecutionMode::Real {
            let mut stdout = std::io::stdout().lock();
            let written = if no_newline {
                write!(stdout, "{}", output)
            } else {
                writeln!(stdout, "{}", output)
            };
            if let Err(e) = written.and_then(|_| stdout.flush()) {
                tracing::warn!("echo: failed to write to stdout: {}", e);
            }
        }

        // The log is line-oriented, so every echo ends its line
        output.push('\n');
        CommandResult::success(output).apply(ctx)
    }
}

/// Result of processing escape sequences
struct EscapeResult {
    output: String,
    stop: bool,
}

/// Process echo -e escape sequences
fn process_escapes(input: &str) -> EscapeResult {
    let mut result = String::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' {
            result.push(chars[i]);
            i += 1;
            continue;
        }
        let Some(&next) = chars.get(i + 1) else {
            result.push('\\');
            break;
        };

        match next {
            '\\' => result.push('\\'),
            'n' => result.push('\n'),
            't' => result.push('\t'),
            'r' => result.push('\r'),
            'a' => result.push('\x07'),
            'b' => result.push('\x08'),
            'f' => result.push('\x0c'),
            'v' => result.push('\x0b'),
            'e' | 'E' => result.push('\x1b'),
            'c' => return EscapeResult { output: result, stop: true },
            '0' => {
                // \0NNN - octal (up to 3 digits after the 0)
                let digits: String = chars[i + 2..]
                    .iter()
                    .take(3)
                    .take_while(|c| ('0'..='7').contains(c))
                    .collect();
                let code = u32::from_str_radix(&digits, 8).unwrap_or(0) % 256;
                if let Some(c) = char::from_u32(code) {
                    result.push(c);
                }
                i += 2 + digits.len();
                continue;
            }
            'x' => {
                // \xHH - hex (1-2 hex digits)
                let digits: String = chars[i + 2..]
                    .iter()
                    .take(2)
                    .take_while(|c| c.is_ascii_hexdigit())
                    .collect();
                if digits.is_empty() {
                    result.push_str("\\x");
                } else if let Some(c) = u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    result.push(c);
                }
                i += 2 + digits.len();
                continue;
            }
            _ => {
                // Unknown escape - keep the backslash and character
                result.push('\\');
                result.push(next);
            }
        }
        i += 2;
    }

    EscapeResult { output: result, stop: false }
}
