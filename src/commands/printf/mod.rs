// src/commands/printf/mod.rs
use std::io::Write;

use crate::commands::{Builtin, CommandResult};
use crate::interpreter::context::Context;
use crate::interpreter::types::ExecutionMode;

pub struct PrintfCommand;

impl Builtin for PrintfCommand {
    fn name(&self) -> &str {
        "printf"
    }

    fn execute(&self, _name: &str, args: &[String], ctx: Context) -> Context {
        let Some((format, arguments)) = args.split_first() else {
            return CommandResult::with_exit_code(
                String::new(),
                "printf: usage: printf format [arguments]\n".into(),
                2,
            )
            .apply(ctx);
        };

        let mut output = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;
        let mut arg_idx = 0;
        let chars: Vec<char> = format.chars().collect();

        // Reuse the format while arguments remain
        loop {
            let start_arg_idx = arg_idx;
            let mut i = 0;

            while i < chars.len() {
                match chars[i] {
                    '\\' => {
                        let (esc, advance) = process_escape(&chars, i);
                        output.push_str(&esc);
                        i += advance;
                    }
                    '%' if chars.get(i + 1) == Some(&'%') => {
                        output.push('%');
                        i += 2;
                    }
                    '%' => {
                        let spec = parse_spec(&chars, i);
                        let arg = arguments.get(arg_idx).map(String::as_str).unwrap_or("");
                        match format_arg(&spec, arg) {
                            Ok(formatted) => output.push_str(&formatted),
                            Err(message) => {
                                stderr.push_str(&message);
                                exit_code = 1;
                            }
                        }
                        if spec.conversion.is_some_and(consumes_argument) {
                            arg_idx += 1;
                        }
                        i += spec.len;
                    }
                    c => {
                        output.push(c);
                        i += 1;
                    }
                }
            }

            if arg_idx <= start_arg_idx || arg_idx >= arguments.len() {
                break;
            }
        }

        if ctx.mode() == ExecutionMode::Real {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = write!(stdout, "{}", output).and_then(|_| stdout.flush()) {
                tracing::warn!("printf: failed to write to stdout: {}", e);
            }
        }

        CommandResult::with_exit_code(output, stderr, exit_code).apply(ctx)
    }
}

/// Largest field width or precision accepted.
const MAX_FIELD_SIZE: usize = 1 << 20;

/// A parsed `%[flags][width][.precision]conversion` specifier.
struct FormatSpec {
    left_align: bool,
    zero_pad: bool,
    width: usize,
    precision: Option<usize>,
    /// Digits of a width or precision above `MAX_FIELD_SIZE`
    out_of_range: Option<String>,
    /// None when the format ends mid-specifier
    conversion: Option<char>,
    /// Characters consumed from the format, including '%'
    len: usize,
}

fn parse_spec(chars: &[char], pos: usize) -> FormatSpec {
    let mut i = pos + 1;
    let mut left_align = false;
    let mut zero_pad = false;
    while let Some(&c) = chars.get(i) {
        match c {
            '-' => left_align = true,
            '0' => zero_pad = true,
            '+' | ' ' | '#' => {}
            _ => break,
        }
        i += 1;
    }

    let mut out_of_range = None;
    let mut field_size = |digits: String| match digits.parse::<usize>() {
        Ok(n) if n <= MAX_FIELD_SIZE => n,
        _ => {
            out_of_range.get_or_insert(digits);
            0
        }
    };

    let width = take_digits(chars, &mut i).map(&mut field_size).unwrap_or(0);
    let precision = if chars.get(i) == Some(&'.') {
        i += 1;
        Some(take_digits(chars, &mut i).map(&mut field_size).unwrap_or(0))
    } else {
        None
    };

    let conversion = chars.get(i).copied();
    FormatSpec {
        left_align,
        zero_pad,
        width,
        precision,
        out_of_range,
        conversion,
        len: if conversion.is_some() { i - pos + 1 } else { i - pos },
    }
}

fn take_digits(chars: &[char], i: &mut usize) -> Option<String> {
    let start = *i;
    while chars.get(*i).is_some_and(|c| c.is_ascii_digit()) {
        *i += 1;
    }
    (*i > start).then(|| chars[start..*i].iter().collect())
}

fn consumes_argument(conversion: char) -> bool {
    matches!(conversion, 's' | 'c' | 'd' | 'i' | 'x' | 'X' | 'o')
}

fn format_arg(spec: &FormatSpec, arg: &str) -> Result<String, String> {
    let Some(conversion) = spec.conversion else {
        return Ok("%".into());
    };
    if let Some(digits) = &spec.out_of_range {
        return Err(format!("printf: {}: Numerical result out of range\n", digits));
    }

    let body = match conversion {
        's' => match spec.precision {
            Some(p) => arg.chars().take(p).collect(),
            None => arg.to_string(),
        },
        'c' => arg.chars().next().map(String::from).unwrap_or_default(),
        'd' | 'i' => parse_int_arg(arg)?.to_string(),
        'x' => format!("{:x}", parse_int_arg(arg)?),
        'X' => format!("{:X}", parse_int_arg(arg)?),
        'o' => format!("{:o}", parse_int_arg(arg)?),
        other => return Ok(format!("%{}", other)),
    };

    Ok(pad(body, spec, matches!(conversion, 'd' | 'i' | 'x' | 'X' | 'o')))
}

fn pad(body: String, spec: &FormatSpec, numeric: bool) -> String {
    let len = body.chars().count();
    if len >= spec.width {
        return body;
    }
    let fill = spec.width - len;
    if spec.left_align {
        format!("{}{}", body, " ".repeat(fill))
    } else if spec.zero_pad && numeric {
        match body.strip_prefix('-') {
            Some(digits) => format!("-{}{}", "0".repeat(fill), digits),
            None => format!("{}{}", "0".repeat(fill), body),
        }
    } else {
        format!("{}{}", " ".repeat(fill), body)
    }
}

fn parse_int_arg(s: &str) -> Result<i64, String> {
    if s.is_empty() {
        return Ok(0);
    }
    // Leading quote: value of the next character
    if let Some(rest) = s.strip_prefix('\'').or_else(|| s.strip_prefix('"')) {
        return Ok(rest.chars().next().map(|c| c as i64).unwrap_or(0));
    }
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|_| format!("printf: '{}': invalid number\n", s))
}

fn process_escape(chars: &[char], pos: usize) -> (String, usize) {
    let Some(&next) = chars.get(pos + 1) else {
        return ("\\".into(), 1);
    };
    let simple = match next {
        '\\' => '\\',
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'a' => '\x07',
        'b' => '\x08',
        'f' => '\x0c',
        'v' => '\x0b',
        '"' => '"',
        _ => return (format!("\\{}", next), 2),
    };
    (simple.to_string(), 2)
}
