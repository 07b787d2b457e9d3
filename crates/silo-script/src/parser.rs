//! Line-oriented script parser
//!
//! A script is a sequence of lines; blank lines and `#` comments are
//! ignored, every other line must be `Operation(arg=value, ...)` with
//! quoted or bare argument values. The whole script is parsed before
//! anything executes, so a syntax error anywhere prevents any command
//! from running.

use crate::command::Command;
use crate::error::{ScriptError, ScriptResult};

/// Parse a complete script into its ordered command list
pub fn parse_script(text: &str) -> ScriptResult<Vec<Command>> {
    let mut commands = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        commands.push(parse_line(line, line_no)?);
    }
    log::debug!("Parsed {} commands", commands.len());
    Ok(commands)
}

fn parse_error(line: usize, text: &str) -> ScriptError {
    ScriptError::ParseError {
        line,
        text: text.to_string(),
    }
}

fn parse_line(line: &str, line_no: usize) -> ScriptResult<Command> {
    let open = line.find('(').ok_or_else(|| parse_error(line_no, line))?;
    let name = line[..open].trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(parse_error(line_no, line));
    }
    if !line.ends_with(')') {
        return Err(parse_error(line_no, line));
    }

    let body = &line[open + 1..line.len() - 1];
    let args = parse_args(body).ok_or_else(|| parse_error(line_no, line))?;
    Ok(Command::new(name, args, line_no))
}

/// Parse `k=v, k2="v2"` argument lists; returns `None` on malformed input
fn parse_args(body: &str) -> Option<Vec<(String, String)>> {
    let mut args = Vec::new();
    let mut rest = body.trim();
    while !rest.is_empty() {
        let eq = rest.find('=')?;
        let key = rest[..eq].trim();
        if key.is_empty() {
            return None;
        }
        rest = rest[eq + 1..].trim_start();

        let value;
        if let Some(stripped) = rest.strip_prefix('"') {
            let close = stripped.find('"')?;
            value = stripped[..close].to_string();
            rest = stripped[close + 1..].trim_start();
        } else {
            let end = rest.find(',').unwrap_or(rest.len());
            value = rest[..end].trim_end().to_string();
            if value.is_empty() {
                return None;
            }
            rest = &rest[end..];
        }

        match rest.strip_prefix(',') {
            Some(after) => {
                let after = after.trim_start();
                if after.is_empty() {
                    return None;
                }
                rest = after;
            }
            None if rest.is_empty() => {}
            None => return None,
        }
        args.push((key.to_string(), value));
    }
    Some(args)
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
