// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serializes a value tree back to CFG text.
//!
//! A root mapping is written without braces, one `key: value` entry per line.
//! Nested containers are written across lines with two-space indentation. The
//! output parses back to an equal tree.

use super::parser::MAX_DEPTH;
use crate::domain::config_value::{is_bare_key, quote};
use crate::domain::{ConfigError, ConfigValue, Mapping, Result};

const INDENT: &str = "  ";

/// Writes `value` as a CFG document.
///
/// # Errors
///
/// Returns `ConfigError::SerializeError` if the root is a scalar, if the tree
/// holds a NaN or infinite float, or if containers nest deeper than the parser
/// accepts (128 levels).
///
/// # Examples
///
/// ```rust
/// use cfg_lib::adapters::cfg::to_cfg_string;
/// use cfg_lib::domain::{ConfigValue, Mapping};
///
/// let mut map = Mapping::new();
/// map.insert("key", ConfigValue::from("Hello, world!"));
///
/// let text = to_cfg_string(&ConfigValue::from(map)).unwrap();
/// assert_eq!(text, "key: 'Hello, world!'\n");
/// ```
pub fn to_cfg_string(value: &ConfigValue) -> Result<String> {
    let mut out = String::new();
    match value {
        ConfigValue::Mapping(map) => {
            for (key, item) in map.iter() {
                write_entry(&mut out, key, item, 0)?;
            }
        }
        ConfigValue::Sequence(items) => {
            write_sequence(&mut out, items, 0)?;
            out.push('\n');
        }
        other => {
            return Err(ConfigError::SerializeError {
                message: format!(
                    "document root must be a mapping or sequence, found {}",
                    other.type_name()
                ),
            });
        }
    }
    Ok(out)
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

fn write_entry(out: &mut String, key: &str, value: &ConfigValue, level: usize) -> Result<()> {
    push_indent(out, level);
    write_key(out, key);
    out.push_str(": ");
    write_value(out, value, level)?;
    out.push('\n');
    Ok(())
}

fn write_key(out: &mut String, key: &str) {
    if is_bare_key(key) {
        out.push_str(key);
    } else {
        out.push_str(&quote(key));
    }
}

fn write_value(out: &mut String, value: &ConfigValue, level: usize) -> Result<()> {
    match value {
        ConfigValue::Null => out.push_str("null"),
        ConfigValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        ConfigValue::Integer(n) => out.push_str(&n.to_string()),
        ConfigValue::Float(x) => {
            if !x.is_finite() {
                return Err(ConfigError::SerializeError {
                    message: format!("cannot represent float {} in CFG", x),
                });
            }
            out.push_str(&format!("{:?}", x));
        }
        ConfigValue::String(s) => out.push_str(&quote(s)),
        ConfigValue::Sequence(items) => write_sequence(out, items, level)?,
        ConfigValue::Mapping(map) => write_mapping(out, map, level)?,
    }
    Ok(())
}

fn check_depth(level: usize) -> Result<()> {
    if level >= MAX_DEPTH {
        return Err(ConfigError::SerializeError {
            message: format!("containers nested deeper than {} levels", MAX_DEPTH),
        });
    }
    Ok(())
}

fn write_sequence(out: &mut String, items: &[ConfigValue], level: usize) -> Result<()> {
    check_depth(level)?;
    if items.is_empty() {
        out.push_str("[]");
        return Ok(());
    }
    out.push_str("[\n");
    for item in items {
        push_indent(out, level + 1);
        write_value(out, item, level + 1)?;
        out.push('\n');
    }
    push_indent(out, level);
    out.push(']');
    Ok(())
}

fn write_mapping(out: &mut String, map: &Mapping, level: usize) -> Result<()> {
    check_depth(level)?;
    if map.is_empty() {
        out.push_str("{}");
        return Ok(());
    }
    out.push_str("{\n");
    for (key, item) in map.iter() {
        write_entry(out, key, item, level + 1)?;
    }
    push_indent(out, level);
    out.push('}');
    Ok(())
}
