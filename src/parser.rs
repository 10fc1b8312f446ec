// src/parser.rs
//! INI-style reader
//!
//! Accepts `[section]` headers, `key = value` / `key: value` options and
//! valueless `key` options. Indented lines continue the previous value.
//! Lines starting with `#` or `;` (or a leading `rem`) are comments.

use std::path::Path;

use tracing::trace;

use crate::config::OptionMap;
use crate::consts::DEFAULT_SECTION;
use crate::error::ConfigError;
use crate::Result;

#[derive(Debug, Default)]
pub(crate) struct RawIni {
    pub defaults: OptionMap,
    pub sections: Vec<(String, OptionMap)>,
}

/// Which mapping new options currently land in
#[derive(Clone, Copy)]
enum Cursor {
    Defaults,
    Section(usize),
}

impl RawIni {
    fn target(&mut self, cursor: Cursor) -> &mut OptionMap {
        match cursor {
            Cursor::Defaults => &mut self.defaults,
            Cursor::Section(idx) => &mut self.sections[idx].1,
        }
    }

    fn open_section(&mut self, name: &str) -> Cursor {
        if name == DEFAULT_SECTION {
            return Cursor::Defaults;
        }
        // repeated headers merge into the first occurrence
        match self.sections.iter().position(|(n, _)| n == name) {
            Some(idx) => Cursor::Section(idx),
            None => {
                self.sections.push((name.to_owned(), OptionMap::default()));
                Cursor::Section(self.sections.len() - 1)
            }
        }
    }
}

pub(crate) fn parse(text: &str, path: &Path, defaults: OptionMap) -> Result<RawIni> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut ini = RawIni {
        defaults,
        sections: Vec::new(),
    };
    let mut cursor: Option<Cursor> = None;
    let mut last_option: Option<String> = None;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;

        if is_comment(line) {
            continue;
        }

        // continuation of the previous option's value
        if line.starts_with(char::is_whitespace) {
            if let (Some(cur), Some(option)) = (cursor, last_option.as_deref()) {
                match ini.target(cur).get_mut(option) {
                    Some(Some(value)) => {
                        value.push('\n');
                        value.push_str(line.trim());
                        continue;
                    }
                    _ => {
                        return Err(ConfigError::Parse {
                            path: path.to_owned(),
                            line_no,
                            line: line.to_owned(),
                            reason: "continuation line for an option without a value",
                        })
                    }
                }
            }
        }

        if let Some(name) = section_header(line) {
            trace!(section = name, line_no, "section header");
            cursor = Some(ini.open_section(name));
            last_option = None;
            continue;
        }

        let cur = cursor.ok_or_else(|| ConfigError::MissingSectionHeader {
            path: path.to_owned(),
            line_no,
            line: line.to_owned(),
        })?;

        let parse_error = |reason: &'static str| ConfigError::Parse {
            path: path.to_owned(),
            line_no,
            line: line.to_owned(),
            reason,
        };

        if line.starts_with(char::is_whitespace) {
            return Err(parse_error("indented line does not continue a value"));
        }

        let (option, value) =
            split_option(line).ok_or_else(|| parse_error("option line without a name"))?;
        trace!(option = %option, line_no, "option");
        ini.target(cur).insert(option.clone(), value);
        last_option = Some(option);
    }

    Ok(ini)
}

fn is_comment(line: &str) -> bool {
    if line.trim().is_empty() || line.starts_with(&['#', ';'][..]) {
        return true;
    }
    line.starts_with(&['r', 'R'][..])
        && line
            .split_whitespace()
            .next()
            .is_some_and(|word| word.eq_ignore_ascii_case("rem"))
}

/// `[name]` at the very start of the line; anything after `]` is ignored
fn section_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let end = rest.find(']')?;
    let name = &rest[..end];
    (!name.is_empty()).then_some(name)
}

/// Split an option line on its first `=` or `:`; no delimiter means no
/// value. `None` when the name before the delimiter is empty.
fn split_option(line: &str) -> Option<(String, Option<String>)> {
    let Some(pos) = line.find(&['=', ':'][..]) else {
        return Some((line.trim().to_lowercase(), None));
    };

    let option = line[..pos].trim().to_lowercase();
    if option.is_empty() {
        return None;
    }
    let mut value = line[pos + 1..].trim_start();

    // inline comment: `;` preceded by whitespace
    if let Some(semi) = value.find(';') {
        if value[..semi].ends_with(char::is_whitespace) {
            value = &value[..semi];
        }
    }

    let value = match value.trim() {
        "\"\"" => String::new(),
        v => v.to_owned(),
    };

    Some((option, Some(value)))
}
