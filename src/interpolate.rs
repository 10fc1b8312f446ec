// src/interpolate.rs
//! `%(name)s` value interpolation
//!
//! Runs at lookup time, never at parse time, so a reference always sees the
//! final value of the option it names.

use crate::consts::MAX_INTERPOLATION_DEPTH;
use crate::error::LookupError;

/// Names the value being resolved, for error reports
struct Origin<'s> {
    section: &'s str,
    option: &'s str,
    raw: &'s str,
}

/// Resolve `%(name)s` references in `raw` and turn `%%` into `%`. `lookup`
/// receives lower-cased option names and searches the section, then DEFAULT.
pub(crate) fn interpolate<'a, F>(
    section: &str,
    option: &str,
    raw: &str,
    lookup: F,
) -> Result<String, LookupError>
where
    F: Fn(&str) -> Option<Option<&'a str>>,
{
    let origin = Origin {
        section,
        option,
        raw,
    };
    let mut out = String::with_capacity(raw.len());
    expand(&origin, &lookup, raw, 1, &mut out)?;
    Ok(out)
}

/// Append `rest` to `out`. Only text taken from a referenced option is
/// expanded again, one level deeper; output of `%%` is never rescanned.
fn expand<'a, F>(
    origin: &Origin<'_>,
    lookup: &F,
    mut rest: &str,
    depth: usize,
    out: &mut String,
) -> Result<(), LookupError>
where
    F: Fn(&str) -> Option<Option<&'a str>>,
{
    if depth > MAX_INTERPOLATION_DEPTH {
        return Err(LookupError::InterpolationDepth {
            section: origin.section.to_owned(),
            option: origin.option.to_owned(),
            raw: origin.raw.to_owned(),
        });
    }

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];

        if let Some(after) = tail.strip_prefix('%') {
            out.push('%');
            rest = after;
            continue;
        }

        // a lone `%` stays as written
        if !tail.starts_with('(') {
            out.push('%');
            rest = tail;
            continue;
        }

        let (name, after) =
            reference(tail).ok_or_else(|| LookupError::InterpolationSyntax {
                section: origin.section.to_owned(),
                option: origin.option.to_owned(),
                fragment: rest[pos..].to_owned(),
            })?;

        let name = name.to_lowercase();
        match lookup(&name) {
            Some(Some(value)) if value.contains('%') => {
                expand(origin, lookup, value, depth + 1, out)?
            }
            Some(Some(value)) => out.push_str(value),
            _ => {
                return Err(LookupError::InterpolationMissingOption {
                    section: origin.section.to_owned(),
                    option: origin.option.to_owned(),
                    reference: name,
                    raw: origin.raw.to_owned(),
                })
            }
        }
        rest = after;
    }

    out.push_str(rest);
    Ok(())
}

/// Parse `(name)s` at the start of `tail`, returning the name and what follows
fn reference(tail: &str) -> Option<(&str, &str)> {
    let inner = tail.strip_prefix('(')?;
    let close = inner.find(')')?;
    let after = inner[close + 1..].strip_prefix('s')?;
    (close > 0).then_some((&inner[..close], after))
}
