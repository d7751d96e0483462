use std::env;
use std::path::PathBuf;

use crate::error::{CatalogError, Result};

/// Expand `$VAR`/`${VAR}` references, then a leading `~/` to the user home.
///
/// Unset variables expand to nothing. The home directory comes from `HOME`,
/// then `USERPROFILE`.
pub fn expand_user(raw: &str) -> Result<PathBuf> {
    expand_user_with(raw, |key| env::var(key).ok())
}

pub(crate) fn expand_user_with<F>(raw: &str, lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let expanded = expand_vars(raw, &lookup);
    if expanded.is_empty() {
        return Err(CatalogError::config(format!(
            "path {raw:?} expands to an empty string"
        )));
    }

    let Some(rest) = expanded.strip_prefix("~/") else {
        return Ok(PathBuf::from(expanded));
    };

    let home = ["HOME", "USERPROFILE"]
        .iter()
        .filter_map(|key| lookup(*key))
        .find(|v| !v.is_empty())
        .ok_or_else(|| CatalogError::config("user home directory not found"))?;

    Ok(PathBuf::from(format!("{home}/{rest}")))
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn expand_vars<F>(raw: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            if let Some(end) = braced.find('}') {
                out.push_str(&lookup(&braced[..end]).unwrap_or_default());
                rest = &braced[end + 1..];
                continue;
            }
        }

        let len = after.find(|c: char| !is_name_char(c)).unwrap_or(after.len());
        if len == 0 {
            // Lone `$`: keep it.
            out.push('$');
        } else {
            out.push_str(&lookup(&after[..len]).unwrap_or_default());
        }
        rest = &after[len..];
    }

    out.push_str(rest);
    out
}
