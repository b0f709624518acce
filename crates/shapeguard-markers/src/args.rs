use crate::MarkerError;
use std::collections::BTreeMap;

/// Key under which a positional (`Name=a;b`) marker value is stored.
const POSITIONAL: &str = "";

/// Arguments of one marker directive.
///
/// Two spellings are understood:
/// - named: `featureSet=TechPreview;Custom,enum=A;B` (comma separates arguments)
/// - positional: `A;B` (the part after `Name=`)
///
/// List items are separated by `;`. Items may be double-quoted to carry `,`, `;` or an empty
/// string (`""`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkerArgs {
    values: BTreeMap<String, Vec<String>>,
}

impl MarkerArgs {
    pub fn parse_named(marker: &str, input: &str) -> Result<Self, MarkerError> {
        let mut values = BTreeMap::new();
        for argument in split_unquoted(marker, input, ',')? {
            if argument.trim().is_empty() {
                continue;
            }
            let Some((key, value)) = argument.split_once('=') else {
                return Err(MarkerError::InvalidArguments {
                    marker: marker.to_string(),
                    reason: format!("argument {argument:?} is not of the form key=value"),
                });
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(MarkerError::InvalidArguments {
                    marker: marker.to_string(),
                    reason: format!("argument {argument:?} has an empty name"),
                });
            }
            if values
                .insert(key.to_string(), parse_list(marker, value)?)
                .is_some()
            {
                return Err(MarkerError::InvalidArguments {
                    marker: marker.to_string(),
                    reason: format!("argument {key} given more than once"),
                });
            }
        }
        Ok(Self { values })
    }

    pub fn parse_positional(marker: &str, input: &str) -> Result<Self, MarkerError> {
        let mut values = BTreeMap::new();
        values.insert(POSITIONAL.to_string(), parse_list(marker, input)?);
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.values.get(key).map(Vec::as_slice)
    }

    pub fn positional(&self) -> Option<&[String]> {
        self.get(POSITIONAL)
    }

    pub fn require(&self, marker: &str, key: &str) -> Result<&[String], MarkerError> {
        self.get(key).ok_or_else(|| MarkerError::MissingArgument {
            marker: marker.to_string(),
            argument: key.to_string(),
        })
    }
}

fn parse_list(marker: &str, input: &str) -> Result<Vec<String>, MarkerError> {
    split_unquoted(marker, input, ';')?
        .into_iter()
        .map(|item| unquote(marker, item.trim()))
        .collect()
}

/// Split on `sep` outside of double quotes. Quotes are kept in the pieces.
fn split_unquoted<'a>(marker: &str, input: &'a str, sep: char) -> Result<Vec<&'a str>, MarkerError> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;
    for (idx, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c == sep && !in_quotes => {
                pieces.push(&input[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    if in_quotes {
        return Err(MarkerError::InvalidArguments {
            marker: marker.to_string(),
            reason: format!("unterminated quote in {input:?}"),
        });
    }
    pieces.push(&input[start..]);
    Ok(pieces)
}

fn unquote(marker: &str, item: &str) -> Result<String, MarkerError> {
    let Some(inner) = item.strip_prefix('"') else {
        return Ok(item.to_string());
    };
    let Some(inner) = inner.strip_suffix('"') else {
        return Err(MarkerError::InvalidArguments {
            marker: marker.to_string(),
            reason: format!("malformed quoted value {item:?}"),
        });
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}
