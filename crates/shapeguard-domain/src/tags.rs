//! Serialization tag parsing.
//!
//! Tags use the struct-tag convention: space separated `key:"value"` pairs, where the value
//! is a double-quoted string with backslash escapes. The serialization tag is the `json` key.

/// Key of the serialization tag inside a raw struct tag.
pub const SERIALIZATION_TAG_KEY: &str = "json";

/// Shape of a field's serialization tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagInfo {
    /// No serialization tag, or the field is explicitly not serialized (`-`).
    pub missing: bool,
    pub name: String,
    /// Contents are flattened into the parent (`,inline`).
    pub inline: bool,
    pub omit_empty: bool,
    /// The tag value as written, e.g. `name,omitempty`.
    pub raw: String,
}

impl TagInfo {
    pub fn missing() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }

    /// Derive tag info from a serialization tag value such as `fooBar,omitempty`.
    pub fn parse(value: &str) -> Self {
        if value == "-" {
            return Self::missing();
        }

        let mut parts = value.split(',');
        let name = parts.next().unwrap_or_default().to_string();
        let mut info = TagInfo {
            raw: value.to_string(),
            ..TagInfo::default()
        };
        for option in parts {
            match option.trim() {
                "inline" => info.inline = name.is_empty(),
                "omitempty" => info.omit_empty = true,
                _ => {}
            }
        }
        info.name = name;
        info
    }

    /// Derive tag info from a field's raw struct tag (absent tag means missing).
    pub fn from_struct_tag(raw: Option<&str>) -> Self {
        match raw.and_then(|tag| lookup(tag, SERIALIZATION_TAG_KEY)) {
            Some(value) => Self::parse(&value),
            None => Self::missing(),
        }
    }
}

/// Look up `key` in a raw struct tag. Returns `None` when the key is absent or the tag
/// is malformed before the key is reached.
pub fn lookup(tag: &str, key: &str) -> Option<String> {
    let mut rest = tag;
    loop {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            return None;
        }

        let name_len = rest
            .find(|c: char| c <= ' ' || c == ':' || c == '"' || c == '\u{7f}')
            .unwrap_or(rest.len());
        if name_len == 0 || !rest[name_len..].starts_with(":\"") {
            return None;
        }
        let name = &rest[..name_len];
        rest = &rest[name_len + 2..];

        let (value, consumed) = unquote_until_close(rest)?;
        rest = &rest[consumed..];

        if name == key {
            return Some(value);
        }
    }
}

/// Read a quoted value whose opening quote was already consumed. Returns the unescaped
/// value and the number of bytes consumed including the closing quote.
fn unquote_until_close(s: &str) -> Option<(String, usize)> {
    let mut out = String::new();
    let mut chars = s.char_indices();
    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => return Some((out, idx + 1)),
            '\\' => {
                let (_, escaped) = chars.next()?;
                out.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => other,
                });
            }
            other => out.push(other),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_with_omitempty() {
        let info = TagInfo::parse("fooBar,omitempty");
        assert!(!info.missing);
        assert_eq!(info.name, "fooBar");
        assert!(!info.inline);
        assert!(info.omit_empty);
    }

    #[test]
    fn dash_is_missing() {
        assert!(TagInfo::parse("-").missing);
    }

    #[test]
    fn inline_without_name() {
        let info = TagInfo::parse(",inline");
        assert!(info.inline);
        assert!(!info.missing);
        assert_eq!(info.name, "");
    }

    #[test]
    fn named_inline_is_not_inline() {
        let info = TagInfo::parse("spec,inline");
        assert!(!info.inline);
        assert_eq!(info.name, "spec");
    }

    #[test]
    fn empty_value_has_empty_name() {
        let info = TagInfo::parse("");
        assert!(!info.missing);
        assert!(info.name.is_empty());
    }

    #[test]
    fn struct_tag_lookup_finds_json_among_other_keys() {
        let raw = r#"protobuf:"bytes,1,opt,name=spec" json:"spec,omitempty""#;
        assert_eq!(lookup(raw, "json").as_deref(), Some("spec,omitempty"));
        assert_eq!(lookup(raw, "protobuf").as_deref(), Some("bytes,1,opt,name=spec"));
        assert_eq!(lookup(raw, "yaml"), None);
    }

    #[test]
    fn struct_tag_lookup_unescapes_quotes() {
        assert_eq!(lookup(r#"json:"a\"b""#, "json").as_deref(), Some("a\"b"));
    }

    #[test]
    fn malformed_struct_tag_yields_none() {
        assert_eq!(lookup("json:name", "json"), None);
        assert_eq!(lookup(r#"json:"unterminated"#, "json"), None);
    }

    #[test]
    fn absent_struct_tag_or_key_is_missing() {
        assert!(TagInfo::from_struct_tag(None).missing);
        assert!(TagInfo::from_struct_tag(Some(r#"yaml:"name""#)).missing);
        assert!(TagInfo::from_struct_tag(Some(r#"json:"-""#)).missing);
        assert_eq!(TagInfo::from_struct_tag(Some(r#"json:"name""#)).name, "name");
    }
}
