//! Javadoc copying for generated accessors.
//!
//! A field comment may carry accessor-specific sections:
//!
//! ```text
//! The current zoom level.
//! -- SETTER --
//! Changes the zoom level.
//! @param level the new level
//! ```
//!
//! Text is stored without the leading `/**`, `*` decoration.

use std::sync::OnceLock;

use regex::Regex;

fn section_marker() -> &'static Regex {
    static SECTION_RE: OnceLock<Regex> = OnceLock::new();
    SECTION_RE.get_or_init(|| {
        Regex::new(r"(?mi)^[ \t]*\**[ \t]*[-*]{2,}[ \t]*(GETTER|SETTER|WITH|WITHER|WITHBY|BUILDER)[ \t]*[-*]{2,}[ \t]*$")
            .expect("section marker regex should compile")
    })
}

fn param_tag() -> &'static Regex {
    static PARAM_RE: OnceLock<Regex> = OnceLock::new();
    PARAM_RE.get_or_init(|| {
        Regex::new(r"^(\s*\**\s*)@param\s+\S+").expect("param tag regex should compile")
    })
}

fn deprecated_tag() -> &'static Regex {
    static DEPRECATED_RE: OnceLock<Regex> = OnceLock::new();
    DEPRECATED_RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*\**\s*@deprecated\b").expect("deprecated tag regex should compile")
    })
}

pub fn has_deprecated_tag(doc: &str) -> bool {
    deprecated_tag().is_match(doc)
}

/// Derive the javadoc of a setter from the javadoc of its field.
///
/// A `-- SETTER --` section is used verbatim when present. Otherwise the
/// field comment (without any accessor sections) is reused with `@return`
/// lines dropped and every `@param` retargeted at `param_name`.
pub fn setter_javadoc(field_doc: &str, param_name: &str) -> Option<String> {
    let markers: Vec<_> = section_marker().captures_iter(field_doc).collect();

    let text = match markers
        .iter()
        .position(|caps| caps[1].eq_ignore_ascii_case("SETTER"))
    {
        Some(idx) => {
            let start = markers[idx].get(0).map_or(0, |m| m.end());
            let end = markers
                .get(idx + 1)
                .and_then(|caps| caps.get(0))
                .map_or(field_doc.len(), |m| m.start());
            field_doc[start..end].to_string()
        }
        None => {
            let end = markers
                .first()
                .and_then(|caps| caps.get(0))
                .map_or(field_doc.len(), |m| m.start());
            rewrite_tags(&field_doc[..end], param_name)
        }
    };

    let trimmed = trim_blank_lines(&text);
    (!trimmed.is_empty()).then_some(trimmed)
}

fn rewrite_tags(doc: &str, param_name: &str) -> String {
    let mut out = Vec::new();
    for line in doc.lines() {
        let bare = line.trim_start().trim_start_matches('*').trim_start();
        if bare.starts_with("@return") {
            continue;
        }
        let rewritten = param_tag().replace(line, |caps: &regex::Captures<'_>| {
            format!("{}@param {param_name}", &caps[1])
        });
        out.push(rewritten.into_owned());
    }
    out.join("\n")
}

fn trim_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}
