//! Minimal parsers for the evidence source files.

/// Look up `key` in `[section]` of an INI document.
///
/// Keys compare case-insensitively, sections exactly. Both `=` and `:`
/// separate keys from values; `#` and `;` start comment lines.
pub fn ini_value(content: &str, section: &str, key: &str) -> Option<String> {
    let mut in_section = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = name.trim() == section;
            continue;
        }

        if !in_section {
            continue;
        }

        let Some(split) = line.find(['=', ':']) else {
            continue;
        };
        let (name, value) = line.split_at(split);
        if name.trim().eq_ignore_ascii_case(key) {
            return Some(value[1..].trim().to_string());
        }
    }

    None
}

/// Extract the lowercased product name from a product definition.
///
/// Reads the text of the `<name>` element that is a direct child of the
/// `<product>` root. Comments are ignored and the predefined and numeric
/// character entities are decoded.
pub fn product_name(content: &str) -> Option<String> {
    let content = strip_comments(content);
    let mut rest = &content[product_body_start(&content)?..];
    let mut depth = 0usize;

    loop {
        rest = &rest[rest.find('<')?..];
        let close = rest.find('>')?;
        let tag = &rest[1..close];
        rest = &rest[close + 1..];

        if tag.starts_with('/') {
            // `</product>` at depth 0 ends the search
            depth = depth.checked_sub(1)?;
        } else if tag.starts_with('?') || tag.starts_with('!') || tag.ends_with('/') {
            continue;
        } else if depth == 0 && element_name(tag) == "name" {
            let text = &rest[..rest.find("</name")?];
            let name = decode_entities(text).trim().to_lowercase();
            return (!name.is_empty()).then_some(name);
        } else {
            depth += 1;
        }
    }
}

/// Offset just past the opening `<product ...>` tag.
fn product_body_start(content: &str) -> Option<usize> {
    content.match_indices("<product").find_map(|(at, tag)| {
        let after = at + tag.len();
        let boundary = content[after..].chars().next()?;
        if !(boundary.is_whitespace() || boundary == '>') {
            return None;
        }
        let close = after + content[after..].find('>')?;
        if content[..close].ends_with('/') {
            return None;
        }
        Some(close + 1)
    })
}

fn element_name(tag: &str) -> &str {
    tag.split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
}

fn strip_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(open) = rest.find("<!--") {
        out.push_str(&rest[..open]);
        match rest[open..].find("-->") {
            Some(end) => rest = &rest[open + end + 3..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let c = match &rest[1..semi] {
                "lt" => '<',
                "gt" => '>',
                "amp" => '&',
                "quot" => '"',
                "apos" => '\'',
                entity => {
                    let code = match entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                        None => entity.strip_prefix('#')?.parse().ok()?,
                    };
                    char::from_u32(code)?
                }
            };
            Some((c, semi + 1))
        });
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
