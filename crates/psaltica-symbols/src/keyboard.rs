//! Keyboard token table parser
//!
//! The composition keyboard ships an INI-style table mapping physical key
//! sections to per-layer symbol tokens:
//!
//! ```ini
//! [97]
//! 1=a1
//! 2=b2
//! [not-a-key]
//! 1=ignored
//! ```
//!
//! A `[n]` header with a numeric body opens a key section; any other line
//! starting with `[` closes the current section, so rows under it are
//! dropped rather than attributed to the previous key. Tokens are
//! deduplicated globally, first occurrence wins, and entries keep a
//! 1-based running order.

/// One token of the keyboard table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardTokenEntry {
    /// 1-based position in parse order.
    pub order: u32,
    pub token: String,
    /// Key code from the enclosing section header.
    pub keycode: i32,
    /// Layer 1..=5 within the key.
    pub layer: u8,
}

/// Parse the INI-style keyboard table.
pub fn parse_keyboard_ini(content: &str) -> Vec<KeyboardTokenEntry> {
    let mut entries = Vec::new();
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut current_keycode: Option<i32> = None;
    let mut order: u32 = 0;

    for raw in content.lines() {
        let row = raw.replace('\r', "");
        let trimmed = row.trim();

        if let Some(body) = section_body(trimmed) {
            // Numeric overflow leaves the section open but unkeyed.
            current_keycode = body.parse::<i32>().ok();
            continue;
        }
        if row.starts_with('[') {
            current_keycode = None;
            continue;
        }
        let Some(keycode) = current_keycode else {
            continue;
        };
        let Some((layer, token)) = layer_row(trimmed) else {
            continue;
        };
        if !seen.insert(token.to_string()) {
            continue;
        }
        order += 1;
        entries.push(KeyboardTokenEntry {
            order,
            token: token.to_string(),
            keycode,
            layer,
        });
    }

    entries
}

/// `[digits]` -> the digits; anything else -> `None`.
fn section_body(row: &str) -> Option<&str> {
    let body = row.strip_prefix('[')?.strip_suffix(']')?;
    if !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) {
        Some(body)
    } else {
        None
    }
}

/// `n=token` with `n` in 1..=5 and token in `[A-Za-z0-9_]+`.
fn layer_row(row: &str) -> Option<(u8, &str)> {
    let (layer, token) = row.split_once('=')?;
    let layer = match layer.as_bytes() {
        [digit @ b'1'..=b'5'] => digit - b'0',
        _ => return None,
    };
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return None;
    }
    Some((layer, token))
}
