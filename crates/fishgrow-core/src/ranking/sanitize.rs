use crate::config::DEFAULT_PLAYER_NAME;

/// Display length limit for player names, in UTF-16 code units
pub const PLAYER_NAME_MAX_LENGTH: usize = 10;

/// Make a raw player name safe to store and display on one line.
///
/// Trims, drops CR/LF, turns tabs into spaces, collapses runs of spaces and
/// truncates to [`PLAYER_NAME_MAX_LENGTH`]. Empty results become `"Guest"`.
pub fn sanitize_name(raw: &str) -> String {
    sanitize_name_with_limit(raw, PLAYER_NAME_MAX_LENGTH)
}

fn sanitize_name_with_limit(raw: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        let c = match c {
            '\r' | '\n' => continue,
            '\t' => ' ',
            c => c,
        };
        if c == ' ' && out.ends_with(' ') {
            continue;
        }
        out.push(c);
    }

    let mut units = 0;
    let mut cut = out.len();
    for (i, c) in out.char_indices() {
        units += c.len_utf16();
        if units > max_len {
            cut = i;
            break;
        }
    }
    out.truncate(cut);

    let trimmed = out.trim_end();
    if trimmed.trim_start().is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
