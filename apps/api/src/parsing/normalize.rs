/// Icon glyphs from common resume templates, replaced before stripping.
const ICON_REPLACEMENTS: &[(char, &str)] = &[
    ('\u{f073}', "[📅]"), // calendar
    ('\u{f08d}', "[📍]"), // location
];

/// Strips control and private-use characters from extracted text.
/// Line breaks (`\n`, `\r`) and tabs survive.
pub fn clean_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if let Some((_, replacement)) = ICON_REPLACEMENTS.iter().find(|(icon, _)| *icon == c) {
            out.push_str(replacement);
        } else if !is_stripped(c) {
            out.push(c);
        }
    }
    out
}

fn is_stripped(c: char) -> bool {
    matches!(c, '\u{f000}'..='\u{f0ff}')
        || matches!(c, '\u{00}'..='\u{08}' | '\u{0b}' | '\u{0c}' | '\u{0e}'..='\u{1f}' | '\u{7f}')
}
