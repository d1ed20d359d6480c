//! Text measurement and truncation.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
///
/// Wide characters (Hangul, CJK ideographs, full-width forms) count as a full em,
/// everything else as 0.6 em.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    // Tenths of an em, so the sum stays exact.
    let tenths: u32 = text.chars().map(|c| if is_wide(c) { 10 } else { 6 }).sum();
    (tenths * font_px).div_ceil(10)
}

fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x11FF     // Hangul Jamo
        | 0x2E80..=0x303E   // CJK radicals, punctuation
        | 0x3040..=0x33FF   // kana, compatibility jamo, CJK symbols
        | 0x3400..=0x4DBF   // CJK ext. A
        | 0x4E00..=0x9FFF   // CJK unified ideographs
        | 0xAC00..=0xD7A3   // Hangul syllables
        | 0xF900..=0xFAFF   // CJK compatibility ideographs
        | 0xFF00..=0xFF60   // full-width forms
        | 0xFFE0..=0xFFE6)
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        let candidate = format!("{out}{ch}…");
        if estimate_text_width_px(&candidate, font_px) > max_px {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}
