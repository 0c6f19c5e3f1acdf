use crate::domain::style::StyleMap;

/// Serialize a style map into an inline `style` attribute value:
/// `property: value` pairs joined by `; `, in insertion order.
pub fn style_to_string(style: &StyleMap) -> String {
    style
        .iter()
        .map(|(name, value)| format!("{}: {value}", kebab_case(name)))
        .collect::<Vec<_>>()
        .join("; ")
}

/// `fontSize` -> `font-size`. A hyphen goes between a lowercase letter or
/// digit and the uppercase letter that follows it; everything is lowercased.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut previous: Option<char> = None;

    for ch in name.chars() {
        if ch.is_ascii_uppercase()
            && previous.is_some_and(|prev| prev.is_ascii_lowercase() || prev.is_ascii_digit())
        {
            out.push('-');
        }
        out.extend(ch.to_lowercase());
        previous = Some(ch);
    }

    out
}
