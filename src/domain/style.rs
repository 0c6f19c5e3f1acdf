//! Inline style properties attached to a block.

pub const FONT_SIZE: &str = "fontSize";
pub const COLOR: &str = "color";
pub const TEXT_ALIGN: &str = "textAlign";
pub const BACKGROUND_COLOR: &str = "backgroundColor";
pub const PADDING: &str = "padding";
pub const BORDER_RADIUS: &str = "borderRadius";

pub const DEFAULT_FONT_SIZE_PX: i64 = 16;
pub const FONT_SIZE_STEP_PX: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Property name to value map that remembers insertion order.
///
/// Overwriting an existing property keeps its original slot, so a merge never
/// reorders the serialized `style` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<(String, String)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set a property, returning the previous value if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Shallow merge: properties in `partial` win, everything else is kept.
    pub fn merge(&mut self, partial: &StyleMap) {
        for (name, value) in partial.iter() {
            self.insert(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Numeric pixel value of `fontSize`, falling back to 16 when it is
    /// missing or has no leading integer.
    pub fn font_size_px(&self) -> i64 {
        self.get(FONT_SIZE)
            .and_then(parse_leading_int)
            .unwrap_or(DEFAULT_FONT_SIZE_PX)
    }

    pub fn adjust_font_size(&mut self, delta_px: i64) {
        let next = self.font_size_px().saturating_add(delta_px);
        self.insert(FONT_SIZE, format!("{next}px"));
    }
}

impl<K, V> FromIterator<(K, V)> for StyleMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = StyleMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// Leading-integer parse: optional whitespace and sign, then at least one
/// digit. Trailing units are ignored.
fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_in_place() {
        let mut style = StyleMap::new()
            .with(FONT_SIZE, "16px")
            .with(COLOR, "#000000")
            .with(PADDING, "1rem");

        let previous = style.insert(COLOR, "#ffffff");

        assert_eq!(previous.as_deref(), Some("#000000"));
        let keys: Vec<&str> = style.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, [FONT_SIZE, COLOR, PADDING]);
        assert_eq!(style.get(COLOR), Some("#ffffff"));
    }

    #[test]
    fn merge_keeps_unspecified_and_appends_new() {
        let mut style = StyleMap::new().with(FONT_SIZE, "16px").with(COLOR, "#000");
        let partial = StyleMap::new()
            .with(COLOR, "#fff")
            .with("letterSpacing", "1px");

        style.merge(&partial);

        let pairs: Vec<(&str, &str)> = style.iter().collect();
        assert_eq!(
            pairs,
            [
                (FONT_SIZE, "16px"),
                (COLOR, "#fff"),
                ("letterSpacing", "1px")
            ]
        );
    }

    #[test]
    fn merge_is_idempotent() {
        let base = StyleMap::new().with(FONT_SIZE, "16px").with(TEXT_ALIGN, "left");
        let partial = StyleMap::new().with(TEXT_ALIGN, "center").with(COLOR, "red");

        let mut once = base.clone();
        once.merge(&partial);
        let mut twice = once.clone();
        twice.merge(&partial);

        assert_eq!(once, twice);
    }

    #[test]
    fn font_size_defaults_when_missing_or_garbage() {
        assert_eq!(StyleMap::new().font_size_px(), 16);
        assert_eq!(StyleMap::new().with(FONT_SIZE, "large").font_size_px(), 16);
        assert_eq!(StyleMap::new().with(FONT_SIZE, " 22px").font_size_px(), 22);
        assert_eq!(StyleMap::new().with(FONT_SIZE, "12.5em").font_size_px(), 12);
    }

    #[test]
    fn font_size_round_trips_through_step() {
        for start in 2..40 {
            let mut style = StyleMap::new().with(FONT_SIZE, format!("{start}px"));
            style.adjust_font_size(FONT_SIZE_STEP_PX);
            style.adjust_font_size(-FONT_SIZE_STEP_PX);
            assert_eq!(style.font_size_px(), start);
            assert_eq!(style.get(FONT_SIZE), Some(format!("{start}px").as_str()));
        }
    }

    #[test]
    fn adjusting_missing_font_size_starts_from_default() {
        let mut style = StyleMap::new();
        style.adjust_font_size(-FONT_SIZE_STEP_PX);
        assert_eq!(style.get(FONT_SIZE), Some("14px"));
    }

    #[test]
    fn leading_int_parse() {
        assert_eq!(parse_leading_int("-4px"), Some(-4));
        assert_eq!(parse_leading_int("+8"), Some(8));
        assert_eq!(parse_leading_int("px"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(""), None);
    }
}
