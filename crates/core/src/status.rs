//! Text of the header rows and the help screen.

use read_fonts::types::Fixed;

use crate::axis::Axis;

/// Longest name fragment shown in a header row.
const NAME_LIMIT: usize = 50;

/// Key bindings, one help-screen row each.
pub const HELP_LINES: &[&str] = &[
    "This program displays all glyphs from one or several",
    "Multiple Masters, GX, or OpenType Variation font files.",
    "",
    "Use the following keys:",
    "",
    "F1, ?       display this help screen",
    "q, ESC      quit",
    "",
    "F2          toggle axis grouping",
    "F3          toggle fill rule flags",
    "F4          toggle overlap flags",
    "F5          toggle outline hinting",
    "F6          cycle through hinting engines",
    "",
    "Tab         toggle anti-aliasing",
    "Space       toggle rendering mode",
    "",
    ", .         previous/next font",
    "",
    "Up, Down    change pointsize by 1 unit",
    "PgUp, PgDn  change pointsize by 10 units",
    "",
    "Left, Right adjust index by 1",
    "F7, F8      adjust index by 16",
    "F9, F10     adjust index by 256",
    "F11, F12    adjust index by 4096",
    "",
    "[, ]        previous/next named instance",
    "",
    "a, A        adjust axis 0",
    "b, B        adjust axis 1",
    "...",
    "p, P        adjust axis 15",
    "",
    "-, +        adjust axis range increment",
    "",
    "Axes marked with an asterisk are hidden.",
    "",
    "",
    "press any key to exit this help screen",
];

fn truncated(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// A design coordinate with a leading space for non-negative values;
/// two decimals when it has a fractional part.
pub fn format_coordinate(value: Fixed) -> String {
    let number = value.to_f64();
    let sign = if number < 0.0 { "" } else { " " };
    if value.fract() != Fixed::default() {
        format!("{sign}{number:.2}")
    } else {
        format!("{sign}{}", number as i64)
    }
}

/// `family style | file`, with `:face` appended for collections.
pub fn font_title(
    family: &str,
    style: &str,
    file: &str,
    face_index: u32,
    face_count: u32,
) -> String {
    let mut title = format!(
        "{} {} | {}",
        truncated(family, NAME_LIMIT),
        truncated(style, NAME_LIMIT),
        truncated(file, 2 * NAME_LIMIT)
    );
    if face_count > 1 {
        title.push_str(&format!(":{face_index}"));
    }
    title
}

/// Engine, size and the contiguous range of glyphs on screen.
pub fn engine_line(
    driver: &str,
    hinting: &str,
    size: u32,
    unit: &str,
    range: Option<(u32, u32)>,
) -> String {
    let mut line = format!("{driver}{hinting}, size: {size} {unit}");
    if let Some((first, last)) = range {
        line.push_str(&format!(", glyphs: {first}-{last}"));
    }
    line
}

/// Status row for a file that could not be opened.
pub fn load_failure_line(file: &str, size: u32, unit: &str) -> String {
    format!("{}: could not be opened at {size} {unit}", truncated(file, 2 * NAME_LIMIT))
}

/// Title row above the axis readout.
pub fn axes_title(increment_percent: f64) -> String {
    format!("axes (± {increment_percent:.1}%):")
}

/// One axis readout row: slot letter, name, hidden marker and value.
pub fn axis_line(slot: usize, axis: &Axis, value: Fixed) -> String {
    let letter = char::from(b'A' + slot as u8);
    format!(
        "{letter} {}{}:{}",
        truncated(&axis.name, NAME_LIMIT),
        if axis.hidden { "*" } else { "" },
        format_coordinate(value)
    )
}

#[cfg(test)]
mod tests {
    use read_fonts::types::Tag;

    use super::*;

    #[test]
    fn coordinates_print_like_c_space_flag() {
        assert_eq!(format_coordinate(Fixed::from_f64(400.0)), " 400");
        assert_eq!(format_coordinate(Fixed::from_f64(-12.0)), "-12");
        assert_eq!(format_coordinate(Fixed::from_f64(0.25)), " 0.25");
        assert_eq!(format_coordinate(Fixed::from_f64(-1.5)), "-1.50");
    }

    #[test]
    fn axis_line_marks_hidden_axes() {
        let axis = Axis::new(Tag::new(b"wght"), "Weight", 100.0, 400.0, 900.0).with_hidden(true);
        assert_eq!(axis_line(1, &axis, Fixed::from_f64(400.0)), "B Weight*: 400");
    }

    #[test]
    fn title_shows_face_index_for_collections() {
        assert_eq!(font_title("Fam", "Bold", "a.ttc", 2, 3), "Fam Bold | a.ttc:2");
        assert_eq!(font_title("Fam", "Bold", "a.ttf", 0, 1), "Fam Bold | a.ttf");
    }

    #[test]
    fn engine_line_with_range() {
        assert_eq!(
            engine_line("truetype", " unhinted", 64, "ppem", Some((10, 42))),
            "truetype unhinted, size: 64 ppem, glyphs: 10-42"
        );
        assert_eq!(axes_title(2.5), "axes (± 2.5%):");
    }
}
