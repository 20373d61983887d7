//! Text normalization shared by every table.
//!
//! IDs are the join key between the five sheets, so every numeric ID goes
//! through [`format_id`] before it lands in a record.

/// Zero-pad a numeric ID to three digits (e.g., `7` -> `"007"`).
///
/// IDs of 1000 or more are rendered in full rather than truncated; the CLI
/// caps the Pokémon range at 999, so only secondary IDs (abilities, alternate
/// forms) can exceed three digits.
pub fn format_id(id: u32) -> String {
    format!("{id:03}")
}

/// Python-style title case: a letter is upper-cased when it starts the
/// string or follows a non-letter, and lower-cased otherwise.
///
/// `"mt moon 1f"` becomes `"Mt Moon 1F"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Upper-case the first character and lower-case the rest.
///
/// Hyphens are kept as-is: `"level-up"` becomes `"Level-up"`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Turn an API location-area slug into a display name.
pub fn location_name(slug: &str) -> String {
    title_case(&slug.replace('-', " "))
}

/// Flavor text from the API carries hard line breaks and form feeds from the
/// original game text boxes. Collapse every whitespace run to one space.
pub fn clean_flavor_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Describe a species' gender ratio from its API `gender_rate`.
///
/// The rate is the chance of being female in eighths; `-1` means the species
/// has no gender.
pub fn gender_description(rate: i32) -> String {
    if rate == -1 {
        return "Genderless".to_string();
    }
    let female = f64::from(rate) / 8.0 * 100.0;
    let male = f64::from(8 - rate) / 8.0 * 100.0;
    format!("{male:.1}% male, {female:.1}% female")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_id() {
        assert_eq!(format_id(1), "001");
        assert_eq!(format_id(7), "007");
        assert_eq!(format_id(25), "025");
        assert_eq!(format_id(151), "151");
        assert_eq!(format_id(999), "999");
    }

    #[test]
    fn test_format_id_wide() {
        assert_eq!(format_id(1000), "1000");
        assert_eq!(format_id(10001), "10001");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("viridian forest"), "Viridian Forest");
        assert_eq!(title_case("mt moon 1f"), "Mt Moon 1F");
        assert_eq!(title_case("KANTO ROUTE 2"), "Kanto Route 2");
        assert_eq!(title_case("s.s. anne"), "S.S. Anne");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("red"), "Red");
        assert_eq!(capitalize("level-up"), "Level-up");
        assert_eq!(capitalize("FIRERED"), "Firered");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_location_name() {
        assert_eq!(
            location_name("kanto-route-2-south-towards-viridian-city"),
            "Kanto Route 2 South Towards Viridian City"
        );
        assert_eq!(location_name("cerulean-cave-b1f"), "Cerulean Cave B1F");
        assert_eq!(location_name(""), "");
    }

    #[test]
    fn test_clean_flavor_text() {
        assert_eq!(
            clean_flavor_text("A strange seed was\nplanted on its\u{000C}back at birth."),
            "A strange seed was planted on its back at birth."
        );
        assert_eq!(clean_flavor_text("seed was \nplanted"), "seed was planted");
        assert_eq!(clean_flavor_text("ends here.\u{000C} Next"), "ends here. Next");
        assert_eq!(clean_flavor_text("\n leading and trailing \r\n"), "leading and trailing");
        assert_eq!(clean_flavor_text("no breaks"), "no breaks");
        assert_eq!(clean_flavor_text(""), "");
    }

    #[test]
    fn test_gender_description() {
        assert_eq!(gender_description(-1), "Genderless");
        assert_eq!(gender_description(0), "100.0% male, 0.0% female");
        assert_eq!(gender_description(1), "87.5% male, 12.5% female");
        assert_eq!(gender_description(4), "50.0% male, 50.0% female");
        assert_eq!(gender_description(8), "0.0% male, 100.0% female");
    }
}
