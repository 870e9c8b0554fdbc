// src/stats/render.rs
// =============================================================================
// Renders the two stat tiles (stars, forks) as an HTML fragment.
//
// Number formatting follows the usual human scale: 1.0K from a thousand up,
// 1.0M from a million up, plain integers below that.
// =============================================================================

use super::github::StatTotals;

/// Formats a count with a human-scale suffix.
///
/// Examples: 999 -> "999", 1000 -> "1.0K", 1500 -> "1.5K", 1000000 -> "1.0M"
pub fn format_number(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// The two labeled stat tiles for resolved totals.
pub fn render_stat_tiles(totals: &StatTotals) -> String {
    tiles(&format_number(totals.stars), &format_number(totals.forks), "")
}

/// Pending-state tiles, shown until the aggregation lands.
pub fn render_loading_tiles() -> String {
    tiles("&hellip;", "&hellip;", " stat-loading")
}

/// Failed-state tiles: em-dash placeholders instead of numbers.
pub fn render_error_tiles() -> String {
    tiles("&mdash;", "&mdash;", " stat-error")
}

fn tiles(stars: &str, forks: &str, extra_class: &str) -> String {
    format!(
        concat!(
            r#"<div class="stat-tile{extra}">"#,
            r#"<span class="stat-value">{stars}</span>"#,
            r#"<span class="stat-label">GitHub Stars</span>"#,
            "</div>",
            r#"<div class="stat-tile{extra}">"#,
            r#"<span class="stat-value">{forks}</span>"#,
            r#"<span class="stat-label">Forks</span>"#,
            "</div>"
        ),
        extra = extra_class,
        stars = stars,
        forks = forks,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.0K");
        assert_eq!(format_number(1500), "1.5K");
        assert_eq!(format_number(1_000_000), "1.0M");
        assert_eq!(format_number(0), "0");
    }

    #[test]
    fn test_render_stat_tiles() {
        let markup = render_stat_tiles(&StatTotals {
            stars: 1500,
            forks: 42,
        });
        assert!(markup.contains("1.5K"));
        assert!(markup.contains("42"));
        assert!(markup.contains("GitHub Stars"));
        assert!(markup.contains("Forks"));
    }

    #[test]
    fn test_render_error_tiles_show_placeholders() {
        let markup = render_error_tiles();
        assert_eq!(markup.matches("&mdash;").count(), 2);
        assert!(markup.contains("stat-error"));
    }
}
