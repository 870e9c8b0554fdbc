// src/blog/render.rs
// =============================================================================
// Turns the post working set into HTML fragments:
//
// - Featured article: the newest post as a large card, with a small bar
//   chart comparing all-time / this-year / last-year post counts
// - Post grid: the remaining posts, filtered by the active category
// - Homepage cards: the first N posts as compact cards
// - Category filter buttons reflecting the active selection
// - Loading / empty / error state blocks for the other pipeline outcomes
//
// The chart divides by the total post count. Callers check the working set
// is non-empty before rendering the featured block; the chart itself does
// not guard zero.
// =============================================================================

use super::post::{BlogPost, Category};
use chrono::Datelike;

/// Renders the newest post as the featured card, chart included.
///
/// Precondition: `posts` is non-empty; callers check before dispatching
/// into the rendered state.
pub fn render_featured(posts: &[BlogPost], current_year: i32) -> String {
    let post = &posts[0];

    format!(
        concat!(
            r#"<article class="featured-card category-{category}">"#,
            r#"<span class="post-category">{label}</span>"#,
            r#"<h2><a href="{url}">{title}</a></h2>"#,
            r#"<div class="post-meta">"#,
            r#"<span class="post-date">{date}</span>"#,
            r#"<span class="post-read-time">{minutes} min read</span>"#,
            "</div>",
            r#"<p class="post-excerpt">{excerpt}</p>"#,
            r#"<a class="read-more" href="{url}">Read more</a>"#,
            "{chart}",
            "</article>"
        ),
        category = post.category.slug(),
        label = post.category.label(),
        url = escape(&post.url),
        title = escape(&post.title),
        date = escape(&post.display_date),
        minutes = post.read_minutes,
        excerpt = escape(&post.excerpt),
        chart = render_archive_chart(posts, current_year),
    )
}

/// The three-bar archive chart: all time, this year, last year.
pub fn render_archive_chart(posts: &[BlogPost], current_year: i32) -> String {
    let total = posts.len();
    let this_year = count_in_year(posts, current_year);
    let last_year = count_in_year(posts, current_year - 1);

    let rows = [
        ("All time", total),
        ("This year", this_year),
        ("Last year", last_year),
    ]
    .into_iter()
    .map(|(label, count)| {
        let percent = count as f64 * 100.0 / total as f64;
        format!(
            concat!(
                r#"<div class="chart-row">"#,
                r#"<span class="chart-label">{label}</span>"#,
                r#"<div class="chart-bar" style="width: {percent:.0}%"></div>"#,
                r#"<span class="chart-count">{count}</span>"#,
                "</div>"
            ),
            label = label,
            percent = percent,
            count = count,
        )
    })
    .collect::<String>();

    format!(r#"<div class="archive-chart">{}</div>"#, rows)
}

/// Counts posts whose normalized date falls in the given year.
/// Undated posts are not counted.
fn count_in_year(posts: &[BlogPost], year: i32) -> usize {
    posts
        .iter()
        .filter(|post| post.date.map_or(false, |date| date.year() == year))
        .count()
}

/// Renders the post grid, keeping only posts matching the active category.
/// `None` means the "all" selection.
pub fn render_posts(posts: &[BlogPost], active: Option<Category>) -> String {
    posts
        .iter()
        .filter(|post| active.map_or(true, |category| post.category == category))
        .map(render_post_card)
        .collect()
}

/// Compact cards for the homepage's latest-posts strip.
pub fn render_homepage_cards(posts: &[BlogPost], count: usize) -> String {
    posts
        .iter()
        .take(count)
        .map(|post| {
            format!(
                concat!(
                    r#"<article class="news-card">"#,
                    r#"<span class="news-date">{date}</span>"#,
                    r#"<h3><a href="{url}">{title}</a></h3>"#,
                    r#"<p class="news-excerpt">{excerpt}</p>"#,
                    "</article>"
                ),
                date = escape(&post.display_date),
                url = escape(&post.url),
                title = escape(&post.title),
                excerpt = escape(&post.excerpt),
            )
        })
        .collect()
}

/// The filter button row: "All" plus every category observed in the feed.
pub fn render_category_buttons(categories: &[Category], active: Option<Category>) -> String {
    let mut buttons = vec![filter_button("all", "All", active.is_none())];

    for category in categories {
        buttons.push(filter_button(
            category.slug(),
            category.label(),
            active == Some(*category),
        ));
    }

    buttons.concat()
}

/// Shown while the feed is still being aggregated.
pub fn render_loading_state() -> String {
    r#"<div class="blog-state blog-loading">Loading posts&hellip;</div>"#.to_string()
}

/// Shown when the index yielded no posts at all.
pub fn render_empty_state() -> String {
    r#"<div class="blog-state blog-empty">No posts yet. Check back soon.</div>"#.to_string()
}

/// Shown when the index fetch itself failed.
pub fn render_error_state() -> String {
    r#"<div class="blog-state blog-error">Posts are unavailable right now.</div>"#.to_string()
}

fn render_post_card(post: &BlogPost) -> String {
    format!(
        concat!(
            r#"<article class="post-card category-{category}">"#,
            r#"<span class="post-category">{label}</span>"#,
            r#"<h3><a href="{url}">{title}</a></h3>"#,
            r#"<div class="post-meta">"#,
            r#"<span class="post-date">{date}</span>"#,
            r#"<span class="post-read-time">{minutes} min read</span>"#,
            "</div>",
            r#"<p class="post-excerpt">{excerpt}</p>"#,
            "</article>"
        ),
        category = post.category.slug(),
        label = post.category.label(),
        url = escape(&post.url),
        title = escape(&post.title),
        date = escape(&post.display_date),
        minutes = post.read_minutes,
        excerpt = escape(&post.excerpt),
    )
}

fn filter_button(slug: &str, label: &str, active: bool) -> String {
    let class = if active { "filter-btn active" } else { "filter-btn" };
    format!(
        r#"<button class="{}" data-category="{}">{}</button>"#,
        class, slug, label
    )
}

// Scraped text goes straight into markup we emit, so the usual four
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::post::tests::post;
    use chrono::NaiveDate;

    fn dated(title: &str, y: i32, m: u32, d: u32) -> BlogPost {
        post(title, NaiveDate::from_ymd_opt(y, m, d))
    }

    #[test]
    fn test_featured_includes_chart_and_title() {
        let posts = vec![
            dated("Benchmark Roundup", 2025, 1, 7),
            dated("Older Post", 2024, 5, 1),
        ];

        let markup = render_featured(&posts, 2025);

        assert!(markup.contains("Benchmark Roundup"));
        assert!(markup.contains("Read more"));
        assert!(markup.contains("archive-chart"));
        // 2 posts total, 1 this year, 1 last year
        assert!(markup.contains("width: 100%"));
        assert!(markup.matches("width: 50%").count() == 2);
    }

    #[test]
    fn test_render_posts_filters_by_category() {
        let posts = vec![
            post("A research paper", None),
            post("Plain announcement", None),
        ];

        let all = render_posts(&posts, None);
        assert!(all.contains("A research paper"));
        assert!(all.contains("Plain announcement"));

        let filtered = render_posts(&posts, Some(Category::Research));
        assert!(filtered.contains("A research paper"));
        assert!(!filtered.contains("Plain announcement"));
    }

    #[test]
    fn test_homepage_cards_capped() {
        let posts = vec![
            dated("One", 2025, 1, 3),
            dated("Two", 2025, 1, 2),
            dated("Three", 2025, 1, 1),
        ];

        let markup = render_homepage_cards(&posts, 2);
        assert!(markup.contains("One"));
        assert!(markup.contains("Two"));
        assert!(!markup.contains("Three"));
    }

    #[test]
    fn test_category_buttons_mark_active() {
        let markup = render_category_buttons(
            &[Category::Research, Category::Deployment],
            Some(Category::Research),
        );

        assert!(markup.contains(r#"data-category="all""#));
        assert!(markup.contains(
            r#"<button class="filter-btn active" data-category="research">Research</button>"#
        ));
        assert!(markup.contains(r#"<button class="filter-btn" data-category="deployment">"#));
    }

    #[test]
    fn test_markup_escapes_scraped_text() {
        let mut p = post("Tags <em> & friends", None);
        p.excerpt = r#"He said "hi""#.to_string();

        let markup = render_posts(&[p], None);
        assert!(markup.contains("Tags &lt;em&gt; &amp; friends"));
        assert!(markup.contains("&quot;hi&quot;"));
        assert!(!markup.contains("<em>"));
    }
}
