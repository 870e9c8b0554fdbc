// src/blog/mod.rs
// =============================================================================
// The blog aggregation pipeline.
//
// Submodules:
// - post: the BlogPost model, categories, ordering
// - date: raw date text -> normalized date
// - index: scrapes post skeletons from the external index page
// - enrich: second-pass page fetches, batched
// - render: HTML fragments for every pipeline outcome
//
// One run moves through Loading -> Rendered | EmptyRendered | ErrorRendered;
// there is no path back and no cancellation. Only the index fetch is fatal
// to the pipeline; everything after it degrades per post.
// =============================================================================

mod date;
mod enrich;
mod index;
mod post;
mod render;

pub use enrich::{fetch_feed, BlogFeed, ENRICH_BATCH_SIZE, MIN_READ_MINUTES};
pub use index::{fetch_index, BLOG_INDEX_URL};
pub use post::{sort_posts, BlogPost, Category};
pub use render::{
    render_category_buttons, render_empty_state, render_error_state, render_featured,
    render_homepage_cards, render_loading_state, render_posts,
};

/// Posts shown on the homepage's latest-posts strip.
pub const HOMEPAGE_POST_COUNT: usize = 3;
