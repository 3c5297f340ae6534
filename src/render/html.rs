//! Page markup
//!
//! Small HTML glue around the normalized content. Pages are assembled with
//! plain string building, everything dynamic goes through `escape_html`.

use crate::config::SiteConfig;
use crate::content::{PostListing, PostPage, PostSummary};
use crate::render::rich_text::{self, escape_html};
use chrono::{DateTime, Utc};

/// Render the home page listing
pub fn home_page(config: &SiteConfig, listing: &PostListing, preview: bool) -> String {
    let mut body = String::from("<section class=\"post-list\">\n");
    for post in &listing.posts {
        body.push_str(&summary_item(post));
    }
    body.push_str("</section>\n");

    if let Some(cursor) = &listing.next_page {
        let encoded: String =
            url::form_urlencoded::byte_serialize(cursor.as_str().as_bytes()).collect();
        body.push_str(&format!(
            "<a class=\"load-more\" href=\"/?cursor={encoded}\">Load more posts</a>\n"
        ));
    }

    layout(config, &config.title, &body, preview)
}

fn summary_item(post: &PostSummary) -> String {
    let mut html = String::from("<article class=\"post-summary\">\n");
    html.push_str(&format!(
        "<h2><a href=\"/post/{}\">{}</a></h2>\n",
        escape_html(&post.uid),
        escape_html(&post.title)
    ));
    html.push_str(&format!("<p>{}</p>\n", escape_html(&post.subtitle)));
    html.push_str(&format!(
        "<div class=\"info\">{}<span class=\"author\">{}</span></div>\n",
        time_tag(post.first_publication_date.as_ref()),
        escape_html(&post.author)
    ));
    html.push_str("</article>\n");
    html
}

/// Render a full post page
pub fn post_page(config: &SiteConfig, page: &PostPage) -> String {
    let post = &page.post;
    let mut body = String::new();

    if let Some(banner) = &post.banner {
        body.push_str(&format!(
            "<div class=\"banner\"><img src=\"{}\" alt=\"\"></div>\n",
            escape_html(&banner.url)
        ));
    }

    body.push_str(&format!("<h1>{}</h1>\n", escape_html(&post.title)));
    body.push_str(&format!(
        "<div class=\"info\">{}<span class=\"author\">{}</span><span class=\"reading-time\">{} min</span></div>\n",
        time_tag(post.first_publication_date.as_ref()),
        escape_html(&post.author),
        page.reading_minutes
    ));

    for section in &post.content {
        body.push_str("<section class=\"post-section\">\n");
        if !section.heading.is_empty() {
            body.push_str(&format!("<h2>{}</h2>\n", escape_html(&section.heading)));
        }
        body.push_str(&rich_text::as_html(&section.body));
        body.push_str("</section>\n");
    }

    body.push_str(&neighbor_nav(page));

    if config.comments.enable && !config.comments.repo.is_empty() {
        body.push_str(&comments_embed(config));
    }

    layout(config, &post.title, &body, page.preview)
}

fn neighbor_nav(page: &PostPage) -> String {
    let mut html = String::from("<nav class=\"post-neighbors\">\n");
    if let Some(prev) = &page.neighbors.previous {
        html.push_str(&format!(
            "<div class=\"neighbor previous\"><a href=\"/post/{}\">{}</a><span>Previous post</span></div>\n",
            escape_html(&prev.uid),
            escape_html(&prev.title)
        ));
    }
    if let Some(next) = &page.neighbors.next {
        html.push_str(&format!(
            "<div class=\"neighbor next\"><a href=\"/post/{}\">{}</a><span>Next post</span></div>\n",
            escape_html(&next.uid),
            escape_html(&next.title)
        ));
    }
    html.push_str("</nav>\n");
    html
}

/// Utterances comment thread, loaded client side
fn comments_embed(config: &SiteConfig) -> String {
    format!(
        "<section id=\"comments\"><script src=\"https://utteranc.es/client.js\" repo=\"{}\" issue-term=\"{}\" theme=\"{}\" crossorigin=\"anonymous\" async></script></section>\n",
        escape_html(&config.comments.repo),
        escape_html(&config.comments.issue_term),
        escape_html(&config.comments.theme)
    )
}

/// Render the not-found page
pub fn not_found(config: &SiteConfig) -> String {
    layout(
        config,
        "Post not found",
        "<h1>404</h1>\n<p>This post does not exist. <a href=\"/\">Back to all posts</a></p>\n",
        false,
    )
}

fn layout(config: &SiteConfig, title: &str, body: &str, preview: bool) -> String {
    let mut html = String::from("<!DOCTYPE html>\n");
    html.push_str(&format!("<html lang=\"{}\">\n", escape_html(&config.language)));
    html.push_str("<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{} | {}</title>\n",
        escape_html(title),
        escape_html(&config.title)
    ));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<header><a href=\"/\">{}</a></header>\n",
        escape_html(&config.title)
    ));
    if preview {
        html.push_str(
            "<aside class=\"preview-banner\">Preview mode <a href=\"/api/exit-preview\">Exit preview</a></aside>\n",
        );
    }
    html.push_str("<main>\n");
    html.push_str(body);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn time_tag(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(date) => format!(
            "<time datetime=\"{}\">{}</time>",
            date.format("%Y-%m-%dT%H:%M:%S%:z"),
            date.format("%d %b %Y")
        ),
        None => String::new(),
    }
}
