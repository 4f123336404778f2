//! Rendering of sitemaps.org 0.9 documents.

use chrono::NaiveDate;
use url::Url;

use crate::SitemapEntry;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Escape the five XML special characters.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Render a `<urlset>` document.
pub(crate) fn render_urlset(entries: &[SitemapEntry]) -> String {
    let mut out = String::new();
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!("<urlset xmlns=\"{SITEMAP_NAMESPACE}\">\n"));
    for entry in entries {
        out.push_str("  <url>\n");
        out.push_str(&format!("    <loc>{}</loc>\n", escape(entry.loc.as_str())));
        if let Some(lastmod) = entry.lastmod {
            out.push_str(&format!("    <lastmod>{}</lastmod>\n", format_date(lastmod)));
        }
        out.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq));
        out.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        out.push_str("  </url>\n");
    }
    out.push_str("</urlset>\n");
    out
}

/// Render a `<sitemapindex>` document pointing at `locations`.
pub(crate) fn render_index(locations: &[Url], lastmod: NaiveDate) -> String {
    let stamp = format_date(lastmod);
    let mut out = String::new();
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!("<sitemapindex xmlns=\"{SITEMAP_NAMESPACE}\">\n"));
    for location in locations {
        out.push_str("  <sitemap>\n");
        out.push_str(&format!("    <loc>{}</loc>\n", escape(location.as_str())));
        out.push_str(&format!("    <lastmod>{stamp}</lastmod>\n"));
        out.push_str("  </sitemap>\n");
    }
    out.push_str("</sitemapindex>\n");
    out
}
