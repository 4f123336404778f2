//! Unit coverage for URL resolution, ordering and file splitting.

use chrono::{DateTime, Duration, TimeZone, Utc};
use oshikatsu_core::{CatalogEntry, EntityKind};
use rstest::{fixture, rstest};

use crate::{
    DEFAULT_STATIC_PATHS, PageKind, PageRecord, SitemapConfig, SitemapError, SitemapGenerator,
    page_records,
};

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn generator() -> SitemapGenerator {
    SitemapGenerator::new("https://oshi.example/fan", SitemapConfig::default())
        .expect("valid generator")
}

fn entry(kind: EntityKind, slug: &str, link_count: u32) -> CatalogEntry {
    CatalogEntry {
        kind,
        id: slug.to_owned(),
        slug: slug.to_owned(),
        updated_at: None,
        link_count,
    }
}

#[rstest]
#[case("not a url")]
#[case("")]
fn rejects_unparseable_base(#[case] base: &str) {
    let err = SitemapGenerator::new(base, SitemapConfig::default()).expect_err("invalid base");
    assert!(matches!(err, SitemapError::InvalidBaseUrl { .. }));
}

#[rstest]
#[case("mailto:fan@oshi.example")]
#[case("ftp://oshi.example")]
fn rejects_non_web_base(#[case] base: &str) {
    let err = SitemapGenerator::new(base, SitemapConfig::default()).expect_err("unsupported base");
    assert!(matches!(err, SitemapError::UnsupportedBaseUrl { .. }));
}

#[rstest]
#[case(0)]
#[case(50_001)]
fn rejects_invalid_file_limits(#[case] max: usize) {
    let config = SitemapConfig::default().with_max_urls_per_file(max);
    let err = SitemapGenerator::new("https://oshi.example", config).expect_err("invalid limit");
    assert!(matches!(err, SitemapError::InvalidMaxUrls { value, .. } if value == max));
}

#[rstest]
fn base_path_gains_trailing_slash(generator: SitemapGenerator) {
    assert_eq!(generator.base_url().as_str(), "https://oshi.example/fan/");
}

#[rstest]
#[case("/", "https://oshi.example/fan/")]
#[case("/episodes/ep-1", "https://oshi.example/fan/episodes/ep-1")]
#[case("items/denim jacket", "https://oshi.example/fan/items/denim%20jacket")]
#[case("/locations/カフェ", "https://oshi.example/fan/locations/%E3%82%AB%E3%83%95%E3%82%A7")]
fn joins_paths_under_the_base(
    generator: SitemapGenerator,
    #[case] path: &str,
    #[case] expected: &str,
) {
    assert_eq!(generator.page_url(path).expect("join").as_str(), expected);
}

#[rstest]
#[case("https://elsewhere.example/x")]
#[case("../admin")]
fn rejects_paths_leaving_the_base(generator: SitemapGenerator, #[case] path: &str) {
    let err = generator.page_url(path).expect_err("foreign path");
    assert!(matches!(err, SitemapError::ForeignPath { .. }));
}

#[rstest]
fn duplicate_urls_keep_the_first_record(generator: SitemapGenerator, now: DateTime<Utc>) {
    let pages = [
        PageRecord::static_page("/about"),
        PageRecord {
            kind: PageKind::Celebrity,
            path: "about".into(),
            updated_at: None,
            link_count: 0,
        },
    ];
    let entries = generator.entries(&pages, now).expect("entries");
    assert_eq!(entries.len(), 1);
    assert!(entries.iter().all(|e| e.priority.tenths() == 4));
}

#[rstest]
fn orders_by_priority_then_url(generator: SitemapGenerator, now: DateTime<Utc>) {
    let entries = [
        entry(EntityKind::Item, "b-bag", 0),
        entry(EntityKind::Item, "a-cap", 0),
        entry(EntityKind::Celebrity, "aoi", 0),
        entry(EntityKind::Episode, "ep-1", 0),
    ];
    let pages = page_records(&entries, DEFAULT_STATIC_PATHS.iter().copied());
    let ordered = generator.entries(&pages, now).expect("entries");
    let paths: Vec<_> = ordered.iter().map(|e| e.loc.path().to_owned()).collect();
    assert_eq!(
        paths,
        [
            "/fan/",
            "/fan/celebrities/aoi",
            "/fan/episodes/ep-1",
            "/fan/items/a-cap",
            "/fan/items/b-bag",
            "/fan/about",
            "/fan/contact",
            "/fan/privacy",
            "/fan/terms",
        ]
    );
}

#[rstest]
fn lastmod_uses_the_update_date(generator: SitemapGenerator, now: DateTime<Utc>) {
    let page = PageRecord::static_page("/terms").with_updated_at(now - Duration::days(40));
    let files = generator.generate(&[page], now).expect("generate");
    let contents = files.first().map(|f| f.contents.as_str()).unwrap_or_default();
    assert!(contents.contains("<lastmod>2024-04-22</lastmod>"));
    assert!(contents.contains("<changefreq>monthly</changefreq>"));
    assert!(contents.contains("<priority>0.4</priority>"));
}

#[rstest]
fn splits_output_behind_an_index(now: DateTime<Utc>) {
    let config = SitemapConfig::default().with_max_urls_per_file(2);
    let generator = SitemapGenerator::new("https://oshi.example", config).expect("generator");
    let entries: Vec<_> = (0..5)
        .map(|n| entry(EntityKind::Episode, &format!("ep-{n}"), 0))
        .collect();
    let files = generator
        .generate(&page_records(&entries, std::iter::empty()), now)
        .expect("generate");
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        ["sitemap-1.xml", "sitemap-2.xml", "sitemap-3.xml", "sitemap.xml"]
    );
    let index = files.last().map(|f| f.contents.as_str()).unwrap_or_default();
    assert!(index.contains("<sitemapindex"));
    assert!(index.contains("<loc>https://oshi.example/sitemap-3.xml</loc>"));
    assert!(index.contains("<lastmod>2024-06-01</lastmod>"));
}

#[rstest]
fn empty_input_renders_an_empty_urlset(generator: SitemapGenerator, now: DateTime<Utc>) {
    let files = generator.generate(&[], now).expect("generate");
    assert_eq!(files.len(), 1);
    assert!(files.iter().all(|f| f.contents.contains("<urlset")));
    assert!(files.iter().all(|f| !f.contents.contains("<url>")));
}
