use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
};
use blik_studio::content::PROJECTS;
use chrono::NaiveDate;
use std::fmt::Write;

use super::AppState;

#[derive(Debug, Clone, PartialEq)]
struct SitemapEntry {
    location: String,
    change_frequency: &'static str,
    priority: f32,
}

fn entries(site_url: &str) -> Vec<SitemapEntry> {
    let entry = |path: &str, change_frequency, priority| SitemapEntry {
        location: format!("{site_url}{path}"),
        change_frequency,
        priority,
    };

    let mut entries = vec![
        entry("", "monthly", 1.0),
        entry("/projects", "weekly", 0.8),
        entry("/about", "monthly", 0.7),
    ];
    entries.extend(
        PROJECTS
            .iter()
            .map(|project| entry(&project.path(), "monthly", 0.6)),
    );
    entries
}

fn render(site_url: &str, last_modified: NaiveDate) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    let last_modified = last_modified.format("%Y-%m-%d");

    for entry in entries(site_url) {
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{last_modified}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(&entry.location),
            entry.change_frequency,
            entry.priority,
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
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

pub(super) async fn get_sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let today = chrono::Utc::now().date_naive();
    let body = render(&state.config.site_url, today);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/xml; charset=utf-8"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("public, max-age=3600"));
    (headers, body)
}

#[cfg(test)]
mod tests {
    use super::super::{router, SiteConfig};
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date")
    }

    #[test]
    fn lists_static_pages_and_every_project() {
        let entries = entries("https://blik-studio.cz");

        assert_eq!(entries.len(), 3 + PROJECTS.len());
        assert_eq!(entries[0].location, "https://blik-studio.cz");
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[1].change_frequency, "weekly");
        assert!(entries[3..]
            .iter()
            .all(|entry| entry.priority == 0.6 && entry.location.starts_with("https://blik-studio.cz/projects/")));
    }

    #[test]
    fn render_uses_date_and_escapes_locations() {
        let xml = render("https://example.com/?a=1&b=2", date());

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<lastmod>2026-03-14</lastmod>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.contains("a=1&amp;b=2"));
        assert!(!xml.contains("a=1&b=2"));
        assert_eq!(xml.matches("<url>").count(), 3 + PROJECTS.len());
    }

    #[tokio::test]
    async fn served_as_xml() {
        let state = super::super::AppState::new(SiteConfig::default()).expect("state");
        let response = router(state)
            .oneshot(Request::get("/sitemap.xml").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/xml; charset=utf-8")
        );
        let body = to_bytes(response.into_body(), 64 * 1024).await.expect("body");
        assert!(String::from_utf8_lossy(&body).contains("https://blik-studio.cz/projects/kidscalling-ios"));
    }
}
