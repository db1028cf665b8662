// URL / output path scheme, keyed by entity slug
//
// Page paths are root-relative directories ending in `/`; the file on disk
// is `<path>index.html`.

pub const SITEMAP_INDEX_FILE: &str = "sitemap.xml";
pub const PAGES_SITEMAP_FILE: &str = "sitemaps/pages.xml";

pub fn business_path(slug: &str) -> String {
    format!("salon/{}/", slug)
}

pub fn city_path(slug: &str) -> String {
    format!("city/{}/", slug)
}

pub fn state_path(slug: &str) -> String {
    format!("state/{}/", slug)
}

pub fn category_path(slug: &str) -> String {
    format!("category/{}/", slug)
}

/// File name of the Nth company sitemap shard (1-based)
pub fn company_sitemap_file(shard: usize) -> String {
    format!("sitemaps/companies-{}.xml", shard)
}

/// Output file for a page path: `"salon/x/"` → `"salon/x/index.html"`, `""` → `"index.html"`
pub fn page_file(path: &str) -> String {
    format!("{}index.html", path)
}

/// Absolute URL for a root-relative path
pub fn absolute(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(business_path("glow-5"), "salon/glow-5/");
        assert_eq!(page_file(&city_path("springfield-il1")), "city/springfield-il1/index.html");
        assert_eq!(page_file(""), "index.html");
        assert_eq!(company_sitemap_file(2), "sitemaps/companies-2.xml");
    }

    #[test]
    fn test_absolute() {
        assert_eq!(absolute("https://example.com/", "/state/illinois/"), "https://example.com/state/illinois/");
        assert_eq!(absolute("https://example.com", ""), "https://example.com/");
    }
}
