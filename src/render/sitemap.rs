// 🗺️ Sitemaps - company shards, a pages sitemap, and the index
//
// Company URLs are split into shards of `batch_size` entries; the index
// references every shard plus the pages sitemap.

use chrono::NaiveDate;

use super::format::escape_xml;
use super::urls;
use crate::projection::{ProcessedBusiness, Projections};

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One generated sitemap document and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapDocument {
    pub file: String,
    pub xml: String,
}

fn url_entry(out: &mut String, loc: &str, lastmod: &str) {
    out.push_str("  <url>\n    <loc>");
    out.push_str(&escape_xml(loc));
    out.push_str("</loc>\n    <lastmod>");
    out.push_str(lastmod);
    out.push_str("</lastmod>\n  </url>\n");
}

/// A `<urlset>` over root-relative page paths
pub fn urlset<'a, I>(paths: I, base_url: &str, lastmod: NaiveDate) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let lastmod = lastmod.format("%Y-%m-%d").to_string();
    let mut xml = format!("{}\n<urlset xmlns=\"{}\">\n", XML_HEADER, SITEMAP_NS);
    for path in paths {
        url_entry(&mut xml, &urls::absolute(base_url, path), &lastmod);
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Company sitemap shards, `batch_size` businesses each
///
/// An empty business list yields no shards.
pub fn company_shards(
    businesses: &[ProcessedBusiness],
    base_url: &str,
    lastmod: NaiveDate,
    batch_size: usize,
) -> Vec<SitemapDocument> {
    let batch_size = batch_size.max(1);

    businesses
        .chunks(batch_size)
        .enumerate()
        .map(|(i, chunk)| {
            let paths: Vec<String> = chunk.iter().map(|b| urls::business_path(&b.slug)).collect();
            SitemapDocument {
                file: urls::company_sitemap_file(i + 1),
                xml: urlset(paths.iter().map(String::as_str), base_url, lastmod),
            }
        })
        .collect()
}

/// Home, state, city and category pages in one `<urlset>`
pub fn pages_sitemap(projections: &Projections, base_url: &str, lastmod: NaiveDate) -> SitemapDocument {
    let mut paths = vec![String::new()];
    paths.extend(projections.states.iter().map(|s| urls::state_path(&s.slug)));
    paths.extend(projections.cities.iter().map(|c| urls::city_path(&c.slug)));
    paths.extend(projections.categories.iter().map(|c| urls::category_path(&c.slug)));

    SitemapDocument {
        file: urls::PAGES_SITEMAP_FILE.to_string(),
        xml: urlset(paths.iter().map(String::as_str), base_url, lastmod),
    }
}

/// `<sitemapindex>` referencing each shard file
pub fn sitemap_index(shard_files: &[String], base_url: &str, lastmod: NaiveDate) -> SitemapDocument {
    let lastmod = lastmod.format("%Y-%m-%d").to_string();
    let mut xml = format!("{}\n<sitemapindex xmlns=\"{}\">\n", XML_HEADER, SITEMAP_NS);
    for file in shard_files {
        xml.push_str("  <sitemap>\n    <loc>");
        xml.push_str(&escape_xml(&urls::absolute(base_url, file)));
        xml.push_str("</loc>\n    <lastmod>");
        xml.push_str(&lastmod);
        xml.push_str("</lastmod>\n  </sitemap>\n");
    }
    xml.push_str("</sitemapindex>\n");

    SitemapDocument {
        file: urls::SITEMAP_INDEX_FILE.to_string(),
        xml,
    }
}

/// Every sitemap document for a site: company shards, pages, then the index
pub fn build_sitemaps(
    projections: &Projections,
    base_url: &str,
    lastmod: NaiveDate,
    batch_size: usize,
) -> Vec<SitemapDocument> {
    let mut documents = company_shards(&projections.businesses, base_url, lastmod, batch_size);
    documents.push(pages_sitemap(projections, base_url, lastmod));

    let files: Vec<String> = documents.iter().map(|d| d.file.clone()).collect();
    documents.push(sitemap_index(&files, base_url, lastmod));
    documents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SITEMAP_BATCH_SIZE;

    fn create_business(i: usize) -> ProcessedBusiness {
        ProcessedBusiness {
            id: i.to_string(),
            title: format!("Salon {}", i),
            slug: format!("unknown-salon-{}-{}", i, i),
            website: None,
            phone: None,
            email: None,
            address: None,
            postal_code: None,
            latitude: None,
            longitude: None,
            city_id: None,
            city_name: None,
            city_slug: None,
            state_id: None,
            state_name: None,
            state_slug: None,
            category_ids: vec![],
            amenity_ids: vec![],
            payment_ids: vec![],
            detail_keys: vec![],
            detail_values: vec![],
            details: vec![],
            images: vec![],
            rating: None,
            reviews: None,
            working_hours: None,
            description: None,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_two_hundred_businesses_one_shard() {
        let businesses: Vec<_> = (1..=200).map(create_business).collect();
        let shards = company_shards(&businesses, "https://example.com", date(), DEFAULT_SITEMAP_BATCH_SIZE);

        assert_eq!(shards.len(), 1);
        assert_eq!(shards[0].file, "sitemaps/companies-1.xml");
        assert_eq!(shards[0].xml.matches("<url>").count(), 200);
    }

    #[test]
    fn test_shard_boundary() {
        let businesses: Vec<_> = (1..=201).map(create_business).collect();
        let shards = company_shards(&businesses, "https://example.com", date(), 200);

        assert_eq!(shards.len(), 2);
        assert_eq!(shards[1].xml.matches("<url>").count(), 1);
        assert!(shards[1].xml.contains("<loc>https://example.com/salon/unknown-salon-201-201/</loc>"));
    }

    #[test]
    fn test_no_businesses_no_shards() {
        assert!(company_shards(&[], "https://example.com", date(), 200).is_empty());
    }

    #[test]
    fn test_index_references_all_shards() {
        let projections = Projections {
            businesses: (1..=450).map(create_business).collect(),
            ..Default::default()
        };
        let documents = build_sitemaps(&projections, "https://example.com", date(), 200);

        // 3 company shards + pages + index
        assert_eq!(documents.len(), 5);
        let index = documents.last().unwrap();
        assert_eq!(index.file, "sitemap.xml");
        assert_eq!(index.xml.matches("<sitemap>").count(), 4);
        assert!(index.xml.contains("<loc>https://example.com/sitemaps/companies-3.xml</loc>"));
        assert!(index.xml.contains("<loc>https://example.com/sitemaps/pages.xml</loc>"));
        assert!(index.xml.contains("<lastmod>2024-03-01</lastmod>"));
    }

    #[test]
    fn test_locations_are_escaped() {
        let xml = urlset(["salon/a&b/"], "https://example.com", date());
        assert!(xml.contains("https://example.com/salon/a&amp;b/"));
    }
}
