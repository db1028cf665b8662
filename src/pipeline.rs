// 🏭 Pipeline - load → resolve → aggregate → project → render → write
//
// Strictly sequential. The first error aborts the run; nothing is retried.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::aggregation::aggregate;
use crate::config::SiteConfig;
use crate::loader::{load_archive, Dataset};
use crate::projection::{project, Projections};
use crate::render::sitemap::build_sitemaps;
use crate::render::SiteRenderer;
use crate::resolver::{resolve, ResolutionStats};
use crate::sink::{write_snapshots, Sink};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub businesses: usize,
    pub cities: usize,
    pub states: usize,
    pub categories: usize,
    pub resolution: ResolutionStats,
    pub pages: usize,
    pub sitemaps: usize,
    pub snapshots: usize,
}

impl BuildReport {
    fn for_dataset(dataset: &Dataset, resolution: ResolutionStats) -> Self {
        BuildReport {
            businesses: dataset.businesses.len(),
            cities: dataset.cities.len(),
            states: dataset.states.len(),
            categories: dataset.categories.len(),
            resolution,
            ..Default::default()
        }
    }

    pub fn documents_written(&self) -> usize {
        self.pages + self.sitemaps + self.snapshots
    }

    pub fn summary(&self) -> String {
        format!(
            "{} businesses, {} cities, {} states, {} categories\nresolution: {}\nwrote {} pages, {} sitemaps, {} snapshots",
            self.businesses,
            self.cities,
            self.states,
            self.categories,
            self.resolution.summary(),
            self.pages,
            self.sitemaps,
            self.snapshots
        )
    }
}

/// Resolve, count and project a loaded dataset
pub fn build_projections(dataset: &Dataset) -> (Projections, ResolutionStats) {
    let resolved = {
        let _span = info_span!("resolve").entered();
        resolve(dataset)
    };
    let counts = {
        let _span = info_span!("aggregate").entered();
        aggregate(&resolved)
    };
    let _span = info_span!("project").entered();
    (project(&resolved, &counts), resolved.stats)
}

/// Generate the whole site for a dataset into `sink`
pub fn generate(
    dataset: &Dataset,
    config: &SiteConfig,
    lastmod: NaiveDate,
    sink: &dyn Sink,
) -> Result<BuildReport> {
    let (projections, resolution) = build_projections(dataset);
    let mut report = BuildReport::for_dataset(dataset, resolution);

    {
        let _span = info_span!("render_pages").entered();
        let renderer = SiteRenderer::new(&config.site_name, &config.base_url)?;
        for page in renderer.render_site(&projections)? {
            sink.write(&page.file, page.html.as_bytes())?;
            report.pages += 1;
        }
    }

    {
        let _span = info_span!("render_sitemaps").entered();
        for document in build_sitemaps(
            &projections,
            &config.base_url,
            lastmod,
            config.sitemap_batch_size,
        ) {
            sink.write(&document.file, document.xml.as_bytes())?;
            report.sitemaps += 1;
        }
    }

    report.snapshots = write_snapshots(sink, &projections)?;

    info!(
        pages = report.pages,
        sitemaps = report.sitemaps,
        snapshots = report.snapshots,
        "Site generated"
    );
    Ok(report)
}

/// Load the configured archive and generate the site, dated today
pub fn run(config: &SiteConfig, sink: &dyn Sink) -> Result<BuildReport> {
    let dataset = {
        let _span = info_span!("load").entered();
        load_archive(&config.archive, &config.members)?
    };
    generate(&dataset, config, Utc::now().date_naive(), sink)
}

/// Load and resolve only; nothing is rendered or written
pub fn inspect(config: &SiteConfig) -> Result<BuildReport> {
    let dataset = load_archive(&config.archive, &config.members)?;
    let (_, resolution) = build_projections(&dataset);
    Ok(BuildReport::for_dataset(&dataset, resolution))
}
