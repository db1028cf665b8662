// Salon Directory - Core Library
// Exposes the generation pipeline for the CLI, the preview server, and tests

pub mod aggregation;
pub mod config;
pub mod entities;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod resolver;
pub mod sink;
pub mod slug;

// Re-export commonly used types
pub use aggregation::{aggregate, Counts};
pub use config::{ArchiveMembers, SiteConfig, DEFAULT_SITEMAP_BATCH_SIZE};
pub use entities::{
    Business, Category, CategoryRegistry, City, CityRegistry, Entity,
    Registry, State, StateRegistry,
};
pub use error::{LoadError, LoadResult};
pub use loader::{load_archive, load_from_reader, Dataset};
pub use pipeline::{build_projections, generate, inspect, run, BuildReport};
pub use projection::{
    project, ProcessedBusiness, ProcessedCategory, ProcessedCity, ProcessedState, Projections,
    UNKNOWN_STATE_LABEL, UNNAMED_LABEL,
};
pub use render::sitemap::{build_sitemaps, SitemapDocument};
pub use render::{Page, SiteRenderer};
pub use resolver::{resolve, CitySource, Resolution, ResolutionStats, ResolvedDataset, StateSource};
pub use sink::{write_snapshots, FileSink, MemorySink, Sink};
pub use slug::slugify;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
