// 🖨️ Renderer - projections → HTML pages
//
// Templates are built in (see `templates`). Display formatting happens in
// Rust before rendering; templates only lay out prepared values.

pub mod format;
pub mod sitemap;
pub mod templates;
pub mod urls;

use anyhow::{Context as AnyhowContext, Result};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::projection::{
    ProcessedBusiness, ProcessedCategory, ProcessedCity, ProcessedState, Projections,
};
use self::format::{format_phone, opening_hours, phone_href, star_rating};

// ============================================================================
// VIEW MODELS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
struct Link {
    name: String,
    path: String,
    salon_count: usize,
}

#[derive(Debug, Clone, Serialize)]
struct Listing {
    title: String,
    path: String,
    address: Option<String>,
    location: Option<String>,
    stars: String,
}

#[derive(Debug, Clone, Serialize)]
struct PhoneView {
    display: String,
    href: String,
}

/// One rendered HTML page and its output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub file: String,
    pub html: String,
}

fn location_label(business: &ProcessedBusiness) -> Option<String> {
    match (business.city_name.as_deref(), business.state_name.as_deref()) {
        (Some(city), Some(state)) => Some(format!("{}, {}", city, state)),
        (Some(city), None) => Some(city.to_string()),
        (None, Some(state)) => Some(state.to_string()),
        (None, None) => None,
    }
}

fn listing(business: &ProcessedBusiness) -> Listing {
    Listing {
        title: business.title.clone(),
        path: urls::business_path(&business.slug),
        address: business.address.clone(),
        location: location_label(business),
        stars: star_rating(business.rating),
    }
}

fn city_link(city: &ProcessedCity) -> Link {
    Link {
        name: city.city.clone(),
        path: urls::city_path(&city.slug),
        salon_count: city.salon_count,
    }
}

fn state_link(state: &ProcessedState) -> Link {
    Link {
        name: state.state.clone(),
        path: urls::state_path(&state.slug),
        salon_count: state.salon_count,
    }
}

fn category_link(category: &ProcessedCategory) -> Link {
    Link {
        name: category.category.clone(),
        path: urls::category_path(&category.slug),
        salon_count: category.salon_count,
    }
}

// ============================================================================
// LOOKUP
// ============================================================================

/// id → projection maps over one [`Projections`]
pub struct Lookup<'a> {
    pub projections: &'a Projections,
    businesses: HashMap<&'a str, &'a ProcessedBusiness>,
    cities: HashMap<&'a str, &'a ProcessedCity>,
    states: HashMap<&'a str, &'a ProcessedState>,
    categories: HashMap<&'a str, &'a ProcessedCategory>,
}

impl<'a> Lookup<'a> {
    pub fn new(projections: &'a Projections) -> Self {
        // First record wins for repeated ids, matching the registries
        fn index<'b, T>(items: &'b [T], id: impl Fn(&'b T) -> &'b str) -> HashMap<&'b str, &'b T> {
            let mut map = HashMap::with_capacity(items.len());
            for item in items {
                map.entry(id(item)).or_insert(item);
            }
            map
        }

        Lookup {
            projections,
            businesses: index(&projections.businesses, |b| b.id.as_str()),
            cities: index(&projections.cities, |c| c.id.as_str()),
            states: index(&projections.states, |s| s.id.as_str()),
            categories: index(&projections.categories, |c| c.id.as_str()),
        }
    }

    fn businesses(&self, ids: &[String]) -> Vec<&'a ProcessedBusiness> {
        ids.iter().filter_map(|id| self.businesses.get(id.as_str()).copied()).collect()
    }

    fn city(&self, id: Option<&str>) -> Option<&'a ProcessedCity> {
        id.and_then(|id| self.cities.get(id).copied())
    }

    fn state(&self, id: Option<&str>) -> Option<&'a ProcessedState> {
        id.and_then(|id| self.states.get(id).copied())
    }
}

// ============================================================================
// SITE RENDERER
// ============================================================================

pub struct SiteRenderer {
    tera: Tera,
    site_name: String,
    base_url: String,
}

impl SiteRenderer {
    pub fn new(site_name: &str, base_url: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", templates::BASE_HTML),
            ("index.html", templates::INDEX_HTML),
            ("state.html", templates::STATE_HTML),
            ("city.html", templates::CITY_HTML),
            ("category.html", templates::CATEGORY_HTML),
            ("business.html", templates::BUSINESS_HTML),
        ])
        .context("Invalid built-in template")?;

        Ok(SiteRenderer {
            tera,
            site_name: site_name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn context(&self, path: &str) -> Context {
        let mut context = Context::new();
        context.insert("site_name", &self.site_name);
        context.insert("canonical", &urls::absolute(&self.base_url, path));
        context
    }

    fn render(&self, template: &str, context: &Context) -> Result<String> {
        self.tera
            .render(template, context)
            .with_context(|| format!("Failed to render {}", template))
    }

    pub fn render_index(&self, lookup: &Lookup) -> Result<String> {
        let projections = lookup.projections;
        let mut context = self.context("");
        context.insert("business_count", &projections.businesses.len());
        context.insert(
            "states",
            &projections.states.iter().map(state_link).collect::<Vec<_>>(),
        );
        context.insert(
            "categories",
            &projections.categories.iter().map(category_link).collect::<Vec<_>>(),
        );
        self.render("index.html", &context)
    }

    pub fn render_state(&self, state: &ProcessedState, lookup: &Lookup) -> Result<String> {
        let cities: Vec<Link> = state
            .city_ids
            .iter()
            .filter_map(|id| lookup.city(Some(id.as_str())))
            .map(city_link)
            .collect();

        let mut context = self.context(&urls::state_path(&state.slug));
        context.insert("state", state);
        context.insert("cities", &cities);
        self.render("state.html", &context)
    }

    pub fn render_city(&self, city: &ProcessedCity, lookup: &Lookup) -> Result<String> {
        let listings: Vec<Listing> = lookup
            .businesses(&city.business_ids)
            .into_iter()
            .map(listing)
            .collect();

        let mut context = self.context(&urls::city_path(&city.slug));
        context.insert("city", city);
        context.insert("state", &lookup.state(city.state_id.as_deref()).map(state_link));
        context.insert("listings", &listings);
        self.render("city.html", &context)
    }

    pub fn render_category(&self, category: &ProcessedCategory, lookup: &Lookup) -> Result<String> {
        let listings: Vec<Listing> = lookup
            .businesses(&category.business_ids)
            .into_iter()
            .map(listing)
            .collect();

        let mut context = self.context(&urls::category_path(&category.slug));
        context.insert("category", category);
        context.insert("listings", &listings);
        self.render("category.html", &context)
    }

    pub fn render_business(&self, business: &ProcessedBusiness, lookup: &Lookup) -> Result<String> {
        let phone = business.phone.as_deref().map(|raw| PhoneView {
            display: format_phone(raw),
            href: phone_href(raw),
        });
        let hours = business
            .working_hours
            .as_deref()
            .map(opening_hours)
            .unwrap_or_default();
        let categories: Vec<Link> = business
            .category_ids
            .iter()
            .filter_map(|id| lookup.categories.get(id.as_str()).copied())
            .map(category_link)
            .collect();

        let mut context = self.context(&urls::business_path(&business.slug));
        context.insert("business", business);
        context.insert("location", &location_label(business));
        context.insert("stars", &star_rating(business.rating));
        context.insert("phone", &phone);
        context.insert("hours", &hours);
        context.insert("categories", &categories);
        context.insert("city", &lookup.city(business.city_id.as_deref()).map(city_link));
        context.insert("state", &lookup.state(business.state_id.as_deref()).map(state_link));
        self.render("business.html", &context)
    }

    /// Render every page of the site, keyed by output file
    pub fn render_site(&self, projections: &Projections) -> Result<Vec<Page>> {
        let lookup = Lookup::new(projections);
        let mut pages = Vec::with_capacity(
            1 + projections.states.len()
                + projections.cities.len()
                + projections.categories.len()
                + projections.businesses.len(),
        );

        pages.push(Page {
            file: urls::page_file(""),
            html: self.render_index(&lookup)?,
        });
        for state in &projections.states {
            pages.push(Page {
                file: urls::page_file(&urls::state_path(&state.slug)),
                html: self.render_state(state, &lookup)?,
            });
        }
        for city in &projections.cities {
            pages.push(Page {
                file: urls::page_file(&urls::city_path(&city.slug)),
                html: self.render_city(city, &lookup)?,
            });
        }
        for category in &projections.categories {
            pages.push(Page {
                file: urls::page_file(&urls::category_path(&category.slug)),
                html: self.render_category(category, &lookup)?,
            });
        }
        for business in &projections.businesses {
            pages.push(Page {
                file: urls::page_file(&urls::business_path(&business.slug)),
                html: self.render_business(business, &lookup)?,
            });
        }

        Ok(pages)
    }
}

// ============================================================================
// TESTS
// ============================================================================
