// 📦 Loader - zip archive → four ordered record sequences
//
// Members are looked up by fixed names (see `ArchiveMembers`). A missing
// member or a malformed row is fatal; unexpected or absent columns are not.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::{debug, info};
use zip::ZipArchive;

use crate::config::ArchiveMembers;
use crate::entities::{Business, Category, City, State};
use crate::error::{LoadError, LoadResult};

/// Raw dataset exactly as loaded, in archive row order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub businesses: Vec<Business>,
    pub cities: Vec<City>,
    pub states: Vec<State>,
    pub categories: Vec<Category>,
}

impl Dataset {
    pub fn summary(&self) -> String {
        format!(
            "{} businesses, {} cities, {} states, {} categories",
            self.businesses.len(),
            self.cities.len(),
            self.states.len(),
            self.categories.len()
        )
    }
}

/// Load all four datasets from a zip archive on disk
pub fn load_archive(path: &Path, members: &ArchiveMembers) -> Result<Dataset> {
    let file = File::open(path)
        .map_err(LoadError::from)
        .with_context(|| format!("Failed to open archive {:?}", path))?;

    let dataset = load_from_reader(file, members)
        .with_context(|| format!("Failed to load dataset from {:?}", path))?;

    info!(archive = %path.display(), "Loaded {}", dataset.summary());
    Ok(dataset)
}

/// Load all four datasets from any seekable zip stream
pub fn load_from_reader<R: Read + Seek>(reader: R, members: &ArchiveMembers) -> LoadResult<Dataset> {
    let mut archive = ZipArchive::new(reader)?;

    Ok(Dataset {
        businesses: read_member(&mut archive, &members.businesses)?,
        cities: read_member(&mut archive, &members.cities)?,
        states: read_member(&mut archive, &members.states)?,
        categories: read_member(&mut archive, &members.categories)?,
    })
}

/// Read one CSV member and deserialize every row
fn read_member<R: Read + Seek, T: DeserializeOwned>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> LoadResult<Vec<T>> {
    let mut content = Vec::new();
    {
        let mut member = archive.by_name(name).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => LoadError::MissingMember(name.to_string()),
            other => LoadError::Archive(other),
        })?;
        member.read_to_end(&mut content)?;
    }

    let records = parse_csv(&content, name)?;
    debug!(member = name, rows = records.len(), "Parsed archive member");
    Ok(records)
}

/// Parse CSV bytes into records; headers name the fields
///
/// Headers and cells are both trimmed, so keys like `" IL1"` match.
pub fn parse_csv<T: DeserializeOwned>(content: &[u8], member: &str) -> LoadResult<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: T = result.map_err(|source| LoadError::Csv {
            member: member.to_string(),
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}
