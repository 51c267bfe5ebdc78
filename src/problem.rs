//! Problem definition: delivery targets, the item catalog and their loaders.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::config::Config;
use crate::distance::Location;
use crate::error::{PlanError, Result};

/// Identifier of a delivery target.
pub type TargetId = u64;
/// Identifier of a catalog item.
pub type ItemId = u64;

/// A delivery destination demanding exactly one catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    #[serde(flatten)]
    pub location: Location,
    pub item: ItemId,
    /// Only eligible targets are ever routed.
    #[serde(default = "eligible_by_default")]
    pub eligible: bool,
}

fn eligible_by_default() -> bool {
    true
}

impl Target {
    /// Create a new eligible target.
    pub fn new(id: TargetId, latitude: f64, longitude: f64, item: ItemId) -> Self {
        Target {
            id,
            location: Location::new(latitude, longitude),
            item,
            eligible: true,
        }
    }

    /// Mark this target as ineligible for delivery.
    pub fn ineligible(mut self) -> Self {
        self.eligible = false;
        self
    }
}

/// A deliverable good with fixed weight and volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub weight: f64,
    pub volume: f64,
}

impl CatalogItem {
    pub fn new(id: ItemId, weight: f64, volume: f64) -> Self {
        CatalogItem { id, weight, volume }
    }

    /// Weight and volume must both be non-negative numbers.
    pub fn is_valid(&self) -> bool {
        self.weight >= 0.0 && self.volume >= 0.0
    }
}

/// Catalog items keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<ItemId, CatalogItem>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and weights or volumes that
    /// are negative or NaN.
    pub fn new(items: impl IntoIterator<Item = CatalogItem>) -> Result<Self> {
        let mut catalog = Catalog::default();

        for item in items {
            if !item.is_valid() {
                return Err(PlanError::InvalidItem {
                    id: item.id,
                    weight: item.weight,
                    volume: item.volume,
                });
            }
            if catalog.items.insert(item.id, item).is_some() {
                return Err(PlanError::DuplicateItem(item.id));
            }
        }

        Ok(catalog)
    }

    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A complete planning instance as handed over by a loader.
#[derive(Debug, Clone)]
pub struct Problem {
    pub name: String,
    /// All targets, eligible or not, in input order.
    pub targets: Vec<Target>,
    pub catalog: Catalog,
    /// Run parameters embedded in the instance file, if any.
    pub config: Option<Config>,
}

/// On-disk layout of a JSON instance.
#[derive(Debug, Deserialize)]
struct InstanceFile {
    #[serde(default)]
    name: Option<String>,
    targets: Vec<Target>,
    catalog: Vec<CatalogItem>,
    #[serde(default)]
    config: Option<Config>,
}

/// A row of the targets sheet.
#[derive(Debug, Deserialize)]
struct TargetRow {
    child: TargetId,
    latitude: f64,
    longitude: f64,
    wish: ItemId,
    #[serde(default)]
    naughty: u8,
}

/// A row of the articles sheet.
#[derive(Debug, Deserialize)]
struct ArticleRow {
    article: ItemId,
    weight: f64,
    volume: f64,
}

impl Problem {
    /// Create a problem, rejecting duplicate target ids and out-of-range coordinates.
    pub fn new(name: String, targets: Vec<Target>, catalog: Catalog) -> Result<Self> {
        let mut seen = HashSet::with_capacity(targets.len());
        for target in &targets {
            if !seen.insert(target.id) {
                return Err(PlanError::DuplicateTarget(target.id));
            }
            if !target.location.is_valid() {
                return Err(PlanError::InvalidLocation {
                    target: target.id,
                    latitude: target.location.latitude,
                    longitude: target.location.longitude,
                });
            }
        }

        Ok(Problem {
            name,
            targets,
            catalog,
            config: None,
        })
    }

    /// Targets to be routed, in input order.
    pub fn eligible_targets(&self) -> Vec<Target> {
        self.targets.iter().filter(|t| t.eligible).cloned().collect()
    }

    pub fn eligible_count(&self) -> usize {
        self.targets.iter().filter(|t| t.eligible).count()
    }

    pub fn ineligible_count(&self) -> usize {
        self.targets.len() - self.eligible_count()
    }

    /// Load a problem from a JSON instance file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let name = stem(path.as_ref());
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file), name)
    }

    /// Load a problem from any JSON source; `name` is used when the
    /// instance does not carry its own.
    pub fn from_json_reader<R: Read>(reader: R, name: String) -> Result<Self> {
        let instance: InstanceFile = serde_json::from_reader(reader)?;
        let mut problem = Problem::new(
            instance.name.unwrap_or(name),
            instance.targets,
            Catalog::new(instance.catalog)?,
        )?;
        problem.config = instance.config;

        Ok(problem)
    }

    /// Load a problem from a targets CSV (`child,latitude,longitude,wish,naughty`)
    /// and an articles CSV (`article,weight,volume`).
    pub fn from_csv_files<P: AsRef<Path>, Q: AsRef<Path>>(targets: P, articles: Q) -> Result<Self> {
        let name = stem(targets.as_ref());
        Self::from_csv_readers(File::open(targets)?, File::open(articles)?, name)
    }

    pub fn from_csv_readers<R: Read, S: Read>(targets: R, articles: S, name: String) -> Result<Self> {
        let targets = read_csv_rows::<TargetRow, _>(targets)?
            .into_iter()
            .map(|row| Target {
                id: row.child,
                location: Location::new(row.latitude, row.longitude),
                item: row.wish,
                eligible: row.naughty == 0,
            })
            .collect();

        let catalog = Catalog::new(
            read_csv_rows::<ArticleRow, _>(articles)?
                .into_iter()
                .map(|row| CatalogItem::new(row.article, row.weight, row.volume)),
        )?;

        Problem::new(name, targets, catalog)
    }
}

fn read_csv_rows<T, R: Read>(reader: R) -> Result<Vec<T>>
where
    for<'de> T: Deserialize<'de>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(reader));
    let mut rows = vec![];

    for row in reader.deserialize() {
        rows.push(row?);
    }

    Ok(rows)
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "instance".to_string())
}
