//! Filter state seeded from the option catalog
//!
//! The container is the only owner of the user's in-progress selection. The
//! orchestrator never sees it directly, only the by-value snapshot taken at
//! submission time.

use crate::error::{ReportClientError, Result};
use crate::traits::ReportApi;
use crate::types::{FieldValue, FilterSelection, OptionCatalog};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// One independently selectable query facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Operation,
    PropertyType,
    State,
    City,
    Neighborhood,
    DormCount,
    ToiletCount,
    GarageCount,
    MinSize,
    MaxSize,
    MinPrice,
    MaxPrice,
}

impl Dimension {
    pub const ALL: [Dimension; 12] = [
        Dimension::Operation,
        Dimension::PropertyType,
        Dimension::State,
        Dimension::City,
        Dimension::Neighborhood,
        Dimension::DormCount,
        Dimension::ToiletCount,
        Dimension::GarageCount,
        Dimension::MinSize,
        Dimension::MaxSize,
        Dimension::MinPrice,
        Dimension::MaxPrice,
    ];

    /// Name used on the wire and on the command line
    pub fn name(self) -> &'static str {
        match self {
            Dimension::Operation => "operation",
            Dimension::PropertyType => "type",
            Dimension::State => "state",
            Dimension::City => "city",
            Dimension::Neighborhood => "neighborhood",
            Dimension::DormCount => "dorm",
            Dimension::ToiletCount => "toilet",
            Dimension::GarageCount => "garage",
            Dimension::MinSize => "min_size",
            Dimension::MaxSize => "max_size",
            Dimension::MinPrice => "min_price",
            Dimension::MaxPrice => "max_price",
        }
    }

    /// Human label for prompts and headers
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Operation => "Operation",
            Dimension::PropertyType => "Type",
            Dimension::State => "State",
            Dimension::City => "City",
            Dimension::Neighborhood => "Neighborhood",
            Dimension::DormCount => "Number of Dorms",
            Dimension::ToiletCount => "Number of Toilets",
            Dimension::GarageCount => "Number of Garages",
            Dimension::MinSize => "Minimum Size",
            Dimension::MaxSize => "Maximum Size",
            Dimension::MinPrice => "Minimum Price",
            Dimension::MaxPrice => "Maximum Price",
        }
    }

    /// Numeric ranges are free text and carry no option list
    pub fn is_range(self) -> bool {
        matches!(
            self,
            Dimension::MinSize | Dimension::MaxSize | Dimension::MinPrice | Dimension::MaxPrice
        )
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = ReportClientError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Dimension::ALL
            .into_iter()
            .find(|d| d.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Dimension::ALL.iter().map(|d| d.name()).collect();
                ReportClientError::general(format!(
                    "Unknown filter '{}'. Available filters: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Current filter selections plus the catalog they were seeded from
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    catalog: OptionCatalog,
    selection: FilterSelection,
}

impl FilterState {
    /// Empty state, before the catalog has been loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the option catalog and seed a fresh state from it
    pub async fn bootstrap<A: ReportApi>(api: &A) -> Result<Self> {
        let catalog = api.fetch_catalog().await?;
        info!(
            entries = catalog.entries,
            update = %catalog.update,
            "option catalog loaded"
        );
        let mut state = Self::new();
        state.initialize(catalog);
        Ok(state)
    }

    /// Replace every option list and reset each selection to its default
    pub fn initialize(&mut self, catalog: OptionCatalog) {
        let first = |options: &[String]| {
            options
                .first()
                .map(|o| FieldValue::from(o.as_str()))
                .unwrap_or_default()
        };
        let bound = |value: &Option<serde_json::Number>| {
            value.clone().map(FieldValue::Number).unwrap_or_default()
        };

        self.selection = FilterSelection {
            operation: first(&catalog.operations),
            property_type: first(&catalog.types),
            state: first(&catalog.states),
            city: first(&catalog.cities),
            neighborhood: first(&catalog.neighborhoods),
            dorm_count: first(&catalog.dorms),
            toilet_count: first(&catalog.toilets),
            garage_count: first(&catalog.garages),
            min_size: bound(&catalog.min_size),
            max_size: bound(&catalog.max_size),
            min_price: bound(&catalog.min_price),
            max_price: bound(&catalog.max_price),
            effective_entry_count: catalog.entries,
            last_update: catalog.update.clone(),
        };
        self.catalog = catalog;
    }

    /// Update exactly one dimension
    pub fn set<V: Into<FieldValue>>(&mut self, dimension: Dimension, value: V) {
        let value = value.into();
        debug!(%dimension, %value, "filter updated");
        *self.field_mut(dimension) = value;
    }

    /// Current value of one dimension
    pub fn get(&self, dimension: Dimension) -> &FieldValue {
        let s = &self.selection;
        match dimension {
            Dimension::Operation => &s.operation,
            Dimension::PropertyType => &s.property_type,
            Dimension::State => &s.state,
            Dimension::City => &s.city,
            Dimension::Neighborhood => &s.neighborhood,
            Dimension::DormCount => &s.dorm_count,
            Dimension::ToiletCount => &s.toilet_count,
            Dimension::GarageCount => &s.garage_count,
            Dimension::MinSize => &s.min_size,
            Dimension::MaxSize => &s.max_size,
            Dimension::MinPrice => &s.min_price,
            Dimension::MaxPrice => &s.max_price,
        }
    }

    /// Copy of the current selection, detached from later mutations
    pub fn snapshot(&self) -> FilterSelection {
        self.selection.clone()
    }

    pub fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    /// Allowed values for a dimension; empty for numeric ranges
    pub fn options(&self, dimension: Dimension) -> &[String] {
        let c = &self.catalog;
        match dimension {
            Dimension::Operation => &c.operations,
            Dimension::PropertyType => &c.types,
            Dimension::State => &c.states,
            Dimension::City => &c.cities,
            Dimension::Neighborhood => &c.neighborhoods,
            Dimension::DormCount => &c.dorms,
            Dimension::ToiletCount => &c.toilets,
            Dimension::GarageCount => &c.garages,
            Dimension::MinSize | Dimension::MaxSize | Dimension::MinPrice | Dimension::MaxPrice => {
                &[]
            }
        }
    }

    /// Option dimensions whose value is neither empty-with-empty-list nor a listed option
    pub fn out_of_catalog(&self) -> Vec<Dimension> {
        Dimension::ALL
            .into_iter()
            .filter(|d| !d.is_range())
            .filter(|&d| {
                let options = self.options(d);
                let value = self.get(d);
                if options.is_empty() {
                    !value.is_empty()
                } else {
                    !value.is_one_of(options)
                }
            })
            .collect()
    }

    fn field_mut(&mut self, dimension: Dimension) -> &mut FieldValue {
        let s = &mut self.selection;
        match dimension {
            Dimension::Operation => &mut s.operation,
            Dimension::PropertyType => &mut s.property_type,
            Dimension::State => &mut s.state,
            Dimension::City => &mut s.city,
            Dimension::Neighborhood => &mut s.neighborhood,
            Dimension::DormCount => &mut s.dorm_count,
            Dimension::ToiletCount => &mut s.toilet_count,
            Dimension::GarageCount => &mut s.garage_count,
            Dimension::MinSize => &mut s.min_size,
            Dimension::MaxSize => &mut s.max_size,
            Dimension::MinPrice => &mut s.min_price,
            Dimension::MaxPrice => &mut s.max_price,
        }
    }
}
