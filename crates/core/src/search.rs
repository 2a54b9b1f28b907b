//! Card search filters, card listing parameters and pagination arithmetic.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default page size for card listings.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Maximum page size for card listings.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Default number of full-text search results.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Maximum number of full-text search results.
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// Clamp a requested page size into `1..=max`, falling back to `default`.
pub fn clamp_limit(limit: Option<u32>, default: u32, max: u32) -> u32 {
    limit.unwrap_or(default).clamp(1, max)
}

// ---------------------------------------------------------------------------
// Full-text query
// ---------------------------------------------------------------------------

/// Turn user input into a `tsquery` for the hosted `fts` filter.
///
/// Input is split on every character other than letters, digits and `_`,
/// so no `tsquery` operator (`& | ! ( ) : '`) reaches the service. The
/// pieces are joined with `&`. Returns `None` when nothing usable is left.
///
/// ```
/// use worldweaver_core::search::build_tsquery;
/// assert_eq!(build_tsquery("red dragon!"), Some("red & dragon".to_string()));
/// assert_eq!(build_tsquery("o'brien"), Some("o & brien".to_string()));
/// assert_eq!(build_tsquery(" ?? "), None);
/// ```
pub fn build_tsquery(query: &str) -> Option<String> {
    let terms: Vec<&str> = query
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" & "))
    }
}

// ---------------------------------------------------------------------------
// Search filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SearchSort {
    #[default]
    UpdatedAt,
    CreatedAt,
    Title,
    Relevance,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub from: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub to: Option<Timestamp>,
}

/// The search panel's filter state. Saved searches persist it verbatim,
/// with camelCase keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct SearchFilters {
    pub query: String,
    pub card_type_ids: Vec<EntityId>,
    pub folder_ids: Vec<EntityId>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub date_range: Option<DateRange>,
    pub sort_by: SearchSort,
    pub sort_order: SortOrder,
}

fn toggle(ids: &mut Vec<EntityId>, id: EntityId) {
    if ids.contains(&id) {
        ids.retain(|existing| *existing != id);
    } else {
        ids.push(id);
    }
}

impl SearchFilters {
    pub fn toggle_card_type(&mut self, id: EntityId) {
        toggle(&mut self.card_type_ids, id);
    }

    pub fn toggle_folder(&mut self, id: EntityId) {
        toggle(&mut self.folder_ids, id);
    }

    /// Reset every filter to its default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether anything differs from the defaults, sort included.
    pub fn has_active_filters(&self) -> bool {
        *self != Self::default()
    }

    /// Number of narrowing filters, for the badge on the filter button.
    /// The query and the sort settings are not counted.
    pub fn active_filter_count(&self) -> usize {
        self.card_type_ids.len()
            + self.folder_ids.len()
            + self.tags.len()
            + usize::from(self.date_range.is_some())
    }
}

// ---------------------------------------------------------------------------
// Card listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSort {
    Name,
    CreatedAt,
    #[default]
    UpdatedAt,
    Position,
}

impl CardSort {
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Position => "position",
        }
    }
}

/// Parameters for one page of a world's card list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardListParams {
    pub query: Option<String>,
    pub type_ids: Vec<EntityId>,
    pub folder_ids: Vec<EntityId>,
    pub sort_by: CardSort,
    pub sort_order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for CardListParams {
    fn default() -> Self {
        Self {
            query: None,
            type_ids: Vec::new(),
            folder_ids: Vec::new(),
            sort_by: CardSort::default(),
            sort_order: SortOrder::default(),
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Inclusive row range of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub from: u64,
    pub to: u64,
}

impl PageRange {
    /// Whether rows exist past this page.
    pub fn has_more(self, total: u64) -> bool {
        total > self.to + 1
    }
}

impl CardListParams {
    /// Build params from raw request values. A page below 1 and a limit
    /// outside `1..=100` are rejected rather than corrected.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, CoreError> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(CoreError::Validation("Page must be at least 1".into()));
        }
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(CoreError::Validation(format!(
                "Limit must be between 1 and {MAX_PAGE_LIMIT}"
            )));
        }
        Ok(Self {
            page,
            limit,
            ..Default::default()
        })
    }

    pub fn range(&self) -> PageRange {
        let from = u64::from(self.page.saturating_sub(1)) * u64::from(self.limit);
        PageRange {
            from,
            to: from + u64::from(self.limit.max(1)) - 1,
        }
    }

    /// The free-text query as a `tsquery`, if it has usable terms.
    pub fn tsquery(&self) -> Option<String> {
        self.query.as_deref().and_then(build_tsquery)
    }
}

/// Parse a comma-separated id list from a query string value.
pub fn parse_id_list(raw: &str) -> Result<Vec<EntityId>, CoreError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|_| CoreError::Validation(format!("Invalid id '{s}'")))
        })
        .collect()
}
