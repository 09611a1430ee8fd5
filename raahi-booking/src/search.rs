use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use raahi_catalog::Bus;

/// What the user typed into the search form; nothing is guaranteed yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchForm {
    pub from_city: String,
    pub to_city: String,
    pub date: Option<NaiveDate>,
}

/// Field-level findings for the search form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaErrors {
    pub from_city: Option<&'static str>,
    pub to_city: Option<&'static str>,
    pub date: Option<&'static str>,
}

impl CriteriaErrors {
    pub fn is_clean(&self) -> bool {
        self.from_city.is_none() && self.to_city.is_none() && self.date.is_none()
    }
}

/// Validated search input: both cities chosen and distinct, plus a travel date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchCriteria {
    pub from_city: String,
    pub to_city: String,
    pub date: NaiveDate,
}

impl SearchForm {
    pub fn validate(&self) -> Result<SearchCriteria, CriteriaErrors> {
        let mut errors = CriteriaErrors::default();

        if self.from_city.is_empty() {
            errors.from_city = Some("Please select departure city");
        }
        if self.to_city.is_empty() {
            errors.to_city = Some("Please select destination city");
        }
        if self.date.is_none() {
            errors.date = Some("Please select a date");
        }
        if !self.from_city.is_empty() && self.from_city == self.to_city {
            errors.to_city = Some("Departure and destination must be different");
        }

        match (errors.is_clean(), self.date) {
            (true, Some(date)) => Ok(SearchCriteria {
                from_city: self.from_city.clone(),
                to_city: self.to_city.clone(),
                date,
            }),
            _ => Err(errors),
        }
    }
}

/// Search lifecycle. A catalog fetch is in flight only while `Searching`;
/// a response that arrives in any other state is stale and gets dropped.
#[derive(Debug, Clone, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Searching {
        criteria: SearchCriteria,
    },
    Results {
        criteria: SearchCriteria,
        buses: Vec<Bus>,
    },
    Failed {
        criteria: SearchCriteria,
        message: String,
    },
}

impl SearchState {
    /// Move into `Searching`. Refused while a fetch is already in flight, so
    /// a double submit never issues a duplicate request.
    pub fn begin(&mut self, criteria: SearchCriteria) -> bool {
        if self.is_searching() {
            return false;
        }
        *self = SearchState::Searching { criteria };
        true
    }

    /// Successful catalog response. An empty list is a valid result.
    pub fn resolve(&mut self, buses: Vec<Bus>) {
        if let SearchState::Searching { criteria } = self {
            *self = SearchState::Results {
                criteria: criteria.clone(),
                buses,
            };
        }
    }

    pub fn reject(&mut self, message: String) {
        if let SearchState::Searching { criteria } = self {
            *self = SearchState::Failed {
                criteria: criteria.clone(),
                message,
            };
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, SearchState::Searching { .. })
    }

    pub fn results(&self) -> Option<&[Bus]> {
        match self {
            SearchState::Results { buses, .. } => Some(buses),
            _ => None,
        }
    }

    /// A search ran and matched nothing -- distinct from not having searched.
    pub fn found_nothing(&self) -> bool {
        matches!(self, SearchState::Results { buses, .. } if buses.is_empty())
    }

    /// Criteria of a failed attempt, for the retry action.
    pub fn retryable_criteria(&self) -> Option<SearchCriteria> {
        match self {
            SearchState::Failed { criteria, .. } => Some(criteria.clone()),
            _ => None,
        }
    }
}
