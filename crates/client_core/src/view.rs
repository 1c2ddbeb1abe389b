//! Per-workflow view state and the reducer that drives it.
//!
//! User actions call `submit_*`, which moves a workflow into `Loading` and
//! hands back the [`Effect`] to run. Whoever runs the effect feeds the result
//! back through [`ViewState::apply`]. Every submission bumps the workflow's
//! generation; outcomes carrying an older generation are dropped, so a slow
//! response or an old success timer never clobbers newer state.

use std::time::Duration;

use shared::{domain::Product, protocol::NewProduct};
use tracing::debug;

use crate::{
    error::FetchError,
    present::{ProductCard, SearchRow},
};

/// How long the create-success alert stays up.
pub const SUCCESS_RESET_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    Lookup,
    Search,
    Create,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchProduct {
        generation: u64,
        product_id: String,
    },
    SearchProducts {
        generation: u64,
        keyword: String,
    },
    CreateProduct {
        generation: u64,
        draft: NewProduct,
    },
    ScheduleSuccessReset {
        generation: u64,
        after: Duration,
    },
}

impl Effect {
    pub fn workflow(&self) -> Workflow {
        match self {
            Self::FetchProduct { .. } => Workflow::Lookup,
            Self::SearchProducts { .. } => Workflow::Search,
            Self::CreateProduct { .. } | Self::ScheduleSuccessReset { .. } => Workflow::Create,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchProduct { .. } => "fetch_product",
            Self::SearchProducts { .. } => "search_products",
            Self::CreateProduct { .. } => "create_product",
            Self::ScheduleSuccessReset { .. } => "schedule_success_reset",
        }
    }

    /// The outcome to apply when this effect could not be run at all. A timer
    /// that cannot be scheduled clears the success alert right away.
    pub fn into_failure(self, err: FetchError) -> Outcome {
        match self {
            Self::FetchProduct { generation, .. } => Outcome::ProductFetched {
                generation,
                result: Err(err),
            },
            Self::SearchProducts { generation, .. } => Outcome::SearchCompleted {
                generation,
                result: Err(err),
            },
            Self::CreateProduct { generation, .. } => Outcome::ProductCreated {
                generation,
                result: Err(err),
            },
            Self::ScheduleSuccessReset { generation, .. } => {
                Outcome::SuccessResetElapsed { generation }
            }
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    ProductFetched {
        generation: u64,
        result: Result<Product, FetchError>,
    },
    SearchCompleted {
        generation: u64,
        result: Result<Vec<Product>, FetchError>,
    },
    ProductCreated {
        generation: u64,
        result: Result<(), FetchError>,
    },
    SuccessResetElapsed {
        generation: u64,
    },
}

#[derive(Debug, Clone, Default)]
pub struct LookupState {
    pub product_id: String,
    loading: bool,
    error: Option<String>,
    product: Option<Product>,
    generation: u64,
}

impl LookupState {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.product.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    /// The product card is hidden while a newer lookup is in flight.
    pub fn card(&self) -> Option<ProductCard> {
        if self.loading {
            return None;
        }
        self.product.as_ref().map(ProductCard::from_product)
    }

    fn finish(&mut self, generation: u64, result: Result<Product, FetchError>) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "view: dropping stale lookup outcome");
            return;
        }
        self.loading = false;
        match result {
            Ok(product) => self.product = Some(product),
            Err(err) => self.error = Some(err.lookup_message().to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub keyword: String,
    loading: bool,
    error: Option<String>,
    results: Vec<Product>,
    submitted_keyword: Option<String>,
    generation: u64,
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn results(&self) -> &[Product] {
        &self.results
    }

    pub fn submitted_keyword(&self) -> Option<&str> {
        self.submitted_keyword.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.submitted_keyword.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    pub fn rows(&self) -> Vec<SearchRow> {
        if self.loading {
            return Vec::new();
        }
        self.results.iter().map(SearchRow::from_product).collect()
    }

    /// True when a finished search came back empty.
    pub fn shows_no_results(&self) -> bool {
        !self.loading
            && self.error.is_none()
            && self
                .submitted_keyword
                .as_deref()
                .is_some_and(|keyword| !keyword.is_empty())
            && self.results.is_empty()
    }

    fn finish(&mut self, generation: u64, result: Result<Vec<Product>, FetchError>) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "view: dropping stale search outcome");
            return;
        }
        self.loading = false;
        match result {
            Ok(products) => self.results = products,
            Err(err) => self.error = Some(err.search_message().to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateState {
    pub name: String,
    pub description: String,
    loading: bool,
    error: Option<String>,
    success: bool,
    generation: u64,
}

impl CreateState {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.success {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    fn finish(&mut self, generation: u64, result: Result<(), FetchError>) -> Option<Effect> {
        if generation != self.generation {
            debug!(generation, current = self.generation, "view: dropping stale create outcome");
            return None;
        }
        self.loading = false;
        match result {
            Ok(()) => {
                self.success = true;
                self.name.clear();
                self.description.clear();
                Some(Effect::ScheduleSuccessReset {
                    generation,
                    after: SUCCESS_RESET_DELAY,
                })
            }
            Err(err) => {
                self.error = Some(err.create_message().to_string());
                None
            }
        }
    }

    fn clear_success(&mut self, generation: u64) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "view: ignoring stale success reset");
            return;
        }
        self.success = false;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub lookup: LookupState,
    pub search: SearchState,
    pub create: CreateState,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, workflow: Workflow) -> Option<Effect> {
        match workflow {
            Workflow::Lookup => self.submit_lookup(),
            Workflow::Search => self.submit_search(),
            Workflow::Create => self.submit_create(),
        }
    }

    pub fn submit_lookup(&mut self) -> Option<Effect> {
        if self.lookup.product_id.is_empty() {
            return None;
        }
        let lookup = &mut self.lookup;
        lookup.generation += 1;
        lookup.loading = true;
        lookup.error = None;
        lookup.product = None;
        Some(Effect::FetchProduct {
            generation: lookup.generation,
            product_id: lookup.product_id.clone(),
        })
    }

    pub fn submit_search(&mut self) -> Option<Effect> {
        if self.search.keyword.is_empty() {
            return None;
        }
        let search = &mut self.search;
        search.generation += 1;
        search.loading = true;
        search.error = None;
        search.results.clear();
        search.submitted_keyword = Some(search.keyword.clone());
        Some(Effect::SearchProducts {
            generation: search.generation,
            keyword: search.keyword.clone(),
        })
    }

    pub fn submit_create(&mut self) -> Option<Effect> {
        if self.create.name.is_empty() || self.create.description.is_empty() {
            return None;
        }
        let create = &mut self.create;
        create.generation += 1;
        create.loading = true;
        create.error = None;
        create.success = false;
        Some(Effect::CreateProduct {
            generation: create.generation,
            draft: NewProduct::new(create.name.clone(), create.description.clone()),
        })
    }

    /// Applies a finished effect. A successful create returns the follow-up
    /// timer effect that will eventually clear the success alert.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Effect> {
        match outcome {
            Outcome::ProductFetched { generation, result } => {
                self.lookup.finish(generation, result);
                None
            }
            Outcome::SearchCompleted { generation, result } => {
                self.search.finish(generation, result);
                None
            }
            Outcome::ProductCreated { generation, result } => {
                self.create.finish(generation, result)
            }
            Outcome::SuccessResetElapsed { generation } => {
                self.create.clear_success(generation);
                None
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.lookup.loading || self.search.loading || self.create.loading
    }

    /// Whether the UI should keep repainting to pick up pending outcomes.
    pub fn awaiting_outcome(&self) -> bool {
        self.is_busy() || self.create.success
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
