//! Runs view effects against a [`ProductApi`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    view::{Effect, Outcome, ViewState},
    ProductApi,
};

pub struct ViewController<A: ProductApi + ?Sized> {
    api: Arc<A>,
}

impl<A: ProductApi + ?Sized> Clone for ViewController<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: ProductApi + ?Sized + 'static> ViewController<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Performs one effect and reports how it ended. Failures never escape;
    /// they are carried inside the outcome.
    pub async fn execute(&self, effect: Effect) -> Outcome {
        debug!(effect = effect.name(), "view: executing effect");
        match effect {
            Effect::FetchProduct {
                generation,
                product_id,
            } => {
                let result = self.api.fetch_product(&product_id).await;
                if let Err(err) = &result {
                    warn!(product_id = %product_id, "view: lookup failed: {err}");
                }
                Outcome::ProductFetched { generation, result }
            }
            Effect::SearchProducts {
                generation,
                keyword,
            } => {
                let result = self.api.search_products(&keyword).await;
                if let Err(err) = &result {
                    warn!(keyword = %keyword, "view: search failed: {err}");
                }
                Outcome::SearchCompleted { generation, result }
            }
            Effect::CreateProduct { generation, draft } => {
                let result = self.api.create_product(&draft).await.map(|_created| ());
                if let Err(err) = &result {
                    warn!(name = %draft.name, "view: create failed: {err}");
                }
                Outcome::ProductCreated { generation, result }
            }
            Effect::ScheduleSuccessReset { generation, after } => {
                tokio::time::sleep(after).await;
                Outcome::SuccessResetElapsed { generation }
            }
        }
    }

    /// Runs the effect on the current tokio runtime and hands the outcome to
    /// `deliver` once it resolves.
    pub fn spawn<F>(&self, effect: Effect, deliver: F) -> tokio::task::JoinHandle<()>
    where
        F: FnOnce(Outcome) + Send + 'static,
    {
        let controller = self.clone();
        tokio::spawn(async move {
            let outcome = controller.execute(effect).await;
            deliver(outcome);
        })
    }

    /// Executes `effect`, applies the outcome and returns any follow-up effect.
    pub async fn settle(&self, state: &mut ViewState, effect: Effect) -> Option<Effect> {
        let outcome = self.execute(effect).await;
        state.apply(outcome)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
