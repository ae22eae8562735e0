use std::sync::Arc;

use tracing::{debug, warn};

use super::{local_db, NutritionFacts, NutritionLookup};

/// Resolution chain: external lookup by detected label, external lookup by
/// the typed name, local table, fixed fallback. First hit wins; resolution
/// never fails the request.
pub struct NutritionResolver {
    lookup: Arc<dyn NutritionLookup>,
}

impl NutritionResolver {
    pub fn new(lookup: Arc<dyn NutritionLookup>) -> Self {
        Self { lookup }
    }

    pub async fn resolve(&self, detected: Option<&str>, typed: &str) -> NutritionFacts {
        if let Some(label) = detected {
            if let Some(facts) = self.try_external(label).await {
                return facts;
            }
        }
        let typed_is_distinct = detected.map_or(true, |d| !d.eq_ignore_ascii_case(typed));
        if typed_is_distinct {
            if let Some(facts) = self.try_external(typed).await {
                return facts;
            }
        }
        if let Some(facts) = detected.and_then(local_db::lookup) {
            debug!(food = %facts.name, "resolved from local table");
            return facts;
        }
        if let Some(facts) = local_db::lookup(typed) {
            debug!(food = %facts.name, "resolved from local table");
            return facts;
        }
        debug!(food = typed, "using fallback estimate");
        NutritionFacts::fallback(detected.unwrap_or(typed))
    }

    async fn try_external(&self, name: &str) -> Option<NutritionFacts> {
        match self.lookup.fetch(name).await {
            Ok(found) => found,
            Err(e) => {
                // Lookup failures are absorbed; the chain moves on.
                warn!(food = name, error = %e, "nutrition lookup failed");
                None
            }
        }
    }
}
