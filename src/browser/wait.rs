use headless_chrome::Tab;

use crate::error::ScrapeError;

/// A single page-readiness predicate, evaluated against a live context.
///
/// Predicates are generic over the context so they can be exercised in unit
/// tests without a browser; production code uses `C = Tab`.
pub type BoxedPredicate<C> = Box<dyn Fn(&C) -> Result<bool, ScrapeError>>;

/// Combines several independent readiness predicates into one check that
/// succeeds only when every predicate returns true in a single pass.
///
/// A predicate that returns false or errors makes the whole pass "not ready".
/// Errors are swallowed rather than propagated: elements not yet attached to
/// the DOM raise benign errors, and the polling loop will simply re-evaluate
/// the composite until its overall timeout.
pub struct CompositeWaitCondition<C = Tab> {
    predicates: Vec<BoxedPredicate<C>>,
}

impl<C> CompositeWaitCondition<C> {
    pub fn new(predicates: Vec<BoxedPredicate<C>>) -> Self {
        Self { predicates }
    }

    /// Run one evaluation pass over all predicates, in order.
    pub fn evaluate(&self, ctx: &C) -> bool {
        self.predicates
            .iter()
            .all(|predicate| matches!(predicate(ctx), Ok(true)))
    }
}

/// Predicate that checks whether an element matching the CSS selector is
/// attached to the DOM.
pub fn element_present(selector: &str) -> BoxedPredicate<Tab> {
    let script = format!(
        "document.querySelector('{}') !== null",
        selector.replace('\'', "\\'")
    );
    Box::new(move |tab: &Tab| {
        let result = tab
            .evaluate(&script, false)
            .map_err(|e| ScrapeError::Extraction(e.to_string()))?;
        Ok(result.value.and_then(|v| v.as_bool()).unwrap_or(false))
    })
}
