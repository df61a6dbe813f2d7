//! Visibility filters for debug visualization

use crate::foundation::collections::BodyId;

/// Decides which bodies get debug visuals
pub trait DebugFilter {
    /// Whether `body` should be visualized
    fn displays(&self, body: BodyId) -> bool;
}

impl<F> DebugFilter for F
where
    F: Fn(BodyId) -> bool,
{
    fn displays(&self, body: BodyId) -> bool {
        self(body)
    }
}

/// Apply an optional filter; no filter admits everything
pub fn admits(filter: Option<&dyn DebugFilter>, body: BodyId) -> bool {
    filter.map_or(true, |f| f.displays(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::HandleMap;

    #[test]
    fn test_closure_filter() {
        let mut ids: HandleMap<BodyId, ()> = HandleMap::with_key();
        let shown = ids.insert(());
        let hidden = ids.insert(());
        let filter = move |id: BodyId| id == shown;

        assert!(admits(Some(&filter), shown));
        assert!(!admits(Some(&filter), hidden));
        assert!(admits(None, hidden));
    }
}
