use crate::record::{CountResult, KeywordKey};

/// Receives notifications as an enumeration makes progress.
pub trait Observer: Send + Sync {
    /// A keyword is about to be enumerated; `pending` of its `total` languages need a lookup.
    fn keyword_started(&self, key: &KeywordKey, total: usize, pending: usize);

    /// The terminal outcome of one (keyword, language) lookup is known and recorded.
    fn outcome(&self, key: &KeywordKey, language: &str, result: &CountResult);

    /// Every keyword has been enumerated.
    fn done(&self);
}

/// An observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl Observer for NoOpObserver {
    fn keyword_started(&self, _key: &KeywordKey, _total: usize, _pending: usize) {}
    fn outcome(&self, _key: &KeywordKey, _language: &str, _result: &CountResult) {}
    fn done(&self) {}
}

impl<T: Observer + ?Sized> Observer for &T {
    fn keyword_started(&self, key: &KeywordKey, total: usize, pending: usize) {
        (**self).keyword_started(key, total, pending);
    }

    fn outcome(&self, key: &KeywordKey, language: &str, result: &CountResult) {
        (**self).outcome(key, language, result);
    }

    fn done(&self) {
        (**self).done();
    }
}
