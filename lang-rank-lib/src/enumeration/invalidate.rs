use crate::record::{CountResult, ResultMap};

/// Mark every language whose baseline lookup failed as failed in `target` too.
///
/// A keyword's ratio for a language is divided by the baseline count for that language, so a
/// keyword result paired with a failed baseline cannot be trusted and has to be looked up again.
/// Languages with a successful baseline are left untouched. Returns the number of entries marked.
pub fn invalidate(baseline: &ResultMap, target: &mut ResultMap) -> usize {
    let mut marked = 0;
    for (language, result) in baseline {
        if result.is_failed() {
            let _ = target.insert(language.clone(), CountResult::failed());
            marked += 1;
        }
    }
    marked
}
