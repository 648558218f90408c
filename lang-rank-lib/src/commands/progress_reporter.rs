use crate::enumeration::Observer;
use crate::record::{CountResult, KeywordKey};
use core::fmt::{Debug, Formatter};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str = "{prefix:>16.bold.cyan} [{bar:25}] {pos}/{len} {msg}";
const TEMPLATE_NO_COLOR: &str = "{prefix:>16} [{bar:25}] {pos}/{len} {msg}";

/// Longest keyword label shown in the prefix before it is shortened.
const MAX_PREFIX_LEN: usize = 16;

/// An [`Observer`] that draws a progress bar on stderr, one pass per keyword.
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
    use_colors: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter.
    ///
    /// When `visible` is false nothing is drawn, which keeps log output readable. When
    /// `use_colors` is false, progress bar chrome is rendered without ANSI styling.
    #[must_use]
    pub fn new(visible: bool, use_colors: bool) -> Self {
        let bar = ProgressBar::hidden();
        if visible {
            bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }

        let template = if use_colors { TEMPLATE } else { TEMPLATE_NO_COLOR };
        let style = ProgressStyle::default_bar()
            .template(template)
            .map_or_else(|_| ProgressStyle::default_bar(), |style| style.progress_chars("=> "));
        bar.set_style(style);

        Self { bar, use_colors }
    }

    #[must_use]
    pub const fn use_colors(&self) -> bool {
        self.use_colors
    }
}

fn prefix(key: &KeywordKey) -> String {
    let label = key.to_string();
    if label.chars().count() <= MAX_PREFIX_LEN {
        label
    } else {
        let shortened: String = label.chars().take(MAX_PREFIX_LEN - 1).collect();
        format!("{shortened}…")
    }
}

impl Observer for ProgressReporter {
    fn keyword_started(&self, key: &KeywordKey, total: usize, pending: usize) {
        self.bar.set_prefix(prefix(key));
        self.bar.set_length(total as u64);
        self.bar.set_position(total.saturating_sub(pending) as u64);
        self.bar.set_message(String::new());
    }

    fn outcome(&self, _key: &KeywordKey, language: &str, result: &CountResult) {
        self.bar.inc(1);
        if result.is_failed() {
            self.bar.set_message(format!("{language} (failed)"));
        } else {
            self.bar.set_message(format!("{language}: {}", result.count()));
        }
    }

    fn done(&self) {
        self.bar.finish_and_clear();
    }
}

impl Debug for ProgressReporter {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("bar", &self.bar)
            .field("use_colors", &self.use_colors)
            .finish()
    }
}
