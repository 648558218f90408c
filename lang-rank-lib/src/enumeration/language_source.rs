use crate::Result;
use camino::Utf8PathBuf;
use ohno::{IntoAppError, bail};
use std::collections::HashSet;
use std::fs;

/// Provides the ranked list of languages to enumerate, most popular first.
pub trait LanguageSource: Send + Sync {
    fn top_languages(&self, limit: usize) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Languages listed in the configuration, either inline or in a text file.
///
/// The file holds one language per line; blank lines and lines starting with `#` are ignored.
#[derive(Debug, Clone)]
pub struct ConfiguredLanguages {
    languages: Vec<String>,
    file: Option<Utf8PathBuf>,
}

impl ConfiguredLanguages {
    #[must_use]
    pub const fn new(languages: Vec<String>, file: Option<Utf8PathBuf>) -> Self {
        Self { languages, file }
    }

    fn read_file(path: &Utf8PathBuf) -> Result<Vec<String>> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading language list '{path}'"))?;
        Ok(parse_language_list(&text))
    }
}

impl LanguageSource for ConfiguredLanguages {
    async fn top_languages(&self, limit: usize) -> Result<Vec<String>> {
        let candidates = match &self.file {
            Some(path) => Self::read_file(path)?,
            None => self.languages.clone(),
        };

        let mut seen = HashSet::new();
        let languages: Vec<String> = candidates
            .into_iter()
            .map(|language| language.trim().to_string())
            .filter(|language| !language.is_empty() && seen.insert(language.clone()))
            .take(limit)
            .collect();

        if languages.is_empty() {
            bail!("the language list is empty");
        }

        Ok(languages)
    }
}

fn parse_language_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}
