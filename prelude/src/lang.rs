//! The language framework enabling multilingual output
//!
//! Messages shown to players (error texts, prompts) are picked at runtime from the currently
//! selected language.

use std::{
    error::Error,
    fmt::Display,
    sync::atomic::{AtomicU8, Ordering},
};

use eyre::Result;
use Language::*;

/// List of supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Hungarian,
}

/// Lists all languages (should be same order as the lang macro is used in)
fn langs() -> Vec<Language> {
    vec![Hungarian, English]
}

// Index into `langs()`, Hungarian by default
static LANGUAGE: AtomicU8 = AtomicU8::new(0);

/// Multilingual String macro, input &str's in the given order (currently Hungarian then English),
/// and this will return the appropriate String depending on the selected language
#[macro_export]
macro_rules! lang {
    ($hungarian:expr, $english:expr $(,)?) => {
        match $crate::lang::get_language() {
            $crate::lang::Language::Hungarian => $hungarian.to_string(),
            $crate::lang::Language::English => $english.to_string(),
        }
    };
}

/// Sets the language to the input language
pub fn set_language(lang: Language) {
    let index = langs().iter().position(|l| *l == lang).unwrap_or(0);
    LANGUAGE.store(index as u8, Ordering::Relaxed);
}

/// Safe abstraction to get the current language
pub fn get_language() -> Language {
    langs()
        .get(LANGUAGE.load(Ordering::Relaxed) as usize)
        .copied()
        .unwrap_or(Hungarian)
}

/// Takes a string, and tries to find the closest matching language name.
/// Currently only works based off the English/given name of the language.
pub fn match_language(s: &str) -> Result<Language> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return Err(NoLanguageMatchError {}.into());
    }

    let scored: Vec<_> = langs()
        .into_iter()
        .map(|l| {
            (
                format!("{:?}", l)
                    .to_lowercase()
                    .chars()
                    .filter(|c| s.contains(*c))
                    .count(),
                l,
            )
        })
        .collect();

    let max_match = scored
        .iter()
        .max_by_key(|(score, _)| *score)
        .ok_or(NoLanguageMatchError {})?;

    if scored
        .iter()
        .filter(|(score, _)| *score == max_match.0)
        .count()
        != 1
    {
        return Err(NoLanguageMatchError {}.into());
    }

    Ok(max_match.1)
}

/// Same as [`match_language`], but also selects the matched language.
pub fn match_set_language(s: &str) -> Result<()> {
    set_language(match_language(s)?);
    Ok(())
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lang_name = match &self {
            Hungarian => lang!["Magyar", "Hungarian"],
            English => lang!["Angol", "English"],
        };

        write!(f, "{}", lang_name)
    }
}

#[derive(Debug)]
pub struct NoLanguageMatchError {}

impl Display for NoLanguageMatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cannot match on language. Language will stay {:?}.",
            get_language()
        )
    }
}

impl Error for NoLanguageMatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_close_spellings() {
        assert_eq!(match_language("english").unwrap(), English);
        assert_eq!(match_language("  Hungarian\n").unwrap(), Hungarian);
        assert_eq!(match_language("engl").unwrap(), English);
    }

    #[test]
    fn empty_input_does_not_match() {
        assert!(match_language("").is_err());
        assert!(match_language("\n").is_err());
    }
}
