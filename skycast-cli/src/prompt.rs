//! Autocomplete for the city prompt: popular cities plus remembered ones.

use inquire::{Autocomplete, CustomUserError, autocompletion::Replacement};
use skycast_core::{RecentSearch, suggest};

#[derive(Debug, Clone, Default)]
pub struct CitySuggester {
    recent: Vec<String>,
}

impl CitySuggester {
    pub fn new(recent: &[RecentSearch]) -> Self {
        Self {
            recent: recent.iter().map(|e| e.city.clone()).collect(),
        }
    }
}

impl Autocomplete for CitySuggester {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        let mut out: Vec<String> = suggest::filter(input)
            .into_iter()
            .map(str::to_string)
            .collect();

        let needle = input.trim().to_lowercase();
        if !needle.is_empty() {
            for city in &self.recent {
                let already = out.iter().any(|c| c.to_lowercase() == city.to_lowercase());
                if !already && city.to_lowercase().contains(&needle) {
                    out.push(city.clone());
                }
            }
        }

        Ok(out)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}
