use regex::{Regex, RegexBuilder};

use super::directory::{Directory, DEFAULT_SPECIES};
use crate::swapi::{Character, Snapshot};

/// A compiled search term.
///
/// The term is used as a case-insensitive regular expression without escaping.
/// Terms that are not valid expressions (a lone `(` while typing, say) fall back
/// to a literal match.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    term: String,
    pattern: Regex,
}

impl SearchQuery {
    pub fn new(term: &str) -> Result<Self, regex::Error> {
        let pattern = match case_insensitive(term) {
            Ok(pattern) => pattern,
            Err(e) => {
                log::debug!("'{}' is not a valid pattern ({}), matching literally", term, e);
                case_insensitive(&regex::escape(term))?
            }
        };
        Ok(Self {
            term: term.to_string(),
            pattern,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn matches(&self, character: &Character, row: &ResolvedCharacter<'_>) -> bool {
        self.pattern.is_match(row.name)
            || self.pattern.is_match(row.homeworld)
            || self.pattern.is_match(&row.species)
            // Characters without species data count as human, but "Human" never
            // appears literally in an empty list.
            || (self.term == DEFAULT_SPECIES && character.species.is_empty())
    }
}

fn case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// A character joined against the planet and species listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCharacter<'a> {
    pub name: &'a str,
    pub homeworld: &'a str,
    pub species: String,
}

impl<'a> ResolvedCharacter<'a> {
    pub fn resolve(character: &'a Character, directory: &Directory<'a>) -> Self {
        Self {
            name: &character.name,
            homeworld: directory.planet_name(&character.homeworld),
            species: directory.species_names(&character.species),
        }
    }
}

/// Positions in `snapshot.characters` of every character the query keeps,
/// in their original order.
pub fn find_match_indices(
    query: &SearchQuery,
    snapshot: &Snapshot,
    directory: &Directory<'_>,
) -> Vec<usize> {
    snapshot
        .characters
        .iter()
        .enumerate()
        .filter_map(|(idx, character)| {
            let row = ResolvedCharacter::resolve(character, directory);
            query.matches(character, &row).then_some(idx)
        })
        .collect()
}

pub fn find_matches<'a>(term: &str, snapshot: &'a Snapshot) -> Vec<&'a Character> {
    let query = match SearchQuery::new(term) {
        Ok(query) => query,
        Err(e) => {
            log::warn!("Unusable search term '{}': {}", term, e);
            return Vec::new();
        }
    };
    let directory = Directory::new(snapshot);
    find_match_indices(&query, snapshot, &directory)
        .into_iter()
        .map(|idx| &snapshot.characters[idx])
        .collect()
}
