use std::collections::HashMap;

use crate::swapi::{resource_id, Snapshot};

/// Species shown for characters whose species list is empty or unresolvable.
pub const DEFAULT_SPECIES: &str = "Human";

/// Id-keyed lookup of planet and species names for one snapshot.
///
/// A record's id comes from its own `url`. Records without a parseable url
/// take `position + 1`, which matches how SWAPI numbers its listings.
pub struct Directory<'a> {
    planets: HashMap<u32, &'a str>,
    species: HashMap<u32, &'a str>,
}

impl<'a> Directory<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            planets: index_by_id(
                snapshot
                    .planets
                    .iter()
                    .map(|p| (p.name.as_str(), p.url.as_str())),
            ),
            species: index_by_id(
                snapshot
                    .species
                    .iter()
                    .map(|s| (s.name.as_str(), s.url.as_str())),
            ),
        }
    }

    /// Empty when the reference does not resolve.
    pub fn planet_name(&self, url: &str) -> &'a str {
        resource_id(url)
            .and_then(|id| self.planets.get(&id).copied())
            .unwrap_or("")
    }

    pub fn species_name(&self, url: &str) -> &'a str {
        resource_id(url)
            .and_then(|id| self.species.get(&id).copied())
            .unwrap_or(DEFAULT_SPECIES)
    }

    /// Display text for a species list: each reference resolved on its own and
    /// joined with ", ".
    pub fn species_names(&self, urls: &[String]) -> String {
        if urls.is_empty() {
            return DEFAULT_SPECIES.to_string();
        }
        urls.iter()
            .map(|url| self.species_name(url))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn index_by_id<'a>(records: impl Iterator<Item = (&'a str, &'a str)>) -> HashMap<u32, &'a str> {
    let mut index = HashMap::new();
    for (position, (name, url)) in records.enumerate() {
        let id = resource_id(url).unwrap_or(position as u32 + 1);
        index.entry(id).or_insert(name);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swapi::{Planet, Species};

    fn planet(name: &str, url: &str) -> Planet {
        Planet {
            name: name.into(),
            url: url.into(),
        }
    }

    fn species(name: &str, url: &str) -> Species {
        Species {
            name: name.into(),
            url: url.into(),
        }
    }

    #[test]
    fn positional_ids_without_urls() {
        let snapshot = Snapshot {
            planets: vec![planet("Tatooine", ""), planet("Alderaan", "")],
            ..Default::default()
        };
        let dir = Directory::new(&snapshot);
        assert_eq!(dir.planet_name("https://swapi.dev/api/planets/1/"), "Tatooine");
        assert_eq!(dir.planet_name("https://swapi.dev/api/planets/2/"), "Alderaan");
    }

    #[test]
    fn url_ids_survive_reordering() {
        let snapshot = Snapshot {
            planets: vec![
                planet("Alderaan", "https://swapi.dev/api/planets/2/"),
                planet("Tatooine", "https://swapi.dev/api/planets/1/"),
            ],
            ..Default::default()
        };
        let dir = Directory::new(&snapshot);
        assert_eq!(dir.planet_name("https://swapi.dev/api/planets/1/"), "Tatooine");
        assert_eq!(dir.planet_name("https://swapi.dev/api/planets/2/"), "Alderaan");
    }

    #[test]
    fn out_of_range_falls_back() {
        let snapshot = Snapshot {
            planets: vec![planet("Tatooine", "")],
            species: vec![species("Droid", "")],
            ..Default::default()
        };
        let dir = Directory::new(&snapshot);
        assert_eq!(dir.planet_name("https://swapi.dev/api/planets/99/"), "");
        assert_eq!(dir.planet_name("not a url"), "");
        assert_eq!(dir.species_name("https://swapi.dev/api/species/99/"), "Human");
    }

    #[test]
    fn species_names_join_each_reference() {
        let snapshot = Snapshot {
            species: vec![
                species("Human", "https://swapi.dev/api/species/1/"),
                species("Droid", "https://swapi.dev/api/species/2/"),
            ],
            ..Default::default()
        };
        let dir = Directory::new(&snapshot);
        assert_eq!(dir.species_names(&[]), "Human");
        assert_eq!(
            dir.species_names(&["https://swapi.dev/api/species/2/".to_string()]),
            "Droid"
        );
        assert_eq!(
            dir.species_names(&[
                "https://swapi.dev/api/species/2/".to_string(),
                "https://swapi.dev/api/species/7/".to_string(),
            ]),
            "Droid, Human"
        );
    }
}
