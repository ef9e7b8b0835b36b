// Demo mode: serve a built-in character dataset without touching the network
//
// Filtering follows the upstream API closely enough to exercise the feed:
// status is an exact match, species is a case-insensitive substring match,
// and results are paged in fixed-size chunks.
//
// Run with: MORTYDEX_DEMO=1 cargo run --release

use super::{PageQuery, QueryError, QueryService};
use crate::model::{Character, Origin, Page, Status};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;

/// (name, status, species, gender, origin)
const DATASET: &[(&str, Status, &str, &str, &str)] = &[
    ("Rick Sanchez", Status::Alive, "Human", "Male", "Earth (C-137)"),
    ("Morty Smith", Status::Alive, "Human", "Male", "unknown"),
    ("Summer Smith", Status::Alive, "Human", "Female", "Earth (Replacement Dimension)"),
    ("Beth Smith", Status::Alive, "Human", "Female", "Earth (Replacement Dimension)"),
    ("Jerry Smith", Status::Alive, "Human", "Male", "Earth (Replacement Dimension)"),
    ("Abadango Cluster Princess", Status::Alive, "Alien", "Female", "Abadango"),
    ("Abradolf Lincler", Status::Unknown, "Human", "Male", "Earth (Replacement Dimension)"),
    ("Adjudicator Rick", Status::Dead, "Human", "Male", "unknown"),
    ("Agency Director", Status::Dead, "Human", "Male", "Earth (Replacement Dimension)"),
    ("Alan Rails", Status::Dead, "Human", "Male", "unknown"),
    ("Albert Einstein", Status::Dead, "Human", "Male", "Earth (C-137)"),
    ("Alexander", Status::Dead, "Human", "Male", "Earth (C-137)"),
    ("Alien Googah", Status::Unknown, "Alien", "unknown", "unknown"),
    ("Alien Morty", Status::Unknown, "Alien", "Male", "unknown"),
    ("Alien Rick", Status::Unknown, "Alien", "Male", "unknown"),
    ("Amish Cyborg", Status::Dead, "Alien", "Male", "unknown"),
    ("Annie", Status::Alive, "Human", "Female", "Earth (C-137)"),
    ("Antenna Morty", Status::Alive, "Human", "Male", "unknown"),
    ("Antenna Rick", Status::Unknown, "Human", "Male", "unknown"),
    ("Ants in my Eyes Johnson", Status::Unknown, "Human", "Male", "unknown"),
    ("Aqua Morty", Status::Unknown, "Humanoid", "Male", "unknown"),
    ("Aqua Rick", Status::Unknown, "Humanoid", "Male", "unknown"),
    ("Arcade Alien", Status::Unknown, "Alien", "Male", "unknown"),
    ("Armagheadon", Status::Alive, "Alien", "Male", "Signus 5 Expanse"),
    ("Armothy", Status::Dead, "unknown", "Male", "Post-Apocalyptic Earth"),
    ("Arthricia", Status::Alive, "Alien", "Female", "Purge Planet"),
    ("Artist Morty", Status::Alive, "Human", "Male", "unknown"),
    ("Attila Starwar", Status::Alive, "Human", "Male", "unknown"),
    ("Baby Legs", Status::Alive, "Human", "Male", "unknown"),
    ("Baby Poopybutthole", Status::Alive, "Poopybutthole", "Male", "unknown"),
    ("Baby Wizard", Status::Dead, "Alien", "Male", "unknown"),
    ("Bearded Lady", Status::Dead, "Alien", "Female", "unknown"),
    ("Beebo", Status::Dead, "Alien", "Male", "Venzenulon 7"),
    ("Benjamin", Status::Alive, "Poopybutthole", "Male", "Interdimensional Cable"),
    ("Bepisian", Status::Alive, "Alien", "unknown", "Bepis 9"),
    ("Beta-Seven", Status::Alive, "Alien", "Genderless", "unknown"),
    ("Beth Sanchez", Status::Alive, "Human", "Female", "Earth (C-500A)"),
    ("Beth's Mytholog", Status::Dead, "Mythological Creature", "Female", "Nuptia 4"),
    ("Big Boobed Waitress", Status::Alive, "Mythological Creature", "Female", "Fantasy World"),
    ("Big Head Morty", Status::Unknown, "Human", "Male", "unknown"),
    ("Big Morty", Status::Dead, "Human", "Male", "unknown"),
    ("Body Guard Morty", Status::Dead, "Human", "Male", "unknown"),
    ("Bruce Chutback", Status::Alive, "Human", "Male", "Earth (Replacement Dimension)"),
    ("Butter Robot", Status::Alive, "Robot", "Genderless", "Earth (Replacement Dimension)"),
    ("Gear Cop", Status::Dead, "Robot", "Male", "Gear World"),
    ("Glootie", Status::Alive, "Alien", "Male", "unknown"),
    ("Squanchy", Status::Alive, "Cat-Person", "Male", "unknown"),
    ("Unity", Status::Alive, "Alien", "Genderless", "unknown"),
];

/// In-memory query service backed by [`DATASET`]
pub struct DemoService {
    characters: Vec<Character>,
    page_size: usize,
    latency: Duration,
    failing_pages: HashSet<u32>,
    calls: AtomicUsize,
}

impl DemoService {
    /// Create a demo service with the built-in dataset
    pub fn new(page_size: usize) -> Self {
        let characters = DATASET
            .iter()
            .enumerate()
            .map(|(i, (name, status, species, gender, origin))| Character {
                id: (i + 1).to_string(),
                name: name.to_string(),
                status: *status,
                species: species.to_string(),
                gender: gender.to_string(),
                origin: Origin {
                    name: origin.to_string(),
                },
            })
            .collect();
        Self::with_characters(characters, page_size)
    }

    /// Create a demo service over a custom dataset
    pub fn with_characters(characters: Vec<Character>, page_size: usize) -> Self {
        Self {
            characters,
            page_size: page_size.max(1),
            latency: Duration::ZERO,
            failing_pages: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Delay every response (makes the loading state visible in the TUI)
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every request for `page` fail
    #[allow(dead_code)] // Failure injection for tests
    pub fn with_failing_page(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    /// Number of fetches served so far
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn matches(character: &Character, query: &PageQuery) -> bool {
        if let Some(status) = query.filters.status {
            if character.status != status {
                return false;
            }
        }
        if let Some(species) = &query.filters.species {
            if !character
                .species
                .to_lowercase()
                .contains(&species.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl QueryService for DemoService {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }

        if self.failing_pages.contains(&query.page) {
            return Err(QueryError::Network(format!(
                "demo failure injected for page {}",
                query.page
            )));
        }

        let matching: Vec<&Character> = self
            .characters
            .iter()
            .filter(|c| Self::matches(c, query))
            .collect();

        let start = (query.page.max(1) as usize - 1) * self.page_size;
        let results: Vec<Character> = matching
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|c| (*c).clone())
            .collect();
        let has_next = start + self.page_size < matching.len();

        Ok(Page { results, has_next })
    }

    fn name(&self) -> &str {
        "demo"
    }
}
