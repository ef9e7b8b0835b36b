// Sorted view of the accumulated characters
//
// `derive_view` is pure: it copies the accumulator and sorts the copy.
// `DerivedView` memoizes the result and only recomputes when one of its
// inputs (accumulator revision, filter generation, sort key) changed.

use super::controller::FeedController;
use crate::model::{Character, SortKey};
use std::cmp::Ordering;

/// Produce a sorted copy of `characters`
///
/// Ties keep accumulator order: `sort_by` is a stable sort.
pub fn derive_view(characters: &[Character], key: SortKey) -> Vec<Character> {
    let mut view = characters.to_vec();
    view.sort_by(|a, b| compare_locale(sort_field(a, key), sort_field(b, key)));
    view
}

fn sort_field(character: &Character, key: SortKey) -> &str {
    match key {
        SortKey::Name => &character.name,
        SortKey::OriginName => &character.origin.name,
    }
}

/// Locale-aware string comparison
///
/// Primary level ignores case and common Latin diacritics, so "élan" sorts
/// next to "Elan" rather than after "Z". Equal primary keys fall back to the
/// raw strings to keep the order total.
pub fn compare_locale(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase).map(fold_diacritic)
}

fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' => 'i',
        'ñ' | 'ń' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => 'u',
        'ý' | 'ÿ' => 'y',
        'ś' | 'š' => 's',
        'ź' | 'ż' | 'ž' => 'z',
        'ł' => 'l',
        other => other,
    }
}

/// Cache key: everything the sorted view depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ViewInputs {
    generation: u64,
    revision: u64,
    key: SortKey,
}

/// Memoized sorted view over a [`FeedController`]
#[derive(Debug, Default)]
pub struct DerivedView {
    inputs: Option<ViewInputs>,
    items: Vec<Character>,
    recomputes: usize,
}

impl DerivedView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorted characters, recomputed only if the feed or sort key changed
    pub fn get(&mut self, feed: &FeedController, key: SortKey) -> &[Character] {
        let inputs = ViewInputs {
            generation: feed.generation(),
            revision: feed.revision(),
            key,
        };
        if self.inputs != Some(inputs) {
            self.items = derive_view(feed.characters(), key);
            self.inputs = Some(inputs);
            self.recomputes += 1;
        }
        &self.items
    }

    /// Last computed view without checking inputs
    #[cfg(test)]
    pub fn items(&self) -> &[Character] {
        &self.items
    }

    /// How many times the view has been recomputed
    #[cfg(test)]
    pub fn recomputes(&self) -> usize {
        self.recomputes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{character, FilterState, Page};
    use std::collections::HashSet;

    fn sample() -> Vec<Character> {
        vec![
            character("1", "Rick Sanchez", "Earth (C-137)"),
            character("2", "beth", "Earth (Replacement Dimension)"),
            character("3", "Abadango Cluster Princess", "Abadango"),
            character("4", "Morty Smith", "unknown"),
            character("5", "Évil Morty", "Citadel of Ricks"),
            character("6", "Birdperson", "Bird World"),
        ]
    }

    fn names(view: &[Character]) -> Vec<&str> {
        view.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_name_is_case_and_accent_insensitive() {
        let view = derive_view(&sample(), SortKey::Name);
        assert_eq!(
            names(&view),
            vec![
                "Abadango Cluster Princess",
                "beth",
                "Birdperson",
                "Évil Morty",
                "Morty Smith",
                "Rick Sanchez"
            ]
        );
    }

    #[test]
    fn test_sort_by_origin() {
        let view = derive_view(&sample(), SortKey::OriginName);
        let origins: Vec<_> = view.iter().map(|c| c.origin.name.as_str()).collect();
        assert_eq!(origins[0], "Abadango");
        assert_eq!(origins[1], "Bird World");
        assert_eq!(origins.last(), Some(&"unknown"));
    }

    #[test]
    fn test_view_is_pure_and_idempotent() {
        let acc = sample();
        let before = acc.clone();
        for key in [SortKey::Name, SortKey::OriginName] {
            let once = derive_view(&acc, key);
            let twice = derive_view(&once, key);
            assert_eq!(once, twice);
            assert_eq!(once.len(), acc.len());
            let a: HashSet<_> = once.iter().map(|c| &c.id).collect();
            let b: HashSet<_> = acc.iter().map(|c| &c.id).collect();
            assert_eq!(a, b);
        }
        assert_eq!(acc, before);
    }

    #[test]
    fn test_ties_keep_accumulator_order() {
        let acc = vec![
            character("a", "Zed", "Earth"),
            character("b", "Amy", "Earth"),
            character("c", "Bob", "Earth"),
            character("d", "Cat", "Abadango"),
        ];
        let view = derive_view(&acc, SortKey::OriginName);
        let ids: Vec<_> = view.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn test_compare_locale_total_order() {
        assert_eq!(compare_locale("abc", "ABC"), Ordering::Greater);
        assert_eq!(compare_locale("abc", "abd"), Ordering::Less);
        assert_eq!(compare_locale("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_derived_view_recomputes_only_on_change() {
        let mut feed = FeedController::new(FilterState::default());
        let mut view = DerivedView::new();
        let r1 = feed.mount();
        feed.apply_page(
            &r1,
            Page {
                results: sample(),
                has_next: true,
            },
        );

        view.get(&feed, SortKey::Name);
        view.get(&feed, SortKey::Name);
        assert_eq!(view.recomputes(), 1);

        view.get(&feed, SortKey::OriginName);
        assert_eq!(view.recomputes(), 2);

        let r2 = feed.load_more().unwrap();
        feed.apply_page(
            &r2,
            Page {
                results: vec![character("7", "Aaron", "Earth")],
                has_next: false,
            },
        );
        let first = view.get(&feed, SortKey::Name)[0].name.clone();
        assert_eq!(first, "Aaron");
        assert_eq!(view.recomputes(), 3);
        assert_eq!(view.items().len(), 7);
    }
}
