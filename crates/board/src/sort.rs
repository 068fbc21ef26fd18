//! List sorters offered to the host.
//!
//! Both strategies are pure functions over the cards of a list and return
//! the card ids in their new order.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tempo_protocol::{CardSummary, SortResult};

/// How the cards of a list are ordered.
///
/// # Examples
///
/// ```
/// use tempo_board::SortStrategy;
/// use tempo_protocol::CardSummary;
///
/// let cards = vec![
///     CardSummary::new("b", "Beta"),
///     CardSummary::new("a", "Alpha"),
/// ];
/// let result = SortStrategy::ByName.sort(&cards);
/// let ids: Vec<_> = result.sorted_ids.iter().map(|id| id.as_str()).collect();
/// assert_eq!(ids, ["a", "b"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStrategy {
    /// Ascending by card name; cards with equal names keep their order.
    ByName,
    /// A uniformly random permutation.
    Random,
}

impl SortStrategy {
    /// Returns all strategies in menu order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::ByName, Self::Random]
    }

    /// Returns the label shown in the host's sort menu.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ByName => "Card Name",
            Self::Random => "Randomize",
        }
    }

    /// Orders the cards using the thread-local random generator for
    /// [`SortStrategy::Random`].
    #[must_use]
    pub fn sort(self, cards: &[CardSummary]) -> SortResult {
        self.sort_with_rng(cards, &mut rand::rng())
    }

    /// Orders the cards, drawing randomness from `rng`.
    ///
    /// [`SortStrategy::ByName`] ignores `rng`.
    #[must_use]
    pub fn sort_with_rng<R: Rng + ?Sized>(self, cards: &[CardSummary], rng: &mut R) -> SortResult {
        let mut ordered: Vec<&CardSummary> = cards.iter().collect();
        match self {
            // `sort_by` is stable, so equal names keep their input order.
            Self::ByName => ordered.sort_by(|a, b| a.name.cmp(&b.name)),
            // Fisher-Yates
            Self::Random => ordered.shuffle(rng),
        }

        SortResult {
            sorted_ids: ordered.into_iter().map(|card| card.id.clone()).collect(),
        }
    }
}

/// An entry of the host's list sort menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSorter {
    /// Menu label.
    pub text: &'static str,
    /// Strategy applied when the entry is picked.
    pub strategy: SortStrategy,
}

/// Returns the sorters tempo contributes to every list.
#[must_use]
pub fn list_sorters() -> Vec<ListSorter> {
    SortStrategy::all()
        .into_iter()
        .map(|strategy| ListSorter {
            text: strategy.display_name(),
            strategy,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;
    use tempo_protocol::CardId;

    fn ids(result: &SortResult) -> Vec<&str> {
        result.sorted_ids.iter().map(CardId::as_str).collect()
    }

    fn cards(entries: &[(&str, &str)]) -> Vec<CardSummary> {
        entries
            .iter()
            .map(|(id, name)| CardSummary::new(*id, *name))
            .collect()
    }

    #[test]
    fn by_name_orders_lexicographically() {
        let cards = cards(&[("b", "B"), ("a", "A"), ("b2", "B2")]);
        let result = SortStrategy::ByName.sort(&cards);
        assert_eq!(ids(&result), ["a", "b", "b2"]);
    }

    #[test]
    fn by_name_is_stable_for_equal_names() {
        let cards = cards(&[
            ("first", "Same"),
            ("x", "Another"),
            ("second", "Same"),
            ("third", "Same"),
        ]);
        let result = SortStrategy::ByName.sort(&cards);
        assert_eq!(ids(&result), ["x", "first", "second", "third"]);
    }

    #[test]
    fn by_name_is_case_sensitive_like_code_unit_order() {
        let cards = cards(&[("lower", "apple"), ("upper", "Zebra")]);
        let result = SortStrategy::ByName.sort(&cards);
        assert_eq!(ids(&result), ["upper", "lower"]);
    }

    #[test]
    fn empty_list_sorts_to_empty() {
        for strategy in SortStrategy::all() {
            assert!(strategy.sort(&[]).sorted_ids.is_empty());
        }
    }

    #[test]
    fn random_is_a_permutation() {
        let cards = cards(&[("a", "A"), ("b", "B"), ("c", "C"), ("d", "D"), ("e", "E")]);
        let mut rng = StdRng::seed_from_u64(42);
        let result = SortStrategy::Random.sort_with_rng(&cards, &mut rng);

        let mut shuffled = ids(&result);
        shuffled.sort_unstable();
        assert_eq!(shuffled, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn random_is_deterministic_for_a_seed() {
        let cards = cards(&[("a", "A"), ("b", "B"), ("c", "C"), ("d", "D")]);
        let first = SortStrategy::Random.sort_with_rng(&cards, &mut StdRng::seed_from_u64(7));
        let second = SortStrategy::Random.sort_with_rng(&cards, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn random_covers_all_orders_evenly() {
        let cards = cards(&[("a", "A"), ("b", "B"), ("c", "C")]);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<Vec<CardId>, usize> = HashMap::new();

        for _ in 0..6000 {
            let result = SortStrategy::Random.sort_with_rng(&cards, &mut rng);
            *counts.entry(result.sorted_ids).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        for count in counts.values() {
            assert!((800..=1200).contains(count), "skewed count {count}");
        }
    }

    #[test]
    fn sorters_menu() {
        let sorters = list_sorters();
        assert_eq!(sorters.len(), 2);
        assert_eq!(sorters[0].text, "Card Name");
        assert_eq!(sorters[0].strategy, SortStrategy::ByName);
        assert_eq!(sorters[1].text, "Randomize");
        assert_eq!(sorters[1].strategy, SortStrategy::Random);
    }
}
