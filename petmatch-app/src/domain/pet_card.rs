use serde::{Deserialize, Serialize};

use super::Pet;

/// UI-facing wrapper: a pet plus the transient spinner flag shown while a
/// like awaits confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetCard {
    pub pet: Pet,
    pub is_loading: bool,
}

impl PetCard {
    pub fn new(pet: Pet) -> Self {
        Self {
            pet,
            is_loading: false,
        }
    }
}

/// Liked cards ranked by descending match score, capped at `limit`.
/// The sort is stable, so equal scores keep their list order.
pub fn top_liked(cards: &[PetCard], limit: usize) -> Vec<PetCard> {
    let mut liked: Vec<PetCard> = cards.iter().filter(|c| c.pet.liked).cloned().collect();
    liked.sort_by(|a, b| b.pet.match_percentage.cmp(&a.pet.match_percentage));
    liked.truncate(limit);
    liked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, liked: bool, score: u32) -> PetCard {
        PetCard::new(Pet::new(id.to_string(), format!("pet {}", id), score).with_liked(liked))
    }

    #[test]
    fn test_new_card_is_not_loading() {
        let c = card("a", false, 50);
        assert!(!c.is_loading);
    }

    #[test]
    fn test_top_liked_filters_and_sorts_descending() {
        let cards = vec![
            card("a", true, 40),
            card("b", false, 99),
            card("c", true, 90),
            card("d", true, 65),
        ];
        let top = top_liked(&cards, 6);
        let ids: Vec<&str> = top.iter().map(|c| c.pet.user_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d", "a"]);
        assert!(top.iter().all(|c| c.pet.liked));
    }

    #[test]
    fn test_top_liked_caps_at_limit() {
        let cards: Vec<PetCard> = (0..10).map(|i| card(&i.to_string(), true, i)).collect();
        let top = top_liked(&cards, 6);
        assert_eq!(top.len(), 6);
        assert_eq!(top[0].pet.match_percentage, 9);
        assert_eq!(top[5].pet.match_percentage, 4);
    }

    #[test]
    fn test_top_liked_is_stable_for_equal_scores() {
        let cards = vec![card("first", true, 80), card("second", true, 80)];
        let top = top_liked(&cards, 6);
        assert_eq!(top[0].pet.user_id, "first");
        assert_eq!(top[1].pet.user_id, "second");
    }

    #[test]
    fn test_top_liked_empty_when_nothing_liked() {
        let cards = vec![card("a", false, 90), card("b", false, 80)];
        assert!(top_liked(&cards, 6).is_empty());
    }
}
