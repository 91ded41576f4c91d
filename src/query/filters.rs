//! Catalog filters and random selection

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::QueryError;
use crate::catalog::{Database, Difficulty, Question};

/// Questions asked by `company` (case-insensitive exact match)
pub fn by_company<'a>(db: &'a Database, company: &str) -> Vec<&'a Question> {
    db.questions.iter().filter(|q| q.asked_by(company)).collect()
}

/// Questions whose topic equals `topic`, ignoring case
pub fn by_topic<'a>(db: &'a Database, topic: &str) -> Vec<&'a Question> {
    let topic = topic.to_lowercase();
    db.questions.iter().filter(|q| q.topic.to_lowercase() == topic).collect()
}

/// Questions of the given difficulty tier
pub fn by_difficulty(db: &Database, level: Difficulty) -> Vec<&Question> {
    db.questions.iter().filter(|q| q.difficulty == level).collect()
}

/// Uniformly pick one element
///
/// # Errors
///
/// Returns `QueryError::EmptyPool` if `items` is empty.
pub fn random_one<'a, T, R>(items: &'a [T], rng: &mut R) -> Result<&'a T, QueryError>
where
    R: Rng + ?Sized,
{
    items.choose(rng).ok_or(QueryError::EmptyPool)
}

/// Pick `min(n, items.len())` distinct elements in random order
pub fn random_distinct_subset<'a, T, R>(items: &'a [T], n: usize, rng: &mut R) -> Vec<&'a T>
where
    R: Rng + ?Sized,
{
    let mut picked: Vec<&T> = items.iter().collect();
    picked.shuffle(rng);
    picked.truncate(n);
    picked
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::catalog::QuestionId;

    fn question(id: u32, topic: &str, difficulty: Difficulty, companies: &[&str]) -> Question {
        Question {
            id: QuestionId::new(id),
            title: format!("Question {id}"),
            topic: topic.into(),
            difficulty,
            companies: companies.iter().map(|c| c.to_string()).collect(),
            link: format!("https://example.com/{id}"),
        }
    }

    fn catalog() -> Database {
        Database {
            questions: vec![
                question(1, "Array", Difficulty::Easy, &["Amazon", "Google"]),
                question(2, "Graph", Difficulty::Hard, &["Google"]),
                question(3, "array", Difficulty::Medium, &["amazon"]),
                question(4, "DP", Difficulty::Medium, &[]),
            ],
            user_progress: Vec::new(),
        }
    }

    fn ids(questions: &[&Question]) -> Vec<u32> {
        questions.iter().map(|q| q.id.value()).collect()
    }

    #[test]
    fn company_match_ignores_case() {
        let db = catalog();
        assert_eq!(ids(&by_company(&db, "amazon")), vec![1, 3]);
        assert_eq!(by_company(&db, "amazon"), by_company(&db, "Amazon"));
        assert_eq!(by_company(&db, "AMAZON"), by_company(&db, "Amazon"));
    }

    #[test]
    fn company_match_is_exact() {
        let db = catalog();
        assert!(by_company(&db, "amaz").is_empty());
        assert!(by_company(&db, "microsoft").is_empty());
    }

    #[test]
    fn topic_match_ignores_case() {
        let db = catalog();
        assert_eq!(ids(&by_topic(&db, "ARRAY")), vec![1, 3]);
        assert_eq!(ids(&by_topic(&db, "dp")), vec![4]);
        assert!(by_topic(&db, "Tree").is_empty());
    }

    #[test]
    fn difficulty_filter_keeps_catalog_order() {
        let db = catalog();
        assert_eq!(ids(&by_difficulty(&db, Difficulty::Medium)), vec![3, 4]);
        assert_eq!(ids(&by_difficulty(&db, Difficulty::Hard)), vec![2]);
    }

    #[test]
    fn random_one_fails_on_empty_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let empty: Vec<u32> = Vec::new();
        assert_eq!(random_one(&empty, &mut rng), Err(QueryError::EmptyPool));
    }

    #[test]
    fn random_one_picks_a_member() {
        let mut rng = StdRng::seed_from_u64(7);
        let items = [10, 20, 30];
        for _ in 0..20 {
            assert!(items.contains(random_one(&items, &mut rng).unwrap()));
        }
    }

    #[test]
    fn subset_of_short_list_returns_everything() {
        let mut rng = StdRng::seed_from_u64(1);
        let items = [1, 2, 3];
        let picked = random_distinct_subset(&items, 5, &mut rng);
        assert_eq!(picked.len(), 3);
        let unique: HashSet<_> = picked.into_iter().collect();
        assert_eq!(unique.len(), 3);
    }

    proptest! {
        #[test]
        fn subset_is_distinct_and_bounded(len in 0usize..40, n in 0usize..10, seed in any::<u64>()) {
            let items: Vec<usize> = (0..len).collect();
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = random_distinct_subset(&items, n, &mut rng);

            prop_assert_eq!(picked.len(), n.min(len));
            let unique: HashSet<_> = picked.iter().copied().collect();
            prop_assert_eq!(unique.len(), picked.len());
            prop_assert!(picked.iter().all(|p| items.contains(*p)));
        }
    }
}
