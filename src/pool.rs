use crate::articles::Article;
use crate::puzzle::{AdmissionRules, Puzzle, RejectReason};
use log::debug;
use rand::Rng;

/// Trait for different question selection strategies
pub trait IndexPicker {
    /// Pick an index into the remaining pool, or None when it is empty
    fn pick(&mut self, pool_len: usize) -> Option<usize>;
}

/// Uniform selection over whatever is left (free play)
pub struct RandomPicker;

impl IndexPicker for RandomPicker {
    fn pick(&mut self, pool_len: usize) -> Option<usize> {
        if pool_len == 0 {
            None
        } else {
            Some(rand::thread_rng().gen_range(0..pool_len))
        }
    }
}

/// the questions still in play; records leave when rejected or played out,
/// and the pool is never refilled
pub struct ArticlePool {
    articles: Vec<Article>,
}

impl ArticlePool {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// drops a played-out question; the caller passes the source index the
    /// puzzle was drawn with, before any further draw shifts the pool
    pub fn remove(&mut self, index: usize) {
        if index < self.articles.len() {
            self.articles.remove(index);
        }
    }

    /// draws the next playable question; rejected records are dropped from
    /// the pool and another pick is made, until the pool runs dry
    pub fn draw(&mut self, picker: &mut dyn IndexPicker, rules: &AdmissionRules) -> Option<Puzzle> {
        loop {
            let index = picker.pick(self.articles.len())?;
            match Puzzle::build(&self.articles[index], index, rules) {
                Ok(puzzle) => return Some(puzzle),
                Err(reason) => {
                    self.reject(index, reason);
                }
            }
        }
    }

    fn reject(&mut self, index: usize, reason: RejectReason) {
        debug!("dropping \"{}\": {}", self.articles[index].title, reason);
        self.articles.remove(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// always picks the head of the pool, for deterministic tests
    struct FirstPicker;

    impl IndexPicker for FirstPicker {
        fn pick(&mut self, pool_len: usize) -> Option<usize> {
            if pool_len == 0 {
                None
            } else {
                Some(0)
            }
        }
    }

    fn good_article(title: &str) -> Article {
        let filler = "עוד מלל ממלא שנכתב כאן רק כדי לעבור את סף האורך המזערי של הקטע. ";
        let mut extract = format!("{} ", title);
        while extract.chars().count() < 160 {
            extract.push_str(filler);
        }
        Article {
            title: title.to_string(),
            extract,
            pageid: 11,
            views: None,
            rank: None,
        }
    }

    fn short_article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            extract: "קצר מדי.".to_string(),
            pageid: 12,
            views: None,
            rank: None,
        }
    }

    #[test]
    fn test_draw_returns_playable_puzzle() {
        let mut pool = ArticlePool::new(vec![good_article("ירושלים")]);
        let puzzle = pool.draw(&mut FirstPicker, &AdmissionRules::default());

        let puzzle = puzzle.unwrap();
        assert_eq!(puzzle.display_title, "ירושלים");
        assert_eq!(puzzle.source_index, 0);
        // the drawn record stays in the pool until the player moves on
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_draw_drops_rejected_and_retries() {
        let mut pool = ArticlePool::new(vec![short_article("דחוי"), good_article("ירושלים")]);
        let puzzle = pool
            .draw(&mut FirstPicker, &AdmissionRules::default())
            .unwrap();

        assert_eq!(puzzle.display_title, "ירושלים");
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_draw_empty_pool() {
        let mut pool = ArticlePool::new(vec![]);
        assert!(pool
            .draw(&mut FirstPicker, &AdmissionRules::default())
            .is_none());
    }

    #[test]
    fn test_draw_exhausts_all_rejected() {
        let mut pool = ArticlePool::new(vec![short_article("א"), short_article("ב")]);
        assert!(pool
            .draw(&mut FirstPicker, &AdmissionRules::default())
            .is_none());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_remove_out_of_range_ignored() {
        let mut pool = ArticlePool::new(vec![good_article("ירושלים")]);
        pool.remove(5);
        assert_eq!(pool.len(), 1);

        pool.remove(0);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_drawn_question_not_seen_again_after_remove() {
        let mut pool = ArticlePool::new(vec![good_article("ירושלים"), good_article("הטכניון")]);

        let first = pool
            .draw(&mut FirstPicker, &AdmissionRules::default())
            .unwrap();
        pool.remove(first.source_index);

        let second = pool
            .draw(&mut FirstPicker, &AdmissionRules::default())
            .unwrap();
        assert_ne!(first.display_title, second.display_title);
        pool.remove(second.source_index);

        assert!(pool
            .draw(&mut FirstPicker, &AdmissionRules::default())
            .is_none());
    }

    #[test]
    fn test_random_picker_stays_in_range() {
        let mut picker = RandomPicker;
        for _ in 0..50 {
            let idx = picker.pick(5).unwrap();
            assert!(idx < 5);
        }
        assert_eq!(picker.pick(0), None);
    }
}
