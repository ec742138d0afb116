//! Short record identifiers.
//!
//! Identifiers are the first six hex digits of a random v4 UUID. That is
//! about 16.7 million values, plenty for a personal catalog but not unique by
//! construction, so callers always go through [`unique_id`], which keeps
//! drawing until it finds a value nobody holds.

use log::debug;
use uuid::Uuid;

pub const ID_LEN: usize = 6;

/// Source of candidate identifiers.
pub trait IdGenerator {
    fn generate(&mut self) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&mut self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(ID_LEN);
        id
    }
}

/// Draws from `generator` until a candidate is not taken.
pub fn unique_id<G, F>(generator: &mut G, is_taken: F) -> String
where
    G: IdGenerator + ?Sized,
    F: Fn(&str) -> bool,
{
    let mut attempts = 0usize;
    loop {
        let candidate = generator.generate();
        attempts += 1;
        if !is_taken(&candidate) {
            if attempts > 1 {
                debug!("id {} accepted after {} attempts", candidate, attempts);
            }
            return candidate;
        }
        debug!("id {} already in use, drawing again", candidate);
    }
}

/// Replays a fixed list of ids, then falls back to random ones.
#[cfg(any(test, feature = "test_utils"))]
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    script: std::collections::VecDeque<String>,
    pub calls: usize,
}

#[cfg(any(test, feature = "test_utils"))]
impl ScriptedGenerator {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: ids.into_iter().map(Into::into).collect(),
            calls: 0,
        }
    }
}

#[cfg(any(test, feature = "test_utils"))]
impl IdGenerator for ScriptedGenerator {
    fn generate(&mut self) -> String {
        self.calls += 1;
        self.script
            .pop_front()
            .unwrap_or_else(|| UuidGenerator.generate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_ids_are_six_hex_chars() {
        let mut gen = UuidGenerator;
        for _ in 0..100 {
            let id = gen.generate();
            assert_eq!(id.len(), ID_LEN);
            assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn first_free_draw_wins() {
        let mut gen = ScriptedGenerator::new(["aaaaaa", "bbbbbb"]);
        let id = unique_id(&mut gen, |_| false);
        assert_eq!(id, "aaaaaa");
        assert_eq!(gen.calls, 1);
    }

    #[test]
    fn retries_past_collisions() {
        let taken: HashSet<String> = ["aaaaaa", "bbbbbb"].iter().map(|s| s.to_string()).collect();
        let mut gen = ScriptedGenerator::new(["aaaaaa", "bbbbbb", "aaaaaa", "cccccc"]);

        let id = unique_id(&mut gen, |c| taken.contains(c));

        assert_eq!(id, "cccccc");
        assert_eq!(gen.calls, 4);
    }

    #[test]
    fn escapes_a_stuck_generator_once_script_runs_out() {
        let taken: HashSet<String> = ["dddddd".to_string()].into_iter().collect();
        let mut gen = ScriptedGenerator::new(vec!["dddddd"; 5]);

        let id = unique_id(&mut gen, |c| taken.contains(c));

        assert!(!taken.contains(&id));
        assert!(gen.calls >= 6);
    }

    #[test]
    fn always_avoids_existing_set() {
        let mut gen = UuidGenerator;
        let mut taken = HashSet::new();
        for _ in 0..500 {
            let id = unique_id(&mut gen, |c| taken.contains(c));
            assert!(taken.insert(id));
        }
    }
}
