//! Projectile/hostile collision resolution
//!
//! Pairwise box tests over the live collections. Each projectile can take
//! out at most one hostile and each hostile dies to at most one projectile,
//! so a hit is scored exactly once.

use glam::Vec2;

use super::state::{Hostile, Projectile};

/// A matched projectile/hostile pair, already removed from play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Centre of the destroyed hostile
    pub at: Vec2,
}

/// Remove every overlapping projectile/hostile pair.
///
/// Projectiles are matched oldest first, each against the first live
/// hostile it overlaps.
pub fn resolve_hits(projectiles: &mut Vec<Projectile>, hostiles: &mut Vec<Hostile>) -> Vec<Hit> {
    let mut spent = vec![false; projectiles.len()];
    let mut destroyed = vec![false; hostiles.len()];
    let mut hits = Vec::new();

    for (pi, projectile) in projectiles.iter().enumerate() {
        let shot = projectile.bounds();
        let target = hostiles
            .iter()
            .enumerate()
            .find(|(hi, h)| !destroyed[*hi] && shot.overlaps(&h.bounds()));

        if let Some((hi, hostile)) = target {
            spent[pi] = true;
            destroyed[hi] = true;
            hits.push(Hit {
                at: hostile.bounds().center(),
            });
        }
    }

    if !hits.is_empty() {
        retain_unflagged(projectiles, &spent);
        retain_unflagged(hostiles, &destroyed);
    }
    hits
}

/// Drop projectiles that reached the right edge; returns how many
pub fn remove_exited(projectiles: &mut Vec<Projectile>, screen_width: f32) -> usize {
    let before = projectiles.len();
    projectiles.retain(|p| !p.at_edge(screen_width));
    before - projectiles.len()
}

fn retain_unflagged<T>(items: &mut Vec<T>, flags: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !flags[index];
        index += 1;
        keep
    });
}
