//! Used-facts ledger.
//!
//! A rolling, case-folded record of the facts already generated for an
//! entity. It is written after every generation and not read back into
//! generation requests.

/// Most recent entries kept per entity.
pub const USED_FACTS_CAP: usize = 60;

/// Merges `generated` into `ledger`: entries are lowercased, duplicates
/// keep their first position, and only the most recent
/// [`USED_FACTS_CAP`] entries survive.
#[must_use]
pub fn merge_used_facts(mut ledger: Vec<String>, generated: &[String]) -> Vec<String> {
    for fact in generated {
        let folded = fact.to_lowercase();
        if !ledger.contains(&folded) {
            ledger.push(folded);
        }
    }
    if ledger.len() > USED_FACTS_CAP {
        ledger.drain(..ledger.len() - USED_FACTS_CAP);
    }
    ledger
}
