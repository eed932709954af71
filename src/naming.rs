//! Randomized resource names
//!
//! Every run provisions fresh resources, so names carry a time-plus-random
//! suffix to avoid collisions with concurrently running walkthroughs in the
//! same subscription.

use chrono::Utc;
use uuid::Uuid;

/// Combine a prefix with a timestamp and random hex suffix, truncated to
/// `max_len`.
///
/// The result is the prefix followed by lowercase alphanumerics only.
pub fn random_name(prefix: &str, max_len: usize) -> String {
    let stamp = Utc::now().format("%H%M%S");
    let entropy = Uuid::new_v4().simple();
    let mut name = format!("{}{}{}", prefix, stamp, entropy);
    name.truncate(max_len);
    name
}
