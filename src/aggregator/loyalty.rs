//! Loyalty ranking: users with the most sessions.

use super::sessions::SessionIndex;
use super::stats::FrequencyTable;
use crate::parser::schema::LoyalUser;

/// Rank users by distinct session count
///
/// **Public** - descending; users with equal counts keep the order in
/// which they first appeared in the log
pub fn rank_loyal_users(index: &SessionIndex<'_>, top_n: usize) -> Vec<LoyalUser> {
    // Session ids are unique in the index, so one entry per session
    index
        .iter()
        .map(|s| s.user)
        .collect::<FrequencyTable<_>>()
        .top(top_n)
        .into_iter()
        .map(|(user, sessions)| LoyalUser {
            user: user.to_string(),
            sessions,
        })
        .collect()
}
