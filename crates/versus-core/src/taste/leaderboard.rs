//! Global engagement ranking.

use versus_types::taste::LeaderboardEntry;
use versus_types::user::User;

/// Users ordered by engagement count, highest first.
///
/// The sort is stable: users with equal counts keep their input order.
pub fn rank_users(users: Vec<User>) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = users
        .into_iter()
        .map(|user| LeaderboardEntry {
            username: user.username,
            engagement_count: user.engagement_count,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_pic: user.profile_pic,
        })
        .collect();
    entries.sort_by(|a, b| b.engagement_count.cmp(&a.engagement_count));
    entries
}
