// Core algorithm exports
pub mod distance;
pub mod leaderboard;
pub mod normalize;
pub mod track;

pub use distance::haversine_distance;
pub use leaderboard::{natural_cmp, LeaderboardBuilder};
pub use normalize::{clean_name, clean_time_value, normalize_gender, to_nullable_int};
pub use track::{parse_course, sample_track, CourseProfile, MAX_CHART_POINTS};
