// Plan quota caps referenced by the role rule sets.
//
// The stored counters (`user_groups_count`, `times_matches_generated`) are
// compared strictly below these caps: a BASIC user may own up to 2 groups,
// so creation is allowed while the counter is below 2.

/// Maximum number of groups a BASIC user may own.
pub const BASIC_GROUP_CREATE_LIMIT: u32 = 2;

/// Maximum number of groups a PRO user may own.
pub const PRO_GROUP_CREATE_LIMIT: u32 = 5;

/// Total times a BASIC group may generate matches.
pub const BASIC_SORT_LIMIT: u32 = 1;

/// Total times a PRO group may generate matches.
pub const PRO_SORT_LIMIT: u32 = 2;
