/// Length of a single route in kilometres
pub type Distance = u32;
/// Length of a path, the sum of its route distances
pub type TotalDistance = u64;
