//! Candidate filtering, ranking, and suppression.
//!
//! Includes the confidence filter, the stable confidence sort, and greedy
//! IoU-based non-maximum suppression.

pub(crate) mod nms;
pub(crate) mod order;
