//! Master → main release resolution

use crate::models::MasterRecord;

/// Release id a master points at, if any
///
/// Prefers `main_release`, falls back to `main_release_id`. A zero id is
/// treated as absent. `None` means the master has nothing to show, which is
/// a normal outcome rather than an error.
pub fn main_release_id(master: &MasterRecord) -> Option<u64> {
    master
        .main_release
        .filter(|id| *id != 0)
        .or(master.main_release_id.filter(|id| *id != 0))
}
