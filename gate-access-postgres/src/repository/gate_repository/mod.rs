pub mod repo_impl;
pub mod find_by_gate_id;
pub mod increment_scan_count;
#[cfg(test)]
pub mod test_utils;

pub use repo_impl::GateRepositoryImpl;
