pub mod repo_impl;
pub mod find_by_identity_key;
pub mod append_history;
pub mod load_history;
#[cfg(test)]
pub mod test_utils;

pub use repo_impl::PrincipalRepositoryImpl;
