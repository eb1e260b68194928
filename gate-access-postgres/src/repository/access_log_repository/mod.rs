pub mod repo_impl;
pub mod create;
pub mod load_page;
#[cfg(test)]
pub mod test_utils;

pub use repo_impl::AccessLogRepositoryImpl;
