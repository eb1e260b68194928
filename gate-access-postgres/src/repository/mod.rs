pub mod access_log_repository;
pub mod db_init;
pub mod gate_repository;
pub mod principal_repository;
