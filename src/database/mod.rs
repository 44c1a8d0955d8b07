pub mod access;
pub mod models;
pub mod pool;
