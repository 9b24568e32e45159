pub mod abstract_trait;
pub mod repository;
pub mod service;
