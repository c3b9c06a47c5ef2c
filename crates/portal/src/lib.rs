pub mod abstract_trait;
pub mod di;
pub mod domain;
pub mod guard;
pub mod handler;
pub mod middleware;
pub mod policy;
pub mod service;
pub mod session;
pub mod state;

#[cfg(test)]
mod test_support;
