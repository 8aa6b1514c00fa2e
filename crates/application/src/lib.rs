//! Application services and ports.

#![forbid(unsafe_code)]

mod access_ports;
mod access_service;

pub use access_ports::DirectoryRepository;
pub use access_service::{AccessDenial, AccessService, EffectiveAccess};
