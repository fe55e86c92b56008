// Application layer - Use cases wired against the backend and surface seams
pub mod backend;
pub mod details_service;
pub mod pollers;
pub mod render_service;
pub mod surface;
pub mod visibility_service;

#[cfg(test)]
pub mod testing;
