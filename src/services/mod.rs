pub mod profile_loader;
pub mod relay;
