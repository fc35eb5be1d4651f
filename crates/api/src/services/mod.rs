//! Business services shared by every catalog resource.

pub mod resource;

pub use resource::ResourceService;
