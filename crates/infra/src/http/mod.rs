//! HTTP collaborators of the host application

pub mod directory;
pub mod logbook;

pub use directory::HttpDirectory;
pub use logbook::HttpLogbook;
