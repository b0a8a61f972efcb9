pub mod dataset;
pub mod importer;

pub use dataset::Dataset;
pub use importer::TaskImporter;
