// In-memory texture tracking: scanned records and the name -> color mapping

pub mod color_map;
pub mod discovery;
pub mod texture_record;

pub use color_map::ColorMap;
pub use discovery::TextureDiscoveryService;
pub use texture_record::TextureRecord;
