pub mod types;

pub use types::MediaKind;
