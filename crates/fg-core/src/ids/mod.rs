//! ID type wrappers for type safety.

mod id_macro;
pub mod photo_id;

pub use photo_id::PhotoId;
