//! Face sources.
//!
//! Loads the six images that make up a cube, stretches each to the atlas
//! cell size and optionally insets it with a transparent gutter.

pub mod discovery;
pub mod loader;

pub use discovery::{discover_face_files, named_file, FaceFiles};
pub use loader::{
    load_face, load_face_from_bytes, load_faces, normalize_face, prepare_face, prepare_faces,
};
