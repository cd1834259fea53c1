//! Services that talk to the outside world

pub mod image_store;

pub use image_store::{
    ImageKind, ImageService, ImageStore, ImgBbImageStore, LocalImageStore, StoredImage,
    validate_image,
};
