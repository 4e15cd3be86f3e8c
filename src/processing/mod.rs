mod engine;
mod filters;

pub use engine::{
    apply, decode_image, encode_png, max_dim_for, render, resize_for_processing, RenderedPair,
    FAST_MAX_DIM, HIGH_MAX_DIM,
};
