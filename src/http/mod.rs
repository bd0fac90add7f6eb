//! HTTP protocol layer module
//!
//! Response builders, decoupled from routing and the relay.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_empty_ok_response, build_image_response,
    build_options_response, build_page_response,
};
