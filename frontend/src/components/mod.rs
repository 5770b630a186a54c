pub mod chip_input;
pub mod helpers;
pub mod image_uploader;
pub mod metrics_display;
pub mod toast;
