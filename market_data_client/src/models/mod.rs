pub mod bar;
pub mod bar_series;
pub mod metadata;
pub mod news;
pub mod request_params;
