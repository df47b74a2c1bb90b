mod annotation;
mod app;
mod capabilities;
mod components;
mod config;
mod error;
mod image_pipeline;
mod message;
mod model;
mod playback;
mod session;
mod utils;
mod views;
mod windowing;
mod zoom;

pub fn main() -> iced::Result {
    app::run()
}
