mod api;
mod app;
mod export;
mod message;
mod model;
mod views;

pub fn main() -> iced::Result {
    app::run()
}
