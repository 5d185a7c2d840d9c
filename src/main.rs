mod ai;
mod board;
mod config;
mod gui;
mod session;
mod status;
mod theme;

fn main() -> iced::Result {
    tracing_subscriber::fmt::init();
    gui::run()
}
