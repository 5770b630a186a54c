use crate::app::App;

mod app;
mod components;
mod services;
mod tops_sheet;

fn main() {
    console_error_panic_hook::set_once();
    // Adjusted to the configured level once the client config is loaded.
    let _ = console_log::init_with_level(log::Level::Info);
    yew::Renderer::<App>::new().render();
}
