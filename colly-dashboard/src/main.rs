use colly_dashboard::app::App;
use leptos::prelude::*;

pub fn main() {
    document().body().unwrap().set_inner_html("");
    leptos::mount::mount_to_body(App)
}
