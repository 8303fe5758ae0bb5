use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::app::SessionContext;

#[component]
pub fn TopNav() -> impl IntoView {
    let session = expect_context::<Signal<Option<SessionContext>>>();
    let pathname = use_location().pathname;
    let on_clusters_tab = move || pathname.get().starts_with("/clusters");

    let authenticated = move || {
        session.with(|s| s.as_ref().map(|s| s.user_info.authenticated))
            .unwrap_or(false)
    };
    let displayed_name = move || {
        session
            .with(|s| {
                s.as_ref()
                    .and_then(|s| s.user_info.displayed_name().map(|name| name.to_string()))
            })
            .unwrap_or_default()
    };

    let handle_logout = move |_| {
        let _ = window().location().set_href(crate::LOGOUT_URL);
    };

    view! {
        <nav class="bg-white border-b border-gray-200 left-0 right-0 top-0 z-50">
            <div class="container mx-auto px-8 py-4 flex flex-wrap justify-between items-center">
                <div class="flex justify-start items-center">
                    <a href="/" class="flex items-center justify-between mr-8">
                        <span class="self-center text-2xl font-semibold whitespace-nowrap">Environments Overview</span>
                    </a>
                    <ul class="font-medium flex flex-row space-x-8">
                        <li>
                            <a href="/"
                                class="block"
                                class=("text-blue-700", move || !on_clusters_tab())
                                class=("text-gray-700", on_clusters_tab)
                            >Environments</a>
                        </li>
                        <li>
                            <a href="/clusters"
                                class="block"
                                class=("text-blue-700", on_clusters_tab)
                                class=("text-gray-700", move || !on_clusters_tab())
                            >Clusters</a>
                        </li>
                    </ul>
                </div>
                <div
                    class="flex flex-row items-center gap-2"
                    class:hidden=move || !authenticated()
                >
                    <span class="text-sm text-gray-500">{displayed_name}</span>
                    <button
                        type="button"
                        title="Log out"
                        class="p-2 text-gray-600 rounded-lg hover:text-gray-900 hover:bg-gray-100 focus:ring-2 focus:ring-gray-100"
                        on:click=handle_logout
                    >
                        <svg class="w-4 h-4" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 16 16">
                            <path stroke="currentColor" stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 8h11m0 0-4-4m4 4-4 4m-5 3H3a2 2 0 0 1-2-2V3a2 2 0 0 1 2-2h3"/>
                        </svg>
                        <span class="sr-only">Log out</span>
                    </button>
                </div>
            </div>
        </nav>
    }
}
