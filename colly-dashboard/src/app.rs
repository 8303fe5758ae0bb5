use anyhow::Result;
use colly_common::{AppMetadata, UserInfo};
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use crate::{cluster::ClustersView, environment::EnvironmentsView, nav::TopNav};

/// Session-wide context resolved once at startup.
#[derive(Clone)]
pub struct SessionContext {
    pub user_info: UserInfo,
    pub monitoring_columns: Vec<String>,
}

async fn get_auth_status() -> Result<UserInfo> {
    let resp = Request::get("/colly/auth-status").send().await?;
    // anonymous sessions answer 401 with {"authenticated": false},
    // so the body is parsed regardless of status
    let info: UserInfo = resp.json().await?;
    Ok(info)
}

async fn get_metadata() -> Result<AppMetadata> {
    let resp = Request::get("/colly/metadata").send().await?;
    let metadata: AppMetadata = resp.json().await?;
    Ok(metadata)
}

async fn load_session() -> SessionContext {
    let (user_info, metadata) = futures::join!(get_auth_status(), get_metadata());
    let user_info = user_info.unwrap_or_else(|err| {
        leptos::logging::error!("failed to fetch auth status: {err}");
        UserInfo::default()
    });
    let metadata = metadata.unwrap_or_else(|err| {
        leptos::logging::error!("failed to fetch app metadata: {err}");
        AppMetadata::default()
    });
    SessionContext {
        user_info,
        monitoring_columns: metadata.monitoring_columns,
    }
}

pub fn set_context() {
    let session = LocalResource::new(|| async move { load_session().await });
    let session = Signal::derive(move || session.get().as_deref().cloned());
    provide_context(session);
}

#[component]
pub fn App() -> impl IntoView {
    set_context();
    view! {
        <Router>
            <Routes fallback=|| "Not found.">
                <Route path=path!("/") view=move || view! { <WrappedView element=EnvironmentsView /> } />
                <Route path=path!("/clusters") view=move || view! { <WrappedView element=ClustersView /> } />
            </Routes>
        </Router>
    }
}

/// Blocks each tab behind the one-shot session fetch, then lays out
/// the top bar and the tab body.
#[component]
pub fn WrappedView<T>(element: T) -> impl IntoView
where
    T: IntoView + Copy + 'static + Send + Sync,
{
    let session = expect_context::<Signal<Option<SessionContext>>>();
    view! {
        <Show
            when=move || session.with(|s| s.is_some())
            fallback=move || view! { <div class="p-8 text-gray-700">"Loading..."</div> }
        >
            <div class="flex flex-col h-screen">
                <TopNav />
                <div class="container mx-auto px-8 py-8 basis-0 grow overflow-y-auto">
                    {element}
                </div>
            </div>
        </Show>
    }
}
