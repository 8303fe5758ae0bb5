use anyhow::Result;
use colly_common::{
    form::{encode_path_segment, UpdateCluster},
    Cluster,
};
use gloo_net::http::Request;
use leptos::prelude::*;

use crate::{
    app::SessionContext,
    grid::{
        apply_view, paged_rows, visible_columns, ColumnDef, GridRow, GridViewState, PaginationBar,
        QuickFilterInput, SortableHeaderCell,
    },
    modal::{EditInput, EditModal, ErrorResponse},
};

async fn get_clusters() -> Result<Vec<Cluster>> {
    let resp = Request::get("/colly/clusters").send().await?;
    let clusters: Vec<Cluster> = resp.json().await?;
    Ok(clusters)
}

async fn save_cluster(
    changed: Cluster,
    clusters: RwSignal<Vec<Cluster>>,
    selected: RwSignal<Option<Cluster>>,
    edit_modal_hidden: RwSignal<bool>,
) -> Result<(), ErrorResponse> {
    let update = UpdateCluster::from_cluster(&changed);
    let resp = Request::post(&format!(
        "/colly/clusters/{}",
        encode_path_segment(&changed.name)
    ))
    .header("content-type", "application/x-www-form-urlencoded")
    .body(update.form_body())?
    .send()
    .await?;
    if !resp.ok() {
        let body = resp.text().await.unwrap_or_default();
        leptos::logging::error!("failed to save cluster: {body}");
        return Err(ErrorResponse {
            error: if body.is_empty() {
                "Internal Server Error".to_string()
            } else {
                body
            },
        });
    }
    clusters.update(|clusters| patch_cluster(clusters, &changed));
    selected.set(Some(changed));
    edit_modal_hidden.set(true);
    Ok(())
}

/// Clusters are keyed by name; a confirmed edit replaces the matching
/// entry in place.
pub fn patch_cluster(clusters: &mut [Cluster], changed: &Cluster) {
    if let Some(existing) = clusters.iter_mut().find(|c| c.name == changed.name) {
        *existing = changed.clone();
    }
}

pub fn sync_chip_class(synced: bool) -> &'static str {
    if synced {
        "bg-green-100 text-green-800"
    } else {
        "bg-red-100 text-red-800"
    }
}

pub fn sync_label(synced: bool) -> &'static str {
    if synced {
        "Synced"
    } else {
        "Not Synced"
    }
}

pub fn cluster_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("name", "Name", 200),
        ColumnDef::new("description", "Description", 400),
        ColumnDef::new("synced", "Sync Status", 150),
    ]
}

#[derive(Clone, PartialEq)]
pub struct ClusterRow {
    pub cluster: Cluster,
}

impl GridRow for ClusterRow {
    fn field(&self, name: &str) -> String {
        match name {
            "name" => self.cluster.name.clone(),
            "description" => self.cluster.description.clone().unwrap_or_default(),
            "synced" => sync_label(self.cluster.synced).to_string(),
            _ => String::new(),
        }
    }
}

#[component]
pub fn ClustersView() -> impl IntoView {
    let session = expect_context::<Signal<Option<SessionContext>>>();
    let user_info = Signal::derive(move || {
        session
            .with(|s| s.as_ref().map(|s| s.user_info.clone()))
            .unwrap_or_default()
    });

    let clusters = RwSignal::new(Vec::<Cluster>::new());
    let loading = RwSignal::new(true);
    let list_resource = LocalResource::new(|| async move { get_clusters().await });
    Effect::new(move |_| {
        if let Some(result) = list_resource.read().as_deref() {
            match result {
                Ok(list) => clusters.set(list.clone()),
                Err(err) => leptos::logging::error!("failed to fetch clusters: {err}"),
            }
            loading.set(false);
        }
    });

    // in-memory display preferences only; the single persisted storage
    // slot belongs to the environments table
    let view_state = RwSignal::new(GridViewState::default());
    let persist = Callback::new(move |()| {});
    let columns = Signal::derive(cluster_columns);

    let selected = RwSignal::new(None::<Cluster>);

    let filtered = Signal::derive(move || {
        let rows: Vec<ClusterRow> = clusters
            .get()
            .into_iter()
            .map(|cluster| ClusterRow { cluster })
            .collect();
        columns.with(|columns| view_state.with(|state| apply_view(&rows, columns, state)))
    });
    let total = Signal::derive(move || filtered.with(|rows| rows.len()));
    let paged = Signal::derive(move || {
        view_state.with(|state| filtered.with(|rows| paged_rows(rows, state.page, state.page_size)))
    });
    let visible_cols = Signal::derive(move || {
        columns.with(|columns| view_state.with(|state| visible_columns(columns, state)))
    });

    let edit_modal_hidden = RwSignal::new(true);

    view! {
        <section class="w-full h-full flex flex-col">
            <div class="pb-4">
                <h5 class="mr-3 text-2xl font-semibold">
                    Clusters
                </h5>
                <p class="text-gray-700">{"Clusters known to the inventory and their sync status"}</p>
                <div class="flex flex-col items-center justify-between py-4 gap-y-3 md:flex-row md:space-y-0 md:space-x-4">
                    <div class="w-full md:w-1/2">
                        <QuickFilterInput view_state persist placeholder="Search...".to_string() />
                    </div>
                    <div
                        class="flex flex-row items-center gap-1"
                        class:hidden=move || !user_info.get().can_edit()
                    >
                        <button
                            type="button"
                            title="Edit"
                            class="p-2.5 hover:bg-gray-100 focus:outline-none rounded-lg inline-flex items-center"
                            class=("text-gray-300", move || selected.get().is_none())
                            class=("text-gray-600", move || selected.get().is_some())
                            disabled=move || selected.get().is_none()
                            on:click=move |_| {
                                if selected.get_untracked().is_some() {
                                    edit_modal_hidden.set(false);
                                }
                            }
                        >
                            <svg class="w-4 h-4" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
                                <path stroke="currentColor" stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="m14.304 4.844 2.852 2.852M7 7H4a1 1 0 0 0-1 1v10a1 1 0 0 0 1 1h11a1 1 0 0 0 1-1v-4.5m2.409-9.91a2.017 2.017 0 0 1 0 2.853l-6.844 6.844L8 14l.713-3.565 6.844-6.844a2.015 2.015 0 0 1 2.852 0Z"/>
                            </svg>
                            <span class="sr-only">Edit</span>
                        </button>
                    </div>
                </div>
            </div>

            { move || if loading.get() {
                view! { <div class="p-4 text-gray-700">"Loading..."</div> }.into_any()
            } else {
                ().into_any()
            }}

            <div
                class="overflow-x-auto w-full"
                class:hidden=move || loading.get()
            >
                <table class="w-full text-left text-gray-700 text-sm">
                    <thead class="bg-gray-50">
                        <tr>
                            <th scope="col" class="py-2 px-4 w-10"></th>
                            <For
                                each=move || visible_cols.get()
                                key=|column| column.clone()
                                children=move |column| {
                                    view! { <SortableHeaderCell column view_state persist /> }
                                }
                            />
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || paged.get().into_iter().enumerate()
                            key=|(_, row)| (
                                row.cluster.name.clone(),
                                row.cluster.description.clone(),
                                row.cluster.synced,
                            )
                            children=move |(i, row)| {
                                view! { <ClusterRowView i row selected /> }
                            }
                        />
                    </tbody>
                </table>
                <PaginationBar total view_state persist />
            </div>

            { move || match (user_info.get().can_edit(), selected.get()) {
                (true, Some(cluster)) => view! {
                    <EditClusterModal
                        cluster
                        clusters
                        selected
                        modal_hidden=edit_modal_hidden
                    />
                }.into_any(),
                _ => ().into_any(),
            }}
        </section>
    }
}

#[component]
fn ClusterRowView(
    i: usize,
    row: ClusterRow,
    selected: RwSignal<Option<Cluster>>,
) -> impl IntoView {
    let name = row.cluster.name.clone();
    let toggle_cluster = row.cluster.clone();
    let is_selected = Signal::derive(move || {
        selected.with(|s| s.as_ref().map(|c| c.name.clone()) == Some(name.clone()))
    });
    let on_toggle = move |ev| {
        if event_target_checked(&ev) {
            selected.set(Some(toggle_cluster.clone()));
        } else {
            selected.set(None);
        }
    };
    let synced = row.cluster.synced;
    view! {
        <tr
            class=("border-t", move || i > 0)
            class=("bg-white", move || !is_selected.get())
            class=("bg-blue-50", move || is_selected.get())
        >
            <td class="px-4 py-2">
                <input
                    type="checkbox"
                    class="w-4 h-4 border border-gray-300 rounded bg-gray-50 focus:ring-3 focus:ring-blue-300"
                    prop:checked=move || is_selected.get()
                    on:change=on_toggle
                />
            </td>
            <td class="px-4 py-2">{row.cluster.name.clone()}</td>
            <td class="px-4 py-2">{row.cluster.description.clone().unwrap_or_default()}</td>
            <td class="px-4 py-2">
                <span class=format!("text-xs font-medium px-2.5 py-0.5 rounded-full {}", sync_chip_class(synced))>
                    {sync_label(synced)}
                </span>
            </td>
        </tr>
    }
}

#[component]
fn EditClusterModal(
    cluster: Cluster,
    clusters: RwSignal<Vec<Cluster>>,
    selected: RwSignal<Option<Cluster>>,
    modal_hidden: RwSignal<bool>,
) -> impl IntoView {
    let name = RwSignal::new(cluster.name.clone());
    let description = RwSignal::new(cluster.description.clone().unwrap_or_default());

    let action = {
        let cluster = cluster.clone();
        Action::new_local(move |_| {
            let mut changed = cluster.clone();
            let description = description.get_untracked().trim().to_string();
            changed.description = if description.is_empty() {
                None
            } else {
                Some(description)
            };
            save_cluster(changed, clusters, selected, modal_hidden)
        })
    };

    let body = view! {
        <EditInput label="Name".to_string() value=name placeholder=String::new() disabled=true />
        <EditInput label="Description".to_string() value=description placeholder="what this cluster hosts".to_string() />
    };
    view! {
        <EditModal title="Edit Cluster".to_string() modal_hidden action body />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cluster(name: &str, synced: bool) -> Cluster {
        Cluster {
            name: name.to_string(),
            description: None,
            synced,
        }
    }

    #[test]
    fn patch_replaces_matching_name_only() {
        let mut clusters = vec![test_cluster("a", true), test_cluster("b", false)];
        let mut changed = clusters[0].clone();
        changed.description = Some("updated".to_string());
        patch_cluster(&mut clusters, &changed);

        assert_eq!(clusters[0].description.as_deref(), Some("updated"));
        assert_eq!(clusters[1], test_cluster("b", false));

        let stranger = test_cluster("zz", true);
        patch_cluster(&mut clusters, &stranger);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn sync_status_presentation() {
        assert_eq!(sync_label(true), "Synced");
        assert_eq!(sync_label(false), "Not Synced");
        assert_eq!(sync_chip_class(true), "bg-green-100 text-green-800");
        assert_eq!(sync_chip_class(false), "bg-red-100 text-red-800");
    }

    #[test]
    fn cluster_rows_project_display_fields() {
        let mut cluster = test_cluster("cluster-a", false);
        cluster.description = Some("west zone".to_string());
        let row = ClusterRow { cluster };
        assert_eq!(row.field("name"), "cluster-a");
        assert_eq!(row.field("description"), "west zone");
        assert_eq!(row.field("synced"), "Not Synced");
        assert_eq!(row.field("bogus"), "");
    }
}
