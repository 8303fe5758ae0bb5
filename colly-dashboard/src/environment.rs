use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use colly_common::{form::UpdateEnvironment, Environment, EnvironmentStatus, EnvironmentType};
use gloo_net::http::Request;
use leptos::prelude::*;

use crate::{
    app::SessionContext,
    datepicker::Datepicker,
    grid::{
        apply_view, paged_rows, visible_columns, ColumnDef, ColumnsPanel, FiltersPanel, GridRow,
        PaginationBar, QuickFilterInput, SortableHeaderCell,
    },
    modal::{ConfirmModal, EditInput, EditModal, ErrorResponse, RelativeTime},
    view_state::{load_view_state, save_view_state},
    ENV_TABLE_STATE_KEY, RESTORE_SETTLE_MS,
};

async fn get_environments() -> Result<Vec<Environment>> {
    let resp = Request::get("/colly/environments").send().await?;
    let environments: Vec<Environment> = resp.json().await?;
    Ok(environments)
}

async fn save_environment(
    changed: Environment,
    environments: RwSignal<Vec<Environment>>,
    selected: RwSignal<Option<Environment>>,
    edit_modal_hidden: RwSignal<bool>,
) -> Result<(), ErrorResponse> {
    let update = UpdateEnvironment::from_environment(&changed);
    let resp = Request::post(&format!("/colly/environments/{}", changed.id))
        .header("content-type", "application/x-www-form-urlencoded")
        .body(update.form_body())?
        .send()
        .await?;
    if !resp.ok() {
        let body = resp.text().await.unwrap_or_default();
        leptos::logging::error!("failed to save environment: {body}");
        return Err(ErrorResponse {
            error: if body.is_empty() {
                "Internal Server Error".to_string()
            } else {
                body
            },
        });
    }
    environments.update(|environments| patch_environment(environments, &changed));
    selected.set(Some(changed));
    edit_modal_hidden.set(true);
    Ok(())
}

async fn delete_environment(
    id: i64,
    environments: RwSignal<Vec<Environment>>,
    selected: RwSignal<Option<Environment>>,
    confirm_modal_hidden: RwSignal<bool>,
) -> Result<(), ErrorResponse> {
    let resp = Request::delete(&format!("/colly/environments/{id}"))
        .send()
        .await?;
    if !resp.ok() {
        let body = resp.text().await.unwrap_or_default();
        leptos::logging::error!("failed to delete environment: {body}");
        return Err(ErrorResponse {
            error: if body.is_empty() {
                "Internal Server Error".to_string()
            } else {
                body
            },
        });
    }
    environments.update(|environments| remove_environment(environments, id));
    selected.set(None);
    confirm_modal_hidden.set(true);
    Ok(())
}

/// Replaces the matching entry in place after a confirmed write. The
/// list is never re-fetched; the server and this copy only diverge if
/// someone else mutates concurrently.
pub fn patch_environment(environments: &mut [Environment], changed: &Environment) {
    if let Some(existing) = environments.iter_mut().find(|env| env.id == changed.id) {
        *existing = changed.clone();
    }
}

pub fn remove_environment(environments: &mut Vec<Environment>, id: i64) {
    environments.retain(|env| env.id != id);
}

/// Label vocabulary for the edit dialog's suggestions: the union of
/// labels across all loaded environments, first-seen order.
pub fn all_labels(environments: &[Environment]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for env in environments {
        for label in &env.labels {
            if !labels.contains(label) {
                labels.push(label.clone());
            }
        }
    }
    labels
}

pub fn status_chip_class(status: EnvironmentStatus) -> &'static str {
    match status {
        EnvironmentStatus::InUse => "bg-green-100 text-green-800",
        EnvironmentStatus::Free => "bg-blue-100 text-blue-800",
        EnvironmentStatus::Migrating => "bg-yellow-100 text-yellow-800",
        EnvironmentStatus::Reserved => "bg-red-100 text-red-800",
    }
}

/// Base columns plus one column per metadata-supplied monitoring
/// metric. The metadata list is the only source of monitoring columns;
/// rows never contribute their own.
pub fn env_columns(monitoring_columns: &[String]) -> Vec<ColumnDef> {
    let mut columns = vec![
        ColumnDef::new("name", "Name", 150),
        ColumnDef::new("type", "Type", 120),
        ColumnDef::new("namespaces", "Namespace(s)", 200),
        ColumnDef::new("cluster", "Cluster", 150),
        ColumnDef::new("owner", "Owner", 120),
        ColumnDef::new("team", "Team", 120),
        ColumnDef::new("expirationDate", "Expiration Date", 150),
        ColumnDef::new("status", "Status", 120),
        ColumnDef::new("labels", "Labels", 200),
        ColumnDef::new("description", "Description", 300),
        ColumnDef::new("deploymentVersion", "Version", 150),
        ColumnDef::new("cleanInstallationDate", "Clean Installation Date", 200),
    ];
    columns.extend(
        monitoring_columns
            .iter()
            .map(|key| ColumnDef::new(key, key, 150)),
    );
    columns
}

#[derive(Clone, PartialEq)]
pub struct EnvRow {
    pub env: Environment,
}

impl GridRow for EnvRow {
    fn field(&self, name: &str) -> String {
        let env = &self.env;
        match name {
            "name" => env.name.clone(),
            "type" => env.env_type.label().to_string(),
            "namespaces" => env
                .namespaces
                .iter()
                .map(|ns| ns.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            "cluster" => env
                .cluster
                .as_ref()
                .map(|cluster| cluster.name.clone())
                .unwrap_or_default(),
            "owner" => env.owner.clone().unwrap_or_default(),
            "team" => env.team.clone().unwrap_or_default(),
            "expirationDate" => env
                .expiration_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            "status" => env.status.label().to_string(),
            "labels" => env.labels.join(", "),
            "description" => env.description.clone().unwrap_or_default(),
            "deploymentVersion" => env.deployment_version.clone().unwrap_or_default(),
            "cleanInstallationDate" => env
                .clean_installation_date
                .map(|time| time.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            other => env.monitoring_data.get(other).cloned().unwrap_or_default(),
        }
    }
}

#[allow(clippy::type_complexity)]
fn env_row_key(
    env: &Environment,
) -> (
    i64,
    String,
    Option<String>,
    Option<String>,
    EnvironmentStatus,
    EnvironmentType,
    Vec<String>,
    Option<String>,
    Option<chrono::NaiveDate>,
) {
    (
        env.id,
        env.name.clone(),
        env.owner.clone(),
        env.team.clone(),
        env.status,
        env.env_type,
        env.labels.clone(),
        env.description.clone(),
        env.expiration_date,
    )
}

#[component]
pub fn EnvironmentsView() -> impl IntoView {
    let session = expect_context::<Signal<Option<SessionContext>>>();
    let user_info = Signal::derive(move || {
        session
            .with(|s| s.as_ref().map(|s| s.user_info.clone()))
            .unwrap_or_default()
    });
    let columns = Signal::derive(move || {
        let monitoring = session
            .with(|s| s.as_ref().map(|s| s.monitoring_columns.clone()))
            .unwrap_or_default();
        env_columns(&monitoring)
    });

    let environments = RwSignal::new(Vec::<Environment>::new());
    let loading = RwSignal::new(true);
    let list_resource = LocalResource::new(|| async move { get_environments().await });
    Effect::new(move |_| {
        if let Some(result) = list_resource.read().as_deref() {
            match result {
                Ok(envs) => environments.set(envs.clone()),
                Err(err) => leptos::logging::error!("failed to fetch environments: {err}"),
            }
            loading.set(false);
        }
    });

    let view_state = RwSignal::new(load_view_state(ENV_TABLE_STATE_KEY).unwrap_or_default());
    // arm persistence only after the restore has settled, so restoring
    // is never saved back as a user change
    let initialized = RwSignal::new(false);
    set_timeout(
        move || initialized.set(true),
        Duration::from_millis(RESTORE_SETTLE_MS),
    );
    let persist = Callback::new(move |()| {
        if !initialized.get_untracked() {
            return;
        }
        save_view_state(ENV_TABLE_STATE_KEY, &view_state.get_untracked());
    });

    let selected = RwSignal::new(None::<Environment>);

    let filtered = Signal::derive(move || {
        let rows: Vec<EnvRow> = environments
            .get()
            .into_iter()
            .map(|env| EnvRow { env })
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
    let labels_vocabulary = Signal::derive(move || all_labels(&environments.get()));

    let edit_modal_hidden = RwSignal::new(true);
    let confirm_modal_hidden = RwSignal::new(true);

    let delete_action = Action::new_local(move |_| async move {
        let Some(env) = selected.get_untracked() else {
            return Err(ErrorResponse {
                error: "no environment selected".to_string(),
            });
        };
        delete_environment(env.id, environments, selected, confirm_modal_hidden).await
    });

    view! {
        <section class="w-full h-full flex flex-col">
            <div class="pb-4">
                <h5 class="mr-3 text-2xl font-semibold">
                    Environments
                </h5>
                <p class="text-gray-700">{"View and manage the environments discovered across your clusters"}</p>
                <div class="flex flex-col items-center justify-between py-4 gap-y-3 md:flex-row md:space-y-0 md:space-x-4">
                    <div class="w-full md:w-1/2">
                        <QuickFilterInput view_state persist placeholder="Search...".to_string() />
                    </div>
                    <div class="flex flex-row items-center gap-1">
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
                            <button
                                type="button"
                                title="Delete"
                                class="p-2.5 hover:bg-gray-100 focus:outline-none rounded-lg inline-flex items-center"
                                class=("text-gray-300", move || selected.get().is_none())
                                class=("text-red-700", move || selected.get().is_some())
                                disabled=move || selected.get().is_none()
                                on:click=move |_| {
                                    if selected.get_untracked().is_some() {
                                        confirm_modal_hidden.set(false);
                                    }
                                }
                            >
                                <svg class="w-4 h-4" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
                                    <path stroke="currentColor" stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M5 7h14m-9 3v8m4-8v8M10 3h4a1 1 0 0 1 1 1v3H9V4a1 1 0 0 1 1-1ZM6 7h12v13a1 1 0 0 1-1 1H7a1 1 0 0 1-1-1V7Z"/>
                                </svg>
                                <span class="sr-only">Delete</span>
                            </button>
                        </div>
                        <ColumnsPanel columns view_state persist />
                        <FiltersPanel columns view_state persist />
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
                <table class="w-full text-left text-gray-700 text-sm" style="min-width: 800px">
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
                            key=|(_, row)| env_row_key(&row.env)
                            children=move |(i, row)| {
                                view! { <EnvRowView i row selected visible_cols /> }
                            }
                        />
                    </tbody>
                </table>
                <PaginationBar total view_state persist />
            </div>

            { move || match (user_info.get().can_edit(), selected.get()) {
                (true, Some(env)) => view! {
                    <EditEnvironmentModal
                        env
                        all_labels=labels_vocabulary.get()
                        environments
                        selected
                        modal_hidden=edit_modal_hidden
                    />
                }.into_any(),
                _ => ().into_any(),
            }}

            { move || match selected.get() {
                Some(env) => view! {
                    <ConfirmModal
                        title="Delete Environment".to_string()
                        content=format!("Are you sure you want to permanently delete the environment: {}. All data will be lost and cannot be recovered.", env.name)
                        modal_hidden=confirm_modal_hidden
                        confirm_action=delete_action
                    />
                }.into_any(),
                None => ().into_any(),
            }}
        </section>
    }
}

#[component]
fn EnvRowView(
    i: usize,
    row: EnvRow,
    selected: RwSignal<Option<Environment>>,
    visible_cols: Signal<Vec<ColumnDef>>,
) -> impl IntoView {
    let env_id = row.env.id;
    let toggle_env = row.env.clone();
    let is_selected =
        Signal::derive(move || selected.with(|s| s.as_ref().map(|env| env.id) == Some(env_id)));
    let on_toggle = move |ev| {
        if event_target_checked(&ev) {
            selected.set(Some(toggle_env.clone()));
        } else {
            selected.set(None);
        }
    };
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
            <For
                each=move || visible_cols.get()
                key=|column| column.field.clone()
                children=move |column| {
                    let row = row.clone();
                    view! {
                        <td class="px-4 py-2 truncate">
                            { env_cell(&row, &column) }
                        </td>
                    }
                }
            />
        </tr>
    }
}

fn env_cell(row: &EnvRow, column: &ColumnDef) -> AnyView {
    let env = &row.env;
    match column.field.as_str() {
        "status" => {
            let status = env.status;
            view! {
                <span class=format!("text-xs font-medium px-2.5 py-0.5 rounded-full {}", status_chip_class(status))>
                    {status.label()}
                </span>
            }
            .into_any()
        }
        "labels" => view! {
            <div class="flex flex-row flex-wrap gap-1">
                {env
                    .labels
                    .iter()
                    .map(|label| view! {
                        <span class="bg-gray-100 text-gray-800 text-xs font-medium px-2.5 py-0.5 rounded-full">{label.clone()}</span>
                    })
                    .collect_view()}
            </div>
        }
        .into_any(),
        "cleanInstallationDate" => match env.clean_installation_date {
            Some(time) => view! { <RelativeTime time /> }.into_any(),
            None => ().into_any(),
        },
        _ => row.field(&column.field).into_any(),
    }
}

fn some_if_not_empty(value: String) -> Option<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[component]
fn EditEnvironmentModal(
    env: Environment,
    all_labels: Vec<String>,
    environments: RwSignal<Vec<Environment>>,
    selected: RwSignal<Option<Environment>>,
    modal_hidden: RwSignal<bool>,
) -> impl IntoView {
    let name = RwSignal::new(env.name.clone());
    let owner = RwSignal::new(env.owner.clone().unwrap_or_default());
    let team = RwSignal::new(env.team.clone().unwrap_or_default());
    let description = RwSignal::new(env.description.clone().unwrap_or_default());
    let status = RwSignal::new(env.status);
    let env_type = RwSignal::new(env.env_type);
    let labels = RwSignal::new(env.labels.clone());
    let expiration_date = RwSignal::new(env.expiration_date);

    let action = {
        let env = env.clone();
        Action::new_local(move |_| {
            let mut changed = env.clone();
            changed.owner = some_if_not_empty(owner.get_untracked());
            changed.team = some_if_not_empty(team.get_untracked());
            changed.description = some_if_not_empty(description.get_untracked());
            changed.status = status.get_untracked();
            changed.env_type = env_type.get_untracked();
            changed.labels = labels.get_untracked();
            changed.expiration_date = expiration_date.get_untracked();
            save_environment(changed, environments, selected, modal_hidden)
        })
    };

    let body = view! {
        <EditInput label="Name".to_string() value=name placeholder=String::new() disabled=true />
        <EditInput label="Owner".to_string() value=owner placeholder="owner of the environment".to_string() />
        <EditInput label="Team".to_string() value=team placeholder="team using the environment".to_string() />
        <div>
            <label class="block mb-2 text-sm font-medium text-gray-900">Expiration Date</label>
            <Datepicker value=expiration_date disable_past=true />
        </div>
        <div>
            <label class="block mb-2 text-sm font-medium text-gray-900">Status</label>
            <select
                class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5"
                on:change=move |ev| {
                    if let Ok(value) = EnvironmentStatus::from_str(&event_target_value(&ev)) {
                        status.set(value);
                    }
                }
            >
                {EnvironmentStatus::ALL
                    .iter()
                    .map(|s| {
                        let s = *s;
                        view! {
                            <option value=s.to_string() selected=move || status.get() == s>{s.label()}</option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
        <div>
            <label class="block mb-2 text-sm font-medium text-gray-900">Type</label>
            <select
                class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5"
                on:change=move |ev| {
                    if let Ok(value) = EnvironmentType::from_str(&event_target_value(&ev)) {
                        env_type.set(value);
                    }
                }
            >
                {EnvironmentType::ALL
                    .iter()
                    .map(|t| {
                        let t = *t;
                        view! {
                            <option value=t.to_string() selected=move || env_type.get() == t>{t.label()}</option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
        <EditInput label="Description".to_string() value=description placeholder="what this environment is for".to_string() />
        <LabelsInput labels suggestions=all_labels />
    };
    view! {
        <EditModal title="Edit Environment".to_string() modal_hidden action body />
    }
}

#[component]
fn LabelsInput(labels: RwSignal<Vec<String>>, suggestions: Vec<String>) -> impl IntoView {
    let entry = RwSignal::new(String::new());
    let add_label = move || {
        let value = entry.get_untracked().trim().to_string();
        if value.is_empty() {
            return;
        }
        labels.update(|labels| {
            if !labels.contains(&value) {
                labels.push(value);
            }
        });
        entry.set(String::new());
    };
    let remove_label = move |label: String| {
        labels.update(|labels| labels.retain(|l| l != &label));
    };
    view! {
        <div>
            <label class="block mb-2 text-sm font-medium text-gray-900">Labels</label>
            <div
                class="flex flex-row flex-wrap gap-1 mb-2"
                class:hidden=move || labels.with(|labels| labels.is_empty())
            >
                <For
                    each=move || labels.get()
                    key=|label| label.clone()
                    children=move |label| {
                        let removed = label.clone();
                        view! {
                            <span class="inline-flex items-center bg-gray-100 text-gray-800 text-xs font-medium px-2.5 py-0.5 rounded-full">
                                {label.clone()}
                                <button
                                    type="button"
                                    class="ml-1 text-gray-500 hover:text-gray-900"
                                    on:click=move |_| remove_label(removed.clone())
                                >
                                    <svg class="w-2 h-2" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 14 14">
                                        <path stroke="currentColor" stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="m1 1 6 6m0 0 6 6M7 7l6-6M7 7l-6 6"/>
                                    </svg>
                                    <span class="sr-only">Remove label</span>
                                </button>
                            </span>
                        }
                    }
                />
            </div>
            <div class="flex flex-row items-center gap-2">
                <input
                    type="text"
                    list="all-labels"
                    prop:value=move || entry.get()
                    on:input=move |ev| entry.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            add_label();
                        }
                    }
                    class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5"
                    placeholder="add a label"
                />
                <datalist id="all-labels">
                    {suggestions
                        .iter()
                        .map(|suggestion| view! { <option value=suggestion.clone()></option> })
                        .collect_view()}
                </datalist>
                <button
                    type="button"
                    class="py-2.5 px-5 text-sm font-medium text-gray-900 focus:outline-none bg-white rounded-lg border border-gray-200 hover:bg-gray-100 hover:text-blue-700 focus:z-10 focus:ring-4 focus:ring-gray-100"
                    on:click=move |_| add_label()
                >
                    Add
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_env(id: i64, name: &str) -> Environment {
        Environment {
            id,
            name: name.to_string(),
            namespaces: vec![],
            cluster: None,
            owner: None,
            team: None,
            status: EnvironmentStatus::Free,
            env_type: EnvironmentType::Environment,
            labels: vec![],
            description: None,
            deployment_version: None,
            monitoring_data: HashMap::new(),
            expiration_date: None,
            clean_installation_date: None,
        }
    }

    #[test]
    fn patch_replaces_matching_id_only() {
        let mut environments = vec![test_env(1, "one"), test_env(2, "two")];
        environments[0].owner = Some("a".to_string());

        let mut changed = environments[0].clone();
        changed.owner = Some("b".to_string());
        patch_environment(&mut environments, &changed);

        assert_eq!(environments[0].owner.as_deref(), Some("b"));
        assert_eq!(environments[1], test_env(2, "two"));

        // unknown id leaves the list untouched
        let stranger = test_env(9, "nine");
        patch_environment(&mut environments, &stranger);
        assert_eq!(environments.len(), 2);
    }

    #[test]
    fn remove_deletes_by_id() {
        let mut environments = vec![test_env(1, "one"), test_env(2, "two")];
        remove_environment(&mut environments, 2);
        assert_eq!(environments.len(), 1);
        assert_eq!(environments[0].id, 1);
    }

    #[test]
    fn all_labels_unions_in_first_seen_order() {
        let mut a = test_env(1, "a");
        a.labels = vec!["blue".to_string(), "shared".to_string()];
        let mut b = test_env(2, "b");
        b.labels = vec!["shared".to_string(), "edge".to_string()];

        assert_eq!(all_labels(&[a, b]), vec!["blue", "shared", "edge"]);
    }

    #[test]
    fn status_chips_follow_the_color_mapping() {
        assert_eq!(
            status_chip_class(EnvironmentStatus::InUse),
            "bg-green-100 text-green-800"
        );
        assert_eq!(
            status_chip_class(EnvironmentStatus::Free),
            "bg-blue-100 text-blue-800"
        );
        assert_eq!(
            status_chip_class(EnvironmentStatus::Migrating),
            "bg-yellow-100 text-yellow-800"
        );
        assert_eq!(
            status_chip_class(EnvironmentStatus::Reserved),
            "bg-red-100 text-red-800"
        );
    }

    #[test]
    fn row_projection_flattens_nested_fields() {
        let mut env = test_env(1, "env-1");
        env.namespaces = vec![
            colly_common::Namespace {
                name: "env-1-core".to_string(),
            },
            colly_common::Namespace {
                name: "env-1-bss".to_string(),
            },
        ];
        env.cluster = Some(colly_common::ClusterRef {
            name: "cluster-a".to_string(),
        });
        env.env_type = EnvironmentType::CseToolset;
        env.monitoring_data
            .insert("pods".to_string(), "12".to_string());

        let row = EnvRow { env };
        assert_eq!(row.field("namespaces"), "env-1-core, env-1-bss");
        assert_eq!(row.field("cluster"), "cluster-a");
        assert_eq!(row.field("type"), "CSE Toolset");
        assert_eq!(row.field("status"), "Free");
        assert_eq!(row.field("pods"), "12");
        // monitoring metrics missing on this row resolve to empty
        assert_eq!(row.field("cpu"), "");
        assert_eq!(row.field("owner"), "");
    }

    #[test]
    fn monitoring_columns_come_from_metadata_in_order() {
        let columns = env_columns(&["cpu".to_string(), "pods".to_string()]);
        let fields: Vec<&str> = columns.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields[0], "name");
        assert_eq!(&fields[fields.len() - 2..], &["cpu", "pods"]);

        let base = env_columns(&[]);
        assert_eq!(base.len(), 12);
    }

    #[test]
    fn empty_draft_fields_become_absent() {
        assert_eq!(some_if_not_empty("  ".to_string()), None);
        assert_eq!(some_if_not_empty(String::new()), None);
        assert_eq!(
            some_if_not_empty("jdoe".to_string()),
            Some("jdoe".to_string())
        );
    }
}
