//! Dashboard page: folder sidebar, workflow list and the trigger composer.

mod sidebar;
mod trigger_modal;

pub use sidebar::AppSidebar;
pub use trigger_modal::CreateWorkflowModal;

use flowbit_catalog::{Engine, Folder, FolderId, FolderWorkflows, Workflow};
use flowbit_console::{ComposerError, ComposerState, SidebarState, SubmitOutcome};
use flowbit_core::CronJobId;
use flowbit_dispatch::{CronJob, RunRecord, TriggerType};
use leptos::prelude::*;

/// Settings the dashboard needs before it can render.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct DashboardSettings {
    /// Base URL of the flows backend, shown in webhook URLs.
    pub api_url: String,
    pub folders: Vec<Folder>,
}

/// Server function to load the dashboard settings.
#[server]
pub async fn get_dashboard_settings() -> Result<DashboardSettings, ServerFnError> {
    use crate::server_helpers::get_services;

    let services = get_services().await.map_err(|e| e.into_server_error())?;

    Ok(DashboardSettings {
        api_url: services.api_url.clone(),
        folders: services.folders().to_vec(),
    })
}

/// Server function to load the workflows of the given folders.
///
/// A failing engine backend yields an empty result, never an error.
#[server]
pub async fn load_folder_workflows(
    folder_ids: Vec<String>,
) -> Result<FolderWorkflows, ServerFnError> {
    use crate::server_helpers::get_services;

    let services = get_services().await.map_err(|e| e.into_server_error())?;
    let folders = services.resolve_folders(&folder_ids);

    Ok(services.fetcher.fetch(&folders).await)
}

/// Server function to trigger a workflow run.
///
/// The form is validated again here; validation and backend failures come
/// back as the inner `ComposerError`.
#[server]
pub async fn create_trigger(
    engine: Engine,
    workflow_id: String,
    tab: TriggerType,
    manual_payload: String,
    cron_expression: String,
) -> Result<Result<SubmitOutcome, ComposerError>, ServerFnError> {
    use crate::server_helpers::get_services;
    use flowbit_console::{ComposerForm, submit_trigger};

    let services = get_services().await.map_err(|e| e.into_server_error())?;

    let form = ComposerForm {
        engine: Some(engine),
        workflow_id,
        tab,
        manual_payload,
        cron_expression,
        ..ComposerForm::default()
    };
    let request = match form.prepare_trigger(&services.api_url) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, workflow_id = %form.workflow_id, "Rejected trigger form");
            return Ok(Err(e));
        }
    };

    Ok(submit_trigger(services.backend.as_ref(), &request).await)
}

/// Server function to register a cron job.
#[server]
pub async fn schedule_cron_job(
    job: CronJob,
) -> Result<Result<CronJobId, ComposerError>, ServerFnError> {
    use crate::server_helpers::get_services;
    use flowbit_console::schedule_job;
    use flowbit_dispatch::validate_cron_expression;

    let services = get_services().await.map_err(|e| e.into_server_error())?;

    if let Err(e) = validate_cron_expression(&job.schedule.minute) {
        tracing::debug!(error = %e, job_id = %job.id, "Rejected cron job");
        return Ok(Err(ComposerError::from(e)));
    }

    Ok(schedule_job(services.backend.as_ref(), &job).await)
}

/// Server function to list recent runs from the flows backend.
#[server]
pub async fn list_recent_runs() -> Result<Vec<RunRecord>, ServerFnError> {
    use crate::error::DashboardError;
    use crate::server_helpers::get_services;

    let services = get_services().await.map_err(|e| e.into_server_error())?;

    services.backend.recent_runs().await.map_err(|e| {
        tracing::warn!(error = %e, "Failed to fetch recent runs");
        DashboardError::RunsUnavailable {
            details: e.to_string(),
        }
        .into_server_error()
    })
}

/// Folder id derived from a user-entered name.
fn folder_id_for(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Workflows shown in the main panel: the selected folder's, or all of them.
fn visible_workflows(
    workflows: &FolderWorkflows,
    folders: &[Folder],
    selected: Option<&FolderId>,
) -> Vec<Workflow> {
    match selected {
        Some(folder) => workflows.for_folder(folder.as_str()).to_vec(),
        None => folders
            .iter()
            .flat_map(|folder| workflows.for_folder(folder.id.as_str()).iter().cloned())
            .collect(),
    }
}

/// Dashboard page.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let settings = Resource::new(|| (), |_| get_dashboard_settings());

    view! {
        <div class="dashboard-page">
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    settings.get().map(|result| match result {
                        Ok(settings) => view! { <Dashboard settings=settings/> }.into_any(),
                        Err(e) => view! {
                            <p class="error">{format!("Failed to load dashboard: {}", e)}</p>
                        }.into_any(),
                    })
                }}
            </Suspense>
        </div>
    }
}

/// Dashboard content once settings are known.
#[component]
fn Dashboard(settings: DashboardSettings) -> impl IntoView {
    let DashboardSettings { api_url, folders } = settings;
    let folders = RwSignal::new(folders);
    let sidebar = RwSignal::new(SidebarState::new());
    let composer = RwSignal::new(ComposerState::new());
    let selected = RwSignal::new(Option::<FolderId>::None);
    let (managing, set_managing) = signal(false);

    // Refetch whenever the folder list changes
    let workflows = Resource::new(
        move || {
            folders.with(|folders| {
                folders
                    .iter()
                    .map(|folder| folder.id.to_string())
                    .collect::<Vec<_>>()
            })
        },
        load_folder_workflows,
    );

    Effect::new(move || {
        if let Some(result) = workflows.get() {
            let loaded = result.unwrap_or_default();
            sidebar.update(|state| {
                state.apply(flowbit_console::SidebarAction::WorkflowsLoaded(loaded));
            });
        }
    });

    let catalog = Signal::derive(move || sidebar.with(|state| state.workflows().clone()));

    let heading = move || {
        selected.with(|selected| match selected {
            Some(id) => folders.with(|folders| {
                folders
                    .iter()
                    .find(|folder| &folder.id == id)
                    .map(|folder| folder.display_name().to_string())
                    .unwrap_or_else(|| id.to_string())
            }),
            None => "All Workflows".to_string(),
        })
    };

    view! {
        <div class="dashboard">
            <AppSidebar
                folders=folders
                state=sidebar
                on_select=move |id| selected.set(id)
                on_manage_folders=move || set_managing.update(|open| *open = !*open)
            />

            <section class="dashboard-main">
                <header class="dashboard-header">
                    <h1>{heading}</h1>
                    <button
                        class="primary-btn"
                        on:click=move |_| trigger_modal::apply_action(
                            composer,
                            flowbit_console::ComposerAction::Open,
                        )
                    >"Create Workflow"</button>
                </header>

                {move || managing.get().then(|| view! { <FolderManager folders=folders/> })}

                <ul class="workflow-list">
                    {move || {
                        let items = sidebar.with(|state| {
                            folders.with(|folders| {
                                selected.with(|selected| {
                                    visible_workflows(state.workflows(), folders, selected.as_ref())
                                })
                            })
                        });
                        if items.is_empty() {
                            view! { <li class="empty-state">"No workflows in this folder."</li> }
                                .into_any()
                        } else {
                            items
                                .into_iter()
                                .map(|workflow| view! {
                                    <li class="workflow-item">
                                        <span class="workflow-name">{workflow.name}</span>
                                        <span class=format!("engine-badge {}", workflow.engine.badge_class())>
                                            {workflow.engine.as_str()}
                                        </span>
                                    </li>
                                })
                                .collect_view()
                                .into_any()
                        }
                    }}
                </ul>
            </section>

            <CreateWorkflowModal
                state=composer
                folders=folders
                catalog=catalog
                api_url=api_url
            />
        </div>
    }
}

/// Inline form for adding folders to the sidebar.
#[component]
fn FolderManager(folders: RwSignal<Vec<Folder>>) -> impl IntoView {
    let (name, set_name) = signal(String::new());

    let on_add = move |_| {
        let display = name.get().trim().to_string();
        let id = folder_id_for(&display);
        if id.is_empty() {
            return;
        }
        folders.update(|folders| {
            if !folders.iter().any(|folder| folder.id.as_str() == id) {
                folders.push(Folder::new(id, display));
            }
        });
        set_name.set(String::new());
    };

    view! {
        <div class="folder-manager">
            <input
                type="text"
                placeholder="Folder name"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <button on:click=on_add disabled=move || name.get().trim().is_empty()>
                "Add Folder"
            </button>
        </div>
    }
}
