//! "Create New Workflow" modal.

use super::{create_trigger, list_recent_runs, schedule_cron_job};
use flowbit_catalog::{Engine, Folder, FolderId, FolderWorkflows};
use flowbit_console::{ComposerAction, ComposerEffect, ComposerError, ComposerState};
use flowbit_dispatch::TriggerType;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Applies a composer action and runs the effect it asks for.
pub(super) fn apply_action(state: RwSignal<ComposerState>, action: ComposerAction) {
    let mut effect = None;
    state.update(|state| effect = state.apply(action));
    if effect == Some(ComposerEffect::LoadRuns) {
        spawn_local(async move {
            // A failed refresh keeps the previous list
            if let Ok(runs) = list_recent_runs().await {
                state.update(|state| {
                    state.apply(ComposerAction::RunsLoaded(runs));
                });
            }
        });
    }
}

fn tab_label(tab: TriggerType) -> &'static str {
    match tab {
        TriggerType::Manual => "Manual",
        TriggerType::Webhook => "Webhook",
        TriggerType::Schedule => "Schedule",
    }
}

/// Copies `text` to the system clipboard.
#[cfg(feature = "hydrate")]
fn copy_to_clipboard(text: &str) {
    if let Some(window) = web_sys::window() {
        // Fire and forget; a refused write leaves the field for manual copy
        let _ = window.navigator().clipboard().write_text(text);
    }
}

#[cfg(not(feature = "hydrate"))]
fn copy_to_clipboard(_text: &str) {}

fn unavailable(e: ServerFnError) -> ComposerError {
    ComposerError::Unavailable {
        details: e.to_string(),
    }
}

/// Modal that builds and submits trigger requests.
#[component]
pub fn CreateWorkflowModal(
    state: RwSignal<ComposerState>,
    folders: RwSignal<Vec<Folder>>,
    catalog: Signal<FolderWorkflows>,
    api_url: String,
) -> impl IntoView {
    let api_url = StoredValue::new(api_url);
    let is_open = Memo::new(move |_| state.with(ComposerState::is_open));
    let form = Memo::new(move |_| state.with(|state| state.form.clone()));

    let on_submit = move |_| {
        let mut request = None;
        api_url.with_value(|api_url| state.update(|state| request = state.begin_submit(api_url)));
        if request.is_none() {
            return;
        }
        let form = form.get_untracked();
        let Some(engine) = form.engine else {
            return;
        };
        spawn_local(async move {
            let result = create_trigger(
                engine,
                form.workflow_id,
                form.tab,
                form.manual_payload,
                form.cron_expression,
            )
            .await
            .unwrap_or_else(|e| Err(unavailable(e)));
            state.update(|state| state.finish_submit(result));
        });
    };

    let on_schedule = move |_| {
        let mut job = None;
        state.update(|state| job = state.begin_schedule());
        let Some(job) = job else {
            return;
        };
        spawn_local(async move {
            let result = schedule_cron_job(job)
                .await
                .unwrap_or_else(|e| Err(unavailable(e)));
            state.update(|state| state.finish_schedule(result));
        });
    };

    let webhook_url = move || {
        api_url.with_value(|api_url| form.with(|form| form.webhook_url(api_url)))
            .unwrap_or_default()
    };

    let trigger_tabs = move || {
        form.with(|form| form.shows_trigger_tabs()).then(|| {
            view! {
                <div class="tabs">
                    <div class="tab-list">
                        {TriggerType::ALL.into_iter().map(|tab| view! {
                            <button
                                class=move || {
                                    if form.with(|form| form.tab == tab) { "tab active" } else { "tab" }
                                }
                                on:click=move |_| apply_action(state, ComposerAction::SelectTab(tab))
                            >{tab_label(tab)}</button>
                        }).collect_view()}
                    </div>
                    {move || match form.with(|form| form.tab) {
                        TriggerType::Manual => view! {
                            <textarea
                                placeholder="Enter JSON payload"
                                prop:value=move || form.with(|form| form.manual_payload.clone())
                                on:input=move |ev| apply_action(
                                    state,
                                    ComposerAction::EditPayload(event_target_value(&ev)),
                                )
                            ></textarea>
                        }.into_any(),
                        TriggerType::Webhook => view! {
                            <div class="webhook-tab">
                                <input type="text" readonly prop:value=webhook_url/>
                                <button on:click=move |_| copy_to_clipboard(&webhook_url())>
                                    "Copy Webhook URL"
                                </button>
                            </div>
                        }.into_any(),
                        TriggerType::Schedule => view! {
                            <div class="schedule-tab">
                                <input
                                    type="text"
                                    placeholder="* * * * *"
                                    prop:value=move || form.with(|form| form.cron_expression.clone())
                                    on:input=move |ev| apply_action(
                                        state,
                                        ComposerAction::EditCron(event_target_value(&ev)),
                                    )
                                />
                                <button on:click=on_schedule>"Schedule Job"</button>
                                {move || state.with(|state| state.last_scheduled().map(|id| view! {
                                    <p class="muted">{format!("Scheduled {}", id)}</p>
                                }))}
                            </div>
                        }.into_any(),
                    }}
                </div>
            }
        })
    };

    let engine_card = move || {
        form.with(|form| form.engine).map(|engine| {
            let profile = engine.profile();
            view! {
                <div class="engine-card">
                    <h3>
                        {profile.name}
                        <span class=format!("engine-badge {}", profile.color())>{engine.as_str()}</span>
                    </h3>
                    <p class="muted">{profile.description}</p>
                    <div class="engine-card-footer">
                        <span class="muted">{move || form.with(|form| form.subtitle()).unwrap_or_default()}</span>
                        <button
                            class="primary-btn"
                            on:click=on_submit
                            disabled=move || state.with(ComposerState::is_submitting)
                        >
                            {move || form.with(|form| form.action_label())}
                        </button>
                    </div>
                </div>
            }
        })
    };

    let runs_list = move || {
        let runs = state.with(|state| state.runs().to_vec());
        (!runs.is_empty()).then(|| view! {
            <section class="recent-runs">
                <h3>"Recent Runs"</h3>
                <ul>
                    {runs.into_iter().map(|run| view! {
                        <li>
                            <span>{run.flow_name}</span>
                            <span class="run-state">{format!("{:?}", run.status).to_lowercase()}</span>
                            <span class="muted">{run.created_at.format("%Y-%m-%d %H:%M:%S").to_string()}</span>
                        </li>
                    }).collect_view()}
                </ul>
            </section>
        })
    };

    view! {
        {move || is_open.get().then(|| view! {
            <div class="modal-overlay">
                <div class="modal">
                    <header class="modal-header">
                        <h2>"Create New Workflow"</h2>
                        <p class="muted">"Choose a platform and trigger type for your new automation workflow"</p>
                        <button class="icon-btn" on:click=move |_| apply_action(state, ComposerAction::Close)>"×"</button>
                    </header>

                    <select on:change=move |ev| {
                        let engine = event_target_value(&ev).parse::<Engine>().ok();
                        apply_action(state, ComposerAction::SelectEngine(engine));
                    }>
                        <option value="" selected=move || form.with(|form| form.engine.is_none())>
                            "Select an automation engine"
                        </option>
                        {Engine::ALL.into_iter().map(|engine| view! {
                            <option
                                value=engine.as_str()
                                selected=move || form.with(|form| form.engine == Some(engine))
                            >{engine.profile().name}</option>
                        }).collect_view()}
                    </select>

                    <select on:change=move |ev| {
                        apply_action(state, ComposerAction::SelectFolder(FolderId::from(event_target_value(&ev))));
                    }>
                        {move || folders.get().into_iter().map(|folder| {
                            let id = folder.id.clone();
                            view! {
                                <option
                                    value=folder.id.to_string()
                                    selected=move || form.with(|form| form.folder == id)
                                >{folder.name}</option>
                            }
                        }).collect_view()}
                    </select>

                    <select on:change=move |ev| {
                        apply_action(state, ComposerAction::SelectWorkflow(event_target_value(&ev)));
                    }>
                        <option value="" selected=move || form.with(|form| form.workflow_id.is_empty())>
                            "Select a workflow"
                        </option>
                        {move || {
                            let options: Vec<_> = catalog.with(|catalog| form.with(|form| {
                                form.workflow_options(catalog).into_iter().cloned().collect()
                            }));
                            options.into_iter().map(|workflow| {
                                let id = workflow.id.clone();
                                view! {
                                    <option
                                        value=workflow.id
                                        selected=move || form.with(|form| form.workflow_id == id)
                                    >{workflow.name}</option>
                                }
                            }).collect_view()
                        }}
                    </select>

                    {trigger_tabs}
                    {engine_card}

                    {move || state.with(|state| state.alert().map(str::to_string)).map(|alert| view! {
                        <p class="error" role="alert">
                            {alert}
                            <button class="icon-btn" on:click=move |_| apply_action(state, ComposerAction::DismissAlert)>"×"</button>
                        </p>
                    })}

                    {runs_list}
                </div>
            </div>
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_trigger_type_has_a_tab_label() {
        let labels: Vec<_> = TriggerType::ALL.into_iter().map(tab_label).collect();
        assert_eq!(labels, ["Manual", "Webhook", "Schedule"]);
    }
}
