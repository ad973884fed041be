//! Folder tree sidebar.

use flowbit_catalog::{Folder, FolderId};
use flowbit_console::{SidebarAction, SidebarEvent, SidebarState};
use leptos::prelude::*;

/// Applies a sidebar action and forwards any selection upward.
fn dispatch(
    state: RwSignal<SidebarState>,
    action: SidebarAction,
    on_select: impl Fn(Option<FolderId>),
) {
    let mut event = None;
    state.update(|state| event = state.apply(action));
    if let Some(SidebarEvent::FolderSelected(id)) = event {
        on_select(id);
    }
}

/// Sidebar listing folders as collapsible nodes with their workflows.
#[component]
pub fn AppSidebar(
    folders: RwSignal<Vec<Folder>>,
    state: RwSignal<SidebarState>,
    on_select: impl Fn(Option<FolderId>) + Copy + Send + Sync + 'static,
    on_manage_folders: impl Fn() + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let view_model = Memo::new(move |_| folders.with(|folders| state.with(|state| state.view(folders))));

    view! {
        <aside class="sidebar">
            <header class="sidebar-header">
                <div class="logo">"FB"</div>
                <div>
                    <h1>"FlowBit"</h1>
                    <p class="muted">"Orchestration"</p>
                </div>
            </header>

            <nav class="sidebar-content">
                <div class="sidebar-group-label">
                    <span>"Workflows"</span>
                    <button
                        class="icon-btn"
                        title="Manage folders"
                        on:click=move |_| on_manage_folders()
                    >"⚙"</button>
                </div>

                <ul class="sidebar-menu">
                    <li>
                        <button
                            class=move || {
                                if view_model.with(|view| view.all_selected) {
                                    "menu-btn active"
                                } else {
                                    "menu-btn"
                                }
                            }
                            on:click=move |_| dispatch(state, SidebarAction::SelectFolder(None), on_select)
                        >
                            <span>"All Workflows"</span>
                            <span class="count-badge">
                                {move || view_model.with(|view| view.total_workflows)}
                            </span>
                        </button>
                    </li>

                    {move || {
                        view_model.get().folders.into_iter().map(|node| {
                            let toggle_id = node.id.clone();
                            let expanded = node.expanded;
                            view! {
                                <li class="folder-node">
                                    <button
                                        class="menu-btn"
                                        on:click=move |_| dispatch(
                                            state,
                                            SidebarAction::ToggleFolder(toggle_id.clone()),
                                            on_select,
                                        )
                                    >
                                        <span class="chevron">{if expanded { "▾" } else { "▸" }}</span>
                                        <span>{node.label}</span>
                                        <span class="count-badge">{node.workflow_count}</span>
                                    </button>
                                    {expanded.then(|| {
                                        let folder_id = node.id.clone();
                                        let active = node.active;
                                        view! {
                                            <ul class="sidebar-submenu">
                                                {node.workflows.into_iter().map(|badge| {
                                                    let select_id = folder_id.clone();
                                                    view! {
                                                        <li>
                                                            <button
                                                                class=if active { "submenu-btn active" } else { "submenu-btn" }
                                                                on:click=move |_| dispatch(
                                                                    state,
                                                                    SidebarAction::SelectFolder(Some(select_id.clone())),
                                                                    on_select,
                                                                )
                                                            >
                                                                <span class="truncate">{badge.name}</span>
                                                                <span class=format!("engine-badge {}", badge.badge_class)>
                                                                    {badge.engine.as_str()}
                                                                </span>
                                                            </button>
                                                        </li>
                                                    }
                                                }).collect_view()}
                                            </ul>
                                        }
                                    })}
                                </li>
                            }
                        }).collect_view()
                    }}
                </ul>

                {move || view_model.with(|view| view.loading).then(|| view! {
                    <p class="muted">"Loading workflows..."</p>
                })}
            </nav>

            <footer class="sidebar-footer muted">"FlowBit Orchestration v1.1"</footer>
        </aside>
    }
}
