//! Window bodies for the bundled apps. Each pane reads and writes its own bucket.

use std::rc::Rc;

use platform_host::BucketStore;

use super::*;
use crate::{
    apps::{evaluate_expression, format_number, run_terminal_command},
    buckets::{
        join_path, parent_path, Appearance, CalculatorHistory, FileNode, FileTree, FileTreeError,
        MusicLibrary, SystemSettings, UserProfile,
    },
    persistence,
};

fn bucket_store(runtime: DesktopRuntimeContext) -> Rc<dyn BucketStore> {
    runtime.host.get_value().bucket_store()
}

#[component]
pub(super) fn AppPane(app_id: AppId) -> impl IntoView {
    match app_id {
        AppId::Finder => view! { <FinderPane /> }.into_view(),
        AppId::Calculator => view! { <CalculatorPane /> }.into_view(),
        AppId::Terminal => view! { <TerminalPane /> }.into_view(),
        AppId::Music => view! { <MusicPane /> }.into_view(),
        AppId::Safari => view! { <SafariPane /> }.into_view(),
        AppId::SystemPreferences => view! { <PreferencesPane /> }.into_view(),
    }
}

#[component]
fn FinderPane() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let tree = create_rw_signal(None::<FileTree>);
    let folder = create_rw_signal("/".to_string());
    let open_file = create_rw_signal(None::<String>);
    let draft = create_rw_signal(String::new());
    let status = create_rw_signal(None::<String>);

    let store = bucket_store(runtime);
    spawn_local(async move {
        let loaded: FileTree = persistence::load_bucket(store.as_ref()).await;
        tree.set(Some(loaded));
    });

    let entries = move || {
        tree.get()
            .and_then(|tree| tree.find(&folder.get()).map(|node| node.children.clone()))
            .unwrap_or_default()
    };

    let write_file = move |path: String, content: String| {
        let store = bucket_store(runtime);
        spawn_local(async move {
            let mut outcome: Result<(), FileTreeError> = Ok(());
            let saved = persistence::update_bucket(store.as_ref(), |doc: &mut FileTree| {
                outcome = doc.write_file(&path, &content);
            })
            .await;
            match (saved, outcome) {
                (Ok(updated), Ok(())) => {
                    tree.set(Some(updated));
                    status.set(Some(format!("Saved {path}")));
                }
                (Err(err), _) => {
                    logging::warn!("persist file tree failed: {err}");
                    status.set(Some("Could not save".to_string()));
                }
                (_, Err(err)) => status.set(Some(err.to_string())),
            }
        });
    };

    let open_entry = move |node: FileNode| {
        let path = join_path(&folder.get_untracked(), &node.name);
        if node.is_folder() {
            open_file.set(None);
            folder.set(path);
        } else {
            draft.set(node.content);
            open_file.set(Some(path));
        }
        status.set(None);
    };

    let new_file = move |_| {
        let Some(current) = tree.get_untracked() else {
            return;
        };
        let folder_path = folder.get_untracked();
        let Some(node) = current.find(&folder_path) else {
            return;
        };
        let path = join_path(&folder_path, &node.unused_child_name("untitled", "txt"));
        draft.set(String::new());
        open_file.set(Some(path.clone()));
        write_file(path, String::new());
    };

    view! {
        <div class="finder">
            <div class="finder-toolbar">
                <button
                    class="finder-back"
                    aria-label="Enclosing folder"
                    disabled=move || folder.get() == "/"
                    on:click=move |_| {
                        open_file.set(None);
                        folder.update(|path| *path = parent_path(path));
                    }
                >
                    "‹"
                </button>
                <span class="finder-path">{move || folder.get()}</span>
                <button class="finder-new-file" on:click=new_file>"New File"</button>
            </div>
            <ul class="finder-entries" role="list">
                <For each=entries key=|node| node.name.clone() let:node>
                    {{
                        let label = node.name.clone();
                        let icon = if node.is_folder() { "folder" } else { "document" };
                        view! {
                            <li>
                                <button
                                    class="finder-entry"
                                    data-icon=icon
                                    on:dblclick=move |_| open_entry(node.clone())
                                >
                                    {label}
                                </button>
                            </li>
                        }
                    }}
                </For>
            </ul>
            {move || {
                open_file
                    .get()
                    .map(|path| {
                        let save_path = path.clone();
                        view! {
                            <div class="finder-editor">
                                <p class="finder-editor-path">{path}</p>
                                <textarea
                                    class="finder-editor-text"
                                    prop:value=move || draft.get()
                                    on:input=move |ev| draft.set(event_target_value(&ev))
                                ></textarea>
                                <button
                                    class="finder-save"
                                    on:click=move |_| write_file(save_path.clone(), draft.get_untracked())
                                >
                                    "Save"
                                </button>
                            </div>
                        }
                    })
            }}
            <p class="finder-status" aria-live="polite">{move || status.get()}</p>
        </div>
    }
}

#[component]
fn CalculatorPane() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let expression = create_rw_signal(String::new());
    let display = create_rw_signal("0".to_string());
    let history = create_rw_signal(CalculatorHistory::default());

    let store = bucket_store(runtime);
    spawn_local(async move {
        let loaded: CalculatorHistory = persistence::load_bucket(store.as_ref()).await;
        history.set(loaded);
    });

    let evaluate = move || {
        let input = expression.get_untracked();
        let Some(result) = evaluate_expression(&input) else {
            display.set("Error".to_string());
            return;
        };
        display.set(format_number(result));
        expression.set(format_number(result));

        let store = bucket_store(runtime);
        spawn_local(async move {
            match persistence::update_bucket(store.as_ref(), |doc: &mut CalculatorHistory| {
                doc.push(&input, result)
            })
            .await
            {
                Ok(updated) => history.set(updated),
                Err(err) => logging::warn!("persist calculator history failed: {err}"),
            }
        });
    };

    let keys = [
        "7", "8", "9", "÷", "4", "5", "6", "×", "1", "2", "3", "-", "0", ".", "C", "+",
    ];

    view! {
        <div class="calculator">
            <output class="calculator-display">{move || display.get()}</output>
            <form
                class="calculator-form"
                on:submit=move |ev: ev::SubmitEvent| {
                    ev.prevent_default();
                    evaluate();
                }
            >
                <input
                    class="calculator-input"
                    aria-label="Expression"
                    prop:value=move || expression.get()
                    on:input=move |ev| expression.set(event_target_value(&ev))
                />
            </form>
            <div class="calculator-keys">
                {keys
                    .into_iter()
                    .map(|key| {
                        view! {
                            <button
                                class="calculator-key"
                                on:click=move |_| {
                                    if key == "C" {
                                        expression.set(String::new());
                                        display.set("0".to_string());
                                    } else if matches!(key, "÷" | "×" | "-" | "+") {
                                        expression.update(|expr| expr.push_str(&format!(" {key} ")));
                                    } else {
                                        expression.update(|expr| expr.push_str(key));
                                    }
                                }
                            >
                                {key}
                            </button>
                        }
                    })
                    .collect_view()}
                <button class="calculator-key equals" on:click=move |_| evaluate()>"="</button>
            </div>
            <ol class="calculator-history">
                {move || {
                    history
                        .get()
                        .entries
                        .into_iter()
                        .rev()
                        .map(|entry| {
                            view! {
                                <li>{format!("{} = {}", entry.expression, format_number(entry.result))}</li>
                            }
                        })
                        .collect_view()
                }}
            </ol>
        </div>
    }
}

#[component]
fn TerminalPane() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let scrollback = create_rw_signal(vec!["Type `help` for a list of commands.".to_string()]);
    let input = create_rw_signal(String::new());
    // Offset from the newest history entry while browsing with the arrow keys.
    let recall = create_rw_signal(None::<usize>);

    let prompt = move || format!("{}@mac ~ %", state.get().profile.display_name.to_lowercase());

    let submit = move || {
        let line = input.get_untracked();
        input.set(String::new());
        recall.set(None);

        scrollback.update(|lines| lines.push(format!("{} {line}", prompt())));
        runtime.dispatch_action(DesktopAction::PushTerminalHistory {
            command: line.clone(),
        });

        let desktop = state.get_untracked();
        let reply = run_terminal_command(
            &line,
            &desktop.terminal_history,
            &desktop.profile.display_name,
        );
        if reply.clear {
            scrollback.set(Vec::new());
        }
        scrollback.update(|lines| lines.extend(reply.lines));
        if let Some(app_id) = reply.open {
            runtime.dispatch_action(DesktopAction::OpenApp { app_id });
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let commands = state.get_untracked().terminal_history.commands;
        let next = match ev.key().as_str() {
            "ArrowUp" if !commands.is_empty() => {
                Some(recall.get_untracked().map_or(0, |n| (n + 1).min(commands.len() - 1)))
            }
            "ArrowDown" => recall.get_untracked().and_then(|n| n.checked_sub(1)),
            _ => return,
        };
        ev.prevent_default();
        recall.set(next);
        let text = next
            .and_then(|n| commands.iter().rev().nth(n).cloned())
            .unwrap_or_default();
        input.set(text);
    };

    view! {
        <div class="terminal" role="log">
            <pre class="terminal-scrollback">{move || scrollback.get().join("\n")}</pre>
            <form
                class="terminal-prompt"
                on:submit=move |ev: ev::SubmitEvent| {
                    ev.prevent_default();
                    submit();
                }
            >
                <label class="terminal-prompt-label">{prompt}</label>
                <input
                    class="terminal-input"
                    spellcheck="false"
                    autocomplete="off"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
            </form>
        </div>
    }
}

#[component]
fn MusicPane() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let library = create_rw_signal(MusicLibrary::default());
    let now_playing = create_rw_signal(None::<String>);

    let store = bucket_store(runtime);
    spawn_local(async move {
        let loaded: MusicLibrary = persistence::load_bucket(store.as_ref()).await;
        library.set(loaded);
    });

    let toggle_favorite = move |track_id: String| {
        let store = bucket_store(runtime);
        spawn_local(async move {
            match persistence::update_bucket(store.as_ref(), |doc: &mut MusicLibrary| {
                doc.toggle_favorite(&track_id);
            })
            .await
            {
                Ok(updated) => library.set(updated),
                Err(err) => logging::warn!("persist music library failed: {err}"),
            }
        });
    };

    view! {
        <div class="music">
            <p class="music-now-playing">
                {move || {
                    let playing = now_playing.get();
                    library
                        .get()
                        .tracks
                        .into_iter()
                        .find(|track| Some(&track.id) == playing.as_ref())
                        .map(|track| format!("Now playing: {} by {}", track.title, track.artist))
                        .unwrap_or_else(|| "Not playing".to_string())
                }}
            </p>
            <ul class="music-tracks" role="list">
                <For each=move || library.get().tracks key=|track| track.id.clone() let:track>
                    {{
                        let id = track.id.clone();
                        let play_id = track.id.clone();
                        let favorite_id = track.id.clone();
                        let is_favorite = move || library.get().is_favorite(&id);
                        let pressed = is_favorite.clone();
                        view! {
                            <li class="music-track">
                                <button
                                    class="music-play"
                                    on:click=move |_| {
                                        let id = play_id.clone();
                                        now_playing.update(|current| {
                                            *current = if current.as_ref() == Some(&id) { None } else { Some(id) };
                                        });
                                    }
                                >
                                    {track.title.clone()}
                                </button>
                                <span class="music-artist">{track.artist.clone()}</span>
                                <span class="music-duration">{track.duration_label()}</span>
                                <button
                                    class="music-favorite"
                                    class:active=is_favorite
                                    aria-pressed=move || pressed().to_string()
                                    aria-label="Favorite"
                                    on:click=move |_| toggle_favorite(favorite_id.clone())
                                >
                                    "♥"
                                </button>
                            </li>
                        }
                    }}
                </For>
            </ul>
        </div>
    }
}

#[component]
fn SafariPane() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let address = create_rw_signal(String::new());

    let current_url = create_memo(move |_| state.get().browser.current_url);
    create_effect(move |_| {
        if let Some(url) = current_url.get() {
            address.set(url);
        }
    });

    view! {
        <div class="safari">
            <form
                class="safari-toolbar"
                on:submit=move |ev: ev::SubmitEvent| {
                    ev.prevent_default();
                    runtime.dispatch_action(DesktopAction::Navigate {
                        url: address.get_untracked(),
                    });
                }
            >
                <input
                    class="safari-address"
                    type="text"
                    placeholder="Search or enter website name"
                    aria-label="Address"
                    prop:value=move || address.get()
                    on:input=move |ev| address.set(event_target_value(&ev))
                />
            </form>
            <div class="safari-page" aria-busy=move || state.get().browser.loading.to_string()>
                {move || {
                    let browser = state.get().browser;
                    match (browser.loading, browser.pending_url, browser.current_url) {
                        (true, Some(pending), _) => format!("Loading {pending}…"),
                        (_, _, Some(current)) => format!("You are viewing {current}"),
                        _ => "Favorites".to_string(),
                    }
                }}
            </div>
            <ul class="safari-history">
                {move || {
                    state
                        .get()
                        .browser
                        .history
                        .into_iter()
                        .rev()
                        .map(|url| view! { <li>{url}</li> })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}

fn update_settings(runtime: DesktopRuntimeContext, mutate: impl FnOnce(&mut SystemSettings)) {
    let mut settings = runtime.state.get_untracked().settings;
    mutate(&mut settings);
    runtime.dispatch_action(DesktopAction::UpdateSettings { settings });
}

fn update_profile(runtime: DesktopRuntimeContext, mutate: impl FnOnce(&mut UserProfile)) {
    let mut profile = runtime.state.get_untracked().profile;
    mutate(&mut profile);
    runtime.dispatch_action(DesktopAction::UpdateProfile { profile });
}

#[component]
fn PreferencesPane() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let transfer_text = create_rw_signal(String::new());
    let transfer_status = create_rw_signal(None::<String>);

    let settings = move || state.get().settings;

    let export = move |_| {
        let store = bucket_store(runtime);
        spawn_local(async move {
            match persistence::export_buckets(store.as_ref()).await {
                Ok(json) => {
                    transfer_text.set(json);
                    transfer_status.set(Some("Exported".to_string()));
                }
                Err(err) => {
                    logging::warn!("bucket export failed: {err}");
                    transfer_status.set(Some("Export failed".to_string()));
                }
            }
        });
    };
    let import = move |_| {
        let store = bucket_store(runtime);
        let raw = transfer_text.get_untracked();
        spawn_local(async move {
            if persistence::import_buckets(store.as_ref(), &raw).await {
                runtime.host.get_value().rehydrate(runtime.dispatch);
                transfer_status.set(Some("Imported".to_string()));
            } else {
                transfer_status.set(Some("Import rejected; nothing was changed".to_string()));
            }
        });
    };
    let reset = move |_| {
        let store = bucket_store(runtime);
        spawn_local(async move {
            match persistence::reset_buckets(store.as_ref()).await {
                Ok(()) => {
                    runtime.host.get_value().rehydrate(runtime.dispatch);
                    transfer_status.set(Some("All data reset".to_string()));
                }
                Err(err) => {
                    logging::error!("bucket reset failed: {err}");
                    transfer_status.set(Some("Reset failed".to_string()));
                }
            }
        });
    };

    view! {
        <div class="preferences">
            <section class="preferences-section" aria-label="General">
                <h2>"General"</h2>
                <label>
                    "Appearance "
                    <select
                        on:change=move |ev| {
                            let appearance = if event_target_value(&ev) == "dark" {
                                Appearance::Dark
                            } else {
                                Appearance::Light
                            };
                            update_settings(runtime, |s| s.appearance = appearance);
                        }
                    >
                        <option value="light" selected=move || settings().appearance == Appearance::Light>
                            "Light"
                        </option>
                        <option value="dark" selected=move || settings().appearance == Appearance::Dark>
                            "Dark"
                        </option>
                    </select>
                </label>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || settings().reduced_motion
                        on:change=move |ev| {
                            let enabled = event_target_checked(&ev);
                            update_settings(runtime, |s| s.reduced_motion = enabled);
                        }
                    />
                    " Reduce motion"
                </label>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || state.get().reopen_on_login
                        on:change=move |ev| {
                            runtime.dispatch_action(DesktopAction::SetReopenOnLogin {
                                enabled: event_target_checked(&ev),
                            });
                        }
                    />
                    " Reopen windows when logging back in"
                </label>
            </section>

            <section class="preferences-section" aria-label="Sound">
                <h2>"Sound"</h2>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || settings().sound_enabled
                        on:change=move |ev| {
                            let enabled = event_target_checked(&ev);
                            update_settings(runtime, |s| s.sound_enabled = enabled);
                        }
                    />
                    " Play user interface sound effects"
                </label>
                <label>
                    "Volume "
                    <input
                        type="range"
                        min="0"
                        max="100"
                        prop:value=move || settings().volume.to_string()
                        on:change=move |ev| {
                            if let Ok(volume) = event_target_value(&ev).parse::<u8>() {
                                update_settings(runtime, |s| s.volume = volume);
                            }
                        }
                    />
                </label>
            </section>

            <section class="preferences-section" aria-label="Notifications">
                <h2>"Notifications"</h2>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || settings().notifications_enabled
                        on:change=move |ev| {
                            let enabled = event_target_checked(&ev);
                            update_settings(runtime, |s| s.notifications_enabled = enabled);
                        }
                    />
                    " Allow notifications"
                </label>
                <p>{move || format!("{} in history", state.get().notifications.items.len())}</p>
                <button
                    on:click=move |_| {
                        runtime.post_notification("System Preferences", "This is a test notification.")
                    }
                >
                    "Send Test Notification"
                </button>
                <button on:click=move |_| runtime.dispatch_action(DesktopAction::ClearNotifications)>
                    "Clear History"
                </button>
            </section>

            <section class="preferences-section" aria-label="Users">
                <h2>"Users"</h2>
                <label>
                    "Name "
                    <input
                        type="text"
                        prop:value=move || state.get().profile.display_name
                        on:change=move |ev| {
                            let name = event_target_value(&ev);
                            if !name.trim().is_empty() {
                                update_profile(runtime, |p| p.display_name = name.trim().to_string());
                            }
                        }
                    />
                </label>
                <label>
                    "Password "
                    <input
                        type="password"
                        autocomplete="new-password"
                        on:change=move |ev| {
                            let password = event_target_value(&ev);
                            update_profile(runtime, |p| p.password = password);
                        }
                    />
                </label>
            </section>

            <section class="preferences-section" aria-label="Data">
                <h2>"Data"</h2>
                <textarea
                    class="preferences-transfer"
                    aria-label="Exported data"
                    prop:value=move || transfer_text.get()
                    on:input=move |ev| transfer_text.set(event_target_value(&ev))
                ></textarea>
                <div class="preferences-actions">
                    <button on:click=export>"Export"</button>
                    <button on:click=import>"Import"</button>
                    <button class="destructive" on:click=reset>"Reset All Data"</button>
                </div>
                <p aria-live="polite">{move || transfer_status.get()}</p>
            </section>
        </div>
    }
}
