//! Page rendering — Leptos SSR views rendered to a plain HTML string.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page is a single form. Changing any control re-submits it without the
//! trigger, which only updates the session's selection. The "Roll NPC"
//! button submits with `action=roll`. Model output is inserted as text, so
//! Leptos escapes it and the browser shows it literally.

use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

use crate::selection::{Archetype, Choice, Gender, Genre, Mood, Selection};
use crate::session::Outcome;

/// Re-submit the form on a control change. `form.submit()` skips `onsubmit`,
/// so the busy indicator stays hidden.
const AUTO_SUBMIT: &str = "this.form.submit()";

/// Reveal the busy indicator while a roll is in flight.
const SHOW_BUSY: &str = "document.getElementById('busy').hidden = false";

const STYLES: &str = r"
body { margin: 0; font-family: system-ui, sans-serif; background: #0e1117; color: #fafafa; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 18rem; padding: 1.5rem; background: #262730; }
.sidebar label { display: block; margin-top: 1rem; font-size: 0.9rem; }
.sidebar select, .sidebar input[type=password], .sidebar input[type=range] { width: 100%; margin-top: 0.3rem; }
.radio { display: block; margin: 0.2rem 0; }
.main { flex: 1; max-width: 46rem; margin: 0 auto; padding: 2rem; }
.caption { color: #a3a8b8; font-size: 0.85rem; }
.status--online { color: #3dd56d; }
.roll { width: 100%; padding: 0.6rem; font-size: 1rem; background: #ff4b4b; color: #fff; border: 0; border-radius: 0.4rem; cursor: pointer; }
.busy { color: #ffbd45; }
.output { max-height: 28rem; overflow: auto; white-space: pre-wrap; background: #1a1c24; padding: 1rem; border-radius: 0.4rem; }
.alert { padding: 0.8rem 1rem; border-radius: 0.4rem; margin: 1rem 0; }
.alert--error { background: #3e2327; color: #ffabab; }
.alert--warning { background: #3e3a16; color: #ffffc2; }
";

// =============================================================================
// MODEL
// =============================================================================

/// Where the sidebar's key state comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    /// Resolved from the secret store or environment; no input shown.
    Online,
    /// Typed into the password box earlier in this session.
    Manual,
    /// No key anywhere yet.
    Missing,
}

/// Everything one render needs.
#[derive(Debug, Clone)]
pub struct PageModel {
    pub selection: Selection,
    pub key_status: KeyStatus,
    pub outcome: Option<Outcome>,
}

/// Render the full HTML document.
#[must_use]
pub fn render_page(model: PageModel) -> String {
    let owner = Owner::new();
    let html = owner.with(|| view! { <Page model=model /> }.to_html());
    format!("<!DOCTYPE html>{html}")
}

// =============================================================================
// COMPONENTS
// =============================================================================

#[component]
fn Page(model: PageModel) -> impl IntoView {
    let PageModel { selection, key_status, outcome } = model;
    let heading = format!("{} {}", selection.mood, selection.archetype);

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>"Lore Ipsum"</title>
                <style inner_html=STYLES></style>
            </head>
            <body>
                <form class="layout" method="post" action="/" onsubmit=SHOW_BUSY>
                    <Sidebar selection=selection key_status=key_status />
                    <main class="main">
                        <h1>"🎲 Lore Ipsum"</h1>
                        <p class="caption">"The Lorem Ipsum for Game Developers."</p>
                        <h3>"Generate Placeholder: " <strong>{heading}</strong></h3>
                        <button class="roll" type="submit" name="action" value="roll">
                            "🎲 Roll NPC"
                        </button>
                        <p id="busy" class="busy" hidden=true>
                            "Rolling stats..."
                        </p>
                        <ResultBlock outcome=outcome />
                        <hr />
                        <Disclaimer />
                    </main>
                </form>
            </body>
        </html>
    }
}

#[component]
fn Sidebar(selection: Selection, key_status: KeyStatus) -> impl IntoView {
    let key_control = match key_status {
        KeyStatus::Online => view! { <p class="status status--online">"✅ System Online"</p> }.into_any(),
        KeyStatus::Manual | KeyStatus::Missing => {
            let placeholder = if key_status == KeyStatus::Manual {
                "Key saved for this session"
            } else {
                "Paste your Gemini API key"
            };
            view! {
                <label>
                    "API Key"
                    <input type="password" name="api_key" autocomplete="off" placeholder=placeholder />
                </label>
            }
                .into_any()
        }
    };

    let max_mood = (Mood::ALL.len() - 1).to_string();

    view! {
        <aside class="sidebar">
            <h2>"⚙️ NPC Config"</h2>
            {key_control}
            <hr />
            <label>"Genre:" {choice_select::<Genre>("genre", selection.genre)}</label>
            <label>"Archetype:" {choice_select::<Archetype>("archetype", selection.archetype)}</label>
            <fieldset class="radios">
                <legend>"Gender Identity:"</legend>
                {Gender::ALL
                    .iter()
                    .map(|gender| {
                        let gender = *gender;
                        view! {
                            <label class="radio">
                                <input
                                    type="radio"
                                    name="gender"
                                    value={gender.label()}
                                    checked={gender == selection.gender}
                                    onchange=AUTO_SUBMIT
                                />
                                {gender.label()}
                            </label>
                        }
                    })
                    .collect_view()}
            </fieldset>
            <label>
                "Personality:"
                <input
                    type="range"
                    name="mood"
                    min="0"
                    max=max_mood
                    step="1"
                    value={selection.mood.index().to_string()}
                    list="mood-scale"
                    onchange=AUTO_SUBMIT
                />
            </label>
            <datalist id="mood-scale">
                {Mood::ALL
                    .iter()
                    .map(|mood| view! { <option value={mood.index().to_string()} label={mood.label()}></option> })
                    .collect_view()}
            </datalist>
            <p class="caption">{selection.mood.label()}</p>
        </aside>
    }
}

fn choice_select<C: Choice>(name: &'static str, current: C) -> impl IntoView {
    let options = C::ALL
        .iter()
        .map(|choice| {
            let choice = *choice;
            view! { <option value={choice.label()} selected={choice == current}>{choice.label()}</option> }
        })
        .collect_view();

    view! { <select id=name name=name onchange=AUTO_SUBMIT>{options}</select> }
}

#[component]
fn ResultBlock(outcome: Option<Outcome>) -> impl IntoView {
    outcome.map(|outcome| {
        let text = outcome.text().to_owned();
        if outcome == Outcome::MissingCredential {
            view! { <div class="alert alert--error">{text}</div> }.into_any()
        } else {
            view! {
                <pre class="output"><code class="language-yaml">{text}</code></pre>
                <p class="caption">"👆 Copy this block and paste it into your Unity/Godot Inspector."</p>
            }
                .into_any()
        }
    })
}

#[component]
fn Disclaimer() -> impl IntoView {
    view! {
        <div class="alert alert--warning">
            <strong>"⚠️ Developer Note: "</strong>
            "This tool generates placeholder text for prototyping, UI testing, and gray-boxing. "
            "It is NOT a replacement for professional narrative design. "
            "Please support human writers for your final game scripts!"
        </div>
        <p class="caption">"Made with a lot of ☕ for game developers."</p>
    }
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
