//! Post composition surface: cover image, title, tags, and body.

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
#[cfg(feature = "hydrate")]
use leptos_router::hooks::use_navigate;

use crate::state::editor::PostDraft;

/// The composer form. Edits flow into the shared [`PostDraft`] signal;
/// publish posts the draft and returns home on success.
#[component]
pub fn PostComposer() -> impl IntoView {
    let draft = expect_context::<RwSignal<PostDraft>>();
    let show_cover_input = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();

    let publish = Callback::new(move |()| {
        let current = draft.get_untracked();
        if !current.publishable() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            draft.update(|d| d.publishing = true);
            leptos::task::spawn_local(async move {
                let created = crate::net::api::create_post(&current.to_post()).await;
                if created.is_some() {
                    draft.set(PostDraft::default());
                    navigate("/", NavigateOptions::default());
                } else {
                    draft.update(|d| d.publishing = false);
                }
            });
        }
    });

    view! {
        <div class="composer">
            <div class="composer__cover">
                <button
                    class="btn composer__cover-toggle"
                    on:click=move |_| show_cover_input.update(|v| *v = !*v)
                >
                    "Add cover image"
                </button>
                <Show when=move || show_cover_input.get()>
                    <input
                        class="composer__cover-url"
                        type="text"
                        placeholder="Cover image URL"
                        prop:value=move || draft.get().cover_image
                        on:input=move |ev| {
                            draft.update(|d| d.cover_image = event_target_value(&ev));
                        }
                    />
                </Show>
            </div>

            <input
                class="composer__title"
                type="text"
                placeholder="Title Here"
                prop:value=move || draft.get().title
                on:input=move |ev| {
                    draft.update(|d| d.title = event_target_value(&ev));
                }
            />

            <input
                class="composer__tags"
                type="text"
                placeholder="Write four tags that match your post..."
                prop:value=move || draft.get().tags_line
                on:input=move |ev| {
                    draft.update(|d| d.tags_line = event_target_value(&ev));
                }
            />

            <textarea
                class="composer__body"
                placeholder="Write your post here..."
                prop:value=move || draft.get().body
                on:input=move |ev| {
                    draft.update(|d| d.body = event_target_value(&ev));
                }
            ></textarea>

            <div class="composer__actions">
                <button
                    class="btn btn--primary"
                    disabled=move || !draft.get().publishable()
                    on:click=move |_| publish.run(())
                >
                    {move || if draft.get().publishing { "Publishing..." } else { "Publish" }}
                </button>
            </div>
        </div>
    }
}
