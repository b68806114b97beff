//! File input with immediate validation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The picked file stays inside the `<input>` element; pages read it again
//! through `selected_upload` when they submit. Only metadata and the preview
//! URL live in signals, so nothing browser-only leaks into SSR state.

use leptos::html::Input;
use leptos::prelude::*;

use crate::util::upload::{FileMeta, UploadKind};
#[cfg(feature = "hydrate")]
use crate::util::upload::{Upload, UploadError, revoke_preview_url};

#[component]
pub fn FilePicker(
    label: &'static str,
    accept: &'static str,
    input: NodeRef<Input>,
    picked: RwSignal<Option<FileMeta>>,
    error: RwSignal<String>,
    #[prop(optional)] kind: Option<UploadKind>,
    /// Object URL of the picked image, for an `<img>` preview.
    #[prop(optional)]
    preview: Option<RwSignal<Option<String>>>,
) -> impl IntoView {
    let on_change = move |_: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let Some(element) = input.get_untracked() else {
                return;
            };
            if let Some(slot) = preview {
                if let Some(old) = slot.get_untracked() {
                    revoke_preview_url(&old);
                }
                slot.set(None);
            }
            match Upload::from_input(&element, kind) {
                Ok(upload) => {
                    error.set(String::new());
                    if let Some(slot) = preview {
                        slot.set(upload.preview_url());
                    }
                    picked.set(Some(upload.meta));
                }
                Err(UploadError::Missing) => picked.set(None),
                Err(e) => {
                    log::debug!("file picker: rejected {label}: {e}");
                    error.set(e.to_string());
                    picked.set(None);
                    element.set_value("");
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (kind, preview);
    };

    view! {
        <div class="form-group file-upload">
            <label>{label}</label>
            <input type="file" accept=accept node_ref=input on:change=on_change/>
            <Show when=move || picked.with(Option::is_some)>
                <p class="file-name">
                    {move || picked.with(|p| p.as_ref().map(|m| format!("Selected: {}", m.name)).unwrap_or_default())}
                </p>
            </Show>
        </div>
    }
}

/// Read the input's file again at submit time. An empty input is `Ok(None)`.
///
/// # Errors
///
/// Whatever `kind` rejects about the file.
#[cfg(feature = "hydrate")]
pub fn selected_upload(input: NodeRef<Input>, kind: Option<UploadKind>) -> Result<Option<Upload>, UploadError> {
    let Some(element) = input.get_untracked() else {
        return Ok(None);
    };
    match Upload::from_input(&element, kind) {
        Ok(upload) => Ok(Some(upload)),
        Err(UploadError::Missing) => Ok(None),
        Err(e) => Err(e),
    }
}
