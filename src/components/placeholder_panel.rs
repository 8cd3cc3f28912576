use leptos::prelude::*;

use crate::placeholders::{self, PlaceholderField};

/// Side panel listing the placeholders that can be inserted into the open
/// document: the fixed base set plus the fields derived from a contract form
/// when the editor was opened from one.
#[component]
pub fn PlaceholderPanel(
    /// Document is ready for insertion.
    #[prop(into)] ready: Signal<bool>,
    #[prop(into)] read_only: Signal<bool>,
    #[prop(into)] dynamic_fields: Signal<Vec<PlaceholderField>>,
    on_insert: Callback<String>,
) -> impl IntoView {
    let grouped = Memo::new(move |_| {
        let mut fields = placeholders::base_placeholders();
        fields.extend(dynamic_fields.get());
        placeholders::group_by_category(&fields)
    });

    let disabled = Memo::new(move |_| read_only.get() || !ready.get());

    view! {
        <aside class="placeholder-panel">
            <div class="placeholder-panel-header">
                <h2>"Campos Dinámicos"</h2>
                <p>"Haz clic en un campo para insertarlo en el documento"</p>
            </div>

            <div class="placeholder-panel-body">
                <For
                    each=move || grouped.get()
                    key=|(category, fields)| (category.clone(), fields.len())
                    children=move |(category, fields)| {
                        view! {
                            <div class="placeholder-group">
                                <h3>{category}</h3>
                                <div class="placeholder-group-fields">
                                    {fields
                                        .into_iter()
                                        .map(|field| {
                                            let key = field.key.clone();
                                            view! {
                                                <button
                                                    class="placeholder-field"
                                                    prop:disabled=disabled
                                                    on:click=move |_| on_insert.run(key.clone())
                                                >
                                                    <span class="placeholder-label">{field.label.clone()}</span>
                                                    <span class="placeholder-token">{placeholders::token(&field.key)}</span>
                                                </button>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </div>
                        }
                    }
                />
            </div>

            {move || {
                (disabled.get()).then(|| view! {
                    <div class="placeholder-panel-footer">
                        <p>
                            {move || if !ready.get() {
                                "Esperando a que el editor esté listo..."
                            } else {
                                "Modo de solo lectura: los campos no se pueden insertar"
                            }}
                        </p>
                    </div>
                })
            }}
        </aside>
    }
}
