use leptos::prelude::*;

use crate::api::http::ApiContext;

/// First-run prompt asking for the tenant id. Every files-domain request
/// carries it; without one the dashboard cannot load anything.
#[component]
pub fn TenantConfig() -> impl IntoView {
    let ctx = expect_context::<ApiContext>();
    let session = StoredValue::new_local(ctx.session().clone());
    let show_prompt = RwSignal::new(false);
    let tenant_input = RwSignal::new(String::new());

    Effect::new(move |_| {
        let missing = session.with_value(|s| s.tenant_id().is_none());
        if missing {
            show_prompt.set(true);
        }
    });

    let handle_save = move |_| {
        let value = tenant_input.get_untracked();
        let value = value.trim();
        if !value.is_empty() {
            session.with_value(|s| s.set_tenant_id(value));
            show_prompt.set(false);
            crate::browser::reload_page();
        }
    };

    view! {
        {move || {
            (show_prompt.get()).then(|| view! {
                <div class="modal-backdrop">
                    <div class="modal">
                        <div class="modal-body">
                            <h2>"Configuración de Tenant"</h2>
                            <p>"Por favor ingresa tu Tenant ID para continuar"</p>
                            <input
                                type="text"
                                placeholder="ej: tenant-123"
                                prop:value=tenant_input
                                on:input=move |ev| tenant_input.set(event_target_value(&ev))
                            />
                            <button class="btn btn-primary" on:click=handle_save>
                                "Guardar"
                            </button>
                        </div>
                    </div>
                </div>
            })
        }}
    }
}
