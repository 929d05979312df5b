use crate::api::ApiClient;
use crate::app::App;

pub async fn initialize_app_state(app: &mut App, client: &ApiClient) {
    app.is_loading = true;

    match client.condominios().await {
        Ok(condominios) => {
            tracing::info!(count = condominios.len(), "condominios loaded");
            app.set_condominios(condominios);
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not load condominios");
            app.set_status(format!(
                "Não foi possível carregar os condomínios: {}",
                e.user_message()
            ));
        }
    }

    app.load_form();

    if client.is_dev() {
        app.set_status("Modo dev: dados locais em memória".to_string());
    }

    app.is_loading = false;
}
