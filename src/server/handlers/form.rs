use axum::response::Html;

const UPLOAD_FORM: &str = include_str!("../../../assets/form.html");

/// Serves the verification and upload page.
pub async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}
