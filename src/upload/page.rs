use axum::response::{IntoResponse, Response};
use maud::{Markup, PreEscaped, html};

use crate::{
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, loading_spinner},
    navigation::NavBar,
};

/// The element the upload result is swapped into.
pub const UPLOAD_RESULT_ID: &str = "upload-result";

const DROP_ZONE_ID: &str = "drop-zone";
const FILE_INPUT_ID: &str = "file";

/// Moves dropped files into the file input and fires its change event,
/// which starts the upload.
fn drag_and_drop_script() -> HeadElement {
    HeadElement::ScriptSource(PreEscaped(format!(
        r#"
        document.addEventListener("DOMContentLoaded", () => {{
            const zone = document.getElementById("{DROP_ZONE_ID}");
            const input = document.getElementById("{FILE_INPUT_ID}");
            const highlight = ["border-blue-500", "bg-blue-50"];

            zone.addEventListener("click", () => input.click());

            ["dragenter", "dragover"].forEach((name) =>
                zone.addEventListener(name, (event) => {{
                    event.preventDefault();
                    zone.classList.add(...highlight);
                }})
            );

            ["dragleave", "drop"].forEach((name) =>
                zone.addEventListener(name, (event) => {{
                    event.preventDefault();
                    zone.classList.remove(...highlight);
                }})
            );

            zone.addEventListener("drop", (event) => {{
                if (event.dataTransfer.files.length === 0) return;

                input.files = event.dataTransfer.files;
                input.dispatchEvent(new Event("change", {{ bubbles: true }}));
            }});
        }});
        "#
    )))
}

fn upload_form_view() -> Markup {
    let spinner = loading_spinner();

    html! {
        form
            hx-post=(endpoints::UPLOAD)
            hx-encoding="multipart/form-data"
            enctype="multipart/form-data"
            hx-trigger="change"
            hx-target={ "#" (UPLOAD_RESULT_ID) }
            hx-target-error={ "#" (UPLOAD_RESULT_ID) }
            hx-disabled-elt={ "#" (FILE_INPUT_ID) }
            hx-indicator="#upload-indicator"
            class="space-y-4"
        {
            div
                id=(DROP_ZONE_ID)
                class="flex flex-col items-center justify-center w-full h-64 cursor-pointer
                    border-2 border-dashed border-gray-300 rounded-lg bg-white
                    hover:bg-gray-50 dark:bg-gray-800 dark:border-gray-600 dark:hover:bg-gray-700"
            {
                p class="mb-2 text-lg font-semibold" { "Arrastra tu cartola aquí" }
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "o haz clic para seleccionar un archivo PDF"
                }

                label for=(FILE_INPUT_ID) class="sr-only" { "Cartola en PDF" }
                input
                    id=(FILE_INPUT_ID)
                    type="file"
                    name="file"
                    accept="application/pdf"
                    required
                    class="hidden";
            }

            p id="upload-indicator" class="htmx-indicator text-center text-sm"
            {
                (spinner) " Procesando cartola..."
            }
        }
    }
}

fn upload_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();
    let form = upload_form_view();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-2xl mx-auto space-y-6"
            {
                div
                {
                    h1 class="text-3xl font-bold" { "Cargar Cartola" }
                    p class="text-gray-600 dark:text-gray-400"
                    {
                        "Sube la cartola de tu banco en PDF para extraer y analizar tus transacciones."
                    }
                }

                (form)

                div id=(UPLOAD_RESULT_ID) aria-live="polite" {}
            }
        }
    };

    base("Cargar Cartola", &[drag_and_drop_script()], &content)
}

/// Route handler for the upload page.
pub async fn get_upload_page() -> Response {
    upload_view().into_response()
}

#[cfg(test)]
mod upload_page_tests {
    use axum::http::StatusCode;
    use scraper::Selector;

    use crate::{
        endpoints,
        test_utils::{
            assert_content_type, assert_form_input, assert_hx_endpoint, assert_valid_html,
            must_get_form, parse_html_document,
        },
    };

    use super::{UPLOAD_RESULT_ID, get_upload_page};

    #[tokio::test]
    async fn render_page() {
        let response = get_upload_page().await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::UPLOAD, "hx-post");
        assert_eq!(form.value().attr("hx-encoding"), Some("multipart/form-data"));
        assert_eq!(form.value().attr("hx-trigger"), Some("change"));
        assert_form_input(&form, "file", "file");
    }

    #[tokio::test]
    async fn file_input_only_accepts_pdf() {
        let html = parse_html_document(get_upload_page().await).await;

        let input = html
            .select(&Selector::parse("input[type=file]").unwrap())
            .next()
            .expect("file input missing");

        assert_eq!(input.value().attr("accept"), Some("application/pdf"));
    }

    #[tokio::test]
    async fn results_are_swapped_below_the_form() {
        let html = parse_html_document(get_upload_page().await).await;
        let form = must_get_form(&html);
        let target = format!("#{UPLOAD_RESULT_ID}");

        assert_eq!(form.value().attr("hx-target"), Some(target.as_str()));
        assert_eq!(form.value().attr("hx-target-error"), Some(target.as_str()));
        let selector = Selector::parse(&target).unwrap();
        assert_eq!(html.select(&selector).count(), 1);
    }
}
