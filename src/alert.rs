//! Alert system for displaying success and error messages to users.
//!
//! Alerts are HTML fragments returned by htmx endpoints and swapped into the
//! page that issued the request.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// A dismissible message shown after an action completes or fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (
                "text-green-800 bg-green-50 border-green-300 \
                dark:bg-gray-800 dark:text-green-400 dark:border-green-800",
                message,
                Some(details),
            ),
            Alert::Error { message, details } => (
                "text-red-800 bg-red-50 border-red-300 \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800",
                message,
                Some(details),
            ),
            Alert::ErrorSimple { message } => (
                "text-red-800 bg-red-50 border-red-300 \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800",
                message,
                None,
            ),
        };
        let details = details.filter(|details| !details.is_empty());

        html! {
            div
                role="alert"
                class={ "flex items-start gap-3 w-full p-4 text-sm border rounded-lg " (style) }
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (message) }

                    @if let Some(details) = details {
                        p class="mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Cerrar"
                    onclick="this.closest('[role=alert]').remove()"
                    class="shrink-0 font-bold leading-none opacity-70 hover:opacity-100"
                {
                    "×"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        Html(self.into_html().into_string()).into_response()
    }
}
