//! HTML page handlers: home, auth forms, about and contact.

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::{
    middleware::{Session, SessionSigner},
    models::TEAM,
    views,
};

use super::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// A missing or non-form body reads as an empty form
fn form_or_default<T: Default>(form: Option<Form<T>>) -> T {
    form.map(|Form(inner)| inner).unwrap_or_default()
}

/// Redirects home with a fresh session cookie for `username`
fn logged_in_redirect(state: &AppState, username: &str) -> Response {
    (
        [(SET_COOKIE, state.sessions.login_cookie(username))],
        Redirect::to("/"),
    )
        .into_response()
}

pub async fn index(State(state): State<AppState>, session: Session) -> Html<String> {
    let catalog = state.catalog().await;
    Html(views::index_page(catalog.genres(), session.username.as_deref()))
}

pub async fn login_form(session: Session) -> Html<String> {
    Html(views::login_page(None, session.username.as_deref()))
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    form: Option<Form<LoginForm>>,
) -> Response {
    let form = form_or_default(form);
    match state.auth.login(&form.email, &form.password).await {
        Ok(user) => logged_in_redirect(&state, user.display_name()),
        Err(err) => (
            err.status(),
            Html(views::login_page(
                Some(&err.user_message()),
                session.username.as_deref(),
            )),
        )
            .into_response(),
    }
}

pub async fn register_form(session: Session) -> Html<String> {
    Html(views::register_page(None, session.username.as_deref()))
}

pub async fn register(
    State(state): State<AppState>,
    session: Session,
    form: Option<Form<RegisterForm>>,
) -> Response {
    let form = form_or_default(form);
    match state
        .auth
        .register(&form.name, &form.email, &form.password)
        .await
    {
        Ok(user) => logged_in_redirect(&state, &user.name),
        Err(err) => {
            if err.status().is_server_error() {
                tracing::error!(error = %err, "Registration failed");
            }
            (
                err.status(),
                Html(views::register_page(
                    Some(&err.user_message()),
                    session.username.as_deref(),
                )),
            )
                .into_response()
        }
    }
}

pub async fn logout() -> Response {
    (
        [(SET_COOKIE, SessionSigner::logout_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}

pub async fn about(session: Session) -> Html<String> {
    Html(views::about_page(&TEAM, session.username.as_deref()))
}

pub async fn contact_form(session: Session) -> Html<String> {
    Html(views::contact_page(None, session.username.as_deref()))
}

/// Acknowledges a contact message. Nothing is stored or sent.
pub async fn contact(session: Session, form: Option<Form<ContactForm>>) -> Html<String> {
    let form = form_or_default(form);
    let message = if form.is_complete() {
        tracing::info!(subject = %form.subject.trim(), "Contact message received");
        "Thanks! Your message has been received."
    } else {
        "Please fill all fields."
    };
    Html(views::contact_page(Some(message), session.username.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_form_completeness() {
        let mut form = ContactForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            subject: "Hello".into(),
            message: "Great site".into(),
        };
        assert!(form.is_complete());

        form.subject = "   ".into();
        assert!(!form.is_complete());
        assert!(!ContactForm::default().is_complete());
    }
}
