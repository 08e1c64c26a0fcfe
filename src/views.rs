//! Server-rendered HTML pages.
//!
//! Pages are small enough to build with `format!`; every interpolated value goes
//! through [`escape`].

use crate::models::TeamMember;

/// Escapes text for use in HTML bodies and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn nav(username: Option<&str>) -> String {
    let account = match username {
        Some(name) => format!(
            r#"<span class="user">Hi, {}</span> <a href="/logout">Logout</a>"#,
            escape(name)
        ),
        None => r#"<a href="/login">Login</a> <a href="/register">Register</a>"#.to_string(),
    };
    format!(
        r#"<nav><a href="/">Home</a> <a href="/about">About</a> <a href="/contact">Contact</a> {}</nav>"#,
        account
    )
}

fn layout(title: &str, username: Option<&str>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | CinePick</title>
</head>
<body>
{nav}
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        nav = nav(username),
        body = body
    )
}

fn notice(class: &str, message: Option<&str>) -> String {
    message
        .map(|m| format!(r#"<p class="{}">{}</p>"#, class, escape(m)))
        .unwrap_or_default()
}

pub fn index_page(genres: &[String], username: Option<&str>) -> String {
    let chips: String = genres
        .iter()
        .map(|genre| {
            let genre = escape(genre);
            format!(
                r#"<button type="button" class="genre-chip" data-genre="{0}"><input type="checkbox" name="genres" value="{0}" hidden> {0}</button>"#,
                genre
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"<h1>Find your next movie</h1>
<input id="searchInput" type="search" placeholder="Search titles" autocomplete="off">
<div id="suggestions" class="hidden"></div>
<div id="genreContainer">
{chips}
</div>
<button id="submitBtn" type="button">Recommend</button>
<p id="noResultsMsg" class="hidden">No movies match those genres.</p>
<section id="recommendations"></section>
<script src="/static/js/search.js"></script>"#,
        chips = chips
    );
    layout("Home", username, &body)
}

pub fn login_page(error: Option<&str>, username: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Login</h1>
{error}
<form method="post" action="/login">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Login</button>
</form>
<p>No account? <a href="/register">Register</a></p>"#,
        error = notice("error", error)
    );
    layout("Login", username, &body)
}

pub fn register_page(error: Option<&str>, username: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Register</h1>
{error}
<form method="post" action="/register">
<label>Name <input type="text" name="name" required></label>
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Create account</button>
</form>
<p>Already registered? <a href="/login">Login</a></p>"#,
        error = notice("error", error)
    );
    layout("Register", username, &body)
}

pub fn about_page(team: &[TeamMember], username: Option<&str>) -> String {
    let cards: String = team
        .iter()
        .map(|member| {
            format!(
                r#"<article class="member">
<img src="{image}" alt="{name}">
<h2>{name}</h2>
<p class="role">{role}</p>
<p class="roll">{roll}</p>
<p>{bio}</p>
</article>"#,
                image = escape(member.image),
                name = escape(member.name),
                role = escape(member.role),
                roll = escape(member.roll_number),
                bio = escape(member.bio),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    layout(
        "About",
        username,
        &format!("<h1>Our team</h1>\n<section class=\"team\">\n{}\n</section>", cards),
    )
}

pub fn contact_page(message: Option<&str>, username: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Contact us</h1>
{message}
<form method="post" action="/contact">
<label>Name <input type="text" name="name"></label>
<label>Email <input type="email" name="email"></label>
<label>Subject <input type="text" name="subject"></label>
<label>Message <textarea name="message"></textarea></label>
<button type="submit">Send</button>
</form>"#,
        message = notice("message", message)
    );
    layout("Contact", username, &body)
}
