//! HTML templates
//!
//! All templates are embedded in the binary and registered with Tera at
//! startup. Every page extends `base.html`, which renders the navigation
//! bar from the optional `current_user` context value.

use crate::web::middleware::PageError;
use anyhow::Context as _;
use axum::response::Html;
use tera::{Context, Tera};

const BASE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{% block title %}Pressnote{% endblock %}</title>
</head>
<body>
<nav>
    <a href="/">News</a>
    <a href="/notes/home">Notes</a>
    {% if current_user %}
        <a href="/notes">My notes</a>
        <span>Signed in as {{ current_user.username }}</span>
        <a href="/auth/logout">Log out</a>
    {% else %}
        <a href="/auth/login">Log in</a>
        <a href="/auth/signup">Sign up</a>
    {% endif %}
</nav>
<main>
{% block content %}{% endblock %}
</main>
</body>
</html>
"#;

const NEWS_HOME: &str = r#"{% extends "base.html" %}
{% block title %}News{% endblock %}
{% block content %}
<h1>News</h1>
<ul class="news-list">
    {% for item in news %}
    <li>
        <a href="/news/{{ item.id }}">{{ item.title }}</a>
        <time>{{ item.date | date(format="%Y-%m-%d") }}</time>
        <p>{{ item.text | truncate(length=120) }}</p>
    </li>
    {% endfor %}
</ul>
{% if total_pages > 1 %}
<div class="pagination">
    {% if page > 1 %}<a href="/?page={{ page - 1 }}">Previous</a>{% endif %}
    <span>Page {{ page }} of {{ total_pages }}</span>
    {% if page < total_pages %}<a href="/?page={{ page + 1 }}">Next</a>{% endif %}
</div>
{% endif %}
{% endblock %}
"#;

const NEWS_DETAIL: &str = r#"{% extends "base.html" %}
{% block title %}{{ item.title }}{% endblock %}
{% block content %}
<article>
    <h1>{{ item.title }}</h1>
    <time>{{ item.date | date(format="%Y-%m-%d") }}</time>
    <p>{{ item.text }}</p>
</article>
<section class="comments">
    <h2>Comments</h2>
    {% for comment in comments %}
    <div class="comment" id="comment-{{ comment.id }}">
        <strong>{{ comment.author_name }}</strong>
        <time>{{ comment.created | date(format="%Y-%m-%d %H:%M") }}</time>
        <p>{{ comment.text }}</p>
        {% if current_user %}{% if current_user.id == comment.author_id %}
        <a href="/news/comment/{{ comment.id }}/edit">Edit</a>
        <a href="/news/comment/{{ comment.id }}/delete">Delete</a>
        {% endif %}{% endif %}
    </div>
    {% endfor %}
    {% if current_user %}
    <form method="post" action="/news/{{ item.id }}/comment" class="comment-form">
        {% if error %}<p class="error">{{ error }}</p>{% endif %}
        <textarea name="text" required>{{ text | default(value="") }}</textarea>
        <button type="submit">Post comment</button>
    </form>
    {% else %}
    <p><a href="/auth/login?next=/news/{{ item.id }}">Log in</a> to leave a comment.</p>
    {% endif %}
</section>
{% endblock %}
"#;

const COMMENT_EDIT: &str = r#"{% extends "base.html" %}
{% block title %}Edit comment{% endblock %}
{% block content %}
<h1>Edit comment</h1>
<form method="post" action="/news/comment/{{ comment.id }}/edit" class="comment-form">
    {% if error %}<p class="error">{{ error }}</p>{% endif %}
    <textarea name="text" required>{{ comment.text }}</textarea>
    <button type="submit">Save</button>
</form>
{% endblock %}
"#;

const COMMENT_DELETE: &str = r#"{% extends "base.html" %}
{% block title %}Delete comment{% endblock %}
{% block content %}
<h1>Delete comment</h1>
<p>Delete this comment?</p>
<blockquote>{{ comment.text }}</blockquote>
<form method="post" action="/news/comment/{{ comment.id }}/delete">
    <button type="submit">Delete</button>
</form>
{% endblock %}
"#;

const NOTES_HOME: &str = r#"{% extends "base.html" %}
{% block title %}Notes{% endblock %}
{% block content %}
<h1>Your personal notebook</h1>
<p>Keep notes addressed by short, memorable slugs.</p>
{% if current_user %}
<p><a href="/notes">Open my notes</a></p>
{% else %}
<p><a href="/auth/signup">Sign up</a> or <a href="/auth/login">log in</a> to start taking notes.</p>
{% endif %}
{% endblock %}
"#;

const NOTES_LIST: &str = r#"{% extends "base.html" %}
{% block title %}My notes{% endblock %}
{% block content %}
<h1>My notes</h1>
<p><a href="/notes/add">Add a note</a></p>
<ul class="notes-list">
    {% for note in notes %}
    <li><a href="/notes/{{ note.slug }}">{{ note.title }}</a></li>
    {% endfor %}
</ul>
{% endblock %}
"#;

const NOTE_FORM: &str = r#"{% extends "base.html" %}
{% block title %}{{ heading }}{% endblock %}
{% block content %}
<h1>{{ heading }}</h1>
<form method="post" action="{{ action }}" class="note-form">
    {% if error %}<p class="error">{{ error }}</p>{% endif %}
    <label>Title <input type="text" name="title" value="{{ title | default(value="") }}" required></label>
    <label>Text <textarea name="text">{{ text | default(value="") }}</textarea></label>
    <label>Slug <input type="text" name="slug" value="{{ slug | default(value="") }}"></label>
    <button type="submit">Save</button>
</form>
{% endblock %}
"#;

const NOTE_DETAIL: &str = r#"{% extends "base.html" %}
{% block title %}{{ note.title }}{% endblock %}
{% block content %}
<article>
    <h1>{{ note.title }}</h1>
    <p>{{ note.text }}</p>
</article>
<p>
    <a href="/notes/{{ note.slug }}/edit">Edit</a>
    <a href="/notes/{{ note.slug }}/delete">Delete</a>
    <a href="/notes">Back to my notes</a>
</p>
{% endblock %}
"#;

const NOTE_DELETE: &str = r#"{% extends "base.html" %}
{% block title %}Delete note{% endblock %}
{% block content %}
<h1>Delete note</h1>
<p>Delete "{{ note.title }}"?</p>
<form method="post" action="/notes/{{ note.slug }}/delete">
    <button type="submit">Delete</button>
</form>
{% endblock %}
"#;

const NOTES_DONE: &str = r#"{% extends "base.html" %}
{% block title %}Done{% endblock %}
{% block content %}
<h1>Done!</h1>
<p>Your change has been saved.</p>
<p><a href="/notes">Back to my notes</a></p>
{% endblock %}
"#;

const SIGNUP: &str = r#"{% extends "base.html" %}
{% block title %}Sign up{% endblock %}
{% block content %}
<h1>Sign up</h1>
<form method="post" action="/auth/signup" class="auth-form">
    {% if error %}<p class="error">{{ error }}</p>{% endif %}
    <label>Username <input type="text" name="username" value="{{ username | default(value="") }}" required></label>
    <label>Email <input type="email" name="email" value="{{ email | default(value="") }}" required></label>
    <label>Password <input type="password" name="password" required></label>
    <button type="submit">Sign up</button>
</form>
{% endblock %}
"#;

const LOGIN: &str = r#"{% extends "base.html" %}
{% block title %}Log in{% endblock %}
{% block content %}
<h1>Log in</h1>
<form method="post" action="/auth/login" class="auth-form">
    {% if error %}<p class="error">{{ error }}</p>{% endif %}
    <label>Username or email <input type="text" name="username" value="{{ username | default(value="") }}" required></label>
    <label>Password <input type="password" name="password" required></label>
    <input type="hidden" name="next" value="{{ next | default(value="") }}">
    <button type="submit">Log in</button>
</form>
{% endblock %}
"#;

const LOGOUT: &str = r#"{% extends "base.html" %}
{% block title %}Log out{% endblock %}
{% block content %}
<h1>Log out</h1>
<form method="post" action="/auth/logout">
    <button type="submit">Log out</button>
</form>
{% endblock %}
"#;

/// Build the Tera instance with all embedded templates
pub fn build_templates() -> anyhow::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", BASE),
        ("news/home.html", NEWS_HOME),
        ("news/detail.html", NEWS_DETAIL),
        ("news/comment_edit.html", COMMENT_EDIT),
        ("news/comment_delete.html", COMMENT_DELETE),
        ("notes/home.html", NOTES_HOME),
        ("notes/list.html", NOTES_LIST),
        ("notes/form.html", NOTE_FORM),
        ("notes/detail.html", NOTE_DETAIL),
        ("notes/delete.html", NOTE_DELETE),
        ("notes/done.html", NOTES_DONE),
        ("auth/signup.html", SIGNUP),
        ("auth/login.html", LOGIN),
        ("auth/logout.html", LOGOUT),
    ])
    .context("Failed to register templates")?;
    Ok(tera)
}

/// Render a template to an HTML response
pub fn render(tera: &Tera, name: &str, context: &Context) -> Result<Html<String>, PageError> {
    let body = tera
        .render(name, context)
        .with_context(|| format!("Failed to render template {name}"))?;
    Ok(Html(body))
}
