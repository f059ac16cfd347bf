//! HTML pages.

use std::fmt::Write;

use axum::response::Html;

use crate::catalog::MovieCatalog;
use crate::entity::{review, store_item};

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
    <head><meta charset="utf-8"><title>{title}</title></head>
    <body>
        <nav><a href="/">Home</a> | <a href="/movies">Store</a> | <a href="/cart">Cart</a> | <a href="/submitted">Reviews</a> | <a href="/logout">Log out</a></nav>
        <h1>{title}</h1>
{body}
    </body>
</html>
"#,
        title = escape(title),
    ))
}

/// Escapes text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn index(catalog: &MovieCatalog) -> Html<String> {
    let mut options = String::new();
    for title in catalog.titles() {
        let title = escape(title);
        let _ = writeln!(options, r#"                <option value="{title}">{title}</option>"#);
    }

    page(
        "Review a movie",
        &format!(
            r#"        <form action="/submit" method="post">
            <input name="firstname" placeholder="First name">
            <input name="lastname" placeholder="Last name">
            <select name="moviename">
                <option disabled selected value="">Movie</option>
{options}            </select>
            <input name="actorname" placeholder="Favourite actor">
            <textarea name="comment" placeholder="Comment"></textarea>
            <button type="submit">Submit</button>
        </form>"#
        ),
    )
}

pub fn login() -> Html<String> {
    page(
        "Log in",
        r#"        <form action="/login" method="post">
            <input autocomplete="off" autofocus name="username" placeholder="Name" type="text">
            <button type="submit">Log in</button>
        </form>"#,
    )
}

pub fn error(message: &str) -> Html<String> {
    page("Error", &format!("        <p>{}</p>", escape(message)))
}

pub fn submitted(reviews: &[review::Model]) -> Html<String> {
    let mut rows = String::new();
    for r in reviews {
        let _ = writeln!(
            rows,
            "            <tr><td>{} {}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&r.first_name),
            escape(&r.last_name),
            escape(&r.movie_name),
            escape(&r.actor_name),
            escape(&r.comment),
        );
    }

    page(
        "Reviews",
        &format!(
            "        <table>\n            <tr><th>Name</th><th>Movie</th><th>Actor</th><th>Comment</th></tr>\n{rows}        </table>"
        ),
    )
}

fn store_table(items: &[store_item::Model], with_add_button: bool) -> String {
    let mut rows = String::new();
    for item in items {
        let action = if with_add_button {
            format!(
                r#"<form action="/cart" method="post"><input name="id" type="hidden" value="{}"><button type="submit">Add to cart</button></form>"#,
                item.id
            )
        } else {
            String::new()
        };
        let _ = writeln!(
            rows,
            "            <tr><td>{}</td><td>{:.2}</td><td>{}</td></tr>",
            escape(&item.title),
            item.price,
            action,
        );
    }
    format!("        <table>\n            <tr><th>Title</th><th>Price</th><th></th></tr>\n{rows}        </table>")
}

pub fn movies(items: &[store_item::Model]) -> Html<String> {
    page("Store", &store_table(items, true))
}

pub fn cart(items: &[store_item::Model]) -> Html<String> {
    if items.is_empty() {
        return page("Your cart", "        <p>Your cart is empty.</p>");
    }
    page("Your cart", &store_table(items, false))
}
