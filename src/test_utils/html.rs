//! HTML fragments shaped like the leaderboard pages.

/// Wraps `body` into a full document.
pub fn page(body: &str) -> String {
    format!("<html><body>{}</body></html>", body)
}

/// Results listing with one row per `(name, profile link)`.
pub fn listing_page(athletes: &[(&str, &str)]) -> String {
    let rows: String = athletes
        .iter()
        .enumerate()
        .map(|(i, (name, link))| {
            format!(
                r#"<tr><td>{}</td><td><a href="{}">{}</a></td><td>1:00</td></tr>"#,
                i + 1,
                link,
                name
            )
        })
        .collect();
    format!(
        r#"<div id="results"><table><thead><tr><th>Rank</th><th>Name</th><th>Time</th></tr></thead><tbody>{}</tbody></table></div>"#,
        rows
    )
}

/// Tab strip whose laps entry links to `url`.
pub fn laps_tab(url: &str) -> String {
    format!(
        r#"<ul class="tabs"><li data-tracking-element="overview"><a href="">Resumo</a></li><li data-tracking-element="laps"><a href="{}">Voltas</a></li></ul>"#,
        url
    )
}

/// `<table {attrs}>` with a header row and raw cell markup.
pub fn table(attrs: &str, headers: &[&str], rows: &[&[&str]]) -> String {
    let head: String = headers.iter().map(|h| format!("<th>{}</th>", h)).collect();
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row.iter().map(|c| format!("<td>{}</td>", c)).collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();
    format!(
        "<table {}><thead><tr>{}</tr></thead><tbody>{}</tbody></table>",
        attrs, head, body
    )
}

/// Filter dropdown `#{id}` with one `(label, link)` anchor per option.
pub fn filter_menu(id: &str, options: &[(&str, &str)]) -> String {
    let items: String = options
        .iter()
        .map(|(label, link)| format!(r#"<li><a href="{}">{}</a></li>"#, link, label))
        .collect();
    format!(
        r#"<div id="{}"><button type="button">Filtro</button><ul>{}</ul></div>"#,
        id, items
    )
}
