use crate::chart::render_pie_svg;
use crate::models::{Category, SummaryResponse};
use std::fmt::Write;

pub fn render_index(today: &str, summary: &SummaryResponse) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &escape_html(today))
        .replace("{{CATEGORY_OPTIONS}}", &category_options())
        .replace("{{DAY_ROWS}}", &day_rows(summary))
        .replace("{{CHART}}", &render_pie_svg(&summary.by_category))
}

/// Calorie values with at most two decimals and no trailing zeros.
pub fn format_kcal(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn category_options() -> String {
    let mut options = String::new();
    for category in Category::ALL {
        let _ = write!(options, r#"<option value="{category}">{category}</option>"#);
    }
    options
}

fn day_rows(summary: &SummaryResponse) -> String {
    if summary.by_day.is_empty() {
        return r#"<tr><td class="empty" colspan="2">No entries in the last 7 days.</td></tr>"#
            .to_string();
    }

    let mut rows = String::new();
    for (date, total) in &summary.by_day {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(date),
            format_kcal(*total)
        );
    }
    rows
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Calorie Log</title>
  <link rel="manifest" href="/manifest.json" />
  <style>
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #3b82f6;
      --danger: #ef4444;
      --export: #22c55e;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    form.entry {
      display: grid;
      gap: 10px;
    }

    label {
      font-weight: 600;
    }

    input,
    select {
      width: 100%;
      padding: 10px 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 12px;
      font-size: 1rem;
      background: white;
    }

    input:disabled {
      background: #f1efec;
    }

    button,
    .button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      color: white;
      cursor: pointer;
      text-align: center;
      text-decoration: none;
      display: block;
      width: 100%;
    }

    .btn-save {
      background: var(--accent);
    }

    .btn-reset {
      background: var(--danger);
    }

    .btn-export {
      background: var(--export);
    }

    table {
      width: 100%;
      border-collapse: collapse;
      background: white;
      border-radius: 16px;
      overflow: hidden;
    }

    th,
    td {
      padding: 10px 14px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
      text-align: left;
    }

    th {
      background: rgba(47, 72, 88, 0.08);
    }

    td.empty {
      color: #8b857d;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      display: grid;
      gap: 16px;
    }

    #chart {
      width: 100%;
      max-width: 360px;
      margin: 0 auto;
      display: block;
    }

    .chart-label {
      fill: #5f5c57;
      font-size: 13px;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Calorie Log</h1>
    </header>

    <section>
      <form class="entry" method="post" action="/entries">
        <label for="date">Date</label>
        <input id="date" type="text" value="{{DATE}}" disabled />

        <label for="comment">Comment</label>
        <input id="comment" name="comment" type="text" placeholder="e.g. apple, yogurt..." />

        <label for="kcal">Kcal</label>
        <input id="kcal" name="kcal" type="number" step="any" placeholder="e.g. 200" />

        <label for="category">Category</label>
        <select id="category" name="category">{{CATEGORY_OPTIONS}}</select>

        <button class="btn-save" type="submit">Save</button>
      </form>
      <form method="post" action="/reset" style="margin-top: 12px">
        <button class="btn-reset" type="submit">Reset (automatic after 7 days)</button>
      </form>
    </section>

    <section>
      <h2>Overview</h2>
      <table>
        <thead>
          <tr><th>Date</th><th>Total kcal</th></tr>
        </thead>
        <tbody>{{DAY_ROWS}}</tbody>
      </table>
    </section>

    <section class="chart-card">
      <h2>By category</h2>
      {{CHART}}
      <a class="button btn-export" href="/export/chart.pdf" download>Export as PDF</a>
      <a class="button btn-export" href="/export/chart.svg" download>Export as SVG</a>
    </section>

    <p class="hint">Entries are dated with the server's local day and kept for 7 days.</p>
  </main>

  <script>
    if ('serviceWorker' in navigator) {
      navigator.serviceWorker.register('/service-worker.js').catch(() => {});
    }
  </script>
</body>
</html>
"#;
