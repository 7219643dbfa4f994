//! Page bodies for home, browse and search

use hsndb_common::types::SearchField;

use super::layout::{escape_html, Theme};
use crate::config::SearchConfig;
use crate::db::DatabaseStats;
use crate::features::search::queries::EXAMPLE_PEPTIDE;

const FEATURES: [&str; 4] = [
    "Literature curation",
    "Public S-nitrosylation resources",
    "User-friendly website interface",
    "Additional annotation resources",
];

pub fn home(theme: &Theme) -> String {
    let title = escape_html(&theme.title);
    let mut out = String::new();
    out.push_str(&format!(
        r#"<h1>Welcome to <span class="em">{title}</span></h1><hr>
<section class="intro">
<p>S-nitrosylation, the covalent attachment of a nitric oxide group to a cysteine
(<span class="em">C</span>) thiol, is a reversible protein post-translational
modification (PTM) that regulates a wide variety of biological processes,
including signal transduction, apoptosis and metabolism.</p>
<p><span class="em">{title}</span> ({subtitle}) is a resource for annotating
experimentally identified modification sites in human proteins, together with
the cancer types each protein has been associated with.</p>
</section>
<aside><div class="release">{release}</div><h3>Features</h3><ul>"#,
        subtitle = escape_html(&theme.subtitle),
        release = escape_html(&theme.release_note),
    ));
    for feature in FEATURES {
        out.push_str(&format!("<li>{}</li>", escape_html(feature)));
    }
    out.push_str(r#"</ul></aside><p><a href="/search">Search the database</a></p>"#);
    out
}

/// Browse page body; the summary line is omitted when statistics could not
/// be loaded.
pub fn browse(theme: &Theme, stats: Option<&DatabaseStats>) -> String {
    let mut out = String::from(r#"<h1 class="accent">&#8251; Browse</h1><hr>"#);

    if let Some(stats) = stats {
        out.push_str(&format!(
            r#"<p class="summary"><span class="accent">{title}</span> contains <span class="accent">{sites}</span> experimentally identified sites in <span class="accent">{proteins}</span> proteins, associated with <span class="accent">{categories}</span> cancer types.</p>"#,
            title = escape_html(&theme.title),
            sites = stats.site_count,
            proteins = stats.protein_count,
            categories = stats.category_count,
        ));
    }

    out.push_str(
        r#"<p>Users can browse the database by cancer association.</p>
<div class="browse-options">
<a href="/search?field=category">Browse by cancer causing</a>
<a href="/search?field=any">Browse by non-cancer causing</a>
</div><hr>"#,
    );
    out
}

fn field_options(selected: SearchField) -> String {
    let mut out = String::new();
    for field in SearchField::ALL {
        let marker = if field == selected { " selected" } else { "" };
        out.push_str(&format!(
            r#"<option value="{value}" data-example="{example}"{marker}>{label}</option>"#,
            value = field.as_str(),
            example = escape_html(field.example_query()),
            label = escape_html(field.label()),
        ));
    }
    out
}

/// Search page body with the keyword form, the peptide form and the
/// client-side search loop.
pub fn search(settings: &SearchConfig, selected: SearchField, initial_query: &str) -> String {
    format!(
        r#"<h1 class="accent">Search</h1><hr>
<form id="search-form" onsubmit="return false">
<select id="search-field" name="field">{options}</select>
<input id="search-query" name="q" type="search" autocomplete="off" value="{query}" placeholder="Enter at least {min} characters">
<button type="button" id="search-example">Example</button>
<button type="button" id="search-clear">Clear</button>
</form>
<div id="search-status" role="status"></div>
<table id="search-results" hidden><thead><tr><th>HSNDB ID</th><th>Protein name</th><th>UniProt ID</th><th>Gene name</th><th>Sites</th><th>Cancer types</th></tr></thead><tbody></tbody></table>
<h2>Phospho-peptide</h2>
<form id="peptide-form" onsubmit="return false">
<input id="peptide-sequence" name="sequence" type="text" autocomplete="off" placeholder="{peptide}">
<button type="button" id="peptide-example">Example</button>
<button type="button" id="peptide-parse">Parse</button>
</form>
<div id="peptide-result" role="status"></div>
<script>{script}</script>"#,
        options = field_options(selected),
        query = escape_html(initial_query),
        min = settings.min_query_len,
        peptide = EXAMPLE_PEPTIDE,
        script = search_script(settings),
    )
}

/// The browser half of the search session: input is debounced, every request
/// carries an increasing `seq`, and a response is applied only if its `seq`
/// is still the latest one issued.
fn search_script(settings: &SearchConfig) -> String {
    format!(
        r#"
(function () {{
  const DEBOUNCE_MS = {debounce};
  const MIN_LEN = {min_len};
  const PEPTIDE_EXAMPLE = "{peptide}";
  const field = document.getElementById("search-field");
  const input = document.getElementById("search-query");
  const status = document.getElementById("search-status");
  const table = document.getElementById("search-results");
  const body = table.querySelector("tbody");
  let latestSeq = 0;
  let timer = null;

  function show(rows) {{
    body.replaceChildren();
    for (const r of rows) {{
      const tr = document.createElement("tr");
      const cells = [r.hsn_id, r.protein_name, r.uniprot_id, r.gene_name || "",
        String(r.site_count), (r.categories || []).join(", ")];
      for (const c of cells) {{
        const td = document.createElement("td");
        td.textContent = c;
        tr.appendChild(td);
      }}
      body.appendChild(tr);
    }}
    table.hidden = rows.length === 0;
  }}

  function clearResults() {{
    latestSeq += 1;
    clearTimeout(timer);
    status.textContent = "";
    status.className = "";
    show([]);
  }}

  async function run(seq) {{
    const params = new URLSearchParams({{ field: field.value, q: input.value, seq: String(seq) }});
    let payload;
    try {{
      const res = await fetch("/api/v1/search?" + params.toString());
      payload = await res.json();
    }} catch (e) {{
      payload = {{ success: false, error: {{ message: "Search is temporarily unavailable" }} }};
    }}
    if (seq !== latestSeq) return;
    if (!payload.success) {{
      status.textContent = payload.error.message;
      status.className = "status-failed";
      show([]);
      return;
    }}
    const data = payload.data;
    if (data.status === "failed") {{
      status.textContent = data.error || "Search failed";
      status.className = "status-failed";
      show([]);
    }} else if (data.status === "skipped") {{
      status.textContent = "";
      status.className = "";
      show([]);
    }} else {{
      status.textContent = data.results.length === 0 ? "No results found" : "";
      status.className = "";
      show(data.results);
    }}
  }}

  function schedule() {{
    const seq = ++latestSeq;
    clearTimeout(timer);
    if (input.value.trim().length < MIN_LEN) {{
      status.textContent = "";
      show([]);
      return;
    }}
    timer = setTimeout(function () {{ run(seq); }}, DEBOUNCE_MS);
  }}

  input.addEventListener("input", schedule);
  field.addEventListener("change", schedule);
  document.getElementById("search-clear").addEventListener("click", function () {{
    input.value = "";
    clearResults();
  }});
  document.getElementById("search-example").addEventListener("click", function () {{
    input.value = field.options[field.selectedIndex].dataset.example;
    schedule();
  }});

  const peptideInput = document.getElementById("peptide-sequence");
  const peptideResult = document.getElementById("peptide-result");
  document.getElementById("peptide-example").addEventListener("click", function () {{
    peptideInput.value = PEPTIDE_EXAMPLE;
  }});
  document.getElementById("peptide-parse").addEventListener("click", async function () {{
    const params = new URLSearchParams({{ sequence: peptideInput.value }});
    const res = await fetch("/api/v1/search/peptide?" + params.toString());
    const payload = await res.json();
    if (payload.success) {{
      const sites = payload.data.sites.map(function (s) {{ return s.residue + s.position; }});
      peptideResult.textContent = payload.data.sequence + ": " + sites.join(", ");
      peptideResult.className = "";
    }} else {{
      peptideResult.textContent = payload.error.message;
      peptideResult.className = "status-failed";
    }}
  }});

  if (input.value.trim().length >= MIN_LEN) schedule();
}})();
"#,
        debounce = settings.debounce_ms,
        min_len = settings.min_query_len,
        peptide = EXAMPLE_PEPTIDE,
    )
}
