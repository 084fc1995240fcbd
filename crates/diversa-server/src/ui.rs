//! Embedded upload page.
//!
//! Single static HTML page, no build step. The page posts the PDF to the
//! analyze endpoint and renders the returned JSON; the report download is
//! assembled client-side from the `report` field.

/// The upload page.
pub static INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Diversa - Portfolio Diversification Analyzer</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6fa; color: #222; }
  main { max-width: 760px; margin: 3rem auto; padding: 0 1rem; }
  h1 { text-align: center; color: #1f4e79; }
  .card { background: #fff; border-radius: 8px; padding: 1.5rem; margin: 1rem 0;
          box-shadow: 0 1px 3px rgba(0,0,0,.1); }
  .metrics { display: flex; gap: 1rem; flex-wrap: wrap; }
  .metric { flex: 1 1 150px; border-left: 4px solid #1f4e79; padding: .5rem 1rem; }
  .metric .label { font-size: .8rem; color: #666; }
  .metric .value { font-size: 1.4rem; font-weight: 600; }
  table { width: 100%; border-collapse: collapse; margin-top: .5rem; }
  th, td { text-align: left; padding: .4rem .6rem; border-bottom: 1px solid #eee; }
  td.num { text-align: right; font-variant-numeric: tabular-nums; }
  button { background: #1f4e79; color: #fff; border: 0; border-radius: 6px;
           padding: .6rem 1.4rem; font-size: 1rem; cursor: pointer; }
  button:disabled { background: #999; cursor: wait; }
  .error { color: #b00020; }
  #results { display: none; }
</style>
</head>
<body>
<main>
  <h1>Portfolio Diversification Analyzer</h1>

  <div class="card">
    <p>Upload an investment portfolio PDF. Holdings are extracted and the
       Herfindahl-Hirschman Index is computed to assess diversification.</p>
    <form id="upload-form">
      <input type="file" id="file" name="file" accept="application/pdf" required>
      <button type="submit" id="analyze-btn">Analyze Portfolio</button>
    </form>
    <p id="status"></p>
  </div>

  <div id="results">
    <div class="card">
      <div class="metrics">
        <div class="metric"><div class="label">Total Value</div><div class="value" id="total"></div></div>
        <div class="metric"><div class="label">Holdings</div><div class="value" id="count"></div></div>
        <div class="metric"><div class="label">HHI</div><div class="value" id="hhi"></div></div>
        <div class="metric"><div class="label">Normalized HHI</div><div class="value" id="nhhi"></div></div>
      </div>
      <h2 id="level"></h2>
    </div>

    <div class="card">
      <h3>Holdings</h3>
      <table>
        <thead><tr><th>Holding</th><th>Value</th><th>Weight</th></tr></thead>
        <tbody id="holdings"></tbody>
      </table>
    </div>

    <div class="card">
      <h3>Commentary</h3>
      <p id="commentary"></p>
      <button id="download-btn">Download Report</button>
    </div>
  </div>
</main>

<script>
const form = document.getElementById('upload-form');
const status = document.getElementById('status');
const btn = document.getElementById('analyze-btn');
let reportText = '';
let reportName = 'portfolio_analysis.txt';

form.addEventListener('submit', async (e) => {
  e.preventDefault();
  const file = document.getElementById('file').files[0];
  if (!file) return;

  btn.disabled = true;
  status.textContent = 'Analyzing… this may take a few moments.';
  status.className = '';
  document.getElementById('results').style.display = 'none';

  const body = new FormData();
  body.append('file', file);

  try {
    const res = await fetch('/api/v1/analyze', { method: 'POST', body });
    const data = await res.json();
    if (!res.ok) throw new Error(data.error || res.statusText);
    render(data, file.name);
  } catch (err) {
    status.textContent = 'Analysis failed: ' + err.message;
    status.className = 'error';
  } finally {
    btn.disabled = false;
  }
});

function render(data, filename) {
  const m = data.analysis.metrics;
  const currency = data.analysis.statement.currency;
  document.getElementById('total').textContent = currency + ' ' + Number(m.total_value).toLocaleString();
  document.getElementById('count').textContent = m.holding_count;
  document.getElementById('hhi').textContent = m.hhi.toFixed(4);
  document.getElementById('nhhi').textContent = m.normalized_hhi === null ? 'n/a' : m.normalized_hhi.toFixed(4);
  document.getElementById('level').textContent = levelName(m.level);
  document.getElementById('commentary').textContent = data.analysis.commentary;

  const tbody = document.getElementById('holdings');
  tbody.innerHTML = '';
  for (const w of m.weights) {
    const row = document.createElement('tr');
    row.innerHTML = '<td></td><td class="num"></td><td class="num"></td>';
    row.children[0].textContent = w.label;
    row.children[1].textContent = Number(w.value).toLocaleString();
    row.children[2].textContent = (w.weight * 100).toFixed(1) + '%';
    tbody.appendChild(row);
  }

  reportText = data.report;
  reportName = 'portfolio_analysis_' + filename.replace(/\.pdf$/i, '') + '.txt';
  status.textContent = 'Analysis complete.';
  document.getElementById('results').style.display = 'block';
}

function levelName(level) {
  return String(level).replace(/([a-z])([A-Z])/g, '$1 $2');
}

document.getElementById('download-btn').addEventListener('click', () => {
  const blob = new Blob([reportText], { type: 'text/plain' });
  const a = document.createElement('a');
  a.href = URL.createObjectURL(blob);
  a.download = reportName;
  a.click();
  URL.revokeObjectURL(a.href);
});
</script>
</body>
</html>
"#;
