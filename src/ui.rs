pub fn render_index(date: &str) -> String {
    INDEX_HTML.replace("{{DATE}}", date)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Routine Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&display=swap');

    :root {
      --bg-1: #f4f6f8;
      --bg-2: #dce7f0;
      --ink: #22303a;
      --accent: #2d7a4b;
      --accent-2: #2f4858;
      --miss: #c63b2b;
      --card: #ffffff;
      --shadow: 0 18px 44px rgba(47, 72, 88, 0.14);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      display: grid;
      gap: 22px;
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      border: 1px solid rgba(47, 72, 88, 0.08);
      padding: 24px;
    }

    header.card {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 { margin: 0; font-size: 1.8rem; }
    h2 { margin: 0 0 14px; font-size: 1.2rem; }

    .date { color: #5f6c76; font-size: 0.95rem; margin: 4px 0 0; }

    .toolbar { display: flex; flex-wrap: wrap; gap: 8px; }

    button {
      appearance: none;
      border: 1px solid rgba(47, 72, 88, 0.18);
      background: white;
      color: var(--accent-2);
      border-radius: 999px;
      padding: 9px 16px;
      font-size: 0.9rem;
      font-weight: 600;
      cursor: pointer;
    }

    button:active { transform: scale(0.98); }
    button.danger { color: var(--miss); border-color: rgba(198, 59, 43, 0.4); }

    .checklist {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 10px;
    }

    .checklist label {
      display: flex;
      align-items: center;
      gap: 10px;
      border: 1px solid rgba(47, 72, 88, 0.12);
      border-radius: 14px;
      padding: 12px;
      cursor: pointer;
    }

    .checklist input { width: 18px; height: 18px; }

    .summary { margin-top: 12px; color: #5f6c76; font-size: 0.9rem; }

    .heatmap {
      display: flex;
      gap: 3px;
      overflow-x: auto;
      padding-bottom: 6px;
    }

    .heatmap .week {
      display: flex;
      flex-direction: column;
      gap: 3px;
    }

    .heatmap .cell {
      width: 11px;
      height: 11px;
      border-radius: 3px;
      background: #e2e8ed;
    }

    .cell[data-level="1"] { background: #f0a9a0; }
    .cell[data-level="2"] { background: #f2c879; }
    .cell[data-level="3"] { background: #8fd19e; }
    .cell[data-level="4"] { background: #74b3e0; }
    .cell[data-level="5"] { background: #6f74d1; }

    .legend {
      display: flex;
      align-items: center;
      gap: 5px;
      margin-top: 10px;
      font-size: 0.8rem;
      color: #5f6c76;
    }

    .legend .cell { display: inline-block; }

    #chart { width: 100%; height: 240px; display: block; }
    .chart-line { fill: none; stroke: var(--accent); stroke-width: 2.5; }
    .chart-grid { stroke: rgba(47, 72, 88, 0.1); }
    .chart-axis { stroke: rgba(47, 72, 88, 0.3); stroke-dasharray: 4 6; }
    .chart-label { fill: #7a8691; font-size: 11px; font-family: inherit; }

    table { width: 100%; border-collapse: collapse; font-size: 0.9rem; }
    th, td { text-align: left; padding: 7px 8px; }
    thead th { color: #5f6c76; font-weight: 500; border-bottom: 1px solid rgba(47, 72, 88, 0.15); }
    tbody tr { border-top: 1px solid rgba(47, 72, 88, 0.07); }
    td.up { color: var(--accent); font-weight: 600; }
    td.down { color: var(--miss); font-weight: 600; }

    .status { min-height: 1.2em; font-size: 0.9rem; color: #5f6c76; }
    .status[data-type="error"] { color: var(--miss); }
    .status[data-type="ok"] { color: var(--accent); }

    .hint { margin: 0; color: #73808a; font-size: 0.85rem; }
  </style>
</head>
<body>
  <main class="app">
    <header class="card">
      <div>
        <h1>Routine Tracker</h1>
        <p class="date" id="date">{{DATE}}</p>
      </div>
      <div class="toolbar">
        <button id="reset-btn" type="button">Reset today</button>
        <button id="export-btn" type="button">Export</button>
        <button id="import-btn" type="button">Import</button>
        <input type="file" id="import-file" accept="application/json" hidden />
        <button id="clear-btn" class="danger" type="button">Clear all</button>
      </div>
    </header>

    <section class="card">
      <h2>Today</h2>
      <div class="checklist" id="checklist"></div>
      <p class="summary" id="summary"></p>
    </section>

    <section class="card">
      <h2>Heatmap — 52 weeks</h2>
      <div class="heatmap" id="heatmap"></div>
      <div class="legend">
        <span>0</span>
        <span class="cell"></span>
        <span class="cell" data-level="1"></span>
        <span class="cell" data-level="2"></span>
        <span class="cell" data-level="3"></span>
        <span class="cell" data-level="4"></span>
        <span class="cell" data-level="5"></span>
        <span>all</span>
      </div>
    </section>

    <section class="card">
      <h2>Cumulative score</h2>
      <svg id="chart" viewBox="0 0 640 240" role="img" aria-label="Cumulative score"></svg>
      <p class="hint">Each day counts +1 when more than half of the routines are done, otherwise -1.</p>
    </section>

    <section class="card">
      <h2>History — last 14 days</h2>
      <div style="overflow:auto">
        <table>
          <thead id="history-head"></thead>
          <tbody id="history-body"></tbody>
        </table>
      </div>
    </section>

    <div class="status" id="status"></div>
    <p class="hint">A new day row appears automatically after midnight while the page stays open. Data lives on the server in one JSON snapshot; the remote mirror is best-effort.</p>
  </main>

  <script>
    const checklistEl = document.getElementById('checklist');
    const summaryEl = document.getElementById('summary');
    const heatmapEl = document.getElementById('heatmap');
    const chartEl = document.getElementById('chart');
    const historyHead = document.getElementById('history-head');
    const historyBody = document.getElementById('history-body');
    const statusEl = document.getElementById('status');
    const dateEl = document.getElementById('date');

    let today = null;
    let stats = null;
    let checksByDate = {};

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const renderChecklist = () => {
      checklistEl.innerHTML = '';
      for (const [routine, done] of Object.entries(today.checks)) {
        const label = document.createElement('label');
        const box = document.createElement('input');
        box.type = 'checkbox';
        box.checked = done;
        box.addEventListener('change', () => toggle(routine, box.checked));
        const text = document.createElement('span');
        text.textContent = routine;
        label.append(box, text);
        checklistEl.append(label);
      }
      summaryEl.textContent =
        `${today.completed} of ${today.routine_count} done. ` +
        `Days count up when you finish more than half.`;
      dateEl.textContent = today.date;
    };

    const levelFor = (completed, routineCount) => {
      if (completed <= 0) return 0;
      if (routineCount <= 5) return Math.min(completed, 5);
      return Math.max(1, Math.min(5, Math.round((completed / routineCount) * 5)));
    };

    const renderHeatmap = () => {
      heatmapEl.innerHTML = '';
      for (const week of stats.heatmap_weeks) {
        const col = document.createElement('div');
        col.className = 'week';
        for (const cell of week) {
          const el = document.createElement('span');
          el.className = 'cell';
          const level = levelFor(cell.completed, stats.routine_count);
          if (level > 0) el.dataset.level = String(level);
          el.title = `${cell.date}: ${cell.completed} of ${stats.routine_count}`;
          col.append(el);
        }
        heatmapEl.append(col);
      }
    };

    const renderChart = () => {
      const points = stats.cumulative;
      if (!points.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>';
        return;
      }

      const width = 640;
      const height = 240;
      const paddingX = 44;
      const paddingY = 30;
      const top = 18;

      const values = points.map((p) => p.score);
      let min = Math.min(0, ...values);
      let max = Math.max(0, ...values);
      if (min === max) { min -= 1; max += 1; }

      const range = max - min;
      const xStep = points.length > 1 ? (width - paddingX * 2) / (points.length - 1) : 0;
      const scaleY = (height - top - paddingY) / range;
      const x = (i) => paddingX + i * xStep;
      const y = (v) => height - paddingY - (v - min) * scaleY;

      const path = points
        .map((p, i) => `${i === 0 ? 'M' : 'L'} ${x(i).toFixed(2)} ${y(p.score).toFixed(2)}`)
        .join(' ');

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + (range * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${yPos + 4}" text-anchor="end">${Math.round(value)}</text>`;
      }

      const labelEvery = Math.max(1, Math.ceil(points.length / 8));
      const xLabels = points
        .map((p, i) => {
          if (i % labelEvery !== 0) return '';
          return `<text class="chart-label" x="${x(i)}" y="${height - paddingY + 18}" text-anchor="middle">${p.date.slice(5)}</text>`;
        })
        .join('');

      const zeroLine = `<line class="chart-axis" x1="${paddingX}" y1="${y(0)}" x2="${width - paddingX}" y2="${y(0)}" />`;

      chartEl.innerHTML = `${grid}${zeroLine}<path class="chart-line" d="${path}" />${xLabels}`;
    };

    const renderHistory = () => {
      const routines = Object.keys(today.checks);
      historyHead.innerHTML = `<tr><th>Date</th>${routines.map((r) => `<th>${r}</th>`).join('')}<th>Done</th><th>+/-</th></tr>`;

      const recent = stats.per_day.slice(-14);
      historyBody.innerHTML = '';
      for (const day of recent) {
        const row = document.createElement('tr');
        const checks = checksByDate[day.date] || {};
        let cells = `<td>${day.date}</td>`;
        for (const r of routines) {
          cells += `<td>${checks[r] ? '&#10003;' : '&ndash;'}</td>`;
        }
        cells += `<td>${day.completed}/${stats.routine_count}</td>`;
        cells += `<td class="${day.success ? 'up' : 'down'}">${day.success ? '+1' : '-1'}</td>`;
        row.innerHTML = cells;
        historyBody.append(row);
      }
    };

    const loadToday = async () => {
      const res = await fetch('/api/today');
      if (!res.ok) throw new Error('Unable to load today');
      today = await res.json();
      renderChecklist();
    };

    const loadStats = async () => {
      const res = await fetch('/api/stats');
      if (!res.ok) throw new Error('Unable to load stats');
      stats = await res.json();
      const snapshot = await fetch('/api/export');
      if (snapshot.ok) {
        const store = await snapshot.json();
        checksByDate = Object.fromEntries(store.days.map((d) => [d.date, d.checks]));
      }
      renderHeatmap();
      renderChart();
      renderHistory();
    };

    const refresh = async () => {
      await loadToday();
      await loadStats();
    };

    const toggle = async (routine, done) => {
      setStatus('Saving...', '');
      const res = await fetch('/api/check', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ routine, done })
      });
      if (!res.ok) throw new Error(await res.text() || 'Save failed');
      today = await res.json();
      renderChecklist();
      await loadStats();
      setStatus('Saved', 'ok');
      setTimeout(() => setStatus('', ''), 1200);
    };

    const post = async (path) => {
      const res = await fetch(path, { method: 'POST' });
      if (!res.ok) throw new Error(await res.text() || 'Request failed');
      today = await res.json();
      renderChecklist();
      await loadStats();
    };

    document.getElementById('reset-btn').addEventListener('click', () => {
      post('/api/resetToday').catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('clear-btn').addEventListener('click', () => {
      if (!confirm('Reset everything? This deletes all history.')) return;
      post('/api/clearAll').catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('export-btn').addEventListener('click', () => {
      window.location.href = '/api/export';
    });

    const importFile = document.getElementById('import-file');
    document.getElementById('import-btn').addEventListener('click', () => importFile.click());
    importFile.addEventListener('change', async () => {
      const file = importFile.files[0];
      importFile.value = '';
      if (!file) return;
      try {
        const body = await file.text();
        JSON.parse(body);
        const res = await fetch('/api/import', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body
        });
        if (!res.ok) throw new Error(await res.text() || 'Import failed');
        today = await res.json();
        renderChecklist();
        await loadStats();
        setStatus('Imported', 'ok');
      } catch (err) {
        alert('Could not read that file.');
        setStatus(err.message, 'error');
      }
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
