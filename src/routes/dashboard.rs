use axum::{
    http::header,
    response::{Html, IntoResponse},
};

pub async fn dashboard() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "public, max-age=60")],
        Html(DASHBOARD_HTML),
    )
}

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sensor readings</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/uplot@1.6.31/dist/uPlot.min.css">
    <style>
        :root {
            --bg: #f8fafc;
            --surface: #ffffff;
            --border: #e2e8f0;
            --text: #1e293b;
            --muted: #64748b;
            --accent: #2563eb;
            --danger: #dc2626;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body { font-family: system-ui, -apple-system, sans-serif; background: var(--bg); color: var(--text); min-height: 100vh; }

        .container {
            max-width: 1200px;
            margin: 0 auto;
            padding: 1.5rem;
        }
        h1 { font-size: 1.25rem; font-weight: 600; margin-bottom: 1rem; }

        .chart-area {
            background: var(--surface);
            border: 1px solid var(--border);
            border-radius: 0.5rem;
            padding: 0.75rem 1rem;
            margin-bottom: 1rem;
            min-height: 240px;
        }
        .pane + .pane { margin-top: 0.5rem; }
        .chart-error {
            display: flex;
            align-items: center;
            justify-content: center;
            height: 240px;
            color: var(--danger);
            font-weight: 500;
        }
        .chart-empty {
            display: flex;
            align-items: center;
            justify-content: center;
            height: 240px;
            color: var(--muted);
        }

        .controls {
            background: var(--surface);
            border: 1px solid var(--border);
            border-radius: 0.5rem;
            padding: 1rem;
            display: flex;
            flex-wrap: wrap;
            gap: 1rem;
            align-items: center;
        }
        .controls p { font-size: 0.875rem; color: var(--muted); }
        select, input[type="date"] {
            padding: 0.4rem 0.6rem;
            border: 1px solid var(--border);
            border-radius: 0.375rem;
            font-size: 0.875rem;
            background: var(--surface);
        }
        .range-text {
            margin-top: 0.75rem;
            font-size: 0.8rem;
            color: var(--muted);
        }

        .site-footer {
            padding: 1rem 0 0;
            font-size: 0.7rem;
            color: #999;
            opacity: 0.4;
        }
        .site-footer:hover { opacity: 0.7; }
        .site-footer a { color: inherit; }
    </style>
</head>
<body>
    <div class="container" id="root">
        <span style="color: var(--muted); font-size: 0.875rem;">Loading dashboard...</span>
    </div>

    <script src="https://cdn.jsdelivr.net/npm/uplot@1.6.31/dist/uPlot.iife.min.js"></script>
<script>
const api = url => fetch(url).then(r => r.json());
const post = (url, body) => fetch(url, {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body),
}).then(async r => {
    const data = await r.json();
    if (!r.ok) throw new Error(data.error || r.statusText);
    return data;
});

const colors = ['#2563eb', '#dc2626', '#16a34a', '#ca8a04', '#9333ea', '#0891b2', '#be185d', '#ea580c'];
const TOTAL_HEIGHT = 420;
let plots = [];

function renderLayout(layout) {
    const root = document.getElementById('root');
    root.innerHTML = '';

    for (const c of layout.components) {
        switch (c.type) {
            case 'heading': {
                const h = document.createElement('h1');
                h.textContent = c.text;
                root.appendChild(h);
                break;
            }
            case 'graph': {
                const div = document.createElement('div');
                div.id = c.id;
                div.className = 'chart-area';
                root.appendChild(div);
                root.appendChild(Object.assign(document.createElement('div'), { className: 'controls', id: 'controls' }));
                break;
            }
            case 'paragraph': {
                const p = document.createElement('p');
                p.textContent = c.text;
                document.getElementById('controls').appendChild(p);
                break;
            }
            case 'dropdown': {
                const select = document.createElement('select');
                select.id = c.id;
                c.options.forEach(o => select.add(new Option(o, o)));
                select.value = c.value;
                select.addEventListener('change', () => send({ type: 'sensor', value: select.value }));
                document.getElementById('controls').appendChild(select);
                break;
            }
            case 'date_picker_range': {
                const controls = document.getElementById('controls');
                for (const [key, type] of [['start_date', 'range_start'], ['end_date', 'range_end']]) {
                    const input = document.createElement('input');
                    input.type = 'date';
                    input.id = `${c.id}-${key}`;
                    input.min = c.min_date_allowed;
                    input.max = c.max_date_allowed;
                    input.value = c[key];
                    input.addEventListener('change', () => input.value && send({ type, value: input.value }));
                    controls.appendChild(input);
                }
                break;
            }
            case 'placeholder': {
                const div = document.createElement('div');
                div.id = c.id;
                div.className = 'range-text';
                div.textContent = c.text;
                root.appendChild(div);
                break;
            }
        }
    }

    const footer = document.createElement('footer');
    footer.className = 'site-footer';
    footer.innerHTML = '<a href="/docs">API Docs</a>';
    root.appendChild(footer);
}

function renderChart(view) {
    plots.forEach(p => p.destroy());
    plots = [];

    const area = document.getElementById('time-series-chart');
    area.innerHTML = '';

    if (view.status === 'failed') {
        const error = document.createElement('div');
        error.className = 'chart-error';
        error.textContent = view.message;
        area.appendChild(error);
        return;
    }

    const chart = view.chart;
    const rangeMin = new Date(`${chart.x_range.start}T00:00:00Z`).getTime() / 1000;
    const rangeMax = new Date(`${chart.x_range.end}T23:59:59Z`).getTime() / 1000;
    const width = area.clientWidth - 32;
    let colorIdx = 0;

    if (chart.panes.every(p => p.series.every(s => s.x.length === 0))) {
        area.innerHTML = '<div class="chart-empty">No readings in the selected range</div>';
        return;
    }

    const sync = uPlot.sync('panes');
    for (const pane of chart.panes) {
        const div = document.createElement('div');
        div.className = 'pane';
        area.appendChild(div);

        const xs = (pane.series[0]?.x || []).map(t => new Date(t).getTime() / 1000);
        const data = [xs, ...pane.series.map(s => s.y)];
        const opts = {
            width,
            height: Math.round(TOTAL_HEIGHT * pane.height),
            cursor: chart.shared_x ? { sync: { key: sync.key } } : {},
            scales: { x: { time: true, range: () => [rangeMin, rangeMax] } },
            series: [{}, ...pane.series.map(s => ({
                label: s.name,
                stroke: colors[colorIdx++ % colors.length],
                width: 1.5,
                spanGaps: false,
            }))],
        };
        plots.push(new uPlot(opts, data, div));
    }
}

function renderSnapshot(snapshot) {
    const sel = snapshot.selection;
    document.getElementById('sensor').value = sel.selected_sensor;
    document.getElementById('date-range-start_date').value = sel.range_start;
    document.getElementById('date-range-end_date').value = sel.range_end;
    renderChart(snapshot.chart);
}

async function send(event) {
    try {
        const snapshot = await post('/api/selection', event);
        renderSnapshot(snapshot);
        const layout = await api('/api/layout/selected-range');
        document.getElementById('selected-range').textContent = layout.text;
    } catch (e) {
        console.error('Failed to apply selection:', e);
    }
}

async function init() {
    const layout = await api('/api/layout');
    renderLayout(layout);
    renderSnapshot(await api('/api/chart'));
}

init();
</script>
</body>
</html>
"##;
