/// Renders the single-page UI. `api_base_url` is embedded as a JS string
/// literal and prefixed to every `/api/...` request.
pub fn render_index(api_base_url: &str) -> String {
    let literal = serde_json::to_string(api_base_url).unwrap_or_else(|_| "\"\"".to_string());
    INDEX_HTML.replace("\"{{API_BASE}}\"", &literal)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Counters</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
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
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
      width: fit-content;
    }

    .tab {
      background: transparent;
      color: #6b645d;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .error {
      background: #fdecea;
      color: #c63b2b;
      border-radius: 14px;
      padding: 12px 16px;
    }

    .counter-form {
      display: flex;
      gap: 12px;
      flex-wrap: wrap;
    }

    .counter-form input {
      flex: 1 1 240px;
      border-radius: 999px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      padding: 10px 16px;
      font: inherit;
    }

    .btn-primary,
    .btn-increment {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    .btn-decrement {
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
    }

    .btn-secondary {
      background: rgba(47, 72, 88, 0.1);
      color: var(--accent-2);
    }

    .btn-delete {
      background: transparent;
      color: #c63b2b;
      padding: 6px 10px;
    }

    .counters-grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
      gap: 16px;
    }

    .counter-card {
      background: white;
      border-radius: 20px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 12px;
    }

    .counter-header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 8px;
    }

    .counter-name {
      font-weight: 600;
      overflow-wrap: anywhere;
    }

    .counter-value {
      font-size: 2.2rem;
      font-weight: 600;
      color: var(--accent-2);
      text-align: center;
    }

    .counter-controls {
      display: flex;
      gap: 8px;
      justify-content: center;
    }

    .history-header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .history-header h2 {
      margin: 0;
      font-size: 1.4rem;
    }

    .history-list {
      display: grid;
      gap: 10px;
    }

    .history-item {
      background: white;
      border-radius: 16px;
      padding: 12px 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 4px;
    }

    .history-row {
      display: flex;
      justify-content: space-between;
      gap: 12px;
    }

    .history-action.increment {
      color: #2d7a4b;
    }

    .history-action.decrement {
      color: #c63b2b;
    }

    .history-meta {
      color: #7a746d;
      font-size: 0.9rem;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.95rem;
      text-align: center;
    }

    [hidden] {
      display: none !important;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Counters</h1>
      <p class="subtitle">Keep several named counters and a history of every change.</p>
    </header>

    <div id="error" class="error" role="alert" hidden></div>

    <div class="tabs" role="tablist">
      <button class="tab active" type="button" data-tab="counters">Counters</button>
      <button class="tab" type="button" data-tab="history">History</button>
    </div>

    <p id="loading" class="hint">Loading...</p>

    <section id="counters-panel" hidden>
      <form id="counter-form" class="counter-form">
        <input id="counter-name" type="text" maxlength="100" placeholder="New counter name" />
        <button class="btn-primary" type="submit">Add counter</button>
      </form>
      <p id="counters-empty" class="hint" hidden>No counters yet. Create one above.</p>
      <div id="counters" class="counters-grid"></div>
    </section>

    <section id="history-panel" hidden>
      <div class="history-header">
        <h2>Recent changes</h2>
        <button id="history-refresh" class="btn-secondary" type="button">Refresh</button>
      </div>
      <p id="history-empty" class="hint" hidden>No history yet.</p>
      <div id="history" class="history-list"></div>
    </section>
  </main>

  <script>
    const API_BASE = "{{API_BASE}}";

    // status: idle -> loading -> ready; a failed action sets error without
    // dropping the last loaded data.
    const state = {
      status: 'idle',
      counters: [],
      history: [],
      activeTab: 'counters',
      error: ''
    };

    const el = (id) => document.getElementById(id);

    const api = async (path, options = {}) => {
      const res = await fetch(`${API_BASE}${path}`, {
        headers: { 'content-type': 'application/json' },
        ...options
      });
      if (!res.ok) {
        const body = await res.json().catch(() => ({}));
        throw new Error(body.error || `Request failed with ${res.status}`);
      }
      return res.json();
    };

    const setState = (patch) => {
      Object.assign(state, patch);
      render();
    };

    const fail = (message, err) => {
      console.error(message, err);
      setState({ error: message });
    };

    const formatDateTime = (value) =>
      new Date(value).toLocaleString(undefined, {
        year: 'numeric',
        month: '2-digit',
        day: '2-digit',
        hour: '2-digit',
        minute: '2-digit',
        second: '2-digit'
      });

    const button = (label, className, onClick, title) => {
      const node = document.createElement('button');
      node.type = 'button';
      node.className = className;
      node.textContent = label;
      if (title) {
        node.title = title;
      }
      node.addEventListener('click', onClick);
      return node;
    };

    const renderCounter = (counter) => {
      const card = document.createElement('div');
      card.className = 'counter-card';

      const header = document.createElement('div');
      header.className = 'counter-header';
      const name = document.createElement('div');
      name.className = 'counter-name';
      name.textContent = counter.name;
      header.append(name, button('Delete', 'btn-delete', () => deleteCounter(counter.id), 'Delete counter'));

      const value = document.createElement('div');
      value.className = 'counter-value';
      value.textContent = counter.count.toLocaleString();

      const small = document.createElement('div');
      small.className = 'counter-controls';
      small.append(
        button('-1', 'btn-decrement', () => updateCounter(counter.id, counter.count - 1)),
        button('+1', 'btn-increment', () => updateCounter(counter.id, counter.count + 1))
      );

      const large = document.createElement('div');
      large.className = 'counter-controls';
      large.append(
        button('-10', 'btn-decrement', () => updateCounter(counter.id, counter.count - 10)),
        button('Reset', 'btn-secondary', () => updateCounter(counter.id, 0)),
        button('+10', 'btn-increment', () => updateCounter(counter.id, counter.count + 10))
      );

      card.append(header, value, small, large);
      return card;
    };

    const renderHistoryItem = (item) => {
      const row = document.createElement('div');
      row.className = 'history-item';

      const top = document.createElement('div');
      top.className = 'history-row';
      const name = document.createElement('strong');
      name.textContent = item.counter_name;
      const action = document.createElement('span');
      action.className = `history-action ${item.action}`;
      action.textContent = item.action === 'increment' ? 'Increased' : 'Decreased';
      top.append(name, action);

      const meta = document.createElement('div');
      meta.className = 'history-row history-meta';
      const value = document.createElement('span');
      value.textContent = `Value: ${item.count.toLocaleString()}`;
      const at = document.createElement('span');
      at.textContent = formatDateTime(item.created_at);
      meta.append(value, at);

      row.append(top, meta);
      return row;
    };

    const render = () => {
      const ready = state.status !== 'idle' && state.status !== 'loading';

      el('loading').hidden = ready;
      el('error').hidden = !state.error;
      el('error').textContent = state.error;

      document.querySelectorAll('.tab').forEach((tab) => {
        tab.classList.toggle('active', tab.dataset.tab === state.activeTab);
      });
      el('counters-panel').hidden = !ready || state.activeTab !== 'counters';
      el('history-panel').hidden = !ready || state.activeTab !== 'history';

      el('counters-empty').hidden = state.counters.length > 0;
      el('counters').replaceChildren(...state.counters.map(renderCounter));

      el('history-empty').hidden = state.history.length > 0;
      el('history').replaceChildren(...state.history.map(renderHistoryItem));
    };

    const loadCounters = async () => {
      try {
        setState({ counters: await api('/api/counters'), error: '' });
      } catch (err) {
        fail('Failed to load counters', err);
      }
    };

    const loadHistory = async () => {
      try {
        setState({ history: await api('/api/history') });
      } catch (err) {
        console.error('Failed to load history', err);
      }
    };

    const createCounter = async (event) => {
      event.preventDefault();
      const name = el('counter-name').value.trim();
      if (!name) {
        setState({ error: 'Please enter a counter name' });
        return;
      }

      try {
        await api('/api/counters', { method: 'POST', body: JSON.stringify({ name }) });
        el('counter-name').value = '';
        setState({ error: '' });
        await loadCounters();
      } catch (err) {
        fail('Failed to create counter', err);
      }
    };

    const updateCounter = async (id, count) => {
      try {
        await api(`/api/counters/${id}`, { method: 'PUT', body: JSON.stringify({ count }) });
        await Promise.all([loadCounters(), loadHistory()]);
      } catch (err) {
        fail('Failed to update counter', err);
      }
    };

    const deleteCounter = async (id) => {
      if (!window.confirm('Delete this counter?')) {
        return;
      }

      try {
        await api(`/api/counters/${id}`, { method: 'DELETE' });
        await Promise.all([loadCounters(), loadHistory()]);
      } catch (err) {
        fail('Failed to delete counter', err);
      }
    };

    document.querySelectorAll('.tab').forEach((tab) => {
      tab.addEventListener('click', () => setState({ activeTab: tab.dataset.tab }));
    });
    el('counter-form').addEventListener('submit', createCounter);
    el('history-refresh').addEventListener('click', loadHistory);

    const init = async () => {
      setState({ status: 'loading' });
      await Promise.all([loadCounters(), loadHistory()]);
      setState({ status: state.error ? 'error' : 'ready' });
    };

    init();
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_api_base_as_string_literal() {
        let html = render_index("http://localhost:3001");
        assert!(html.contains(r#"const API_BASE = "http://localhost:3001";"#));
        assert!(!html.contains("{{API_BASE}}"));
    }

    #[test]
    fn empty_api_base_means_same_origin() {
        let html = render_index("");
        assert!(html.contains(r#"const API_BASE = "";"#));
    }
}
