use crate::models::{TodaySummary, UserProfile};

pub fn render_index(greeting: &str, user: &UserProfile, today: &TodaySummary) -> String {
    INDEX_HTML
        .replace("{{GREETING}}", &escape_html(greeting))
        .replace("{{NAME}}", &escape_html(&user.name))
        .replace(
            "{{SCHOOL}}",
            &escape_html(&format!("{} • {}", user.school, user.grade)),
        )
        .replace("{{SCORE}}", &today.green_score.to_string())
        .replace("{{CO2}}", &format!("{:.2}", today.carbon.total_kg))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Green Track</title>
  <style>
    :root {
      --canopy: #1f6f43;
      --leaf: #3fa86b;
      --mist: #eef8f1;
      --ink: #1d2a22;
      --warn: #d9822b;
      --bad: #c0392b;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--mist), #ffffff 70%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 28px 16px 48px;
    }

    .app {
      width: min(920px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 20px;
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 22px;
      box-shadow: 0 16px 40px rgba(31, 111, 67, 0.12);
    }

    .hero {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 16px;
    }

    .score {
      font-size: 3rem;
      font-weight: 700;
      color: var(--canopy);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 14px;
    }

    .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #6b7d72;
    }

    .value {
      font-size: 1.5rem;
      font-weight: 600;
    }

    .bars {
      display: flex;
      align-items: flex-end;
      gap: 8px;
      height: 140px;
    }

    .bar {
      flex: 1;
      border-radius: 8px 8px 0 0;
      background: var(--leaf);
    }

    .bar.ok {
      background: var(--warn);
    }

    .bar.bad {
      background: var(--bad);
    }

    form {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 12px;
    }

    input,
    select,
    button {
      font: inherit;
      padding: 10px;
      border-radius: 10px;
      border: 1px solid #cfe3d6;
    }

    button {
      background: var(--canopy);
      color: white;
      border: none;
      cursor: pointer;
    }

    #result {
      white-space: pre-line;
    }
  </style>
</head>
<body>
  <main class="app">
    <section class="card hero">
      <div>
        <div class="label">{{GREETING}}</div>
        <h1>{{NAME}}</h1>
        <div>{{SCHOOL}}</div>
      </div>
      <div>
        <div class="label">Green Score</div>
        <div class="score" id="score">{{SCORE}}</div>
        <div><span id="co2">{{CO2}}</span> kg CO₂ today</div>
      </div>
    </section>

    <section class="card grid">
      <div><div class="label">This week</div><div class="value" id="week-avg">-</div></div>
      <div><div class="label">vs last week</div><div class="value" id="compare">-</div></div>
      <div><div class="label">Trees saved</div><div class="value" id="trees">-</div></div>
      <div><div class="label">Plastic avoided</div><div class="value" id="plastic">-</div></div>
    </section>

    <section class="card">
      <div class="label">Last 7 days</div>
      <div class="bars" id="bars"></div>
      <p id="tip"></p>
    </section>

    <section class="card">
      <div class="label">Log today</div>
      <form id="log-form">
        <select name="transport">
          <option>walk</option><option>bicycle</option><option>bus</option>
          <option>motorbike</option><option>car</option>
        </select>
        <input name="km" type="number" min="0" step="0.5" value="5" placeholder="km" />
        <input name="electricity_hours" type="number" min="0" step="0.5" value="3" placeholder="hours of electricity" />
        <select name="food">
          <option>vegetarian</option><option>vegan</option><option>meat</option>
        </select>
        <input name="plastic_items" type="number" min="0" step="1" value="0" placeholder="plastic items" />
        <input name="shower_minutes" type="number" min="0" step="1" value="8" placeholder="shower minutes" />
        <button type="submit">Save</button>
      </form>
      <p id="result"></p>
    </section>
  </main>

  <script>
    const $ = (id) => document.getElementById(id);

    const loadDashboard = async () => {
      const res = await fetch('/api/dashboard/demo_user');
      if (!res.ok) {
        throw new Error('Unable to load dashboard');
      }
      const data = await res.json();
      const week = data.week_summary;
      $('score').textContent = data.today.green_score;
      $('co2').textContent = data.today.carbon.total_kg.toFixed(2);
      $('week-avg').textContent = `${week.avg_carbon_kg.toFixed(2)} kg`;
      $('compare').textContent = `${week.improvement_pct > 0 ? '+' : ''}${week.improvement_pct}%`;
      $('trees').textContent = data.eco_impact.trees_equivalent;
      $('plastic').textContent = data.eco_impact.plastic_avoided;
      $('tip').textContent = data.daily_tip;

      const days = data.history_30d.slice(-7);
      const max = Math.max(...days.map((d) => d.carbon_kg), 0.1);
      $('bars').innerHTML = days
        .map((d) => `<div class="bar ${d.band}" style="height:${(d.carbon_kg / max) * 100}%" title="${d.date}: ${d.carbon_kg} kg"></div>`)
        .join('');
    };

    $('log-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const form = new FormData(event.target);
      const body = {
        transport: form.get('transport'),
        km: Number(form.get('km')),
        electricity_hours: Number(form.get('electricity_hours')),
        food: form.get('food'),
        plastic_items: Number(form.get('plastic_items')),
        shower_minutes: Number(form.get('shower_minutes'))
      };
      $('result').textContent = 'Saving...';
      const res = await fetch('/api/log-activity', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      if (!res.ok) {
        $('result').textContent = await res.text();
        return;
      }
      const out = await res.json();
      $('result').textContent = `${out.title}\nScore ${out.green_score}, ${out.carbon.total_kg} kg CO₂\n${out.ai_feedback}`;
      loadDashboard().catch((err) => ($('result').textContent = err.message));
    });

    loadDashboard().catch((err) => ($('tip').textContent = err.message));
  </script>
</body>
</html>
"#;
