use crate::models::{JournalEntry, MoodId, TagId, score_label};
use crate::stats::{Insight, WeekDay};
use chrono::NaiveDate;
use maud::{Markup, html};
use strum::IntoEnumIterator;

pub struct IndexView<'a> {
    pub today: NaiveDate,
    pub dark_mode: bool,
    pub today_mood: Option<MoodId>,
    pub recent: &'a [JournalEntry],
    pub week: Vec<WeekDay>,
    pub insights: Vec<Insight>,
}

pub fn render_index(view: &IndexView<'_>) -> String {
    INDEX_HTML
        .replace("{{THEME_CLASS}}", if view.dark_mode { "dark" } else { "" })
        .replace("{{THEME_ICON}}", if view.dark_mode { "☀️" } else { "🌙" })
        .replace("{{DATE}}", &view.today.format("%A, %B %-d, %Y").to_string())
        .replace("{{TODAY_STATUS}}", &today_status(view.today_mood))
        .replace("{{MOOD_BUTTONS}}", &mood_buttons(view.today_mood).into_string())
        .replace("{{MOOD_OPTIONS}}", &mood_options().into_string())
        .replace("{{TAG_OPTIONS}}", &tag_options().into_string())
        .replace("{{WEEK}}", &week_strip(&view.week).into_string())
        .replace("{{INSIGHTS}}", &insight_list(&view.insights).into_string())
        // entry text goes in last so no later substitution can reach into it
        .replace("{{RECENT}}", &recent_entries(view.recent).into_string())
}

fn today_status(mood: Option<MoodId>) -> String {
    match mood {
        Some(mood) => format!(
            "Today: {} {} ({})",
            mood.emoji(),
            mood.label(),
            score_label(mood.score())
        ),
        None => "No check-in yet today.".to_string(),
    }
}

fn mood_key(mood: &MoodId) -> &str {
    mood.as_ref()
}

fn tag_key(tag: &TagId) -> &str {
    tag.as_ref()
}

fn mood_buttons(selected: Option<MoodId>) -> Markup {
    html! {
        @for mood in MoodId::iter() {
            form method="post" action="/mood" {
                button class=(if Some(mood) == selected { "mood selected" } else { "mood" })
                    type="submit" name="mood" value=(mood_key(&mood)) title=(mood.label()) {
                    (mood.emoji())
                }
            }
        }
    }
}

fn mood_options() -> Markup {
    html! {
        @for mood in MoodId::iter() {
            label.chip {
                input type="radio" name="mood" value=(mood_key(&mood));
                " " (mood.emoji())
            }
        }
    }
}

fn tag_options() -> Markup {
    html! {
        @for tag in TagId::iter() {
            label.chip {
                input type="checkbox" name="tags" value=(tag_key(&tag));
                " " (tag.label())
            }
        }
    }
}

fn recent_entries(entries: &[JournalEntry]) -> Markup {
    html! {
        @if entries.is_empty() {
            p.empty { "Your memories will appear here. Start writing!" }
        } @else {
            @for entry in entries {
                article.memory {
                    div.memory-head {
                        span.memory-date { (entry.local_date) }
                        span.memory-mood { (entry.mood.map(MoodId::emoji).unwrap_or("")) }
                        form method="post" action={ "/entries/" (entry.id) "/delete" } {
                            button.delete type="submit" aria-label="Delete entry" { "✕" }
                        }
                    }
                    div.memory-tags {
                        @for tag in &entry.tags {
                            span.tag { (tag.label()) }
                        }
                    }
                    p.memory-text { (entry.text) }
                }
            }
        }
    }
}

fn week_strip(week: &[WeekDay]) -> Markup {
    html! {
        @for day in week {
            div.week-day {
                span.label { (day.label) }
                span.week-mood { (day.mood.map(MoodId::emoji).unwrap_or("—")) }
            }
        }
    }
}

fn insight_list(insights: &[Insight]) -> Markup {
    html! {
        @for insight in insights {
            div.insight {
                span.insight-icon { (insight.icon) }
                " " (insight.text)
            }
        }
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en" class="{{THEME_CLASS}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>My Journal</title>
  <style>
    :root {
      --bg: #f5f3ff;
      --card: #ffffff;
      --ink: #2e2a3d;
      --muted: #6b6580;
      --accent: #c026d3;
      --accent-soft: #fae8ff;
      --border: #ddd6fe;
      --shadow: 0 18px 40px rgba(91, 33, 182, 0.12);
    }

    html.dark {
      --bg: #1e1033;
      --card: #2a1745;
      --ink: #f5f3ff;
      --muted: #c4b5fd;
      --accent: #e879f9;
      --accent-soft: #4a1d5e;
      --border: #6b21a8;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 28px 16px 48px;
    }

    .app {
      max-width: 1100px;
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      color: var(--accent);
    }

    h2 {
      margin: 0 0 14px;
      font-size: 1.1rem;
    }

    .subtitle,
    .empty,
    .hint {
      color: var(--muted);
      margin: 4px 0 0;
    }

    .columns {
      display: grid;
      grid-template-columns: 2fr 1fr;
      gap: 24px;
    }

    .stack {
      display: grid;
      gap: 24px;
      align-content: start;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 22px;
    }

    .moods {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    button {
      font: inherit;
      cursor: pointer;
    }

    .mood {
      width: 54px;
      height: 54px;
      font-size: 1.6rem;
      border-radius: 14px;
      border: 2px solid transparent;
      background: var(--accent-soft);
    }

    .mood.selected {
      border-color: var(--accent);
    }

    .chips {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
      margin-bottom: 12px;
    }

    .chip {
      background: var(--accent-soft);
      border-radius: 10px;
      padding: 6px 10px;
      font-size: 0.9rem;
    }

    textarea {
      width: 100%;
      min-height: 140px;
      padding: 14px;
      border-radius: 14px;
      border: 2px solid var(--border);
      background: transparent;
      color: var(--ink);
      font: inherit;
      resize: vertical;
    }

    .primary {
      width: 100%;
      margin-top: 12px;
      padding: 12px;
      border: none;
      border-radius: 14px;
      background: var(--accent);
      color: #fff;
    }

    .memories {
      display: grid;
      gap: 12px;
    }

    .memory {
      border-left: 4px solid var(--accent);
      background: var(--accent-soft);
      border-radius: 12px;
      padding: 12px 14px;
    }

    .memory-head {
      display: flex;
      gap: 10px;
      align-items: center;
    }

    .memory-date {
      flex: 1;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .memory-text {
      white-space: pre-wrap;
      margin: 8px 0 0;
    }

    .tag {
      font-size: 0.75rem;
      margin-right: 6px;
    }

    .delete {
      border: none;
      background: none;
      color: #e11d48;
    }

    .week {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .week-day {
      text-align: center;
      background: var(--accent-soft);
      border-radius: 10px;
      padding: 6px 2px;
      display: grid;
      gap: 4px;
    }

    .label {
      font-size: 0.75rem;
      color: var(--muted);
    }

    .insight {
      border-left: 4px solid var(--accent);
      background: var(--accent-soft);
      border-radius: 10px;
      padding: 10px;
      margin-bottom: 8px;
    }

    .quote-text {
      font-style: italic;
      text-align: center;
    }

    .quote-author {
      text-align: center;
      color: var(--muted);
    }

    .tabs {
      display: flex;
      gap: 8px;
      margin-bottom: 12px;
    }

    .tab {
      border: 1px solid var(--border);
      background: transparent;
      color: var(--ink);
      border-radius: 999px;
      padding: 4px 12px;
    }

    .tab.active {
      background: var(--accent);
      color: #fff;
    }

    svg text {
      fill: var(--muted);
      font-size: 11px;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
    }

    .chart-point {
      fill: var(--accent);
    }

    .chart-grid {
      stroke: var(--border);
      stroke-dasharray: 4 6;
    }

    .bars {
      display: grid;
      gap: 6px;
    }

    .bar-row {
      display: grid;
      grid-template-columns: 110px 1fr 28px;
      gap: 8px;
      align-items: center;
      font-size: 0.85rem;
    }

    .bar {
      height: 10px;
      border-radius: 6px;
      background: var(--accent);
    }

    .calendar-nav {
      display: flex;
      justify-content: space-between;
      align-items: center;
      margin-bottom: 10px;
    }

    .calendar-grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
      text-align: center;
    }

    .cell {
      min-height: 42px;
      border-radius: 8px;
      background: var(--accent-soft);
      border: none;
      color: var(--ink);
      padding: 4px 0;
    }

    .cell.has-entry {
      outline: 2px solid var(--accent);
    }

    .cell.placeholder {
      background: transparent;
    }

    @media (max-width: 860px) {
      .columns {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>My Journal</h1>
        <p class="subtitle">{{DATE}}</p>
      </div>
      <form method="post" action="/theme">
        <button class="mood" type="submit" aria-label="Toggle dark mode">{{THEME_ICON}}</button>
      </form>
    </header>

    <div class="columns">
      <div class="stack">
        <section class="card">
          <h2>How are you feeling right now?</h2>
          <div class="moods">{{MOOD_BUTTONS}}</div>
          <p class="hint">{{TODAY_STATUS}}</p>
        </section>

        <section class="card">
          <h2>What's on your mind?</h2>
          <form method="post" action="/entries">
            <p class="label">Add how you're feeling:</p>
            <div class="chips">{{MOOD_OPTIONS}}</div>
            <p class="label">Tags:</p>
            <div class="chips">{{TAG_OPTIONS}}</div>
            <textarea name="text" placeholder="Write your thoughts..."></textarea>
            <button class="primary" type="submit">Save to Journal ✨</button>
          </form>
        </section>

        <section class="card">
          <h2>Recent Memories</h2>
          <div class="memories">{{RECENT}}</div>
        </section>

        <section class="card">
          <h2 id="trend-title">Mood trend</h2>
          <div class="tabs" role="tablist">
            <button class="tab active" type="button" data-days="7">7 days</button>
            <button class="tab" type="button" data-days="30">30 days</button>
          </div>
          <svg id="trend-chart" viewBox="0 0 600 240" role="img" aria-label="Mood trend"></svg>
        </section>

        <section class="card">
          <h2>Mood distribution</h2>
          <div class="bars" id="distribution"></div>
        </section>
      </div>

      <div class="stack">
        <section class="card">
          <p class="quote-text" id="quote-text">Loading inspiration...</p>
          <p class="quote-author" id="quote-author"></p>
          <button class="primary" type="button" id="quote-refresh">🔄 New Quote</button>
        </section>

        <section class="card">
          <h2>This Week's Journey</h2>
          <div class="week">{{WEEK}}</div>
        </section>

        <section class="card">
          <h2>Insights</h2>
          {{INSIGHTS}}
        </section>

        <section class="card">
          <h2>Reflections</h2>
          <div id="full-insights"></div>
        </section>

        <section class="card">
          <div class="calendar-nav">
            <button class="tab" type="button" id="prev-month">‹</button>
            <h2 id="calendar-title">Calendar</h2>
            <button class="tab" type="button" id="next-month">›</button>
          </div>
          <div class="calendar-grid" id="calendar"></div>
          <div id="day-detail" class="hint"></div>
        </section>
      </div>
    </div>
  </main>

  <script>
    const scoreLabels = ['', 'Low', 'Sad', 'Neutral', 'Good', 'Great'];
    const trendChart = document.getElementById('trend-chart');
    const tabs = Array.from(document.querySelectorAll('.tab[data-days]'));
    let catalog = null;
    let calendarMonth = null;

    const escapeHtml = (value) => String(value)
      .replace(/&/g, '&amp;')
      .replace(/</g, '&lt;')
      .replace(/>/g, '&gt;')
      .replace(/"/g, '&quot;');

    const getJson = async (url) => {
      const res = await fetch(url);
      if (!res.ok) {
        throw new Error(`Request to ${url} failed`);
      }
      return res.json();
    };

    const moodEmoji = (id) => {
      const mood = catalog && catalog.moods.find((m) => m.id === id);
      return mood ? mood.emoji : '';
    };

    const renderTrend = (points) => {
      const width = 600;
      const height = 240;
      const padX = 50;
      const padY = 30;
      const xStep = points.length > 1 ? (width - padX * 2) / (points.length - 1) : 0;
      const x = (i) => padX + i * xStep;
      const y = (score) => height - padY - (score / 6) * (height - padY * 2);

      let grid = '';
      for (let score = 1; score <= 5; score += 1) {
        grid += `<line class="chart-grid" x1="${padX}" y1="${y(score)}" x2="${width - padX}" y2="${y(score)}" />`;
        grid += `<text x="${padX - 8}" y="${y(score) + 4}" text-anchor="end">${scoreLabels[score]}</text>`;
      }

      // days without a check-in break the line
      let path = '';
      let pen = false;
      points.forEach((point, i) => {
        if (point.score === null) {
          pen = false;
          return;
        }
        path += `${pen ? 'L' : 'M'} ${x(i).toFixed(1)} ${y(point.score).toFixed(1)} `;
        pen = true;
      });

      const dots = points
        .map((point, i) => point.score === null ? '' : `<circle class="chart-point" cx="${x(i)}" cy="${y(point.score)}" r="4" />`)
        .join('');
      const every = points.length > 10 ? Math.ceil(points.length / 8) : 1;
      const labels = points
        .map((point, i) => i % every === 0 ? `<text x="${x(i)}" y="${height - 8}" text-anchor="middle">${point.label}</text>` : '')
        .join('');

      trendChart.innerHTML = `${grid}<path class="chart-line" d="${path}" />${dots}${labels}`;
    };

    const loadTrend = async (days) => {
      tabs.forEach((tab) => tab.classList.toggle('active', tab.dataset.days === String(days)));
      renderTrend(await getJson(`/api/trends?days=${days}`));
    };

    const loadDistribution = async () => {
      const counts = await getJson('/api/distribution');
      const max = Math.max(1, ...Object.values(counts));
      document.getElementById('distribution').innerHTML = catalog.moods
        .map((mood) => {
          const count = counts[mood.id] || 0;
          return `<div class="bar-row"><span>${mood.emoji} ${mood.label}</span><div class="bar" style="width:${(count / max) * 100}%"></div><span>${count}</span></div>`;
        })
        .join('');
    };

    const loadFullInsights = async () => {
      const insights = await getJson('/api/insights?detail=full');
      document.getElementById('full-insights').innerHTML = insights
        .map((insight) => `<div class="insight"><span class="insight-icon">${insight.icon}</span> ${escapeHtml(insight.text)}</div>`)
        .join('');
    };

    const showDay = async (date) => {
      const cell = await getJson(`/api/calendar/${date}`);
      const parts = [date];
      if (cell.mood) {
        parts.push(`${moodEmoji(cell.mood.mood)} mood`);
      }
      parts.push(cell.entry ? escapeHtml(cell.entry.text) : 'No entry for this day.');
      document.getElementById('day-detail').innerHTML = parts.join(' · ');
    };

    const loadCalendar = async (year, month) => {
      const query = year ? `?year=${year}&month=${month}` : '';
      calendarMonth = await getJson(`/api/calendar${query}`);
      document.getElementById('calendar-title').textContent = calendarMonth.label;
      const header = calendarMonth.weekdays.map((day) => `<span class="label">${day}</span>`).join('');
      const cells = calendarMonth.cells
        .map((cell) => {
          if (!cell) {
            return '<span class="cell placeholder"></span>';
          }
          const dayNumber = Number(cell.date.slice(8));
          const mood = cell.mood ? moodEmoji(cell.mood.mood) : '';
          const cls = cell.entry ? 'cell has-entry' : 'cell';
          return `<button class="${cls}" type="button" data-date="${cell.date}">${dayNumber}<br />${mood}</button>`;
        })
        .join('');
      const grid = document.getElementById('calendar');
      grid.innerHTML = header + cells;
      grid.querySelectorAll('button[data-date]').forEach((button) => {
        button.addEventListener('click', () => showDay(button.dataset.date).catch(console.error));
      });
    };

    const loadQuote = async () => {
      document.getElementById('quote-text').textContent = 'Loading inspiration...';
      const quote = await getJson('/api/quote');
      document.getElementById('quote-text').textContent = `"${quote.text}"`;
      document.getElementById('quote-author').textContent = `— ${quote.author}`;
    };

    tabs.forEach((tab) => {
      tab.addEventListener('click', () => loadTrend(Number(tab.dataset.days)).catch(console.error));
    });
    document.getElementById('prev-month').addEventListener('click', () => {
      loadCalendar(calendarMonth.previous.year, calendarMonth.previous.month).catch(console.error);
    });
    document.getElementById('next-month').addEventListener('click', () => {
      loadCalendar(calendarMonth.next.year, calendarMonth.next.month).catch(console.error);
    });
    document.getElementById('quote-refresh').addEventListener('click', () => loadQuote().catch(console.error));

    const start = async () => {
      catalog = await getJson('/api/catalog');
      await Promise.all([loadTrend(7), loadDistribution(), loadFullInsights(), loadCalendar()]);
    };

    start().catch(console.error);
    loadQuote().catch(console.error);
  </script>
</body>
</html>
"#;
