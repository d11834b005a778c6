// src/routes/home.rs
//! Homepage describing how to drive the service.

use axum::{extract::State, response::Html, routing::get, Router};

use crate::{config::Config, models::Level, AppState};

/// Client side of the log form, crash button and activity log. Kept out of
/// the `format!` template so its braces need no escaping.
const SCRIPT: &str = r#"<script>
        function logActivity(message) {
            const log = document.getElementById('activityLog');
            const entry = document.createElement('div');
            entry.className = 'activity-entry';
            entry.textContent = message;
            log.appendChild(entry);
            log.scrollTop = log.scrollHeight;
        }

        function request(url, resultId, onError) {
            const result = document.getElementById(resultId);
            logActivity(`Requesting: ${url}`);
            fetch(url)
                .then(response => response.text().then(text => {
                    if (!response.ok) {
                        throw new Error(`HTTP ${response.status}: ${text}`);
                    }
                    return text;
                }))
                .then(text => {
                    result.textContent = text;
                    result.style.display = 'block';
                    logActivity(`Success: ${text}`);
                })
                .catch(error => {
                    result.textContent = `Error: ${error.message}`;
                    result.style.display = 'block';
                    logActivity(onError(error));
                });
        }

        document.getElementById('logForm').addEventListener('submit', event => {
            event.preventDefault();
            const level = document.getElementById('level').value;
            const message = document.getElementById('message').value;
            const count = parseInt(document.getElementById('count').value, 10);
            let url = `/${level}/${encodeURIComponent(message)}/`;
            if (count > 1) {
                url += count;
            }
            request(url, 'logResult', error => `Error: ${error.message}`);
        });

        document.getElementById('crashButton').addEventListener('click', () => {
            const handle = document.getElementById('handle').value;
            request(`/crash/${handle}`, 'crashResult', error => handle === 'fail'
                ? `Crash with propagated error: ${error.message}`
                : `Error during crash request: ${error.message}`);
        });
    </script>"#;

// ---

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(homepage))
}

async fn homepage(State(state): State<AppState>) -> Html<String> {
    Html(render(&state.config))
}

fn render(config: &Config) -> String {
    // ---
    let badges: String = Level::ALL
        .iter()
        .map(|l| format!(r#"<span class="badge {0}">{0}</span>"#, l.as_str()))
        .collect::<Vec<_>>()
        .join("\n        ");
    let options: String = Level::ALL
        .iter()
        .map(|l| {
            let selected = if *l == Level::Info { " selected" } else { "" };
            format!(r#"<option value="{0}"{selected}>{1}</option>"#, l.as_str(), l.as_upper())
        })
        .collect::<Vec<_>>()
        .join("\n                ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Logger Service</title>
    <style>
        body {{ font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; margin: 2rem auto; max-width: 960px; color: #1f2937; }}
        header {{ background: #4f46e5; color: #fff; padding: 1rem 1.5rem; border-radius: 0.5rem; }}
        section {{ margin-top: 1.5rem; }}
        pre {{ background: #f3f4f6; padding: 1rem; border-radius: 0.375rem; overflow-x: auto; }}
        .badge {{ display: inline-block; padding: 0.2rem 0.6rem; border-radius: 9999px; color: #fff; font-size: 0.875rem; }}
        .debug {{ background: #6b7280; }}
        .info {{ background: #3b82f6; }}
        .warning {{ background: #f59e0b; }}
        .error {{ background: #ef4444; }}
        .critical {{ background: #b91c1c; }}
        .card {{ border: 1px solid #e5e7eb; border-radius: 0.5rem; padding: 1rem 1.5rem; }}
        label {{ display: block; margin: 0.5rem 0 0.25rem; font-weight: 500; }}
        select, input, button {{ width: 100%; padding: 0.5rem; border-radius: 0.375rem; border: 1px solid #e5e7eb; font-size: 1rem; }}
        button {{ margin-top: 1rem; background: #4f46e5; color: #fff; cursor: pointer; }}
        button.danger {{ background: #ef4444; }}
        .result {{ display: none; margin-top: 1rem; padding: 0.75rem; background: #f3f4f6; border-radius: 0.375rem; }}
        .activity-log {{ max-height: 200px; overflow-y: auto; font-family: monospace; font-size: 0.875rem; }}
        .activity-entry {{ padding: 0.25rem 0; border-bottom: 1px solid #e5e7eb; }}
    </style>
</head>
<body>
    <header><h1>Logger Service</h1></header>

    <section class="card">
        <h2>Generate Logs</h2>
        <form id="logForm">
            <label for="level">Log Level:</label>
            <select id="level" name="level">
                {options}
            </select>
            <label for="message">Message:</label>
            <input type="text" id="message" name="message" placeholder="Enter log message" required>
            <label for="count">Count:</label>
            <input type="number" id="count" name="count" min="1" max="{max_count}" value="1">
            <button type="submit">Emit Logs</button>
        </form>
        <div id="logResult" class="result"></div>
    </section>

    <section class="card">
        <h2>System Operations</h2>
        <p>Trigger a controlled crash to test error handling and logging.</p>
        <label for="handle">Error Handling:</label>
        <select id="handle" name="handle">
            <option value="">Catch Error (Default)</option>
            <option value="fail">Propagate Error</option>
        </select>
        <button type="button" id="crashButton" class="danger">Trigger Crash</button>
        <div id="crashResult" class="result"></div>
    </section>

    <section class="card">
        <h2>Activity Log</h2>
        <div class="activity-log" id="activityLog">
            <div class="activity-entry">Session started</div>
        </div>
    </section>

    <section>
        <h2>HTTP Endpoints</h2>
        <pre>GET /{{level}}/{{message}}/             - Emit a log with specified level and message
GET /{{level}}/{{message}}/{{count}}      - Emit the same log count times
GET /crash/                         - Trigger a controlled crash (caught)
GET /crash/fail                     - Trigger a crash that propagates (HTTP 500)
GET /health                         - Liveness check</pre>
    </section>

    <section>
        <h2>Valid Log Levels</h2>
        {badges}
    </section>

    <section>
        <h2>Periodic Heartbeat</h2>
        <p>Every <strong>{interval}s</strong> at level <strong>{level}</strong>: <code>{message}</code></p>
    </section>

    <section>
        <h2>Configuration Parameters</h2>
        <pre>--periodic-log-level     PERIODIC_LOG_LEVEL     Severity level for periodic logs (default: info)
--periodic-log-message   PERIODIC_LOG_MESSAGE   Message for periodic logs (default: System heartbeat)
--periodic-log-interval  PERIODIC_LOG_INTERVAL  Seconds between periodic logs (default: 10)
--host                   HOST                   Host for the webserver (default: 0.0.0.0)
--port                   PORT                   Port for the webserver (default: 5000)
--debug                  DEBUG                  Verbose logging for every component (default: false)
--log-format             LOG_FORMAT             compact or json (default: compact)
--max-emit-count         MAX_EMIT_COUNT         Largest accepted count (default: 10000)
--handled-crash-status   HANDLED_CRASH_STATUS   Status of GET /crash/ (default: 200)</pre>
    </section>
    {SCRIPT}
</body>
</html>
"#,
        max_count = config.max_emit_count,
        interval = config.heartbeat.interval.as_secs_f64(),
        level = config.heartbeat.level.as_upper(),
        message = escape_html(&config.heartbeat.message),
    )
}

fn escape_html(raw: &str) -> String {
    // ---
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_render_has_interactive_controls() {
        // ---
        let page = render(&Config::default());
        for id in [
            r#"id="logForm""#,
            r#"id="crashButton""#,
            r#"id="activityLog""#,
            r#"<option value="fail">"#,
        ] {
            assert!(page.contains(id), "missing {id}");
        }
        for level in Level::ALL {
            assert!(page.contains(&format!(r#"<option value="{}""#, level.as_str())));
        }
    }

    #[test]
    fn test_render_shows_heartbeat_settings() {
        // ---
        let mut config = Config::default();
        config.heartbeat.message = "<beat> & co".to_string();

        let page = render(&config);
        assert!(page.contains("Every <strong>10s</strong> at level <strong>INFO</strong>"));
        assert!(page.contains("<code>&lt;beat&gt; &amp; co</code>"));
        assert!(page.contains("GET /{level}/{message}/{count}"));
        assert!(page.contains(r#"<input type="number" id="count" name="count" min="1" max="10000" value="1">"#));
        assert!(page.contains(r#"<option value="info" selected>INFO</option>"#));
        assert!(page.contains("encodeURIComponent(message)"));
        assert!(page.contains("</script>"));
        for level in Level::ALL {
            assert!(page.contains(&format!(r#"class="badge {0}">{0}<"#, level.as_str())));
        }
    }
}
